//! Drives the end-to-end pipeline: for every measurement kind and every
//! requested operation, compute per-file results, write the report, and
//! optionally compute and write the aggregate over all files of the kind.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;

use crate::data::MeasurementSet;
use crate::defaults;
use crate::report::{self, ReportError};
use crate::stats::{CalcContext, StatsFunc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "Success",
            RunStatus::Error => "Error",
        }
    }
}

/// Summary of one run, handed back to the driver. The driver only displays
/// `message` and branches on `status`.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub status: RunStatus,
    pub message: String,
}

pub struct CalculationProcessor {
    output_dir: PathBuf,
    context: CalcContext,
}

impl CalculationProcessor {
    pub fn new(root: &Path) -> CalculationProcessor {
        CalculationProcessor {
            output_dir: root.join(defaults::RESULT_DIR),
            context: CalcContext::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run every requested operation over every kind with files. Unknown
    /// operation names and files without values are skipped silently. The
    /// first write failure aborts the remaining work; reports already
    /// written stay in place.
    pub fn process_calculations(
        &mut self,
        measurement_files: &MeasurementSet,
        operations: &[String],
        use_global: bool,
    ) -> ProcessOutcome {
        match self.run(measurement_files, operations, use_global) {
            Ok(()) => ProcessOutcome {
                status: RunStatus::Success,
                message: format!(
                    "The calculations were successfully performed. Folder containing results: {}",
                    self.output_dir.display()
                ),
            },
            Err(err) => ProcessOutcome {
                status: RunStatus::Error,
                message: format!(
                    "An error occurred during the calculation: {err}. Please try again."
                ),
            },
        }
    }

    fn run(
        &mut self,
        measurement_files: &MeasurementSet,
        operations: &[String],
        use_global: bool,
    ) -> Result<(), ReportError> {
        for (kind, files) in measurement_files.iter() {
            if files.is_empty() {
                continue;
            }

            for operation in operations {
                let func = match StatsFunc::from_name(operation) {
                    Some(func) => func,
                    None => {
                        debug!("Skipping unrecognized operation '{operation}'");
                        continue;
                    }
                };
                self.context.bind(func);
                debug!("Calculating {} for {}", func.file_stem(), kind.as_str());

                let file_results = files
                    .iter()
                    .filter_map(|file| {
                        let values = file.values();
                        if values.is_empty() {
                            return None;
                        }
                        self.context.calculate(&values).map(|result| (file, result))
                    })
                    .collect_vec();

                report::write_file_result(&self.output_dir, kind, func, &file_results)?;

                if use_global {
                    let all_values = files.iter().flat_map(|file| file.values()).collect_vec();
                    if !all_values.is_empty() {
                        if let Some(result) = self.context.calculate(&all_values) {
                            report::write_global_result(&self.output_dir, kind, func, &result)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_collection_succeeds_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut processor = CalculationProcessor::new(dir.path());

        let outcome = processor.process_calculations(
            &MeasurementSet::new(),
            &["average".to_string()],
            true,
        );

        assert_eq!(outcome.status, RunStatus::Success);
        assert!(outcome
            .message
            .contains(&processor.output_dir().display().to_string()));
        assert!(!dir.path().join(defaults::RESULT_DIR).exists());
    }

    #[test]
    fn status_strings() {
        assert_eq!(RunStatus::Success.as_str(), "Success");
        assert_eq!(RunStatus::Error.as_str(), "Error");
    }
}
