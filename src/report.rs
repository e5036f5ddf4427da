//! Serializes per-file and aggregate results into the report tree.
//!
//! Reports land under `<output_root>/<kind>/`, one file per (kind, function)
//! pair. A rerun overwrites existing reports, last run wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;

use crate::data::{MeasurementFile, MeasurementKind};
use crate::defaults;
use crate::stats::{StatsFunc, StatsResult, ValueKey};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create report directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write report {path}: {source}")]
    WriteReport { path: PathBuf, source: io::Error },
}

/// Metadata line prefixed to per-file report entries. Absent fields print as
/// "unknown". The label tokens are fixed for compatibility with existing
/// report consumers.
pub fn format_file_metadata(file: &MeasurementFile) -> String {
    fn or_unknown(field: Option<&str>) -> &str {
        field.unwrap_or("unknown")
    }

    let metadata = &file.metadata;
    format!(
        "id:{} ölçüm: {} - yer: {} - tarih: {}",
        or_unknown(metadata.id.as_deref()),
        or_unknown(metadata.kind.as_deref()),
        or_unknown(metadata.location.as_deref()),
        or_unknown(metadata.date.as_deref()),
    )
}

fn frequency_lines(counts: &BTreeMap<ValueKey, u64>, kind: MeasurementKind) -> String {
    counts
        .iter()
        .map(|(value, count)| format!("{value} {} {count} defa ölçüldü", kind.unit_label()))
        .join("\n")
}

fn report_dir(output_root: &Path, kind: MeasurementKind) -> Result<PathBuf, ReportError> {
    let dir = output_root.join(kind.as_str());
    fs::create_dir_all(&dir).map_err(|source| ReportError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the per-file report for one (kind, function) pair. Scalar results
/// become one `<metadata> , <formatted>` line per file; frequency results
/// become a metadata line, the unit-annotated count lines in ascending value
/// order, and a separator line per file.
pub fn write_file_result(
    output_root: &Path,
    kind: MeasurementKind,
    func: StatsFunc,
    file_results: &[(&MeasurementFile, StatsResult)],
) -> Result<(), ReportError> {
    let dir = report_dir(output_root, kind)?;
    let path = dir.join(format!(
        "{}{}",
        func.file_stem(),
        defaults::PER_FILE_REPORT_SUFFIX
    ));

    let mut out = String::new();
    for (file, result) in file_results {
        match result {
            StatsResult::Frequency(counts) => {
                out.push_str(&format_file_metadata(file));
                out.push('\n');
                out.push_str(&frequency_lines(counts, kind));
                out.push('\n');
                out.push_str(defaults::FREQUENCY_SEPARATOR);
                out.push('\n');
            }
            StatsResult::Scalar(_) => {
                out.push_str(&format!(
                    "{} , {}\n",
                    format_file_metadata(file),
                    func.format_result(result)
                ));
            }
        }
    }

    write_report(&path, &out)
}

/// Write the aggregate report for one (kind, function) pair. The aggregate
/// has no single file identity, so frequency output carries no metadata line.
pub fn write_global_result(
    output_root: &Path,
    kind: MeasurementKind,
    func: StatsFunc,
    result: &StatsResult,
) -> Result<(), ReportError> {
    let dir = report_dir(output_root, kind)?;
    let path = dir.join(format!(
        "{}{}.txt",
        defaults::GLOBAL_REPORT_PREFIX,
        func.file_stem()
    ));

    let contents = match result {
        StatsResult::Frequency(counts) => frequency_lines(counts, kind),
        StatsResult::Scalar(_) => func.format_result(result),
    };

    write_report(&path, &contents)
}
