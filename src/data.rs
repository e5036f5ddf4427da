use std::path::{Path, PathBuf};

use crate::defaults;

/// The two fixed measurement categories. The kind determines the input
/// subdirectory searched by the scan, the report subdirectory, and the unit
/// label in frequency reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Temperature,
    Humidity,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 2] = [MeasurementKind::Temperature, MeasurementKind::Humidity];

    /// Name of the per-kind report subdirectory.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::Humidity => "humidity",
        }
    }

    /// Input subdirectory name under the measurement root.
    pub fn input_dir(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature => defaults::TEMPERATURE_DIR,
            MeasurementKind::Humidity => defaults::HUMIDITY_DIR,
        }
    }

    /// Unit label inserted between value and count in frequency report lines.
    pub fn unit_label(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "Derece",
            MeasurementKind::Humidity => "%",
        }
    }
}

/// A single timestamped reading. The time token is opaque and never parsed
/// further.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub time: String,
    pub value: f64,
}

/// Header metadata of a measurement file. Absent header segments leave the
/// corresponding field unset; "unknown" substitution happens only when a
/// report line is formatted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMetadata {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

/// One parsed source file: its location, header metadata, and readings in
/// file line order. Only mutated while the file is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementFile {
    pub path: PathBuf,
    pub metadata: FileMetadata,
    measurements: Vec<Measurement>,
}

impl MeasurementFile {
    pub fn new(path: &Path) -> MeasurementFile {
        MeasurementFile {
            path: path.to_path_buf(),
            metadata: FileMetadata::default(),
            measurements: Vec::new(),
        }
    }

    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// The ordered numeric values, the unit of computation for all statistics.
    pub fn values(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.value).collect()
    }
}

/// All parsed files of one scan, one ordered list per measurement kind.
/// Built once by the scan and treated as read-only afterwards.
#[derive(Debug, Default)]
pub struct MeasurementSet {
    temperature: Vec<MeasurementFile>,
    humidity: Vec<MeasurementFile>,
}

impl MeasurementSet {
    pub fn new() -> MeasurementSet {
        MeasurementSet::default()
    }

    pub fn push(&mut self, kind: MeasurementKind, file: MeasurementFile) {
        match kind {
            MeasurementKind::Temperature => self.temperature.push(file),
            MeasurementKind::Humidity => self.humidity.push(file),
        }
    }

    pub fn files(&self, kind: MeasurementKind) -> &[MeasurementFile] {
        match kind {
            MeasurementKind::Temperature => &self.temperature,
            MeasurementKind::Humidity => &self.humidity,
        }
    }

    /// Iterate kinds in fixed order, temperature first.
    pub fn iter(&self) -> impl Iterator<Item = (MeasurementKind, &[MeasurementFile])> {
        MeasurementKind::ALL.iter().map(move |&kind| (kind, self.files(kind)))
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty() && self.humidity.is_empty()
    }
}
