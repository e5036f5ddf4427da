//! Best-effort parsing of measurement files and the directory scan.
//!
//! The reader never fails: malformed headers degrade to partial metadata,
//! unparseable lines are skipped with a warning, and I/O failures keep
//! whatever was parsed before the failure.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;

use crate::data::{FileMetadata, Measurement, MeasurementFile, MeasurementKind, MeasurementSet};
use crate::defaults;

const TYPE_MARKER: &str = "ölçüm:";
const ID_MARKER: &str = "id:";
const LOCATION_MARKER: &str = "yer:";
const DATE_MARKER: &str = "tarih:";

/// Parse the header line of a measurement file.
///
/// Up to three ` - `-delimited segments: `id:<id> ölçüm: <type>`,
/// `yer:<location>`, `tarih:<date>`. Absent or malformed segments leave the
/// corresponding fields unset.
pub fn parse_metadata(header_line: &str) -> FileMetadata {
    let mut metadata = FileMetadata::default();
    let parts: Vec<&str> = header_line.trim().split(" - ").collect();

    if let Some(first) = parts.first() {
        let first = first.trim();
        if first.contains(ID_MARKER) {
            let id_section = first.split(TYPE_MARKER).next().unwrap_or("").trim();
            if id_section.contains(ID_MARKER) {
                metadata.id = Some(id_section.replace(ID_MARKER, "").trim().to_string());
            }
        }
        if let Some(kind) = first.split(TYPE_MARKER).nth(1) {
            metadata.kind = Some(kind.trim().to_string());
        }
    }

    if let Some(part) = parts.get(1) {
        if part.contains(LOCATION_MARKER) {
            if let Some(location) = part.split(':').nth(1) {
                metadata.location = Some(location.trim().to_string());
            }
        }
    }

    if let Some(part) = parts.get(2) {
        if part.contains(DATE_MARKER) {
            if let Some(date) = part.split(':').nth(1) {
                metadata.date = Some(date.trim().to_string());
            }
        }
    }

    metadata
}

/// Read one measurement file. An empty file yields empty metadata and no
/// measurements. Data lines split at the first `,` into a time token and a
/// value; blank lines and lines without a `,` are skipped silently.
pub fn read_file(path: &Path) -> MeasurementFile {
    let mut measurement_file = MeasurementFile::new(path);

    let handle = match File::open(path) {
        Ok(handle) => handle,
        Err(err) => {
            warn!("Cannot open {}: {err}", path.display());
            return measurement_file;
        }
    };

    let mut lines = BufReader::new(handle).lines();

    match lines.next() {
        None => return measurement_file,
        Some(Err(err)) => {
            warn!("Cannot read header of {}: {err}", path.display());
            return measurement_file;
        }
        Some(Ok(header)) => measurement_file.metadata = parse_metadata(&header),
    }

    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(
                    "Read error in {}: {err}, keeping partially parsed data",
                    path.display()
                );
                break;
            }
        };

        let Some((time, value)) = line.trim().split_once(',') else {
            continue;
        };

        match value.trim().parse::<f64>() {
            Ok(value) => measurement_file.add_measurement(Measurement {
                time: time.trim().to_string(),
                value,
            }),
            Err(err) => {
                warn!(
                    "Cannot parse value '{}' in {}: {err}, skipping line",
                    value.trim(),
                    path.display()
                );
            }
        }
    }

    measurement_file
}

/// Scan the two fixed measurement subdirectories under `root`. A missing
/// subdirectory yields an empty list for that kind; traversal failures are
/// logged and skipped. Files are read in directory-listing order.
pub fn scan_directory(root: &Path) -> MeasurementSet {
    let mut set = MeasurementSet::new();

    for kind in MeasurementKind::ALL {
        let dir = root.join(kind.input_dir());
        if !dir.is_dir() {
            continue;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Cannot list {}: {err}", dir.display());
                continue;
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    warn!("Cannot read entry in {}: {err}", dir.display());
                    continue;
                }
            };
            if path.extension().and_then(|ext| ext.to_str())
                == Some(defaults::MEASUREMENT_EXTENSION)
            {
                set.push(kind, read_file(&path));
            }
        }
    }

    set
}
