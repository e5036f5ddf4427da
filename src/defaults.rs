//! Fixed layout tokens of the measurement tree and the report files.
//! These must match the existing on-disk conventions of the data producers
//! and any downstream consumers of the reports.

/// Input subdirectory holding temperature measurement files.
pub const TEMPERATURE_DIR: &str = "sıcaklık";

/// Input subdirectory holding humidity measurement files.
pub const HUMIDITY_DIR: &str = "nem";

/// Extension of files considered measurement input by the scan.
pub const MEASUREMENT_EXTENSION: &str = "txt";

/// Directory under the measurement root that receives all reports.
pub const RESULT_DIR: &str = "result";

/// Suffix of per-file report names, appended to the operation stem.
pub const PER_FILE_REPORT_SUFFIX: &str = "degerler.txt";

/// Prefix of aggregate report names.
pub const GLOBAL_REPORT_PREFIX: &str = "global";

/// Separator line between per-file frequency blocks.
pub const FREQUENCY_SEPARATOR: &str = "---------------";
