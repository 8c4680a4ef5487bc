//! Infrastructure layer: key-value storage, roster persistence, exports.

pub mod export;
pub mod repository;
pub mod storage;

pub use export::{ExportError, MealReport, REPORT_PDF_FILE_NAME, ReportRow};
pub use repository::{ROSTER_KEY, RosterRepository};
pub use storage::{InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore, StorageError};
