pub mod csv;
pub mod files;
pub mod json;
pub mod recorder;

pub use self::csv::CsvRecorder;
pub use recorder::{MemoryRecorder, Recorder, RecordingSummary};
