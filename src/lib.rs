// CAN capture pressure reader
// Main library entry point

pub mod core;

// Re-export main types
pub use crate::core::config::DecodeConfig;
pub use crate::core::constants::Dialect;
pub use crate::core::data_handle::handle_ws_fetch;
pub use crate::core::error::{CanLogError, Result};
pub use crate::core::format::{AxisRange, DecodedSample, FileResult, RawRow, RowTable, SampleSeries};
pub use crate::core::pipeline::{process_batch, process_capture, CaptureInput, ResultCache};
pub use crate::core::reader::CaptureReader;
