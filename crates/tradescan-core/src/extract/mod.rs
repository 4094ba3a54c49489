//! Trade field extraction from OCR transcripts.

mod builder;
pub mod derived;
mod extractor;
pub mod line;
pub mod rules;

pub use builder::RecordBuilder;
pub use extractor::{ExtractionReport, TradeRecordExtractor};
pub use line::Line;
