//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{load_file, parse_bytes};
pub use source::SourceMetadata;
