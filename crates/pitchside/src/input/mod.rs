//! Delimited-file input: parsing and source metadata.

mod parser;
mod source;

pub use parser::{hash_file, Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
