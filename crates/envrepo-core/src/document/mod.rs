//! Structured property values
//!
//! Rows whose key names a document (`app.yml`, `app.properties`) carry a whole
//! configuration file in their value. This module detects the format, parses
//! the text and flattens nested mappings into dotted keys.

mod error;
mod node;
mod format;
mod flatten;
mod yaml;
mod properties;

pub use error::ParseError;
pub use node::NestedNode;
pub use format::DocumentFormat;
pub use flatten::flatten;
pub use yaml::parse_yaml;
pub use properties::parse_properties;
