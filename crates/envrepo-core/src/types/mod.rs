//! Core types shared by the resolver, the stores and the document parsers
//!
//! This module contains the request-scoped data model: lookup keys, row batches
//! and the resolved environment handed to consumers.

mod lookup;
mod environment;

pub use lookup::{LookupKey, RowBatch};
pub use environment::{ConfigGroup, Environment};
