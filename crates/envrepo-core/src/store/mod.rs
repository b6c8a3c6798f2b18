//! Row store abstractions and implementations
//!
//! A row store answers one parameterized lookup against the properties table:
//! given a SQL template and an (application, profile, label) triple it returns
//! the matching key/value rows in store order.
//! - `RowStore` trait for implementing custom stores
//! - Built-in implementations: `MemoryRowStore`, `FnRowStore`
//! - A registry for creating stores by name

mod traits;
mod memory_store;
mod fn_store;
mod registry;

pub use traits::{RowStore, QueryParams, StoreError, StoreResult};
pub use memory_store::{MemoryRowStore, PropertyRow};
pub use fn_store::FnRowStore;
pub use registry::{
    register_row_store, create_row_store, list_row_stores, has_row_store,
    unregister_row_store, shared_memory_store, StoreDefinition, StoreFactory,
};
