//! Async loading of the input collections
//! Reads every input file concurrently before the synchronous passes start

pub mod loader;

pub use loader::{
    Collections, load_collections, load_csv_collection, load_json_collection, sanitize_non_finite,
};
