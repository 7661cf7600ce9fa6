//! Tools backed by the optional local trademark database.

pub mod wordmark;

pub use wordmark::{StatusFilter, WordmarkSearchParams, WordmarkSearchTool};
