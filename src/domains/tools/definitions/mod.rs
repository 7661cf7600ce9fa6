//! Tool definitions module.
//!
//! One file per tool, grouped by backing service:
//! - `database/`: wordmark search over the optional local database
//! - `tsdr/`: lookups against the USPTO TSDR API

pub mod common;
pub mod database;
pub mod tsdr;

pub use database::{StatusFilter, WordmarkSearchParams, WordmarkSearchTool};
pub use tsdr::{
    DocumentsParams, DocumentsTool, ImageParams, ImageTool, RegistrationLookupParams,
    RegistrationLookupTool, ResponseFormat, SerialLookupParams, SerialLookupTool, StatusParams,
    StatusTool,
};
