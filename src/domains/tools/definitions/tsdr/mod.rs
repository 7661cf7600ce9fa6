//! USPTO TSDR API tools.
//!
//! - `serial`: full case record by serial number
//! - `registration`: full case record by registration number
//! - `status`: quick status from the HTML status page
//! - `image`: mark drawing URL
//! - `documents`: document bundle URL
//!
//! All of them require `USPTO_API_KEY`.

pub mod common;
pub mod documents;
pub mod image;
pub mod registration;
pub mod serial;
pub mod status;

pub use common::ResponseFormat;
pub use documents::{DocumentsParams, DocumentsTool};
pub use image::{ImageParams, ImageTool};
pub use registration::{RegistrationLookupParams, RegistrationLookupTool};
pub use serial::{SerialLookupParams, SerialLookupTool};
pub use status::{StatusParams, StatusTool};
