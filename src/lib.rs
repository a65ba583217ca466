//! Media type resolution from file extensions and binary signatures.

pub mod error;
pub mod io;
pub mod mime;
pub mod options;
pub mod registry;
pub mod sniff;

pub use error::{Error, Result};
pub use mime::{MimeType, extension_of};
pub use options::SniffOptions;
pub use sniff::{SNIFF_LEN, detect, guess};
