//! MIME-type registry (§2): loads the canonical extension→MIME-type
//! table used by the MIME/URI-mismatch modifier, and mirrors it into
//! `metadatabase.valid_mime_types`.

pub mod csv;
pub mod registry;
pub mod store;

pub use csv::{load, MimeTypeExtension};
pub use registry::{extension_from_uri, Registry};
pub use store::sync_registry;
