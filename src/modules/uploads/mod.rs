//! Uploads module for property media
//!
//! Turns uploaded binary blobs into stable, cache-busted public URLs under a
//! per-property directory on local disk.

mod manager;
mod media;
mod naming;

pub use manager::{BatchUploadOutcome, UploadManager, UploadedFile};
pub use media::{classify_media, MediaKind};
pub use naming::{derive_file_name, sanitize_file_name};
