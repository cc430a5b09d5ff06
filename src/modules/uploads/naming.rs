use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

lazy_static! {
    /// Anything outside the allowed filename alphabet becomes a separator
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9.]+").unwrap();
    static ref SEPARATOR_RUNS: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Process-wide counter folded into the short hash so that two files with the
/// same name arriving in the same millisecond still get distinct stored names.
static UPLOAD_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Reduce an arbitrary client-supplied file name to `[a-z0-9.-]`.
///
/// Lowercases, replaces disallowed characters with `-`, collapses separator
/// runs, and strips leading/trailing dots and dashes. A name with nothing
/// left after sanitizing becomes `file`.
pub fn sanitize_file_name(original: &str) -> String {
    let lowered = original.to_lowercase();
    let replaced = DISALLOWED.replace_all(&lowered, "-");
    let collapsed = SEPARATOR_RUNS.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches(|c| c == '.' || c == '-');

    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the collision-resistant stored name:
/// `{key_prefix}-{timestamp_millis}-{short_hash}-{sanitized_original}`.
pub fn derive_file_name(key_prefix: &str, original: &str, timestamp_millis: i64) -> String {
    let sequence = UPLOAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(timestamp_millis.to_le_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(original.as_bytes());
    let short_hash = &hex::encode(hasher.finalize())[..6];

    format!(
        "{}-{}-{}-{}",
        key_prefix,
        timestamp_millis,
        short_hash,
        sanitize_file_name(original)
    )
}
