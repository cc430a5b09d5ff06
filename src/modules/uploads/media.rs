use crate::shared::constants::VIDEO_SIZE_HEURISTIC_BYTES;

/// Media classification for an uploaded file.
///
/// Informational only: classification feeds logging and the stored-name key
/// prefix chosen by callers, it never blocks a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "mkv", "avi", "m4v"];

/// Classify by MIME prefix first, then filename extension, then a size
/// heuristic (anything over 1MB is plausibly video).
pub fn classify_media(content_type: Option<&str>, file_name: &str, size: usize) -> MediaKind {
    if let Some(mime) = content_type {
        if mime.starts_with("image/") {
            return MediaKind::Image;
        }
        if mime.starts_with("video/") {
            return MediaKind::Video;
        }
    }

    if let Some(ext) = file_name.rsplit('.').next().filter(|e| *e != file_name) {
        let ext = ext.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return MediaKind::Image;
        }
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            return MediaKind::Video;
        }
    }

    if size > VIDEO_SIZE_HEURISTIC_BYTES {
        return MediaKind::Video;
    }

    MediaKind::Unknown
}
