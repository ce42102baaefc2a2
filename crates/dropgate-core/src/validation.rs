//! Upload validation and content-type normalization.

use crate::AppError;

/// Accepted MIME prefixes for uploads.
const ALLOWED_MIME_PREFIXES: [&str; 3] = ["image/", "audio/", "video/"];

/// Extensions whose stored content type is always forced to `video/mp4`.
/// Browsers and some clients declare `.mp4` recordings as `audio/mp4`,
/// which makes downstream players treat them as audio-only.
const FORCED_VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "m4v", "3gp", "3gpp"];

/// Reject content types outside `image/`, `audio/`, `video/`.
pub fn check_mime_prefix(content_type: &str) -> Result<(), AppError> {
    if ALLOWED_MIME_PREFIXES
        .iter()
        .any(|p| content_type.starts_with(p))
    {
        Ok(())
    } else {
        Err(AppError::UnsupportedFileType(content_type.to_string()))
    }
}

/// Reject payloads over the configured size limit. Runs before any storage
/// write.
pub fn check_size(size: usize, max: usize) -> Result<(), AppError> {
    if size > max {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            size, max
        )));
    }
    Ok(())
}

/// Replace runs of characters outside `[A-Za-z0-9_.-]` in a filename with a
/// single `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let mut cleaned = String::with_capacity(filename.len());
    let mut in_bad_run = false;
    for c in filename.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
            cleaned.push(c);
            in_bad_run = false;
        } else if !in_bad_run {
            cleaned.push('_');
            in_bad_run = true;
        }
    }
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Content type to store, given the sanitized filename and the declared MIME.
/// Known video extensions override the declaration.
pub fn normalize_content_type(filename: &str, declared: &str) -> String {
    let ext = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if FORCED_VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return "video/mp4".to_string();
    }
    if declared.is_empty() {
        "application/octet-stream".to_string()
    } else {
        declared.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_prefix_accepts_media_only() {
        assert!(check_mime_prefix("image/png").is_ok());
        assert!(check_mime_prefix("audio/mpeg").is_ok());
        assert!(check_mime_prefix("video/webm").is_ok());
        assert!(check_mime_prefix("application/pdf").is_err());
        assert!(check_mime_prefix("text/html").is_err());
        assert!(check_mime_prefix("").is_err());
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_size(26 * 1024 * 1024, 26 * 1024 * 1024).is_ok());
        assert!(check_size(26 * 1024 * 1024 + 1, 26 * 1024 * 1024).is_err());
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("my clip (1).mp4"), "my_clip_1_.mp4");
        assert_eq!(sanitize_filename("ok-name_1.png"), "ok-name_1.png");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn bad_character_runs_collapse_to_one_underscore() {
        assert_eq!(sanitize_filename("a   b.png"), "a_b.png");
        assert_eq!(sanitize_filename("tape #7 — final.mp3"), "tape_7_final.mp3");
        // A literal underscore is kept and ends the run.
        assert_eq!(sanitize_filename("a _ b"), "a___b");
    }

    #[test]
    fn mp4_declared_as_audio_becomes_video() {
        assert_eq!(normalize_content_type("clip.mp4", "audio/mp4"), "video/mp4");
        assert_eq!(normalize_content_type("clip.MOV", "video/quicktime"), "video/mp4");
        assert_eq!(normalize_content_type("a.3gpp", "audio/3gpp"), "video/mp4");
    }

    #[test]
    fn non_video_extensions_keep_declared_type() {
        assert_eq!(normalize_content_type("a.png", "image/png"), "image/png");
        assert_eq!(normalize_content_type("a.mp3", "audio/mpeg"), "audio/mpeg");
        assert_eq!(
            normalize_content_type("noext", ""),
            "application/octet-stream"
        );
    }
}
