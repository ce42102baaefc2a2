//! API-level constants.

/// Viewer page the resolver redirects to; receives the signed URL as the
/// `file` query parameter.
pub const RECEIVER_PAGE: &str = "/receiver.html";

/// Page shown for expired or unknown links; receives a `reason` query
/// parameter (`notfound` | `expired`).
pub const EXPIRED_PAGE: &str = "/expired.html";

/// Accepted multipart field names for the uploaded file. The historical UI
/// sent everything (including video) under `audio`; newer clients use `file`.
pub const UPLOAD_FIELD_NAMES: [&str; 2] = ["audio", "file"];

/// Body served for unmatched routes. Static assets are served by the
/// fronting layer; this is the minimal inline fallback.
pub const NOT_FOUND_PAGE: &str = "\
<!doctype html>\n\
<html><head><meta charset=\"utf-8\"><title>Link unavailable</title></head>\n\
<body><p>This link does not exist or has expired.</p></body></html>\n";
