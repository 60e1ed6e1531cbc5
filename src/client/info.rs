//! File metadata derived from response headers.
//!
//! # Header Mapping
//! ```text
//! Content-Disposition: ...; filename="x"  → name
//! Content-Length                          → size
//! Last-Modified (RFC 1123)                → modified
//! Content-Type == directory media type    → is_dir, mode 0755
//! Content-Permissions (octal)             → mode
//! ```
//! Missing or malformed headers keep the defaults: base name of the path,
//! size 0, mode 0644, and the client's start time.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED};

/// Non-standard header carrying octal permission bits.
pub const CONTENT_PERMISSIONS: &str = "content-permissions";

pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Metadata of a remote file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Permission bits (no file-type bits).
    pub mode: u32,
    pub modified: DateTime<Utc>,
    pub is_dir: bool,
}

impl FileInfo {
    pub fn from_headers(
        path: &str,
        headers: &HeaderMap,
        default_modified: DateTime<Utc>,
        dir_media_type: &str,
    ) -> Self {
        let mut info = Self {
            name: base_name(path).to_string(),
            size: 0,
            mode: DEFAULT_FILE_MODE,
            modified: default_modified,
            is_dir: false,
        };

        if let Some(name) = header_str(headers, CONTENT_DISPOSITION.as_str())
            .and_then(disposition_filename)
        {
            info.name = name;
        }

        if let Some(size) = header_str(headers, CONTENT_LENGTH.as_str())
            .and_then(|v| v.trim().parse().ok())
        {
            info.size = size;
        }

        if let Some(modified) = header_str(headers, LAST_MODIFIED.as_str())
            .and_then(|v| DateTime::parse_from_rfc2822(v.trim()).ok())
        {
            info.modified = modified.with_timezone(&Utc);
        }

        if header_str(headers, CONTENT_TYPE.as_str())
            .map(|v| media_type_essence(v).eq_ignore_ascii_case(dir_media_type))
            .unwrap_or(false)
        {
            info.is_dir = true;
            info.mode = DEFAULT_DIR_MODE;
        }

        if let Some(mode) = header_str(headers, CONTENT_PERMISSIONS)
            .and_then(|v| u32::from_str_radix(v.trim(), 8).ok())
        {
            info.mode = mode;
        }

        info
    }

    /// `ls -l` style mode string, e.g. `drwxr-xr-x`.
    pub fn mode_string(&self) -> String {
        let mut out = String::with_capacity(10);
        out.push(if self.is_dir { 'd' } else { '-' });
        for shift in [6, 3, 0] {
            let bits = (self.mode >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Last non-empty path component; `.` for the root.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(".")
}

fn media_type_essence(value: &str) -> &str {
    value.split(';').next().unwrap_or_default().trim()
}

fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("filename"))
        .map(|(_, v)| v.trim().trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
