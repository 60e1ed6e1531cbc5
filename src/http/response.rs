//! Directory and not-found responses.
//!
//! # Wire Format
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/vnd.httpfs.v1+json
//!
//! {"dir":["greet/","random"]}
//! ```
//!
//! A trailing `/` marks an entry with further content beneath it. The
//! vendor media type lets clients tell listings apart from ordinary JSON.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routing::Listing;

/// Media type identifying a directory listing.
pub const DIRECTORY_MEDIA_TYPE: &str = "application/vnd.httpfs.v1+json";

/// Body of a directory response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryBody {
    #[serde(default)]
    pub dir: Vec<String>,
}

impl From<&Listing> for DirectoryBody {
    fn from(listing: &Listing) -> Self {
        Self {
            dir: listing.entries(),
        }
    }
}

/// Render a listing with the given content type.
///
/// An unusable content type falls back to [`DIRECTORY_MEDIA_TYPE`].
pub fn directory_response(listing: &Listing, content_type: &str) -> Response {
    let content_type = HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DIRECTORY_MEDIA_TYPE));

    let mut response = Json(DirectoryBody::from(listing)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    response
}

pub fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
