//! Client for browsing a route tree served by the directory middleware.
//!
//! # Data Flow
//! ```text
//! stat(name)     → HEAD <base>/<name>  → headers → FileInfo (cached 1s)
//! read_dir(name) → GET  <base>/<name>  → {"dir":[...]} → stat(each child)
//! read(name)     → GET  <base>/<name>  → body bytes
//! ```
//!
//! Works against any server that speaks the listing format, not only this
//! crate's middleware.

pub mod error;
pub mod info;

use std::time::{Duration, Instant};

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use reqwest::{header::CONTENT_TYPE, Response, StatusCode};
use url::Url;

use crate::http::response::{DirectoryBody, DIRECTORY_MEDIA_TYPE};

pub use error::{FsError, FsResult};
pub use info::FileInfo;

/// How long a stat result is reused.
pub const STAT_TTL: Duration = Duration::from_secs(1);

struct CachedStat {
    info: FileInfo,
    fetched_at: Instant,
}

/// Read-only view of a remote route tree.
pub struct HttpFs {
    base_url: String,
    client: reqwest::Client,
    stat_cache: DashMap<String, CachedStat>,
    started: DateTime<Utc>,
    dir_media_type: String,
}

impl HttpFs {
    pub fn new(base_url: &str) -> FsResult<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> FsResult<Self> {
        let parsed = Url::parse(base_url)?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            client,
            stat_cache: DashMap::new(),
            started: Utc::now(),
            dir_media_type: DIRECTORY_MEDIA_TYPE.to_string(),
        })
    }

    /// Expect a different media type for directory responses.
    pub fn with_dir_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.dir_media_type = media_type.into();
        self
    }

    /// Absolute URL for a path relative to the base (`.` is the root).
    pub fn url(&self, name: &str) -> String {
        let name = if name == "." { "" } else { name };
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }

    /// Metadata for a path, from a `HEAD` request.
    pub async fn stat(&self, name: &str) -> FsResult<FileInfo> {
        if let Some(cached) = self.stat_cache.get(name) {
            if cached.fetched_at.elapsed() < STAT_TTL {
                return Ok(cached.info.clone());
            }
        }

        let response = self.client.head(self.url(name)).send().await?;
        let response = check_status(name, response)?;

        let info = FileInfo::from_headers(
            name,
            response.headers(),
            self.started,
            &self.dir_media_type,
        );
        tracing::debug!(path = %name, is_dir = info.is_dir, size = info.size, "Stat fetched");

        self.stat_cache.insert(
            name.to_string(),
            CachedStat {
                info: info.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(info)
    }

    /// Child names of a directory as served (`name/` marks subdirectories).
    pub async fn list(&self, name: &str) -> FsResult<Vec<String>> {
        let response = self.client.get(self.url(name)).send().await?;
        let response = check_status(name, response)?;

        let is_listing = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .eq_ignore_ascii_case(&self.dir_media_type)
            })
            .unwrap_or(false);
        if !is_listing {
            return Err(FsError::NotADirectory(name.to_string()));
        }

        let bytes = response.bytes().await?;
        let body: DirectoryBody = serde_json::from_slice(&bytes)?;
        Ok(body.dir)
    }

    /// Metadata of every child of a directory.
    pub async fn read_dir(&self, name: &str) -> FsResult<Vec<FileInfo>> {
        let mut out = Vec::new();
        for child in self.list(name).await? {
            out.push(self.stat(&join_path(name, &child)).await?);
        }
        Ok(out)
    }

    /// Full body of a path.
    pub async fn read(&self, name: &str) -> FsResult<Bytes> {
        let response = self.client.get(self.url(name)).send().await?;
        let response = check_status(name, response)?;
        Ok(response.bytes().await?)
    }
}

fn check_status(name: &str, response: Response) -> FsResult<Response> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(FsError::NotFound(name.to_string())),
        status if status.is_success() => Ok(response),
        status => Err(FsError::Status {
            path: name.to_string(),
            status: status.as_u16(),
        }),
    }
}

/// Join a directory and a child entry, dropping separators at the seams.
pub fn join_path(dir: &str, child: &str) -> String {
    let dir = dir.trim_matches('/');
    let child = child.trim_matches('/');
    if dir.is_empty() || dir == "." {
        child.to_string()
    } else {
        format!("{}/{}", dir, child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let fs = HttpFs::new("http://localhost:5000/").unwrap();
        assert_eq!(fs.url("."), "http://localhost:5000/");
        assert_eq!(fs.url(""), "http://localhost:5000/");
        assert_eq!(fs.url("/greet/hello"), "http://localhost:5000/greet/hello");
        assert_eq!(fs.url("greet"), "http://localhost:5000/greet");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(HttpFs::new("not a url"), Err(FsError::InvalidUrl(_))));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(".", "greet/"), "greet");
        assert_eq!(join_path("", "random"), "random");
        assert_eq!(join_path("greet", "hello"), "greet/hello");
        assert_eq!(join_path("/greet/", "/deep/"), "greet/deep");
    }
}
