//! Media location resolution.
//!
//! A video's `media_location` is either a URL whose last path segment names a
//! file under the media root, or a bare filename. Only the final segment is
//! ever used, so a hostile location cannot escape the root.

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("video has no media attached")]
    Missing,
    #[error("media file not found: {0}")]
    NotFound(String),
    #[error("media location is not resolvable: {0}")]
    InvalidLocation(String),
}

/// Maps stored media locations to files on local disk.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    media_root: PathBuf,
}

impl MediaResolver {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Resolve a location to an existing file under the media root.
    pub async fn resolve(&self, location: Option<&str>) -> Result<PathBuf, MediaError> {
        let location = location.ok_or(MediaError::Missing)?;

        let file_name = Self::file_name(location)
            .ok_or_else(|| MediaError::InvalidLocation(location.to_string()))?;
        let path = self.media_root.join(&file_name);

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(MediaError::NotFound(location.to_string())),
        }
    }

    /// Final path segment of the location, URL or not.
    fn file_name(location: &str) -> Option<String> {
        let candidate = match Url::parse(location) {
            Ok(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default()
                .to_string(),
            Err(_) => location.to_string(),
        };

        // Strip any directory components a raw path might carry.
        let name = Path::new(&candidate)
            .file_name()?
            .to_str()?
            .to_string();
        if name.is_empty() || name == "." || name == ".." {
            None
        } else {
            Some(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn resolver_with_file(name: &str) -> (tempfile::TempDir, MediaResolver) {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(name), b"media").await.unwrap();
        let resolver = MediaResolver::new(dir.path());
        (dir, resolver)
    }

    #[tokio::test]
    async fn bare_filename_resolves() {
        let (_dir, resolver) = resolver_with_file("clip.mp4").await;
        let path = resolver.resolve(Some("clip.mp4")).await.unwrap();
        assert!(path.ends_with("clip.mp4"));
    }

    #[tokio::test]
    async fn url_location_uses_last_segment() {
        let (_dir, resolver) = resolver_with_file("clip.mp4").await;
        let path = resolver
            .resolve(Some("https://cdn.example.com/media/uploads/clip.mp4"))
            .await
            .unwrap();
        assert!(path.ends_with("clip.mp4"));
    }

    #[tokio::test]
    async fn missing_location_is_missing() {
        let (_dir, resolver) = resolver_with_file("clip.mp4").await;
        assert!(matches!(
            resolver.resolve(None).await,
            Err(MediaError::Missing)
        ));
    }

    #[tokio::test]
    async fn absent_file_is_not_found() {
        let (_dir, resolver) = resolver_with_file("clip.mp4").await;
        assert!(matches!(
            resolver.resolve(Some("other.mp4")).await,
            Err(MediaError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn traversal_components_are_stripped() {
        let (_dir, resolver) = resolver_with_file("clip.mp4").await;
        let path = resolver
            .resolve(Some("../../etc/../clip.mp4"))
            .await
            .unwrap();
        assert!(path.starts_with(resolver.media_root()));
        assert!(path.ends_with("clip.mp4"));
    }
}
