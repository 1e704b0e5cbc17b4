//! Resolution of image URLs into encoded bytes.
//!
//! The editor stores a background as a URL string. Export re-fetches it through an
//! [`ImageLoader`], since the interactive background never lives in a canvas pixel buffer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::foundation::error::{BoothError, BoothResult};

/// Fetch encoded image bytes for a URL.
pub trait ImageLoader: Send + Sync {
    /// Return raw encoded bytes (PNG, JPEG, SVG, ...) for `url`.
    fn load_bytes(&self, url: &str) -> BoothResult<Vec<u8>>;
}

/// Loader rooted at a directory on disk.
///
/// Accepts `data:` URIs, `file://` URLs, and paths relative to the root. Remote schemes are
/// rejected with a decode error so the caller can fall back to "no background".
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Create a loader that resolves relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory for relative paths.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLoader for FsLoader {
    fn load_bytes(&self, url: &str) -> BoothResult<Vec<u8>> {
        let url = strip_css_url(url);
        if url.starts_with("data:") {
            return decode_data_uri(url);
        }
        let path = if let Some(rest) = url.strip_prefix("file://") {
            PathBuf::from(rest)
        } else if url.contains("://") {
            return Err(BoothError::decode(format!(
                "unsupported image url scheme: '{url}'"
            )));
        } else {
            self.root.join(normalize_rel_path(url)?)
        };
        std::fs::read(&path)
            .map_err(|e| BoothError::decode(format!("failed to read '{}': {e}", path.display())))
    }
}

/// In-memory loader keyed by exact URL; `data:` URIs are decoded directly.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for `url`, replacing any previous entry.
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }
}

impl ImageLoader for MemoryLoader {
    fn load_bytes(&self, url: &str) -> BoothResult<Vec<u8>> {
        let url = strip_css_url(url);
        if url.starts_with("data:") {
            return decode_data_uri(url);
        }
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| BoothError::decode(format!("no image registered for '{url}'")))
    }
}

/// Strip a CSS `url(...)` wrapper, with or without quotes. Other input is returned trimmed.
pub fn strip_css_url(value: &str) -> &str {
    let v = value.trim();
    let Some(inner) = v.strip_prefix("url(").and_then(|s| s.strip_suffix(')')) else {
        return v;
    };
    let inner = inner.trim();
    for q in ['"', '\''] {
        if let Some(unquoted) = inner.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return unquoted;
        }
    }
    inner
}

/// Decode a `data:` URI (base64 or percent-encoded payload).
pub fn decode_data_uri(uri: &str) -> BoothResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| BoothError::decode("not a data URI"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| BoothError::decode("invalid data URI: missing comma"))?;

    if meta.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| BoothError::decode(format!("invalid base64 payload: {e}")))
    } else {
        percent_decode(payload)
    }
}

fn percent_decode(input: &str) -> BoothResult<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| BoothError::decode("invalid percent-encoding in data URI"))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Normalize and validate loader-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> BoothResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BoothError::decode("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(BoothError::decode("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BoothError::decode("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BoothError::decode("image path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
