//! Resolved media type
//!
//! `MimeType` is a validated `(type, subtype, extension)` triple. Every
//! constructor is total: input the registry does not know resolves to
//! `application/octet-stream` with no extension.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::error::{Error, Result};
use crate::registry::{self, DEFAULT_ESSENCE};

/// A media type resolved against the registry.
///
/// The strings it carries are slices of the static registry table, so the
/// value is `Copy` and cheap to pass around.
///
/// # Example
///
/// ```
/// use mimesniff::MimeType;
///
/// let mime = MimeType::new("text", "html", None);
/// assert_eq!(mime.to_string(), "text/html");
/// assert_eq!(mime.extension(), Some("html"));
///
/// let fallback = MimeType::new("invalid-type", "invalid-subtype", None);
/// assert!(fallback.is_default());
/// assert_eq!(fallback.extension(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MimeType {
    essence: &'static str,
    extension: Option<&'static str>,
}

impl MimeType {
    /// Resolves `type/subtype` with an optional extension hint.
    ///
    /// A hint is kept only if it is registered for the pair; otherwise the
    /// canonical extension is used. Without a hint the canonical extension is
    /// used, except for `application/octet-stream` which then has none.
    pub fn new(type_: &str, subtype: &str, ext: Option<&str>) -> Self {
        Self::resolve(&format!("{type_}/{subtype}"), ext)
    }

    /// Resolves a combined `type/subtype` string.
    ///
    /// Anything other than two non-empty parts around a single `/` resolves to
    /// the default type.
    pub fn from_essence(essence: &str, ext: Option<&str>) -> Self {
        if split_essence(essence).is_some() {
            Self::resolve(essence, ext)
        } else {
            trace!(essence, "malformed media type, using default");
            Self::default()
        }
    }

    /// Resolves a bare file extension (no leading dot), case-sensitively.
    pub fn from_extension(ext: &str) -> Self {
        match registry::type_subtype(ext) {
            Some(essence) => Self::from_essence(essence, Some(ext)),
            None => {
                trace!(ext, "unknown extension, using default");
                Self::default()
            }
        }
    }

    /// Resolves by the extension of the final segment of `path`.
    ///
    /// See [`extension_of`] for how the extension is extracted.
    pub fn from_path(path: &str) -> Self {
        Self::from_extension(extension_of(path))
    }

    /// Resolves by the path component of a URL, ignoring query and fragment.
    ///
    /// The scheme and authority never contribute an extension, so a bare host
    /// such as `https://example.dev` resolves to the default.
    pub fn from_url(url: &str) -> Self {
        let end = url.find(['?', '#']).unwrap_or(url.len());
        Self::from_path(url_path(&url[..end]))
    }

    /// Sniffs `bytes` for a known binary signature.
    pub fn guess(bytes: &[u8]) -> Self {
        crate::sniff::guess(bytes)
    }

    fn resolve(essence: &str, hint: Option<&str>) -> Self {
        let Some((key, exts)) = registry::lookup(essence) else {
            trace!(essence, "unregistered media type, using default");
            return Self::default();
        };

        let extension = match hint {
            Some(hint) => exts
                .iter()
                .copied()
                .find(|ext| *ext == hint)
                .or_else(|| exts.first().copied()),
            None if key == DEFAULT_ESSENCE => None,
            None => exts.first().copied(),
        };

        Self {
            essence: key,
            extension,
        }
    }

    pub fn type_(&self) -> &'static str {
        split_essence(self.essence).map_or(self.essence, |(ty, _)| ty)
    }

    pub fn subtype(&self) -> &'static str {
        split_essence(self.essence).map_or(self.essence, |(_, sub)| sub)
    }

    /// The `type/subtype` string.
    pub fn essence(&self) -> &'static str {
        self.essence
    }

    pub fn extension(&self) -> Option<&'static str> {
        self.extension
    }

    /// Every extension registered for this media type, canonical one first.
    pub fn extensions(&self) -> &'static [&'static str] {
        registry::extensions(self.essence)
    }

    /// True for `application/octet-stream`.
    pub fn is_default(&self) -> bool {
        self.essence == DEFAULT_ESSENCE
    }
}

impl Default for MimeType {
    fn default() -> Self {
        Self {
            essence: DEFAULT_ESSENCE,
            extension: None,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.essence)
    }
}

/// Strict parsing: unlike [`MimeType::from_essence`] this reports why the
/// string could not be resolved.
impl FromStr for MimeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if split_essence(s).is_none() {
            return Err(Error::Malformed(s.to_string()));
        }
        if registry::lookup(s).is_none() {
            return Err(Error::Unregistered(s.to_string()));
        }
        Ok(Self::resolve(s, None))
    }
}

impl Serialize for MimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.essence)
    }
}

impl<'de> Deserialize<'de> for MimeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let essence = String::deserialize(deserializer)?;
        Ok(Self::from_essence(&essence, None))
    }
}

/// Extracts the extension of the last segment of `path`.
///
/// Returns the text after the last `.` of the final `/`-separated segment, or
/// an empty string when that segment has no dot. Trailing slashes are ignored.
///
/// ```
/// use mimesniff::extension_of;
///
/// assert_eq!(extension_of("/public/img/logo.png"), "png");
/// assert_eq!(extension_of("archive.tar.gz"), "gz");
/// assert_eq!(extension_of("v1.2/README"), "");
/// ```
pub fn extension_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    let name = trimmed.rsplit_once('/').map_or(trimmed, |(_, name)| name);
    name.rfind('.').map_or("", |dot| &name[dot + 1..])
}

fn split_essence(essence: &str) -> Option<(&str, &str)> {
    let (ty, sub) = essence.split_once('/')?;
    (!ty.is_empty() && !sub.is_empty() && !sub.contains('/')).then_some((ty, sub))
}

// Everything after `scheme://authority`; strings without a scheme are paths.
fn url_path(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_requires_exactly_one_slash() {
        assert_eq!(split_essence("text/html"), Some(("text", "html")));
        assert_eq!(split_essence("text"), None);
        assert_eq!(split_essence("/html"), None);
        assert_eq!(split_essence("text/"), None);
        assert_eq!(split_essence("text/html/x"), None);
    }

    #[test]
    fn extension_of_edge_cases() {
        assert_eq!(extension_of(""), "");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of("dir.d/file"), "");
        assert_eq!(extension_of("dir/file.js/"), "js");
        assert_eq!(extension_of(".bashrc"), "bashrc");
    }

    #[test]
    fn from_url_strips_query_and_fragment() {
        let mime = MimeType::from_url("https://example.com/img/logo.png?v=3#top");
        assert_eq!(mime.essence(), "image/png");
        assert_eq!(MimeType::from_url("https://example.com/a.css#x.js").essence(), "text/css");
    }

    #[test]
    fn from_url_ignores_host() {
        assert!(MimeType::from_url("https://x.ai").is_default());
        assert!(MimeType::from_url("https://allegro.pl/").is_default());
        assert!(MimeType::from_url("https://example.dev").is_default());
        assert!(MimeType::from_url("https://example.js/?q=a.css").is_default());
        assert_eq!(MimeType::from_url("https://x.ai").extension(), None);
    }

    #[test]
    fn url_path_keeps_path_only() {
        assert_eq!(url_path("https://example.dev/a/b.png"), "/a/b.png");
        assert_eq!(url_path("https://example.dev"), "");
        assert_eq!(url_path("file:///tmp/report.pdf"), "/tmp/report.pdf");
        assert_eq!(url_path("docs/readme.txt"), "docs/readme.txt");
    }

    #[test]
    fn accessors_split_essence() {
        let mime = MimeType::from_extension("docx");
        assert_eq!(mime.type_(), "application");
        assert_eq!(
            mime.subtype(),
            "vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(mime.extensions(), ["docx"]);
    }
}
