//! Extension / media type registry
//!
//! A fixed table of `(extension, type/subtype)` rows with a forward index
//! (media type to its extensions, first one canonical) and a reverse index
//! (extension to media type). Both indexes are built on first use and are
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const DEFAULT_ESSENCE: &str = "application/octet-stream";

static TABLE: &[(&str, &str)] = &[
    // --- application ---
    ("atom", "application/atom+xml"),
    ("epub", "application/epub+zip"),
    ("otf", "application/font-sfnt"),
    ("ttf", "application/font-sfnt"),
    ("woff", "application/font-woff"),
    ("woff2", "application/font-woff"),
    ("gz", "application/gzip"),
    ("jar", "application/java-archive"),
    ("ear", "application/java-archive"),
    ("war", "application/java-archive"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("hqx", "application/mac-binhex40"),
    ("doc", "application/msword"),
    ("mxf", "application/mxf"),
    ("bin", "application/octet-stream"),
    ("dll", "application/octet-stream"),
    ("dmg", "application/octet-stream"),
    ("img", "application/octet-stream"),
    ("iso", "application/octet-stream"),
    ("msm", "application/octet-stream"),
    ("msp", "application/octet-stream"),
    ("pdf", "application/pdf"),
    ("ps", "application/postscript"),
    ("ai", "application/postscript"),
    ("eps", "application/postscript"),
    ("rss", "application/rss+xml"),
    ("rtf", "application/rtf"),
    ("m3u8", "application/vnd.apple.mpegurl"),
    ("kmz", "application/vnd.google-earth.kmz"),
    ("kml", "application/vnd.google-earth.kml+xml"),
    ("cab", "application/vnd.ms-cab-compressed"),
    ("xls", "application/vnd.ms-excel"),
    ("eot", "application/vnd.ms-fontobject"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("wmlc", "application/vnd.wap.wmlc"),
    ("7z", "application/x-7z-compressed"),
    ("bz2", "application/x-bzip2"),
    ("cco", "application/x-cocoa"),
    ("Z", "application/x-compress"),
    ("deb", "application/x-deb"),
    ("crx", "application/x-google-chrome-extension"),
    ("jardiff", "application/x-java-archive-diff"),
    ("jnlp", "application/x-java-jnlp-file"),
    ("lz", "application/x-lzip"),
    ("run", "application/x-makeself"),
    ("exe", "application/x-msdownload"),
    ("msi", "application/x-msi"),
    ("nes", "application/x-nintendo-nes-rom"),
    ("pl", "application/x-perl"),
    ("pm", "application/x-perl"),
    ("prc", "application/x-pilot"),
    ("pdb", "application/x-pilot"),
    ("rar", "application/x-rar-compressed"),
    ("rpm", "application/x-rpm"),
    ("sea", "application/x-sea"),
    ("swf", "application/x-shockwave-flash"),
    ("sqlite", "application/x-sqlite3"),
    ("sit", "application/x-stuffit"),
    ("tar", "application/x-tar"),
    ("tcl", "application/x-tcl"),
    ("tk", "application/x-tcl"),
    ("ar", "application/x-unix-archive"),
    ("der", "application/x-x509-ca-cert"),
    ("pem", "application/x-x509-ca-cert"),
    ("crt", "application/x-x509-ca-cert"),
    ("xpi", "application/x-xpinstall"),
    ("xz", "application/x-xz"),
    ("xhtml", "application/xhtml+xml"),
    ("xspf", "application/xspf+xml"),
    ("zip", "application/zip"),
    // --- audio ---
    ("amr", "audio/amr"),
    ("m4a", "audio/m4a"),
    ("midi", "audio/midi"),
    ("mid", "audio/midi"),
    ("kar", "audio/midi"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("opus", "audio/opus"),
    ("flac", "audio/x-flac"),
    ("ra", "audio/x-realaudio"),
    ("wav", "audio/x-wav"),
    // --- image ---
    ("bmp", "image/bmp"),
    ("flif", "image/flif"),
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("psd", "image/vnd.adobe.photoshop"),
    ("jxr", "image/vnd.ms-photo"),
    ("wbmp", "image/vnd.wap.wbmp"),
    ("webp", "image/webp"),
    ("cr2", "image/x-canon-cr2"),
    ("ico", "image/x-icon"),
    ("jng", "image/x-jng"),
    // --- text ---
    ("css", "text/css"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("shtml", "text/html"),
    ("mml", "text/mathml"),
    ("txt", "text/plain"),
    ("jad", "text/vnd.sun.j2me.app-descriptor"),
    ("wml", "text/vnd.wap.wml"),
    ("htc", "text/x-component"),
    ("xml", "text/xml"),
    // --- video ---
    ("3gpp", "video/3gpp"),
    ("3gp", "video/3gpp"),
    ("ts", "video/mp2t"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("flv", "video/x-flv"),
    ("m4v", "video/x-m4v"),
    ("mng", "video/x-mng"),
    ("asf", "video/x-ms-asf"),
    ("asx", "video/x-ms-asf"),
    ("wmv", "video/x-ms-wmv"),
    ("avi", "video/x-msvideo"),
];

static BY_ESSENCE: LazyLock<HashMap<&'static str, Vec<&'static str>>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for &(ext, essence) in TABLE {
        map.entry(essence).or_default().push(ext);
    }
    map
});

static BY_EXTENSION: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(TABLE.len());
    for &(ext, essence) in TABLE {
        // first row wins
        map.entry(ext).or_insert(essence);
    }
    map
});

/// Returns the interned `type/subtype` key and its registered extensions.
pub fn lookup(essence: &str) -> Option<(&'static str, &'static [&'static str])> {
    BY_ESSENCE
        .get_key_value(essence)
        .map(|(key, exts)| (*key, exts.as_slice()))
}

/// Returns every extension registered for `essence`, canonical one first.
///
/// Unknown media types yield an empty slice.
///
/// # Example
///
/// ```
/// use mimesniff::registry;
///
/// assert_eq!(registry::extensions("application/java-archive"), ["jar", "ear", "war"]);
/// assert!(registry::extensions("text/x-unknown").is_empty());
/// ```
pub fn extensions(essence: &str) -> &'static [&'static str] {
    lookup(essence).map(|(_, exts)| exts).unwrap_or(&[])
}

/// Returns the media type registered for `ext`. Matching is case-sensitive.
pub fn type_subtype(ext: &str) -> Option<&'static str> {
    BY_EXTENSION.get(ext).copied()
}

/// Iterates over every `(extension, type/subtype)` row in table order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    TABLE.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn extensions_are_unique() {
        let mut seen = HashSet::new();
        for (ext, essence) in entries() {
            assert!(seen.insert(ext), "{ext} registered twice (second: {essence})");
        }
    }

    #[test]
    fn every_essence_has_one_slash() {
        for (_, essence) in entries() {
            let (ty, sub) = essence.split_once('/').unwrap();
            assert!(!ty.is_empty() && !sub.is_empty() && !sub.contains('/'));
        }
    }

    #[test]
    fn forward_and_reverse_agree() {
        for (ext, essence) in entries() {
            assert_eq!(type_subtype(ext), Some(essence));
            assert!(extensions(essence).contains(&ext));
        }
    }

    #[test]
    fn canonical_extension_is_first_row() {
        assert_eq!(extensions("image/jpeg")[0], "jpeg");
        assert_eq!(extensions("audio/midi")[0], "midi");
        assert_eq!(extensions("application/font-woff"), ["woff", "woff2"]);
    }

    #[test]
    fn lookup_is_exact() {
        assert!(lookup("TEXT/HTML").is_none());
        assert!(type_subtype("PNG").is_none());
        assert_eq!(type_subtype("Z"), Some("application/x-compress"));
        assert_eq!(lookup(DEFAULT_ESSENCE).map(|(key, _)| key), Some(DEFAULT_ESSENCE));
    }
}
