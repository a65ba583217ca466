//! Signature sniffing
//!
//! Classifies a byte buffer by comparing fixed offsets against known magic
//! numbers. Rules are evaluated in table order and the first match wins, so
//! formats built on top of another container (EPUB and XPI inside ZIP, the
//! Debian package inside `ar`) are listed before their container.

use std::fmt;

use tracing::trace;

use crate::mime::MimeType;

/// Number of leading bytes that covers every rule (tar's `ustar` marker ends
/// at offset 261).
pub const SNIFF_LEN: usize = 262;

const ZIP_LOCAL_HEADER: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const RIFF: &[u8] = b"RIFF";
const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
const SFNT_VERSION: &[u8] = &[0x00, 0x01, 0x00, 0x00];

/// A binary signature and the media type it identifies.
#[derive(Clone, Copy)]
pub struct SignatureRule {
    name: &'static str,
    min_len: usize,
    essence: &'static str,
    extension: Option<&'static str>,
    predicate: fn(&[u8]) -> bool,
}

impl SignatureRule {
    const fn new(
        name: &'static str,
        min_len: usize,
        essence: &'static str,
        predicate: fn(&[u8]) -> bool,
    ) -> Self {
        Self {
            name,
            min_len,
            essence,
            extension: None,
            predicate,
        }
    }

    const fn with_extension(mut self, extension: &'static str) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shortest buffer this rule can match.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn essence(&self) -> &'static str {
        self.essence
    }

    pub fn extension_hint(&self) -> Option<&'static str> {
        self.extension
    }

    #[inline]
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.len() >= self.min_len && (self.predicate)(bytes)
    }

    /// The media type reported when this rule matches.
    pub fn resolve(&self) -> MimeType {
        MimeType::from_essence(self.essence, self.extension)
    }
}

impl fmt::Debug for SignatureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureRule")
            .field("name", &self.name)
            .field("min_len", &self.min_len)
            .field("essence", &self.essence)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

/// True when `pattern` occurs at `offset`. Out-of-range offsets never match.
#[inline]
fn at(bytes: &[u8], offset: usize, pattern: &[u8]) -> bool {
    offset
        .checked_add(pattern.len())
        .and_then(|end| bytes.get(offset..end))
        == Some(pattern)
}

#[inline]
fn byte_in(bytes: &[u8], offset: usize, set: &[u8]) -> bool {
    bytes.get(offset).is_some_and(|b| set.contains(b))
}

fn is_tiff(b: &[u8]) -> bool {
    at(b, 0, TIFF_LE) || at(b, 0, TIFF_BE)
}

fn is_woff_flavor(b: &[u8]) -> bool {
    at(b, 4, SFNT_VERSION) || at(b, 4, b"OTTO")
}

// ISO base media layouts seen in the wild; no single box check covers them.
fn is_mp4(b: &[u8]) -> bool {
    (at(b, 0, &[0x00, 0x00, 0x00]) && byte_in(b, 3, &[0x18, 0x20]) && at(b, 4, b"ftyp"))
        || at(b, 0, b"3gp5")
        || (at(b, 0, b"\x00\x00\x00\x1Cftypmp42") && at(b, 16, b"mp41mp42isom"))
        || at(b, 0, b"\x00\x00\x00\x1Cftypisom")
        || at(b, 0, b"\x00\x00\x00\x1Cftypmp42\x00\x00\x00\x00")
}

static RULES: &[SignatureRule] = &[
    SignatureRule::new("epub", 58, "application/epub+zip", |b| {
        at(b, 0, ZIP_LOCAL_HEADER) && at(b, 30, b"mimetypeapplication/epub+zip")
    }),
    SignatureRule::new("sfnt", 5, "application/font-sfnt", |b| {
        at(b, 0, b"OTTO\x00") || at(b, 0, &[0x00, 0x01, 0x00, 0x00, 0x00])
    }),
    SignatureRule::new("woff", 8, "application/font-woff", |b| {
        at(b, 0, b"wOFF") && is_woff_flavor(b)
    }),
    SignatureRule::new("woff2", 8, "application/font-woff", |b| {
        at(b, 0, b"wOF2") && is_woff_flavor(b)
    })
    .with_extension("woff2"),
    SignatureRule::new("gzip", 3, "application/gzip", |b| {
        at(b, 0, &[0x1F, 0x8B, 0x08])
    }),
    SignatureRule::new("pdf", 4, "application/pdf", |b| at(b, 0, b"%PDF")),
    SignatureRule::new("postscript", 2, "application/postscript", |b| {
        at(b, 0, b"%!")
    }),
    SignatureRule::new("rtf", 5, "application/rtf", |b| at(b, 0, b"{\\rtf")),
    SignatureRule::new("cab", 4, "application/vnd.ms-cab-compressed", |b| {
        at(b, 0, b"MSCF") || at(b, 0, b"ISc(")
    }),
    SignatureRule::new("7z", 6, "application/x-7z-compressed", |b| {
        at(b, 0, &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C])
    }),
    SignatureRule::new("bzip2", 3, "application/x-bzip2", |b| at(b, 0, b"BZh")),
    SignatureRule::new("compress", 2, "application/x-compress", |b| {
        at(b, 0, &[0x1F, 0xA0]) || at(b, 0, &[0x1F, 0x9D])
    }),
    SignatureRule::new("deb", 21, "application/x-deb", |b| {
        at(b, 0, b"!<arch>\ndebian-binary")
    }),
    SignatureRule::new("crx", 4, "application/x-google-chrome-extension", |b| {
        at(b, 0, b"Cr24")
    }),
    SignatureRule::new("lzip", 4, "application/x-lzip", |b| at(b, 0, b"LZIP")),
    SignatureRule::new("exe", 2, "application/x-msdownload", |b| at(b, 0, b"MZ")),
    SignatureRule::new("msi", 8, "application/x-msi", |b| {
        at(b, 0, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
    }),
    SignatureRule::new("mxf", 14, "application/mxf", |b| {
        at(
            b,
            0,
            &[
                0x06, 0x0E, 0x2B, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0D, 0x01, 0x02, 0x01, 0x01,
                0x02,
            ],
        )
    }),
    SignatureRule::new("nes", 4, "application/x-nintendo-nes-rom", |b| {
        at(b, 0, b"NES\x1A")
    }),
    SignatureRule::new("swf", 3, "application/x-shockwave-flash", |b| {
        byte_in(b, 0, b"CF") && at(b, 1, b"WS")
    }),
    SignatureRule::new("sqlite", 4, "application/x-sqlite3", |b| at(b, 0, b"SQLi")),
    SignatureRule::new("tar", SNIFF_LEN, "application/x-tar", |b| {
        at(b, 257, b"ustar")
    }),
    SignatureRule::new("rar", 7, "application/x-rar-compressed", |b| {
        at(b, 0, b"Rar!\x1A\x07") && byte_in(b, 6, &[0x00, 0x01])
    }),
    SignatureRule::new("rpm", 4, "application/x-rpm", |b| {
        at(b, 0, &[0xED, 0xAB, 0xEE, 0xDB])
    }),
    SignatureRule::new("ar", 7, "application/x-unix-archive", |b| at(b, 0, b"!<arch>")),
    SignatureRule::new("xpi", 50, "application/x-xpinstall", |b| {
        at(b, 0, ZIP_LOCAL_HEADER) && at(b, 30, b"META-INF/mozilla.rsa")
    }),
    SignatureRule::new("xz", 6, "application/x-xz", |b| {
        at(b, 0, &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00])
    }),
    SignatureRule::new("zip", 4, "application/zip", |b| {
        at(b, 0, b"PK") && byte_in(b, 2, &[0x03, 0x05, 0x07]) && byte_in(b, 3, &[0x04, 0x06, 0x08])
    }),
    SignatureRule::new("amr", 6, "audio/amr", |b| at(b, 0, b"#!AMR\n")),
    SignatureRule::new("m4a", 4, "audio/m4a", |b| {
        at(b, 0, b"M4A ") || at(b, 4, b"ftypM4A")
    }),
    SignatureRule::new("midi", 4, "audio/midi", |b| at(b, 0, b"MThd")),
    SignatureRule::new("mp3", 2, "audio/mpeg", |b| {
        at(b, 0, b"ID3") || at(b, 0, &[0xFF, 0xFB])
    }),
    SignatureRule::new("opus", 36, "audio/opus", |b| at(b, 28, b"OpusHead")),
    SignatureRule::new("ogg", 4, "audio/ogg", |b| at(b, 0, b"OggS")),
    SignatureRule::new("flac", 4, "audio/x-flac", |b| at(b, 0, b"fLaC")),
    SignatureRule::new("wav", 12, "audio/x-wav", |b| {
        at(b, 0, RIFF) && at(b, 8, b"WAVE")
    }),
    SignatureRule::new("bmp", 2, "image/bmp", |b| at(b, 0, b"BM")),
    SignatureRule::new("flif", 4, "image/flif", |b| at(b, 0, b"FLIF")),
    SignatureRule::new("gif", 3, "image/gif", |b| at(b, 0, b"GIF")),
    SignatureRule::new("jpeg", 3, "image/jpeg", |b| at(b, 0, &[0xFF, 0xD8, 0xFF])),
    SignatureRule::new("png", 4, "image/png", |b| {
        at(b, 0, &[0x89, 0x50, 0x4E, 0x47])
    }),
    // Canon RAW is a TIFF with "CR" right after the IFD offset.
    SignatureRule::new("cr2", 10, "image/x-canon-cr2", |b| {
        is_tiff(b) && at(b, 8, b"CR")
    }),
    SignatureRule::new("tiff", 4, "image/tiff", is_tiff),
    SignatureRule::new("psd", 4, "image/vnd.adobe.photoshop", |b| at(b, 0, b"8BPS")),
    SignatureRule::new("jxr", 3, "image/vnd.ms-photo", |b| {
        at(b, 0, &[0x49, 0x49, 0xBC])
    }),
    SignatureRule::new("webp", 12, "image/webp", |b| at(b, 8, b"WEBP")),
    SignatureRule::new("ico", 4, "image/x-icon", |b| {
        at(b, 0, &[0x00, 0x00, 0x01, 0x00])
    }),
    SignatureRule::new("mp4", 4, "video/mp4", is_mp4),
    SignatureRule::new("mpeg", 4, "video/mpeg", |b| {
        at(b, 0, &[0x00, 0x00, 0x01]) && b.get(3).is_some_and(|&byte| byte >> 4 == 0xB)
    }),
    SignatureRule::new("quicktime", 8, "video/quicktime", |b| {
        at(b, 0, b"\x00\x00\x00\x14ftyp")
    }),
    SignatureRule::new("flv", 4, "video/x-flv", |b| at(b, 0, b"FLV\x01")),
    SignatureRule::new("m4v", 11, "video/x-m4v", |b| {
        at(b, 0, b"\x00\x00\x00\x1CftypM4V")
    }),
    SignatureRule::new("wmv", 10, "video/x-ms-wmv", |b| {
        at(b, 0, &[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9])
    }),
    SignatureRule::new("avi", 11, "video/x-msvideo", |b| {
        at(b, 0, RIFF) && at(b, 8, b"AVI")
    }),
];

/// The ordered rule table.
pub fn rules() -> &'static [SignatureRule] {
    RULES
}

/// Guesses the media type of `bytes` from its binary signature.
///
/// Returns `application/octet-stream` with no extension when no rule
/// matches, including for empty or too-short buffers. Only the first
/// [`SNIFF_LEN`] bytes are ever inspected.
///
/// # Example
///
/// ```
/// use mimesniff::sniff;
///
/// let mime = sniff::guess(&[0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(mime.to_string(), "image/png");
/// assert_eq!(mime.extension(), Some("png"));
///
/// assert!(sniff::guess(&[]).is_default());
/// ```
pub fn guess(bytes: &[u8]) -> MimeType {
    match RULES.iter().find(|rule| rule.matches(bytes)) {
        Some(rule) => {
            trace!(rule = rule.name, essence = rule.essence, "signature matched");
            rule.resolve()
        }
        None => {
            trace!(len = bytes.len(), "no signature matched");
            MimeType::default()
        }
    }
}

/// Sniffs `bytes`, falling back to the extension of `path` when no signature
/// matches.
pub fn detect(bytes: &[u8], path: Option<&str>) -> MimeType {
    let sniffed = guess(bytes);
    match path {
        Some(path) if sniffed.is_default() => MimeType::from_path(path),
        _ => sniffed,
    }
}
