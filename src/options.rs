//! Sniffing options

use crate::sniff::SNIFF_LEN;

/// Options for identifying a file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffOptions {
    /// Leading bytes read from the file. Below `SNIFF_LEN` the tar rule can
    /// never match.
    pub prefix_len: usize,
    /// Consult the file name when no signature matches
    pub extension_fallback: bool,
    /// Consult the file name first and only sniff unknown names
    pub prefer_extension: bool,
}

impl Default for SniffOptions {
    fn default() -> Self {
        Self {
            prefix_len: SNIFF_LEN,
            extension_fallback: true,
            prefer_extension: false,
        }
    }
}

impl SniffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many leading bytes are read
    pub fn with_prefix_len(mut self, len: usize) -> Self {
        self.prefix_len = len;
        self
    }

    /// Reports the content type only, never the name-based one
    pub fn without_extension_fallback(mut self) -> Self {
        self.extension_fallback = false;
        self
    }

    /// Trusts a known file name over the content
    pub fn prefer_extension(mut self) -> Self {
        self.prefer_extension = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_signature() {
        let options = SniffOptions::default();
        assert_eq!(options.prefix_len, SNIFF_LEN);
        assert!(options.extension_fallback);
        assert!(!options.prefer_extension);
    }

    #[test]
    fn builder_chains() {
        let options = SniffOptions::new()
            .with_prefix_len(16)
            .without_extension_fallback()
            .prefer_extension();
        assert_eq!(options.prefix_len, 16);
        assert!(!options.extension_fallback);
        assert!(options.prefer_extension);
    }
}
