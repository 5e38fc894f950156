//! # Parse and encode options
//!
//! Knobs that change how header text is read and written. Both structs
//! deserialize with defaults for any missing field, so they can be embedded in
//! an application's own configuration file.
//!
//! ```rust
//! use sip_model::config::{EncodeOptions, ParseOptions};
//!
//! let opts = ParseOptions::lenient();
//! assert!(!opts.strict);
//!
//! let enc = EncodeOptions { compact_names: true, ..Default::default() };
//! assert!(enc.compact_names);
//! ```

use serde::{Deserialize, Serialize};

/// Maximum length of a single (unfolded) header line.
pub const MAX_LINE_LENGTH: usize = 4096;
/// Maximum number of comma-separated entries accepted in one header line.
pub const MAX_LIST_ENTRIES: usize = 100;

/// Options controlling header parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Fail on a malformed value of a known header. When `false` the value is
    /// kept verbatim as an extension header.
    pub strict: bool,
    /// Reject header lines longer than this many bytes.
    pub max_line_length: usize,
    /// Reject comma lists with more entries than this.
    pub max_list_entries: usize,
    /// Keep headers with unknown names as extension headers instead of failing.
    pub unknown_as_extension: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict: !cfg!(feature = "lenient_parsing"),
            max_line_length: MAX_LINE_LENGTH,
            max_list_entries: MAX_LIST_ENTRIES,
            unknown_as_extension: true,
        }
    }
}

impl ParseOptions {
    /// Strict parsing: malformed values are errors.
    pub fn strict() -> Self {
        ParseOptions {
            strict: true,
            ..Default::default()
        }
    }

    /// Lenient parsing: malformed values of known headers degrade to
    /// extension headers.
    pub fn lenient() -> Self {
        ParseOptions {
            strict: false,
            ..Default::default()
        }
    }

    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    pub fn with_max_list_entries(mut self, max: usize) -> Self {
        self.max_list_entries = max;
        self
    }
}

/// Options controlling header encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Use the RFC 3261 §7.3.3 compact form of header names where one exists.
    pub compact_names: bool,
    /// Emit one header line per list element instead of comma-joining.
    pub one_line_per_header: bool,
}
