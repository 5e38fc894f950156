//! # Extension headers
//!
//! Headers this crate has no typed model for are kept as a raw name and
//! value and written back verbatim. Lenient parsing also stores values of
//! known headers that failed to parse this way.
//!
//! ```rust
//! use sip_model::headers::{ExtensionHeader, HeaderName};
//!
//! let ext = ExtensionHeader::new("X-Custom", "anything; goes").unwrap();
//! assert_eq!(ext.header_name(), HeaderName::Other("x-custom".into()));
//! assert_eq!(ext.to_string(), "anything; goes");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::header_name::HeaderName;
use crate::headers::matching::{match_text, match_token, merge_string, Matches, Merge};
use crate::parser::quoted::check_text;
use crate::parser::token::is_token;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionHeader {
    name: String,
    value: String,
}

impl ExtensionHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_token(&name) {
            return Err(Error::InvalidHeader(format!("Invalid header name: '{}'", name)));
        }
        let value = value.into();
        check_value(&value)?;
        Ok(ExtensionHeader {
            name,
            value: value.trim().to_string(),
        })
    }

    /// The name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name resolved against the known headers, so a lenient `v` value
    /// still reports [`HeaderName::Via`].
    pub fn header_name(&self) -> HeaderName {
        self.name
            .parse()
            .unwrap_or_else(|_| HeaderName::Other(self.name.clone()))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        check_value(&value)?;
        self.value = value.trim().to_string();
        Ok(())
    }
}

fn check_value(value: &str) -> Result<()> {
    check_text("Header value", value).map_err(|_| {
        Error::InvalidHeader(format!(
            "Header value must not contain line breaks: '{}'",
            value.escape_default()
        ))
    })
}

impl PartialEq for ExtensionHeader {
    fn eq(&self, other: &Self) -> bool {
        self.header_name() == other.header_name() && self.value == other.value
    }
}

impl Eq for ExtensionHeader {}

impl fmt::Display for ExtensionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Matches for ExtensionHeader {
    fn matches(&self, template: &Self) -> bool {
        match_token(&self.name, &template.name) && match_text(&self.value, &template.value)
    }
}

impl Merge for ExtensionHeader {
    fn merge(&mut self, other: &Self) {
        merge_string(&mut self.value, &other.value);
    }
}
