//! # Reason header
//!
//! Why a request was generated, typically a CANCEL or BYE
//! ([RFC 3326](https://datatracker.ietf.org/doc/html/rfc3326)):
//!
//! ```text
//! Reason: SIP ;cause=200 ;text="Call completed elsewhere"
//! Reason: Q.850 ;cause=16 ;text="Terminated"
//! ```
//!
//! ```rust
//! use sip_model::headers::Reason;
//!
//! let reason = Reason::new("SIP", 200, Some("Call completed elsewhere")).unwrap();
//! assert_eq!(reason.to_string(), "SIP;cause=200;text=\"Call completed elsewhere\"");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_token, merge_string, Matches, Merge};
use crate::parser::token::is_token;
use crate::types::param::{GenericValue, NameValueList};

#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Reason {
    protocol: String,
    params: NameValueList,
}

impl Reason {
    pub fn new(protocol: impl Into<String>, cause: u16, text: Option<&str>) -> Result<Self> {
        let mut reason = Reason::with_protocol(protocol)?;
        reason.set_cause(cause);
        if let Some(text) = text {
            reason.set_text(text)?;
        }
        Ok(reason)
    }

    /// A reason with no parameters.
    pub fn with_protocol(protocol: impl Into<String>) -> Result<Self> {
        let protocol = protocol.into();
        if !is_token(&protocol) {
            return Err(Error::InvalidArgument(format!("Invalid Reason protocol: '{}'", protocol)));
        }
        Ok(Reason {
            protocol,
            params: NameValueList::new(),
        })
    }

    /// `SIP`, `Q.850` or an extension token.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn set_protocol(&mut self, protocol: impl Into<String>) -> Result<()> {
        let params = std::mem::take(&mut self.params);
        *self = Reason::with_protocol(protocol)?;
        self.params = params;
        Ok(())
    }

    pub fn cause(&self) -> Option<u16> {
        self.params.value("cause").and_then(|c| c.parse().ok())
    }

    pub fn set_cause(&mut self, cause: u16) {
        self.params.put("cause", GenericValue::Token(cause.to_string()));
    }

    pub fn text(&self) -> Option<&str> {
        self.params.value("text")
    }

    /// Always written as a quoted string. Line breaks are refused.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.params.set("text", GenericValue::Quoted(text.into()))
    }

    pub fn remove_text(&mut self) -> bool {
        self.params.remove("text")
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(protocol: String, params: NameValueList) -> Self {
        Reason { protocol, params }
    }
}

impl PartialEq for Reason {
    fn eq(&self, other: &Self) -> bool {
        self.protocol.eq_ignore_ascii_case(&other.protocol) && self.params == other.params
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.protocol)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(Reason, Reason, crate::parser::headers::reason::reason);

impl Matches for Reason {
    fn matches(&self, template: &Self) -> bool {
        match_token(&self.protocol, &template.protocol) && self.params.matches(&template.params)
    }
}

impl Merge for Reason {
    fn merge(&mut self, other: &Self) {
        merge_string(&mut self.protocol, &other.protocol);
        self.params.merge(&other.params);
    }
}
