//! # SIP Call-ID Header
//!
//! The Call-ID uniquely identifies a dialog or the registrations of a client
//! ([RFC 3261 §20.8](https://datatracker.ietf.org/doc/html/rfc3261#section-20.8)).
//! In-Reply-To lists the Call-IDs a call refers back to.
//!
//! ```text
//! Call-ID: f81d4fae-7dec-11d0-a765-00a0c91e6bf6@biloxi.com
//! i: f81d4fae-7dec-11d0-a765-00a0c91e6bf6@192.0.2.4
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use sip_model::headers::CallId;
//!
//! let id = CallId::random_at("biloxi.com").unwrap();
//! assert_eq!(id.host(), Some("biloxi.com"));
//!
//! let parsed: CallId = "a84b4c76e66710@pc33.atlanta.com".parse().unwrap();
//! assert_eq!(parsed.local_id(), "a84b4c76e66710");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser;

/// The `callid` value: `word [ "@" word ]`. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(String);

impl CallId {
    /// Validates and wraps a Call-ID value.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_argument("Call-ID must not be empty"));
        }
        parser::parse_all(&id, parser::headers::call_id::callid)
            .map_err(|_| Error::InvalidArgument(format!("Invalid Call-ID: '{}'", id)))?;
        Ok(CallId(id))
    }

    /// A random Call-ID without a host part.
    pub fn random() -> Self {
        CallId(uuid::Uuid::new_v4().to_string())
    }

    /// A random Call-ID of the form `<uuid>@<host>`.
    pub fn random_at(host: &str) -> Result<Self> {
        CallId::new(format!("{}@{}", uuid::Uuid::new_v4().simple(), host))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn set_value(&mut self, id: impl Into<String>) -> Result<()> {
        *self = CallId::new(id)?;
        Ok(())
    }

    /// The part before `@`.
    pub fn local_id(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(local, _)| local)
    }

    /// The part after `@`, if any.
    pub fn host(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, host)| host)
    }

    pub(crate) fn from_parts(id: String) -> Self {
        CallId(id)
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

typed_header!(CallId, CallId, parser::headers::call_id::call_id);

/// One Call-ID of an In-Reply-To header. Several values form a
/// [`SipHeaderList<InReplyTo>`](crate::headers::SipHeaderList).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InReplyTo(CallId);

impl InReplyTo {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        CallId::new(id).map(InReplyTo)
    }

    pub fn from_call_id(id: CallId) -> Self {
        InReplyTo(id)
    }

    pub fn call_id(&self) -> &CallId {
        &self.0
    }

    pub fn set_call_id(&mut self, id: CallId) {
        self.0 = id;
    }
}

impl fmt::Display for InReplyTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

typed_header!(InReplyTo, InReplyTo, parser::headers::call_id::in_reply_to);

match_by_value!(CallId, InReplyTo);
