//! # Retry-After header
//!
//! How long the service is expected to be unavailable, with an optional
//! comment and a `duration` parameter
//! ([RFC 3261 §20.33](https://datatracker.ietf.org/doc/html/rfc3261#section-20.33)):
//!
//! ```text
//! Retry-After: 18000;duration=3600
//! Retry-After: 120 (I'm in a meeting)
//! ```
//!
//! ```rust
//! use sip_model::headers::RetryAfter;
//!
//! let mut ra = RetryAfter::new(120);
//! ra.set_comment("I'm in a meeting").unwrap();
//! ra.set_duration(60);
//! assert_eq!(ra.to_string(), "120 (I'm in a meeting);duration=60");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_opt, merge_opt, Matches, Merge};
use crate::types::param::{GenericValue, NameValueList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryAfter {
    seconds: u32,
    comment: Option<String>,
    params: NameValueList,
}

impl RetryAfter {
    pub fn new(seconds: u32) -> Self {
        RetryAfter {
            seconds,
            comment: None,
            params: NameValueList::new(),
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn set_seconds(&mut self, seconds: u32) {
        self.seconds = seconds;
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The comment is written between parentheses, which must balance.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<()> {
        let comment = comment.into();
        let mut depth = 0i32;
        for c in comment.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                '\r' | '\n' => depth = -1,
                _ => {}
            }
            if depth < 0 {
                break;
            }
        }
        if depth != 0 {
            return Err(Error::InvalidArgument(format!("Invalid Retry-After comment: '{}'", comment)));
        }
        self.comment = Some(comment);
        Ok(())
    }

    pub fn remove_comment(&mut self) {
        self.comment = None;
    }

    pub fn duration(&self) -> Option<u32> {
        self.params.value("duration").and_then(|d| d.parse().ok())
    }

    pub fn set_duration(&mut self, duration: u32) {
        self.params.put("duration", GenericValue::Token(duration.to_string()));
    }

    pub fn remove_duration(&mut self) -> bool {
        self.params.remove("duration")
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(seconds: u32, comment: Option<String>, params: NameValueList) -> Self {
        RetryAfter {
            seconds,
            comment,
            params,
        }
    }
}

impl fmt::Display for RetryAfter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seconds)?;
        if let Some(comment) = &self.comment {
            write!(f, " ({})", comment)?;
        }
        self.params.fmt_prefixed(f)
    }
}

typed_header!(RetryAfter, RetryAfter, crate::parser::headers::retry_after::retry_after);

impl Matches for RetryAfter {
    fn matches(&self, template: &Self) -> bool {
        self.seconds == template.seconds
            && match_opt(&self.comment, &template.comment)
            && self.params.matches(&template.params)
    }
}

impl Merge for RetryAfter {
    fn merge(&mut self, other: &Self) {
        self.seconds = other.seconds;
        merge_opt(&mut self.comment, &other.comment);
        self.params.merge(&other.params);
    }
}
