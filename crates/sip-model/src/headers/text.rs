//! # Free text headers
//!
//! `Subject` and `Organization` carry arbitrary UTF-8 text, which may be
//! empty. `Priority` carries one of the RFC 3261 urgency tokens or an
//! extension token.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_text, merge_string, Matches, Merge};
use crate::parser::quoted::check_text;
use crate::parser::token::is_token;

macro_rules! text_header {
    ($(#[$meta:meta])* $name:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Leading and trailing whitespace is dropped.
            pub fn new(text: impl Into<String>) -> Result<Self> {
                let text = text.into();
                check_text(stringify!($name), &text)?;
                Ok($name(text.trim().to_string()))
            }

            pub fn text(&self) -> &str {
                &self.0
            }

            pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
                *self = $name::new(text)?;
                Ok(())
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub(crate) fn from_parts(text: String) -> Self {
                $name(text)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Matches for $name {
            fn matches(&self, template: &Self) -> bool {
                match_text(&self.0, &template.0)
            }
        }

        impl Merge for $name {
            fn merge(&mut self, other: &Self) {
                merge_string(&mut self.0, &other.0);
            }
        }

        typed_header!($name, $name, $parser);
    };
}

text_header!(
    /// `Subject`: a summary of the call.
    Subject, crate::parser::headers::text::subject
);
text_header!(
    /// `Organization`: the organization of the sender.
    Organization, crate::parser::headers::text::organization
);

/// `Priority`: urgency of the request as perceived by the client.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
pub enum Priority {
    Emergency,
    Urgent,
    #[default]
    Normal,
    NonUrgent,
    Other(String),
}

impl Priority {
    pub fn new(value: &str) -> Result<Self> {
        if !is_token(value) {
            return Err(Error::InvalidArgument(format!("Invalid priority: '{}'", value)));
        }
        Ok(Priority::from_token(value))
    }

    pub(crate) fn from_token(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "emergency" => Priority::Emergency,
            "urgent" => Priority::Urgent,
            "normal" => Priority::Normal,
            "non-urgent" => Priority::NonUrgent,
            _ => Priority::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Emergency => "emergency",
            Priority::Urgent => "urgent",
            Priority::Normal => "normal",
            Priority::NonUrgent => "non-urgent",
            Priority::Other(s) => s,
        }
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

typed_header!(Priority, Priority, crate::parser::headers::text::priority);

match_by_value!(Priority);
