//! # Accept headers
//!
//! Content negotiation headers
//! ([RFC 3261 §20.1-20.3](https://datatracker.ietf.org/doc/html/rfc3261#section-20.1)).
//! Each value is one element of a comma list with an optional `q`
//! preference in `[0, 1]`.
//!
//! ```text
//! Accept: application/sdp;level=1, application/x-private, text/html
//! Accept-Encoding: gzip
//! Accept-Language: da, en-gb;q=0.8, en;q=0.7
//! ```
//!
//! ```rust
//! use sip_model::headers::{AcceptLanguage, SipHeaderList};
//!
//! let langs: SipHeaderList<AcceptLanguage> = "da, en-gb;q=0.8, en;q=0.7".parse().unwrap();
//! let preferred = langs.iter().max_by_key(|l| l.q_or_default()).unwrap();
//! assert_eq!(preferred.language(), "da");
//! ```

use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_token, merge_string, Matches, Merge};
use crate::parser::token::is_token;
use crate::types::media_type::{check_q, format_q, parse_q, MediaRange};
use crate::types::param::{GenericValue, NameValueList};

/// One accepted media range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accept(MediaRange);

impl Accept {
    pub fn new(media: MediaRange) -> Self {
        Accept(media)
    }

    pub fn media_range(&self) -> &MediaRange {
        &self.0
    }

    pub fn media_range_mut(&mut self) -> &mut MediaRange {
        &mut self.0
    }

    pub fn media_type(&self) -> &str {
        self.0.media_type()
    }

    pub fn subtype(&self) -> &str {
        self.0.subtype()
    }

    pub fn q(&self) -> Option<NotNan<f32>> {
        self.0.q()
    }

    /// The preference, 1 when no `q` is given.
    pub fn q_or_default(&self) -> NotNan<f32> {
        self.q().unwrap_or_else(default_q)
    }

    pub fn set_q(&mut self, q: f32) -> Result<()> {
        self.0.set_q(q)
    }

    /// True when this range covers `mtype/subtype`.
    pub fn allows(&self, mtype: &str, subtype: &str) -> bool {
        (self.0.media_type() == "*" || self.0.media_type().eq_ignore_ascii_case(mtype))
            && (self.0.subtype() == "*" || self.0.subtype().eq_ignore_ascii_case(subtype))
    }
}

fn default_q() -> NotNan<f32> {
    NotNan::new(1.0).unwrap_or_default()
}

impl fmt::Display for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

typed_header!(Accept, Accept, crate::parser::headers::accept::accept);

impl Matches for Accept {
    fn matches(&self, template: &Self) -> bool {
        match_token(self.media_type(), template.media_type())
            && match_token(self.subtype(), template.subtype())
            && self.0.params().matches(template.0.params())
    }
}

impl Merge for Accept {
    fn merge(&mut self, other: &Self) {
        let mut params = self.0.params().clone();
        params.merge(other.0.params());
        self.0 = other.0.clone();
        *self.0.params_mut() = params;
    }
}

macro_rules! accept_value_header {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $getter:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, Serialize, Deserialize)]
        pub struct $name {
            value: String,
            params: NameValueList,
        }

        impl $name {
            pub fn $getter(&self) -> &str {
                &self.value
            }

            pub fn params(&self) -> &NameValueList {
                &self.params
            }

            pub fn params_mut(&mut self) -> &mut NameValueList {
                &mut self.params
            }

            pub fn q(&self) -> Option<NotNan<f32>> {
                self.params.value("q").and_then(|q| parse_q(q).ok())
            }

            pub fn q_or_default(&self) -> NotNan<f32> {
                self.q().unwrap_or_else(default_q)
            }

            pub fn set_q(&mut self, q: f32) -> Result<()> {
                let q = check_q(q)?;
                self.params.put("q", GenericValue::Token(format_q(q)));
                Ok(())
            }

            pub fn remove_q(&mut self) -> bool {
                self.params.remove("q")
            }

            pub fn is_wildcard(&self) -> bool {
                self.value == "*"
            }

            pub(crate) fn from_parts(value: String, params: NameValueList) -> Self {
                $name { value, params }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value.eq_ignore_ascii_case(&other.value) && self.params == other.params
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.value)?;
                self.params.fmt_prefixed(f)
            }
        }

        impl Matches for $name {
            fn matches(&self, template: &Self) -> bool {
                match_token(&self.value, &template.value) && self.params.matches(&template.params)
            }
        }

        impl Merge for $name {
            fn merge(&mut self, other: &Self) {
                merge_string(&mut self.value, &other.value);
                self.params.merge(&other.params);
            }
        }

        typed_header!($name, $variant, $parser);
    };
}

accept_value_header!(
    /// One accepted content coding, e.g. `gzip;q=0.5`.
    AcceptEncoding, AcceptEncoding, coding,
    crate::parser::headers::accept::accept_encoding
);
accept_value_header!(
    /// One accepted language range, e.g. `en-gb;q=0.8` or `*`.
    AcceptLanguage, AcceptLanguage, language,
    crate::parser::headers::accept::accept_language
);

impl AcceptEncoding {
    pub fn new(coding: impl Into<String>) -> Result<Self> {
        let coding = coding.into();
        if !is_token(&coding) {
            return Err(Error::InvalidArgument(format!("Invalid content coding: '{}'", coding)));
        }
        Ok(AcceptEncoding::from_parts(coding, NameValueList::new()))
    }
}

impl AcceptLanguage {
    pub fn new(language: impl Into<String>) -> Result<Self> {
        let language = language.into();
        if language != "*" {
            crate::parser::parse_all(&language, crate::parser::headers::content::language_tag)
                .map_err(|_| Error::InvalidArgument(format!("Invalid language range: '{}'", language)))?;
        }
        Ok(AcceptLanguage::from_parts(language, NameValueList::new()))
    }
}
