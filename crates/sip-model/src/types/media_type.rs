use std::fmt;
use std::str::FromStr;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser;
use crate::parser::token::is_token;
use crate::types::param::{GenericValue, NameValueList};

/// `m-type SLASH m-subtype *(SEMI m-parameter)`, also used as an Accept
/// media-range where either part may be `*`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct MediaRange {
    mtype: String,
    subtype: String,
    params: NameValueList,
}

impl MediaRange {
    pub fn new(mtype: impl Into<String>, subtype: impl Into<String>) -> Result<Self> {
        let mtype = mtype.into();
        let subtype = subtype.into();
        for part in [&mtype, &subtype] {
            if part.is_empty() || !is_token(part) {
                return Err(Error::InvalidArgument(format!("Invalid media type part: '{}'", part)));
            }
        }
        Ok(MediaRange {
            mtype,
            subtype,
            params: NameValueList::new(),
        })
    }

    pub fn media_type(&self) -> &str {
        &self.mtype
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.value(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<GenericValue>) -> Result<()> {
        self.params.set(name, value)
    }

    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.params.remove(name)
    }

    pub fn charset(&self) -> Option<&str> {
        self.parameter("charset")
    }

    /// The `q` parameter, when present and well formed.
    pub fn q(&self) -> Option<NotNan<f32>> {
        self.parameter("q").and_then(|q| parse_q(q).ok())
    }

    pub fn set_q(&mut self, q: f32) -> Result<()> {
        let q = check_q(q)?;
        self.params.put("q", GenericValue::Token(format_q(q)));
        Ok(())
    }

    /// `*/*` or `type/*` ranges match any subtype.
    pub fn is_wildcard(&self) -> bool {
        self.mtype == "*" || self.subtype == "*"
    }

    pub(crate) fn from_parts(mtype: String, subtype: String, params: NameValueList) -> Self {
        MediaRange {
            mtype,
            subtype,
            params,
        }
    }
}

impl PartialEq for MediaRange {
    fn eq(&self, other: &Self) -> bool {
        self.mtype.eq_ignore_ascii_case(&other.mtype)
            && self.subtype.eq_ignore_ascii_case(&other.subtype)
            && self.params == other.params
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mtype, self.subtype)?;
        self.params.fmt_prefixed(f)
    }
}

impl FromStr for MediaRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_all(s.trim(), parser::headers::content::media_range)
    }
}

/// Checks a q-value against the `[0, 1]` range.
pub fn check_q(q: f32) -> Result<NotNan<f32>> {
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::InvalidArgument(format!("q-value {} is outside [0, 1]", q)));
    }
    NotNan::new(q).map_err(|_| Error::invalid_argument("q-value is NaN"))
}

/// qvalue = ( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )
pub fn format_q(q: NotNan<f32>) -> String {
    let s = format!("{:.3}", q.into_inner());
    let s = s.trim_end_matches('0');
    s.strip_suffix('.').map(|p| p.to_string()).unwrap_or_else(|| s.to_string())
}

pub fn parse_q(s: &str) -> Result<NotNan<f32>> {
    let q: f32 = s
        .parse()
        .map_err(|_| Error::ParseError(format!("Invalid q-value: '{}'", s)))?;
    check_q(q)
}
