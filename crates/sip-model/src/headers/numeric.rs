//! # Numeric headers
//!
//! Headers whose value is a single integer, optionally followed by
//! parameters:
//!
//! ```text
//! Max-Forwards: 70
//! Content-Length: 349
//! Expires: 5
//! Min-Expires: 60
//! Session-Expires: 4000;refresher=uac
//! Min-SE: 90
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_opt, Matches, Merge};
use crate::types::param::{GenericValue, NameValueList};

/// `Max-Forwards`: the remaining hop count, 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaxForwards(u8);

impl MaxForwards {
    /// The initial value RFC 3261 recommends.
    pub const DEFAULT: u8 = 70;

    pub fn new(hops: u32) -> Result<Self> {
        u8::try_from(hops)
            .map(MaxForwards)
            .map_err(|_| Error::InvalidArgument(format!("Max-Forwards {} is outside 0..=255", hops)))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn set_max_forwards(&mut self, hops: u32) -> Result<()> {
        *self = MaxForwards::new(hops)?;
        Ok(())
    }

    /// Decrements the hop count, failing with [`Error::TooManyHops`] when it
    /// is already zero.
    pub fn decrement(&mut self) -> Result<()> {
        self.0 = self.0.checked_sub(1).ok_or(Error::TooManyHops)?;
        Ok(())
    }

    pub fn has_reached_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for MaxForwards {
    fn default() -> Self {
        MaxForwards(Self::DEFAULT)
    }
}

impl fmt::Display for MaxForwards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

typed_header!(MaxForwards, MaxForwards, crate::parser::headers::numeric::max_forwards);

macro_rules! u32_header {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            pub fn new(value: u32) -> Self {
                $name(value)
            }

            pub fn value(&self) -> u32 {
                self.0
            }

            pub fn set_value(&mut self, value: u32) {
                self.0 = value;
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        typed_header!($name, $variant, $parser);
    };
}

u32_header!(
    /// `Content-Length`: size of the message body in bytes.
    ContentLength, ContentLength, crate::parser::headers::numeric::content_length
);
u32_header!(
    /// `Expires`: relative expiry in seconds.
    Expires, Expires, crate::parser::headers::numeric::expires
);
u32_header!(
    /// `Min-Expires`: the shortest refresh interval a registrar accepts.
    MinExpires, MinExpires, crate::parser::headers::numeric::min_expires
);

match_by_value!(MaxForwards, ContentLength, Expires, MinExpires);

/// Which side refreshes a session timer (RFC 4028).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Refresher {
    Uac,
    Uas,
}

impl Refresher {
    pub fn as_str(&self) -> &'static str {
        match self {
            Refresher::Uac => "uac",
            Refresher::Uas => "uas",
        }
    }
}

impl fmt::Display for Refresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Session-Expires: <delta>[;refresher=uac|uas]` (RFC 4028).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExpires {
    delta: u32,
    params: NameValueList,
}

impl SessionExpires {
    pub fn new(delta: u32) -> Self {
        SessionExpires {
            delta,
            params: NameValueList::new(),
        }
    }

    pub fn with_refresher(delta: u32, refresher: Refresher) -> Self {
        let mut se = SessionExpires::new(delta);
        se.set_refresher(refresher);
        se
    }

    pub fn delta(&self) -> u32 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: u32) {
        self.delta = delta;
    }

    /// The refresher, if the parameter is present and valid.
    pub fn refresher(&self) -> Option<Refresher> {
        match self.params.value("refresher")? {
            r if r.eq_ignore_ascii_case("uac") => Some(Refresher::Uac),
            r if r.eq_ignore_ascii_case("uas") => Some(Refresher::Uas),
            _ => None,
        }
    }

    pub fn set_refresher(&mut self, refresher: Refresher) {
        self.params
            .put("refresher", GenericValue::Token(refresher.as_str().to_string()));
    }

    pub fn remove_refresher(&mut self) -> bool {
        self.params.remove("refresher")
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(delta: u32, params: NameValueList) -> Self {
        SessionExpires { delta, params }
    }
}

impl fmt::Display for SessionExpires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.delta)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(SessionExpires, SessionExpires, crate::parser::headers::numeric::session_expires);

/// `Min-SE: <delta>` (RFC 4028).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinSe {
    delta: u32,
    params: NameValueList,
}

impl MinSe {
    pub fn new(delta: u32) -> Self {
        MinSe {
            delta,
            params: NameValueList::new(),
        }
    }

    pub fn delta(&self) -> u32 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: u32) {
        self.delta = delta;
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(delta: u32, params: NameValueList) -> Self {
        MinSe { delta, params }
    }
}

impl fmt::Display for MinSe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.delta)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(MinSe, MinSe, crate::parser::headers::numeric::min_se);

impl Matches for SessionExpires {
    fn matches(&self, template: &Self) -> bool {
        self.delta == template.delta
            && match_opt(&self.refresher(), &template.refresher())
            && self.params.matches(&template.params)
    }
}

impl Merge for SessionExpires {
    fn merge(&mut self, other: &Self) {
        self.delta = other.delta;
        self.params.merge(&other.params);
    }
}

impl Matches for MinSe {
    fn matches(&self, template: &Self) -> bool {
        self.delta == template.delta && self.params.matches(&template.params)
    }
}

impl Merge for MinSe {
    fn merge(&mut self, other: &Self) {
        self.delta = other.delta;
        self.params.merge(&other.params);
    }
}
