//! # Option tag headers
//!
//! Headers carrying SIP option tags
//! ([RFC 3261 §19.2](https://datatracker.ietf.org/doc/html/rfc3261#section-19.2)),
//! methods or event packages. Each value holds a single token; a header line
//! with several values parses into a
//! [`SipHeaderList`](crate::headers::SipHeaderList).
//!
//! ```rust
//! use sip_model::headers::{SipHeaderList, Supported};
//!
//! let supported: SipHeaderList<Supported> = "100rel, timer".parse().unwrap();
//! assert!(supported.iter().any(|s| s.option_tag() == "timer"));
//! assert_eq!(supported.encode(), "Supported: 100rel, timer\r\n");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::token::is_token;
use crate::types::method::Method;

macro_rules! option_tag_header {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $getter:ident, $setter:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if !is_token(&value) {
                    return Err(Error::InvalidArgument(format!(
                        "Invalid {} value: '{}'",
                        stringify!($name),
                        value
                    )));
                }
                Ok($name(value))
            }

            pub fn $getter(&self) -> &str {
                &self.0
            }

            pub fn $setter(&mut self, value: impl Into<String>) -> Result<()> {
                *self = $name::new(value)?;
                Ok(())
            }

            pub(crate) fn from_parts(value: String) -> Self {
                $name(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        typed_header!($name, $variant, $parser);
    };
}

option_tag_header!(
    /// An option tag the UAS must support.
    Require, Require, option_tag, set_option_tag, crate::parser::headers::option_tags::require
);
option_tag_header!(
    /// An option tag the sender supports.
    Supported, Supported, option_tag, set_option_tag, crate::parser::headers::option_tags::supported
);
option_tag_header!(
    /// An option tag the UAS did not support.
    Unsupported, Unsupported, option_tag, set_option_tag, crate::parser::headers::option_tags::unsupported
);
option_tag_header!(
    /// An option tag every proxy must support.
    ProxyRequire, ProxyRequire, option_tag, set_option_tag,
    crate::parser::headers::option_tags::proxy_require
);
option_tag_header!(
    /// An event package the sender accepts (RFC 6665).
    AllowEvents, AllowEvents, event_type, set_event_type,
    crate::parser::headers::option_tags::allow_events
);

/// One method of an Allow header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allow(Method);

impl Allow {
    pub fn new(method: Method) -> Self {
        Allow(method)
    }

    pub fn method(&self) -> &Method {
        &self.0
    }

    pub fn set_method(&mut self, method: Method) {
        self.0 = method;
    }
}

impl fmt::Display for Allow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::convert::From<Method> for Allow {
    fn from(method: Method) -> Self {
        Allow(method)
    }
}

typed_header!(Allow, Allow, crate::parser::headers::option_tags::allow);

match_by_value!(Require, Supported, Unsupported, ProxyRequire, AllowEvents, Allow);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use crate::headers::SipHeaderList;
    use std::str::FromStr;

    #[test]
    fn test_option_tag_validation() {
        assert!(Require::new("").is_err());
        assert!(Require::new("100 rel").is_err());
        let mut tag = Require::new("100rel").unwrap();
        assert_eq!(tag.encode(), "Require: 100rel\r\n");
        assert!(tag.set_option_tag("").is_err());
        assert_eq!(tag.option_tag(), "100rel");
    }

    #[test]
    fn test_single_value_per_header() {
        assert!(Supported::from_str("timer, 100rel").is_err());
        assert_eq!(Unsupported::from_str("foo").unwrap().option_tag(), "foo");
        assert_eq!(ProxyRequire::from_str("sec-agree").unwrap().encode(), "Proxy-Require: sec-agree\r\n");
    }

    #[test]
    fn test_allow_list() {
        let allow: SipHeaderList<Allow> = "INVITE, ACK, OPTIONS, CANCEL, BYE".parse().unwrap();
        assert_eq!(allow.len(), 5);
        assert!(allow.iter().any(|a| a.method() == &Method::Options));
        assert_eq!(allow.encode(), "Allow: INVITE, ACK, OPTIONS, CANCEL, BYE\r\n");
    }

    #[test]
    fn test_allow_events() {
        let events: SipHeaderList<AllowEvents> = "presence, dialog".parse().unwrap();
        assert_eq!(events.get(1).map(|e| e.event_type()), Some("dialog"));
    }
}
