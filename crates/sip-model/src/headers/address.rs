//! # Address headers
//!
//! Headers whose value is a `name-addr` or `addr-spec` followed by header
//! parameters ([RFC 3261 §20](https://datatracker.ietf.org/doc/html/rfc3261#section-20)):
//!
//! ```text
//! From: "Alice" <sip:alice@atlanta.com>;tag=1928301774
//! To: Bob <sip:bob@biloxi.com>
//! Contact: <sip:alice@pc33.atlanta.com>;q=0.7;expires=3600
//! Contact: *
//! Route: <sip:p1.example.com;lr>
//! ```
//!
//! Route, Record-Route, Path and Service-Route always use the name-addr form.
//! Parameters written after a bare addr-spec belong to the header, not to the
//! URI.
//!
//! ## Examples
//!
//! ```rust
//! use sip_model::headers::{address, To};
//! use sip_model::types::{Address, Uri};
//!
//! let uri: Uri = "sip:bob@biloxi.com".parse().unwrap();
//! let mut to = To::new(Address::with_display_name(uri, "Bob").unwrap());
//! to.set_tag("a6c85cf").unwrap();
//! assert_eq!(to.to_string(), "Bob <sip:bob@biloxi.com>;tag=a6c85cf");
//!
//! let from: address::From = "<sip:alice@atlanta.com>;tag=88sja8x".parse().unwrap();
//! assert_eq!(from.tag(), Some("88sja8x"));
//! ```

use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{Matches, Merge};
use crate::parser::token::is_token;
use crate::types::address::Address;
use crate::types::media_type::{check_q, format_q, parse_q};
use crate::types::param::{GenericValue, NameValueList};
use crate::types::uri::Uri;

/// Generates a random tag for a From or To header.
pub fn generate_tag() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..16].to_string()
}

macro_rules! address_header {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            address: Address,
            params: NameValueList,
        }

        impl $name {
            pub fn new(address: Address) -> Self {
                $name {
                    address,
                    params: NameValueList::new(),
                }
            }

            pub fn address(&self) -> &Address {
                &self.address
            }

            pub fn address_mut(&mut self) -> &mut Address {
                &mut self.address
            }

            pub fn set_address(&mut self, address: Address) {
                self.address = address;
            }

            pub fn uri(&self) -> &Uri {
                self.address.uri()
            }

            pub fn display_name(&self) -> Option<&str> {
                self.address.display_name()
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

            pub fn has_parameter(&self, name: &str) -> bool {
                self.params.has(name)
            }

            pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<GenericValue>) -> Result<()> {
                self.params.set(name, value)
            }

            pub fn set_flag_parameter(&mut self, name: impl Into<String>) -> Result<()> {
                self.params.set_flag(name)
            }

            pub fn remove_parameter(&mut self, name: &str) -> bool {
                self.params.remove(name)
            }

            pub(crate) fn from_parts(address: Address, params: NameValueList) -> Self {
                $name { address, params }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.address)?;
                self.params.fmt_prefixed(f)
            }
        }

        impl Matches for $name {
            fn matches(&self, template: &Self) -> bool {
                self.address.matches(&template.address) && self.params.matches(&template.params)
            }
        }

        impl Merge for $name {
            fn merge(&mut self, other: &Self) {
                self.address.merge(&other.address);
                self.params.merge(&other.params);
            }
        }

        impl std::convert::From<Address> for $name {
            fn from(address: Address) -> Self {
                $name::new(address)
            }
        }

        typed_header!($name, $variant, $parser);
    };
}

macro_rules! tag_methods {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// The `tag` parameter used for dialog identification.
                pub fn tag(&self) -> Option<&str> {
                    self.params.value("tag")
                }

                pub fn has_tag(&self) -> bool {
                    self.params.has("tag")
                }

                pub fn set_tag(&mut self, tag: impl Into<String>) -> Result<()> {
                    let tag = tag.into();
                    if !is_token(&tag) {
                        return Err(Error::InvalidArgument(format!("Invalid tag: '{}'", tag)));
                    }
                    self.params.put("tag", GenericValue::Token(tag));
                    Ok(())
                }

                pub fn remove_tag(&mut self) -> bool {
                    self.params.remove("tag")
                }
            }
        )+
    };
}

address_header!(
    /// `From`: the initiator of the request.
    From, From, crate::parser::headers::address::from
);
address_header!(
    /// `To`: the logical recipient of the request.
    To, To, crate::parser::headers::address::to
);
address_header!(ReplyTo, ReplyTo, crate::parser::headers::address::reply_to);
address_header!(
    /// `Refer-To` (RFC 3515)
    ReferTo, ReferTo, crate::parser::headers::address::refer_to
);
address_header!(
    /// `Referred-By` (RFC 3892)
    ReferredBy, ReferredBy, crate::parser::headers::address::referred_by
);
address_header!(Route, Route, crate::parser::headers::address::route);
address_header!(RecordRoute, RecordRoute, crate::parser::headers::address::record_route);
address_header!(
    /// `Path` (RFC 3327)
    Path, Path, crate::parser::headers::address::path
);
address_header!(
    /// `Service-Route` (RFC 3608)
    ServiceRoute, ServiceRoute, crate::parser::headers::address::service_route
);

tag_methods!(From, To);

macro_rules! loose_routing {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// True when the URI carries the `lr` loose-routing flag.
                pub fn is_loose_routing(&self) -> bool {
                    self.address.uri().as_sip().map_or(false, |sip| sip.has_lr())
                }
            }
        )+
    };
}

loose_routing!(Route, RecordRoute);

/// `Contact`: a URI where the sender can be reached, or `*` in a REGISTER
/// that removes all bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    address: Option<Address>,
    params: NameValueList,
}

impl Contact {
    pub fn new(address: Address) -> Self {
        Contact {
            address: Some(address),
            params: NameValueList::new(),
        }
    }

    /// `Contact: *`
    pub fn wildcard() -> Self {
        Contact {
            address: None,
            params: NameValueList::new(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.address.is_none()
    }

    /// The address, `None` for the wildcard.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn address_mut(&mut self) -> Option<&mut Address> {
        self.address.as_mut()
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.address.as_ref().map(Address::uri)
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

    pub fn has_parameter(&self, name: &str) -> bool {
        self.params.has(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<GenericValue>) -> Result<()> {
        self.params.set(name, value)
    }

    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.params.remove(name)
    }

    pub fn q(&self) -> Option<NotNan<f32>> {
        self.params.value("q").and_then(|q| parse_q(q).ok())
    }

    /// Sets the preference, which must lie in `[0, 1]`.
    pub fn set_q(&mut self, q: f32) -> Result<()> {
        let q = check_q(q)?;
        self.params.put("q", GenericValue::Token(format_q(q)));
        Ok(())
    }

    pub fn remove_q(&mut self) -> bool {
        self.params.remove("q")
    }

    pub fn expires(&self) -> Option<u32> {
        self.params.value("expires").and_then(|e| e.parse().ok())
    }

    pub fn set_expires(&mut self, seconds: u32) {
        self.params.put("expires", GenericValue::Token(seconds.to_string()));
    }

    pub fn remove_expires(&mut self) -> bool {
        self.params.remove("expires")
    }

    pub(crate) fn from_parts(address: Option<Address>, params: NameValueList) -> Self {
        Contact { address, params }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            None => f.write_str("*")?,
            Some(address) => write!(f, "{}", address)?,
        }
        self.params.fmt_prefixed(f)
    }
}

impl Matches for Contact {
    fn matches(&self, template: &Self) -> bool {
        let address_ok = match (&self.address, &template.address) {
            (Some(mine), Some(t)) => mine.matches(t),
            (None, None) => true,
            _ => false,
        };
        address_ok && self.params.matches(&template.params)
    }
}

impl Merge for Contact {
    fn merge(&mut self, other: &Self) {
        match (&mut self.address, &other.address) {
            (Some(mine), Some(o)) => mine.merge(o),
            (None, Some(o)) => self.address = Some(o.clone()),
            (_, None) => {}
        }
        self.params.merge(&other.params);
    }
}

impl std::convert::From<Address> for Contact {
    fn from(address: Address) -> Self {
        Contact::new(address)
    }
}

typed_header!(Contact, Contact, crate::parser::headers::address::contact);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use std::str::FromStr;

    fn uri(s: &str) -> Uri {
        Uri::from_str(s).unwrap()
    }

    #[test]
    fn test_from_round_trip() {
        let text = "\"Alice Liddell\" <sip:alice@atlanta.com>;tag=1928301774";
        let from = From::from_str(text).unwrap();
        assert_eq!(from.display_name(), Some("Alice Liddell"));
        assert_eq!(from.to_string(), "Alice Liddell <sip:alice@atlanta.com>;tag=1928301774");
        assert_eq!(From::from_str(&from.to_string()).unwrap(), from);
        assert_eq!(from.encode(), format!("From: {}\r\n", from));
    }

    #[test]
    fn test_tag_methods() {
        let mut to = To::new(Address::new(uri("sip:bob@biloxi.com")));
        assert!(!to.has_tag());
        assert!(to.set_tag("").is_err());
        assert!(to.set_tag("a b").is_err());
        to.set_tag(generate_tag()).unwrap();
        assert_eq!(to.tag().map(str::len), Some(16));
        assert!(to.remove_tag());
        assert_eq!(to.to_string(), "<sip:bob@biloxi.com>");
    }

    #[test]
    fn test_addr_spec_keeps_header_params() {
        let to = To::from_str("sip:bob@biloxi.com;tag=287447").unwrap();
        assert_eq!(to.tag(), Some("287447"));
        assert_eq!(to.to_string(), "sip:bob@biloxi.com;tag=287447");
        assert_eq!(To::from_str(&to.to_string()).unwrap(), to);
    }

    #[test]
    fn test_contact_params() {
        let mut contact = Contact::new(Address::new(uri("sip:alice@pc33.atlanta.com")));
        assert!(contact.set_q(1.1).is_err());
        contact.set_q(0.7).unwrap();
        contact.set_expires(3600);
        assert_eq!(contact.to_string(), "<sip:alice@pc33.atlanta.com>;q=0.7;expires=3600");

        let parsed = Contact::from_str(&contact.to_string()).unwrap();
        assert_eq!(parsed.q().map(|q| q.into_inner()), Some(0.7));
        assert_eq!(parsed.expires(), Some(3600));
        assert_eq!(parsed, contact);
    }

    #[test]
    fn test_contact_wildcard() {
        let contact = Contact::from_str("*").unwrap();
        assert!(contact.is_wildcard());
        assert!(contact.address().is_none());
        assert_eq!(contact.encode(), "Contact: *\r\n");
    }

    #[test]
    fn test_route_loose_routing() {
        let route = Route::from_str("<sip:p1.example.com;lr>").unwrap();
        assert!(route.is_loose_routing());
        assert!(Route::from_str("sip:p1.example.com").is_err());
        let rr = RecordRoute::from_str("<sip:p2.example.com>;foo=bar").unwrap();
        assert!(!rr.is_loose_routing());
        assert_eq!(rr.parameter("foo"), Some("bar"));
    }

    #[test]
    fn test_matches_and_merge() {
        let from = From::from_str("Alice <sip:alice@atlanta.com>;tag=1").unwrap();
        let template = From::new(Address::new(uri("sip:alice@atlanta.com")));
        assert!(from.matches(&template));

        let mut other_tag = template.clone();
        other_tag.set_tag("2").unwrap();
        assert!(!from.matches(&other_tag));

        let mut merged = from.clone();
        merged.merge(&other_tag);
        assert_eq!(merged.tag(), Some("2"));
        assert_eq!(merged.display_name(), Some("Alice"));
    }
}
