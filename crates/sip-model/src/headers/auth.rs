//! # Authentication headers
//!
//! Challenges (WWW-Authenticate, Proxy-Authenticate), credentials
//! (Authorization, Proxy-Authorization) and Authentication-Info, as used by
//! HTTP Digest authentication in SIP
//! ([RFC 3261 §22](https://datatracker.ietf.org/doc/html/rfc3261#section-22),
//! [RFC 2617](https://datatracker.ietf.org/doc/html/rfc2617)).
//!
//! Parameters are stored in a comma-separated [`NameValueList`]. Whether a
//! value is written quoted depends on the parameter name, following the RFC
//! 3261 grammar: `realm`, `nonce`, `uri`, `response`, `cnonce` and friends
//! are quoted strings, while `algorithm`, `nc` and `stale` are tokens. `qop`
//! is quoted in a challenge and a token in credentials.
//!
//! ```rust
//! use sip_model::headers::Authorization;
//!
//! let mut auth = Authorization::digest();
//! auth.set_username("alice").unwrap();
//! auth.set_realm("atlanta.com").unwrap();
//! auth.set_qop("auth").unwrap();
//! auth.set_nonce_count(1).unwrap();
//! assert_eq!(
//!     auth.to_string(),
//!     "Digest username=\"alice\", realm=\"atlanta.com\", qop=auth, nc=00000001"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_token, merge_string, Matches, Merge};
use crate::parser::token::is_token;
use crate::types::param::{GenericValue, NameValueList, Separator};

/// The only scheme RFC 3261 defines.
pub const DIGEST: &str = "Digest";

/// Where an authentication parameter appears; decides how it is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamContext {
    Challenge,
    Credentials,
    Info,
}

fn is_quoted_param(context: ParamContext, name: &str) -> Option<bool> {
    let name = name.to_ascii_lowercase();
    let quoted = match name.as_str() {
        "realm" | "nonce" | "opaque" | "domain" | "username" | "uri" | "response" | "cnonce"
        | "nextnonce" | "rspauth" => true,
        "algorithm" | "nc" | "stale" => false,
        "qop" => context == ParamContext::Challenge,
        _ => return None,
    };
    Some(quoted)
}

fn auth_value(context: ParamContext, name: &str, value: String) -> GenericValue {
    match is_quoted_param(context, name) {
        Some(true) => GenericValue::Quoted(value),
        Some(false) => GenericValue::Token(value),
        None if is_token(&value) => GenericValue::Token(value),
        None => GenericValue::Quoted(value),
    }
}

fn comma_list() -> NameValueList {
    NameValueList::with_separator(Separator::Comma)
}

fn check_scheme(scheme: String) -> Result<String> {
    if !is_token(&scheme) {
        return Err(Error::InvalidArgument(format!("Invalid auth scheme: '{}'", scheme)));
    }
    Ok(scheme)
}

fn check_non_empty(what: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{} must not be empty", what)));
    }
    Ok(value)
}

fn check_token(what: &str, value: String) -> Result<String> {
    if !is_token(&value) {
        return Err(Error::InvalidArgument(format!("Invalid {}: '{}'", what, value)));
    }
    Ok(value)
}

macro_rules! auth_header {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $context:expr, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, Serialize, Deserialize)]
        pub struct $name {
            scheme: String,
            params: NameValueList,
        }

        impl $name {
            /// An empty header for the given scheme.
            pub fn new(scheme: impl Into<String>) -> Result<Self> {
                Ok($name {
                    scheme: check_scheme(scheme.into())?,
                    params: comma_list(),
                })
            }

            /// An empty `Digest` header.
            pub fn digest() -> Self {
                $name {
                    scheme: DIGEST.to_string(),
                    params: comma_list(),
                }
            }

            pub fn scheme(&self) -> &str {
                &self.scheme
            }

            pub fn set_scheme(&mut self, scheme: impl Into<String>) -> Result<()> {
                self.scheme = check_scheme(scheme.into())?;
                Ok(())
            }

            pub fn is_digest(&self) -> bool {
                self.scheme.eq_ignore_ascii_case(DIGEST)
            }

            pub fn params(&self) -> &NameValueList {
                &self.params
            }

            pub fn parameter(&self, name: &str) -> Option<&str> {
                self.params.value(name)
            }

            pub fn has_parameter(&self, name: &str) -> bool {
                self.params.has(name)
            }

            /// Sets a parameter, quoting it the way its name requires.
            pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
                let name = check_token("parameter name", name.into())?;
                let value = auth_value($context, &name, value.into());
                self.params.set(name, value)
            }

            pub fn remove_parameter(&mut self, name: &str) -> bool {
                self.params.remove(name)
            }

            pub fn realm(&self) -> Option<&str> {
                self.parameter("realm")
            }

            pub fn set_realm(&mut self, realm: impl Into<String>) -> Result<()> {
                let realm = check_non_empty("realm", realm.into())?;
                self.params.set("realm", GenericValue::Quoted(realm))
            }

            pub fn nonce(&self) -> Option<&str> {
                self.parameter("nonce")
            }

            pub fn set_nonce(&mut self, nonce: impl Into<String>) -> Result<()> {
                self.params.set("nonce", GenericValue::Quoted(nonce.into()))
            }

            pub fn opaque(&self) -> Option<&str> {
                self.parameter("opaque")
            }

            pub fn set_opaque(&mut self, opaque: impl Into<String>) -> Result<()> {
                self.params.set("opaque", GenericValue::Quoted(opaque.into()))
            }

            pub fn algorithm(&self) -> Option<&str> {
                self.parameter("algorithm")
            }

            pub fn set_algorithm(&mut self, algorithm: impl Into<String>) -> Result<()> {
                let algorithm = check_token("algorithm", algorithm.into())?;
                self.params.put("algorithm", GenericValue::Token(algorithm));
                Ok(())
            }

            pub(crate) fn from_parts(scheme: String, mut params: NameValueList) -> Self {
                params.set_separator(Separator::Comma);
                $name { scheme, params }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.scheme.eq_ignore_ascii_case(&other.scheme) && self.params == other.params
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.scheme)?;
                if !self.params.is_empty() {
                    write!(f, " {}", self.params)?;
                }
                Ok(())
            }
        }

        impl Matches for $name {
            fn matches(&self, template: &Self) -> bool {
                match_token(&self.scheme, &template.scheme) && self.params.matches(&template.params)
            }
        }

        impl Merge for $name {
            fn merge(&mut self, other: &Self) {
                merge_string(&mut self.scheme, &other.scheme);
                self.params.merge(&other.params);
            }
        }

        typed_header!($name, $variant, $parser);
    };
}

macro_rules! credentials_methods {
    ($($name:ident),+) => {
        $(
            impl $name {
                pub fn username(&self) -> Option<&str> {
                    self.parameter("username")
                }

                pub fn set_username(&mut self, username: impl Into<String>) -> Result<()> {
                    let username = check_non_empty("username", username.into())?;
                    self.params.set("username", GenericValue::Quoted(username))
                }

                /// The `uri` (digest-uri) parameter.
                pub fn uri(&self) -> Option<&str> {
                    self.parameter("uri")
                }

                pub fn set_uri(&mut self, uri: impl fmt::Display) -> Result<()> {
                    self.params.set("uri", GenericValue::Quoted(uri.to_string()))
                }

                pub fn response(&self) -> Option<&str> {
                    self.parameter("response")
                }

                pub fn set_response(&mut self, response: impl Into<String>) -> Result<()> {
                    self.params.set("response", GenericValue::Quoted(response.into()))
                }

                pub fn cnonce(&self) -> Option<&str> {
                    self.parameter("cnonce")
                }

                pub fn set_cnonce(&mut self, cnonce: impl Into<String>) -> Result<()> {
                    self.params.set("cnonce", GenericValue::Quoted(cnonce.into()))
                }

                /// The chosen quality of protection, e.g. `auth`.
                pub fn qop(&self) -> Option<&str> {
                    self.parameter("qop")
                }

                pub fn set_qop(&mut self, qop: impl Into<String>) -> Result<()> {
                    let qop = check_token("qop", qop.into())?;
                    self.params.put("qop", GenericValue::Token(qop));
                    Ok(())
                }

                /// The `nc` parameter, read as 8 hex digits.
                pub fn nonce_count(&self) -> Option<u32> {
                    self.parameter("nc").and_then(|nc| u32::from_str_radix(nc, 16).ok())
                }

                /// Sets `nc`, which must lie in `1..=0xFFFFFFFF`.
                pub fn set_nonce_count(&mut self, nc: u64) -> Result<()> {
                    if !(1..=0xFFFF_FFFF).contains(&nc) {
                        return Err(Error::InvalidArgument(format!(
                            "nonce-count {} is outside 1..=0xFFFFFFFF",
                            nc
                        )));
                    }
                    self.params.put("nc", GenericValue::Token(format!("{:08x}", nc)));
                    Ok(())
                }
            }
        )+
    };
}

macro_rules! challenge_methods {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// The space-separated protection domain URIs.
                pub fn domain(&self) -> Option<&str> {
                    self.parameter("domain")
                }

                pub fn set_domain(&mut self, domain: impl Into<String>) -> Result<()> {
                    self.params.set("domain", GenericValue::Quoted(domain.into()))
                }

                pub fn stale(&self) -> Option<bool> {
                    self.parameter("stale").map(|s| s.eq_ignore_ascii_case("true"))
                }

                pub fn set_stale(&mut self, stale: bool) {
                    let value = if stale { "TRUE" } else { "FALSE" };
                    self.params.put("stale", GenericValue::Token(value.to_string()));
                }

                /// The offered qop values, e.g. `["auth", "auth-int"]`.
                pub fn qop_options(&self) -> Vec<&str> {
                    self.parameter("qop")
                        .map(|q| q.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
                        .unwrap_or_default()
                }

                pub fn set_qop_options(&mut self, options: &[&str]) -> Result<()> {
                    for option in options {
                        check_token("qop", option.to_string())?;
                    }
                    self.params.set("qop", GenericValue::Quoted(options.join(",")))
                }
            }
        )+
    };
}

auth_header!(
    /// `Authorization`: credentials for a UAS or registrar.
    Authorization, Authorization, ParamContext::Credentials,
    crate::parser::headers::auth::authorization
);
auth_header!(
    /// `Proxy-Authorization`: credentials for a proxy.
    ProxyAuthorization, ProxyAuthorization, ParamContext::Credentials,
    crate::parser::headers::auth::proxy_authorization
);
auth_header!(
    /// `WWW-Authenticate`: a challenge from a UAS or registrar.
    WwwAuthenticate, WwwAuthenticate, ParamContext::Challenge,
    crate::parser::headers::auth::www_authenticate
);
auth_header!(
    /// `Proxy-Authenticate`: a challenge from a proxy.
    ProxyAuthenticate, ProxyAuthenticate, ParamContext::Challenge,
    crate::parser::headers::auth::proxy_authenticate
);

credentials_methods!(Authorization, ProxyAuthorization);
challenge_methods!(WwwAuthenticate, ProxyAuthenticate);

/// `Authentication-Info`: mutual authentication data sent after a
/// successful Digest exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInfo {
    params: NameValueList,
}

impl AuthenticationInfo {
    pub fn new() -> Self {
        AuthenticationInfo { params: comma_list() }
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.value(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = check_token("parameter name", name.into())?;
        let value = auth_value(ParamContext::Info, &name, value.into());
        self.params.set(name, value)
    }

    pub fn next_nonce(&self) -> Option<&str> {
        self.parameter("nextnonce")
    }

    pub fn set_next_nonce(&mut self, nonce: impl Into<String>) -> Result<()> {
        self.params.set("nextnonce", GenericValue::Quoted(nonce.into()))
    }

    pub fn response_auth(&self) -> Option<&str> {
        self.parameter("rspauth")
    }

    pub fn set_response_auth(&mut self, rspauth: impl Into<String>) -> Result<()> {
        self.params.set("rspauth", GenericValue::Quoted(rspauth.into()))
    }

    pub fn qop(&self) -> Option<&str> {
        self.parameter("qop")
    }

    pub fn cnonce(&self) -> Option<&str> {
        self.parameter("cnonce")
    }

    pub fn nonce_count(&self) -> Option<u32> {
        self.parameter("nc").and_then(|nc| u32::from_str_radix(nc, 16).ok())
    }

    pub(crate) fn from_parts(mut params: NameValueList) -> Self {
        params.set_separator(Separator::Comma);
        AuthenticationInfo { params }
    }
}

impl Default for AuthenticationInfo {
    fn default() -> Self {
        AuthenticationInfo::new()
    }
}

impl fmt::Display for AuthenticationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.params)
    }
}

typed_header!(
    AuthenticationInfo,
    AuthenticationInfo,
    crate::parser::headers::auth::authentication_info
);

impl Matches for AuthenticationInfo {
    fn matches(&self, template: &Self) -> bool {
        self.params.matches(&template.params)
    }
}

impl Merge for AuthenticationInfo {
    fn merge(&mut self, other: &Self) {
        self.params.merge(&other.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use crate::types::Uri;
    use std::str::FromStr;

    #[test]
    fn test_credentials_quoting() {
        let mut auth = Authorization::digest();
        auth.set_username("bob").unwrap();
        auth.set_realm("biloxi.com").unwrap();
        auth.set_nonce("dcd98b7102dd2f0e8b11d0f600bfb0c093").unwrap();
        auth.set_uri(Uri::from_str("sip:bob@biloxi.com").unwrap()).unwrap();
        auth.set_response("245f23415f11432b3434341c022").unwrap();
        auth.set_algorithm("MD5").unwrap();
        auth.set_qop("auth").unwrap();
        auth.set_nonce_count(1).unwrap();
        auth.set_cnonce("0a4f113b").unwrap();
        auth.set_opaque("").unwrap();

        let text = auth.to_string();
        assert_eq!(
            text,
            "Digest username=\"bob\", realm=\"biloxi.com\", nonce=\"dcd98b7102dd2f0e8b11d0f600bfb0c093\", \
             uri=\"sip:bob@biloxi.com\", response=\"245f23415f11432b3434341c022\", algorithm=MD5, \
             qop=auth, nc=00000001, cnonce=\"0a4f113b\", opaque=\"\""
        );
        assert_eq!(Authorization::from_str(&text).unwrap(), auth);
    }

    #[test]
    fn test_setter_validation() {
        let mut auth = ProxyAuthorization::digest();
        assert!(auth.set_realm("").is_err());
        assert!(auth.set_username("").is_err());
        assert!(auth.set_nonce_count(0).is_err());
        assert!(auth.set_nonce_count(0x1_0000_0000).is_err());
        auth.set_nonce_count(0xFFFF_FFFF).unwrap();
        assert_eq!(auth.parameter("nc"), Some("ffffffff"));
        assert_eq!(auth.nonce_count(), Some(0xFFFF_FFFF));
        assert!(auth.set_scheme("").is_err());
        assert!(Authorization::new("two words").is_err());
        assert!(auth.set_parameter("algorithm", "MD5 sess").is_err());
    }

    #[test]
    fn test_quoted_setters_reject_line_breaks() {
        let mut auth = Authorization::digest();
        auth.set_realm("biloxi.com").unwrap();
        let before = auth.clone();
        assert!(auth.set_realm("biloxi.com\r\nX-Evil: 1").is_err());
        assert!(auth.set_nonce("abc\r\nX-Evil: 1").is_err());
        assert!(auth.set_opaque("\n").is_err());
        assert!(auth.set_response("a\rb").is_err());
        assert!(auth.set_cnonce("0a4f\n113b").is_err());
        assert!(auth.set_uri("sip:bob@biloxi.com\r\n").is_err());
        assert!(auth.set_parameter("x-custom", "two\r\nlines").is_err());
        assert_eq!(auth, before);

        let mut chal = WwwAuthenticate::digest();
        assert!(chal.set_domain("sip:a.com\r\n").is_err());

        let mut info = AuthenticationInfo::new();
        assert!(info.set_next_nonce("abc\n").is_err());
        assert!(info.set_response_auth("\r").is_err());
        assert!(info.params().is_empty());

        auth.set_nonce("a \"quoted\" \\ nonce").unwrap();
        assert_eq!(Authorization::from_str(&auth.to_string()).unwrap(), auth);
    }

    #[test]
    fn test_generic_set_parameter_quotes_by_name() {
        let mut chal = WwwAuthenticate::digest();
        chal.set_parameter("realm", "atlanta.com").unwrap();
        chal.set_parameter("qop", "auth").unwrap();
        chal.set_parameter("algorithm", "MD5").unwrap();
        chal.set_parameter("x-custom", "two words").unwrap();
        assert_eq!(
            chal.to_string(),
            "Digest realm=\"atlanta.com\", qop=\"auth\", algorithm=MD5, x-custom=\"two words\""
        );
    }

    #[test]
    fn test_challenge_accessors() {
        let mut chal = ProxyAuthenticate::digest();
        chal.set_realm("atlanta.com").unwrap();
        chal.set_domain("sip:ss1.carrier.com").unwrap();
        chal.set_qop_options(&["auth", "auth-int"]).unwrap();
        chal.set_stale(true);
        assert_eq!(chal.qop_options(), vec!["auth", "auth-int"]);
        assert_eq!(chal.stale(), Some(true));
        assert_eq!(
            chal.encode(),
            "Proxy-Authenticate: Digest realm=\"atlanta.com\", domain=\"sip:ss1.carrier.com\", qop=\"auth,auth-int\", stale=TRUE\r\n"
        );
        assert!(chal.set_qop_options(&["bad qop"]).is_err());
    }

    #[test]
    fn test_authentication_info() {
        let info = AuthenticationInfo::from_str(
            "nextnonce=\"47364c23432d2e131a5fb210812c\", qop=auth, rspauth=\"e3b0\", cnonce=\"0a4f113b\", nc=00000001",
        )
        .unwrap();
        assert_eq!(info.next_nonce(), Some("47364c23432d2e131a5fb210812c"));
        assert_eq!(info.qop(), Some("auth"));
        assert_eq!(info.nonce_count(), Some(1));
        assert_eq!(AuthenticationInfo::from_str(&info.to_string()).unwrap(), info);
    }

    #[test]
    fn test_matches_scheme_and_params() {
        let auth = Authorization::from_str("Digest username=\"alice\", realm=\"a.com\"").unwrap();
        let mut template = Authorization::digest();
        template.set_realm("a.com").unwrap();
        assert!(auth.matches(&template));
        template.set_realm("b.com").unwrap();
        assert!(!auth.matches(&template));
    }
}
