//! # URI information headers
//!
//! `Call-Info`, `Alert-Info` and `Error-Info` each carry an absolute URI
//! between angle brackets followed by parameters
//! ([RFC 3261 §20.4, §20.9, §20.18](https://datatracker.ietf.org/doc/html/rfc3261#section-20.4)):
//!
//! ```text
//! Call-Info: <http://wwww.example.com/alice/photo.jpg> ;purpose=icon
//! Alert-Info: <http://www.example.com/sounds/moo.wav>
//! Error-Info: <sip:not-in-service-recording@atlanta.com>
//! ```
//!
//! ```rust
//! use sip_model::headers::{CallInfo, Purpose};
//!
//! let info: CallInfo = "<http://www.example.com/alice/> ;purpose=info".parse().unwrap();
//! assert_eq!(info.purpose(), Some(Purpose::Info));
//! assert_eq!(info.to_string(), "<http://www.example.com/alice/>;purpose=info");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{Matches, Merge};
use crate::parser::token::is_token;
use crate::types::param::{GenericValue, NameValueList};
use crate::types::uri::Uri;

macro_rules! info_header {
    ($(#[$meta:meta])* $name:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            uri: Uri,
            params: NameValueList,
        }

        impl $name {
            pub fn new(uri: Uri) -> Self {
                $name {
                    uri,
                    params: NameValueList::new(),
                }
            }

            pub fn uri(&self) -> &Uri {
                &self.uri
            }

            pub fn set_uri(&mut self, uri: Uri) {
                self.uri = uri;
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

            pub(crate) fn from_parts(uri: Uri, params: NameValueList) -> Self {
                $name { uri, params }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "<{}>", self.uri)?;
                self.params.fmt_prefixed(f)
            }
        }

        impl Matches for $name {
            fn matches(&self, template: &Self) -> bool {
                self.uri == template.uri && self.params.matches(&template.params)
            }
        }

        impl Merge for $name {
            fn merge(&mut self, other: &Self) {
                self.uri = other.uri.clone();
                self.params.merge(&other.params);
            }
        }

        impl std::convert::From<Uri> for $name {
            fn from(uri: Uri) -> Self {
                $name::new(uri)
            }
        }

        typed_header!($name, $name, $parser);
    };
}

info_header!(
    /// `Call-Info`: additional information about the caller or callee.
    CallInfo, crate::parser::headers::info::call_info
);
info_header!(
    /// `Alert-Info`: an alternative ring tone.
    AlertInfo, crate::parser::headers::info::alert_info
);
info_header!(
    /// `Error-Info`: a pointer to additional information about an error status.
    ErrorInfo, crate::parser::headers::info::error_info
);

/// The `purpose` parameter of Call-Info.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Icon,
    Info,
    Card,
    Other(String),
}

impl Purpose {
    pub fn as_str(&self) -> &str {
        match self {
            Purpose::Icon => "icon",
            Purpose::Info => "info",
            Purpose::Card => "card",
            Purpose::Other(s) => s,
        }
    }
}

impl CallInfo {
    pub fn purpose(&self) -> Option<Purpose> {
        self.params.value("purpose").map(|p| match p.to_ascii_lowercase().as_str() {
            "icon" => Purpose::Icon,
            "info" => Purpose::Info,
            "card" => Purpose::Card,
            _ => Purpose::Other(p.to_string()),
        })
    }

    pub fn set_purpose(&mut self, purpose: Purpose) -> Result<()> {
        if !is_token(purpose.as_str()) {
            return Err(Error::InvalidArgument(format!("Invalid purpose: '{}'", purpose.as_str())));
        }
        self.params.put("purpose", GenericValue::Token(purpose.as_str().to_string()));
        Ok(())
    }
}
