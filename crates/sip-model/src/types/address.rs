use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{Matches, Merge};
use crate::parser;
use crate::parser::quoted::{check_text, escape_quoted};
use crate::parser::token::is_token;
use crate::types::uri::Uri;

/// How an address is written: `name-addr` uses angle brackets, `addr-spec`
/// is the bare URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressForm {
    #[default]
    NameAddr,
    AddrSpec,
}

/// `name-addr / addr-spec` (RFC 3261 §25.1): an optional display name and a URI.
///
/// The form is presentation only and is ignored by equality. An addr-spec
/// whose URI contains `,`, `;` or `?` is still written in angle brackets so
/// the URI's own parameters are not read back as header parameters.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Address {
    display_name: Option<String>,
    uri: Uri,
    form: AddressForm,
}

impl Address {
    /// A name-addr with no display name.
    pub fn new(uri: Uri) -> Self {
        Address {
            display_name: None,
            uri,
            form: AddressForm::NameAddr,
        }
    }

    /// Fails when the display name contains a line break.
    pub fn with_display_name(uri: Uri, display_name: impl Into<String>) -> Result<Self> {
        let display_name = display_name.into();
        check_text("Display name", &display_name)?;
        Ok(Address {
            display_name: Some(display_name),
            uri,
            form: AddressForm::NameAddr,
        })
    }

    /// A bare addr-spec.
    pub fn addr_spec(uri: Uri) -> Self {
        Address {
            display_name: None,
            uri,
            form: AddressForm::AddrSpec,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Sets the display name. Setting one on an addr-spec switches it to name-addr.
    pub fn set_display_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        check_text("Display name", &name)?;
        self.display_name = Some(name);
        self.form = AddressForm::NameAddr;
        Ok(())
    }

    pub fn remove_display_name(&mut self) {
        self.display_name = None;
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn uri_mut(&mut self) -> &mut Uri {
        &mut self.uri
    }

    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = uri;
    }

    pub fn form(&self) -> AddressForm {
        self.form
    }

    pub fn set_form(&mut self, form: AddressForm) {
        self.form = form;
    }

    pub(crate) fn from_parts(display_name: Option<String>, uri: Uri, form: AddressForm) -> Self {
        Address {
            display_name,
            uri,
            form,
        }
    }
}

/// A display name can be written bare when it is a run of tokens separated by single spaces.
fn needs_quoting(name: &str) -> bool {
    name.is_empty() || !name.split(' ').all(is_token)
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.display_name == other.display_name && self.uri == other.uri
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracketed = self.form == AddressForm::NameAddr
            || self.display_name.is_some()
            || self.uri.needs_brackets();
        if !bracketed {
            return write!(f, "{}", self.uri);
        }
        if let Some(name) = &self.display_name {
            if needs_quoting(name) {
                write!(f, "\"{}\" ", escape_quoted(name))?;
            } else {
                write!(f, "{} ", name)?;
            }
        }
        write!(f, "<{}>", self.uri)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_all(s.trim(), parser::address::address)
    }
}

impl From<Uri> for Address {
    fn from(uri: Uri) -> Self {
        Address::new(uri)
    }
}

impl Matches for Address {
    fn matches(&self, template: &Self) -> bool {
        let name_ok = match &template.display_name {
            None => true,
            Some(t) => self.display_name.as_deref() == Some(t.as_str()),
        };
        name_ok && self.uri.matches(&template.uri)
    }
}

impl Merge for Address {
    fn merge(&mut self, other: &Self) {
        if other.display_name.is_some() {
            self.display_name = other.display_name.clone();
        }
        self.uri.merge(&other.uri);
    }
}
