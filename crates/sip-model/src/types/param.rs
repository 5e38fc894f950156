//! # SIP Parameters
//!
//! Parameters attach extra information to headers and URIs
//! ([RFC 3261 §7.3.1](https://datatracker.ietf.org/doc/html/rfc3261#section-7.3.1)):
//!
//! - header parameters (`Via: SIP/2.0/UDP host;branch=z9hG4bK776`)
//! - URI parameters (`sip:alice@atlanta.com;transport=tcp`)
//! - URI headers (`sip:bob@biloxi.com?subject=project&priority=urgent`)
//! - authentication parameters (`Digest realm="atlanta.com", nonce="84a4cc6f"`)
//!
//! All four are stored in a [`NameValueList`]: an ordered list of
//! [`NameValue`] entries with case-insensitive name lookup. The list knows
//! its own [`Separator`] so it can render itself in any of those contexts.
//!
//! ## Examples
//!
//! ```rust
//! use sip_model::types::param::{GenericValue, NameValueList};
//!
//! let mut params = NameValueList::new();
//! params.set("branch", "z9hG4bK776asdhds").unwrap();
//! params.set_flag("rport").unwrap();
//! assert_eq!(params.value("BRANCH"), Some("z9hG4bK776asdhds"));
//! assert!(params.has("rport"));
//! assert_eq!(params.to_string(), "branch=z9hG4bK776asdhds;rport");
//!
//! // Values that are not tokens are quoted automatically
//! params.set("text", "Call in progress").unwrap();
//! assert!(matches!(params.get("text").unwrap().value(), Some(GenericValue::Quoted(_))));
//!
//! // ...but never line breaks, which would end the header
//! assert!(params.set("text", "busy\r\nX-Injected: 1").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{Matches, Merge};
use crate::parser;
use crate::parser::quoted::{check_text, escape_quoted};
use crate::parser::token::is_token;
use crate::types::host::Host;

/// The parsed value of a generic parameter.
///
/// `gen-value = token / host / quoted-string`
///
/// Token and host values compare case-insensitively with each other by their
/// text, so `received=192.0.2.1` parsed as a token equals the same value set
/// as a [`Host`]. Quoted values compare exactly.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub enum GenericValue {
    /// A simple token value
    Token(String),
    /// A domain name or IP address
    Host(Host),
    /// A value that is written between double quotes
    Quoted(String),
}

impl GenericValue {
    /// Returns the value as a string slice if it's Token or Quoted.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GenericValue::Token(s) | GenericValue::Quoted(s) => Some(s.as_str()),
            GenericValue::Host(_) => None,
        }
    }

    /// Returns the underlying Host if it's the Host variant.
    pub fn as_host(&self) -> Option<&Host> {
        match self {
            GenericValue::Host(h) => Some(h),
            _ => None,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, GenericValue::Quoted(_))
    }

    /// The unquoted text of the value.
    pub fn text(&self) -> String {
        match self {
            GenericValue::Token(s) | GenericValue::Quoted(s) => s.clone(),
            GenericValue::Host(h) => h.to_string(),
        }
    }
}

impl PartialEq for GenericValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GenericValue::Quoted(a), GenericValue::Quoted(b)) => a == b,
            (GenericValue::Quoted(_), _) | (_, GenericValue::Quoted(_)) => false,
            (a, b) => a.text().eq_ignore_ascii_case(&b.text()),
        }
    }
}

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericValue::Token(s) => write!(f, "{}", s),
            GenericValue::Host(h) => write!(f, "{}", h),
            GenericValue::Quoted(s) => write!(f, "\"{}\"", escape_quoted(s)),
        }
    }
}

impl From<&str> for GenericValue {
    /// Token text stays a token; anything else is quoted.
    fn from(s: &str) -> Self {
        if is_token(s) {
            GenericValue::Token(s.to_string())
        } else {
            GenericValue::Quoted(s.to_string())
        }
    }
}

impl From<String> for GenericValue {
    fn from(s: String) -> Self {
        GenericValue::from(s.as_str())
    }
}

impl From<Host> for GenericValue {
    fn from(h: Host) -> Self {
        GenericValue::Host(h)
    }
}

/// A single `name[=value]` entry. An entry without a value is a flag
/// parameter such as `lr`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameValue {
    name: String,
    value: Option<GenericValue>,
}

impl NameValue {
    /// A checked entry: the name must be a token, a token value must be a
    /// token and quoted text must not contain line breaks.
    pub fn new(name: impl Into<String>, value: Option<GenericValue>) -> Result<Self> {
        let name = name.into();
        if !is_token(&name) {
            return Err(Error::InvalidArgument(format!("Invalid parameter name: '{}'", name)));
        }
        if let Some(value) = &value {
            check_value(&name, value)?;
        }
        Ok(NameValue { name, value })
    }

    pub fn flag(name: impl Into<String>) -> Result<Self> {
        NameValue::new(name, None)
    }

    /// Entries straight from the parsers, or built by the crate from values
    /// it has already checked.
    pub(crate) fn from_parts(name: impl Into<String>, value: Option<GenericValue>) -> Self {
        NameValue {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&GenericValue> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<GenericValue>) -> Result<()> {
        if let Some(value) = &value {
            check_value(&self.name, value)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

fn check_value(name: &str, value: &GenericValue) -> Result<()> {
    match value {
        GenericValue::Quoted(text) => check_text(name, text),
        GenericValue::Token(token) if !is_token(token) => Err(Error::InvalidArgument(format!(
            "Invalid value for parameter '{}': '{}'",
            name,
            token.escape_default()
        ))),
        GenericValue::Host(Host::Domain(domain)) if !is_token(domain) => Err(Error::InvalidArgument(format!(
            "Invalid host for parameter '{}': '{}'",
            name,
            domain.escape_default()
        ))),
        _ => Ok(()),
    }
}

impl PartialEq for NameValue {
    fn eq(&self, other: &Self) -> bool {
        self.has_name(&other.name) && self.value == other.value
    }
}

impl Eq for NameValue {}

impl fmt::Display for NameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}={}", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Separator placed between entries when a [`NameValueList`] is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Separator {
    /// `;` header and URI parameters
    #[default]
    Semicolon,
    /// `, ` authentication parameters
    Comma,
    /// `&` URI headers
    Ampersand,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Semicolon => ";",
            Separator::Comma => ", ",
            Separator::Ampersand => "&",
        }
    }
}

/// Ordered parameter storage with case-insensitive lookup.
///
/// Equality ignores entry order. Setting an existing name replaces the value
/// in place so the encoding keeps its original order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameValueList {
    separator: Separator,
    items: Vec<NameValue>,
}

impl NameValueList {
    /// An empty `;`-separated list.
    pub fn new() -> Self {
        NameValueList::default()
    }

    pub fn with_separator(separator: Separator) -> Self {
        NameValueList {
            separator,
            items: Vec::new(),
        }
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn set_separator(&mut self, separator: Separator) {
        self.separator = separator;
    }

    /// Sets `name=value`, replacing any existing entry with the same name.
    ///
    /// Fails when the name is not a token or the value cannot be written
    /// back as it was given (line breaks in text, a [`GenericValue::Token`]
    /// that is not a token).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<GenericValue>) -> Result<()> {
        self.insert(NameValue::new(name, Some(value.into()))?);
        Ok(())
    }

    /// Sets a flag parameter (a name with no value).
    pub fn set_flag(&mut self, name: impl Into<String>) -> Result<()> {
        self.insert(NameValue::flag(name)?);
        Ok(())
    }

    /// Unchecked [`set`](Self::set) for names and values the crate builds
    /// itself.
    pub(crate) fn put(&mut self, name: &str, value: GenericValue) {
        self.insert(NameValue::from_parts(name, Some(value)));
    }

    pub(crate) fn put_flag(&mut self, name: &str) {
        self.insert(NameValue::from_parts(name, None));
    }

    /// Adds an entry, replacing any existing entry with the same name.
    pub fn insert(&mut self, entry: NameValue) {
        match self.items.iter_mut().find(|nv| nv.has_name(&entry.name)) {
            Some(existing) => existing.value = entry.value,
            None => self.items.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NameValue> {
        self.items.iter().find(|nv| nv.has_name(name))
    }

    /// The value of a parameter, if present and given as a token or quoted string.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|nv| nv.value.as_ref())
            .and_then(GenericValue::as_str)
    }

    pub fn generic_value(&self, name: &str) -> Option<&GenericValue> {
        self.get(name).and_then(|nv| nv.value.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes a parameter. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|nv| !nv.has_name(name));
        self.items.len() != before
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|nv| nv.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameValue> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Writes each entry prefixed by `;`, as header parameters appear after a value.
    pub(crate) fn fmt_prefixed(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nv in &self.items {
            write!(f, ";{}", nv)?;
        }
        Ok(())
    }
}

impl PartialEq for NameValueList {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .all(|nv| other.get(&nv.name).map_or(false, |o| o == nv))
    }
}

impl Eq for NameValueList {}

impl fmt::Display for NameValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, nv) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separator.as_str())?;
            }
            write!(f, "{}", nv)?;
        }
        Ok(())
    }
}

impl FromStr for NameValueList {
    type Err = Error;

    /// Parses `name=value;flag;...` (a leading `;` is allowed).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix(';').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(NameValueList::new());
        }
        parser::parse_all(body, parser::params::generic_params1)
    }
}

impl<'a> IntoIterator for &'a NameValueList {
    type Item = &'a NameValue;
    type IntoIter = std::slice::Iter<'a, NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<NameValue> for NameValueList {
    fn from_iter<I: IntoIterator<Item = NameValue>>(iter: I) -> Self {
        let mut list = NameValueList::new();
        for nv in iter {
            list.insert(nv);
        }
        list
    }
}

impl Extend<NameValue> for NameValueList {
    fn extend<I: IntoIterator<Item = NameValue>>(&mut self, iter: I) {
        for nv in iter {
            self.insert(nv);
        }
    }
}

impl Matches for NameValueList {
    /// Every template entry must be present here. A template flag matches any value.
    fn matches(&self, template: &Self) -> bool {
        template.items.iter().all(|t| match self.get(&t.name) {
            None => false,
            Some(mine) => match &t.value {
                None => true,
                Some(v) => mine.value.as_ref() == Some(v),
            },
        })
    }
}

impl Merge for NameValueList {
    fn merge(&mut self, other: &Self) {
        for nv in &other.items {
            self.insert(nv.clone());
        }
    }
}
