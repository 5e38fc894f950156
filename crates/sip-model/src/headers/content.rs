//! # Content headers
//!
//! Headers describing the message body
//! ([RFC 3261 §20.11-20.15](https://datatracker.ietf.org/doc/html/rfc3261#section-20.11)):
//!
//! ```text
//! Content-Type: application/sdp
//! Content-Disposition: session;handling=optional
//! Content-Encoding: gzip
//! Content-Language: fr
//! MIME-Version: 1.0
//! ```
//!
//! ```rust
//! use sip_model::headers::{ContentDisposition, ContentType, Handling};
//!
//! let ct = ContentType::sdp();
//! assert_eq!(ct.to_string(), "application/sdp");
//!
//! let cd: ContentDisposition = "session;handling=required".parse().unwrap();
//! assert_eq!(cd.handling(), Some(Handling::Required));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_token, merge_string, Matches, Merge};
use crate::parser::token::is_token;
use crate::types::media_type::MediaRange;
use crate::types::param::{GenericValue, NameValueList};

/// `Content-Type`: the media type of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType(MediaRange);

impl ContentType {
    pub fn new(media: MediaRange) -> Self {
        ContentType(media)
    }

    /// `application/sdp`
    pub fn sdp() -> Self {
        ContentType(MediaRange::from_parts(
            "application".to_string(),
            "sdp".to_string(),
            NameValueList::new(),
        ))
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

    /// Replaces type and subtype, keeping the parameters.
    pub fn set_content_type(&mut self, mtype: &str, subtype: &str) -> Result<()> {
        let params = self.0.params().clone();
        let mut media = MediaRange::new(mtype, subtype)?;
        *media.params_mut() = params;
        self.0 = media;
        Ok(())
    }

    pub fn charset(&self) -> Option<&str> {
        self.0.charset()
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.0.parameter(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<GenericValue>) -> Result<()> {
        self.0.set_parameter(name, value)
    }

    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.0.remove_parameter(name)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

typed_header!(ContentType, ContentType, crate::parser::headers::content::content_type);

impl Matches for ContentType {
    fn matches(&self, template: &Self) -> bool {
        match_token(self.media_type(), template.media_type())
            && match_token(self.subtype(), template.subtype())
            && self.0.params().matches(template.0.params())
    }
}

impl Merge for ContentType {
    fn merge(&mut self, other: &Self) {
        let mut params = self.0.params().clone();
        params.merge(other.0.params());
        self.0 = other.0.clone();
        *self.0.params_mut() = params;
    }
}

/// The `handling` parameter of Content-Disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handling {
    Optional,
    Required,
}

impl Handling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handling::Optional => "optional",
            Handling::Required => "required",
        }
    }
}

/// `Content-Disposition: <disp-type>;<params>`
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ContentDisposition {
    disposition: String,
    params: NameValueList,
}

impl ContentDisposition {
    /// Common values are `render`, `session`, `icon` and `alert`.
    pub fn new(disposition: impl Into<String>) -> Result<Self> {
        let disposition = disposition.into();
        if !is_token(&disposition) {
            return Err(Error::InvalidArgument(format!(
                "Invalid disposition type: '{}'",
                disposition
            )));
        }
        Ok(ContentDisposition {
            disposition,
            params: NameValueList::new(),
        })
    }

    pub fn disposition(&self) -> &str {
        &self.disposition
    }

    pub fn set_disposition(&mut self, disposition: impl Into<String>) -> Result<()> {
        let params = std::mem::take(&mut self.params);
        *self = ContentDisposition::new(disposition)?;
        self.params = params;
        Ok(())
    }

    pub fn handling(&self) -> Option<Handling> {
        match self.params.value("handling")? {
            h if h.eq_ignore_ascii_case("optional") => Some(Handling::Optional),
            h if h.eq_ignore_ascii_case("required") => Some(Handling::Required),
            _ => None,
        }
    }

    pub fn set_handling(&mut self, handling: Handling) {
        self.params
            .put("handling", GenericValue::Token(handling.as_str().to_string()));
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(disposition: String, params: NameValueList) -> Self {
        ContentDisposition { disposition, params }
    }
}

impl PartialEq for ContentDisposition {
    fn eq(&self, other: &Self) -> bool {
        self.disposition.eq_ignore_ascii_case(&other.disposition) && self.params == other.params
    }
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disposition)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(
    ContentDisposition,
    ContentDisposition,
    crate::parser::headers::content::content_disposition
);

impl Matches for ContentDisposition {
    fn matches(&self, template: &Self) -> bool {
        match_token(&self.disposition, &template.disposition) && self.params.matches(&template.params)
    }
}

impl Merge for ContentDisposition {
    fn merge(&mut self, other: &Self) {
        merge_string(&mut self.disposition, &other.disposition);
        self.params.merge(&other.params);
    }
}

/// One content coding of a Content-Encoding header.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ContentEncoding(String);

impl ContentEncoding {
    pub fn new(coding: impl Into<String>) -> Result<Self> {
        let coding = coding.into();
        if !is_token(&coding) {
            return Err(Error::InvalidArgument(format!("Invalid content coding: '{}'", coding)));
        }
        Ok(ContentEncoding(coding))
    }

    pub fn coding(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_parts(coding: String) -> Self {
        ContentEncoding(coding)
    }
}

impl PartialEq for ContentEncoding {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

typed_header!(ContentEncoding, ContentEncoding, crate::parser::headers::content::content_encoding);

/// One language tag of a Content-Language header.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ContentLanguage(String);

impl ContentLanguage {
    pub fn new(language: impl Into<String>) -> Result<Self> {
        let language = language.into();
        crate::parser::parse_all(&language, crate::parser::headers::content::language_tag)
            .map_err(|_| Error::InvalidArgument(format!("Invalid language tag: '{}'", language)))?;
        Ok(ContentLanguage(language))
    }

    pub fn language(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_parts(language: String) -> Self {
        ContentLanguage(language)
    }
}

impl PartialEq for ContentLanguage {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for ContentLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

typed_header!(ContentLanguage, ContentLanguage, crate::parser::headers::content::content_language);

/// `MIME-Version: <major>.<minor>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MimeVersion {
    major: u32,
    minor: u32,
}

impl MimeVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        MimeVersion { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl Default for MimeVersion {
    fn default() -> Self {
        MimeVersion::new(1, 0)
    }
}

impl fmt::Display for MimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

typed_header!(MimeVersion, MimeVersion, crate::parser::headers::content::mime_version);

match_by_value!(ContentEncoding, ContentLanguage, MimeVersion);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use crate::headers::SipHeaderList;
    use std::str::FromStr;

    #[test]
    fn test_content_type() {
        let ct = ContentType::from_str("text/html; charset=ISO-8859-4").unwrap();
        assert_eq!(ct.charset(), Some("ISO-8859-4"));
        assert_eq!(ct.encode(), "Content-Type: text/html;charset=ISO-8859-4\r\n");
        assert!(ContentType::from_str("text").is_err());

        let mut ct = ct;
        ct.set_content_type("application", "pidf+xml").unwrap();
        assert_eq!(ct.to_string(), "application/pidf+xml;charset=ISO-8859-4");
        assert!(ct.set_content_type("", "x").is_err());
    }

    #[test]
    fn test_content_type_matches() {
        let ct = ContentType::from_str("application/SDP;charset=utf-8").unwrap();
        assert!(ct.matches(&ContentType::sdp()));
        assert!(!ct.matches(&ContentType::from_str("application/pidf+xml").unwrap()));
    }

    #[test]
    fn test_content_disposition() {
        let mut cd = ContentDisposition::new("session").unwrap();
        cd.set_handling(Handling::Optional);
        assert_eq!(cd.to_string(), "session;handling=optional");
        assert_eq!(ContentDisposition::from_str(&cd.to_string()).unwrap(), cd);
        assert!(ContentDisposition::new("bad value").is_err());
        cd.set_disposition("render").unwrap();
        assert_eq!(cd.handling(), Some(Handling::Optional));
    }

    #[test]
    fn test_content_encoding_list() {
        let list: SipHeaderList<ContentEncoding> = "gzip, deflate".parse().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.encode(), "Content-Encoding: gzip, deflate\r\n");
        assert_eq!(ContentEncoding::new("GZIP").unwrap(), ContentEncoding::new("gzip").unwrap());
    }

    #[test]
    fn test_content_language() {
        assert!(ContentLanguage::new("en-US").is_ok());
        assert!(ContentLanguage::new("toolonglanguage").is_err());
        assert_eq!(ContentLanguage::from_str("fr").unwrap().encode(), "Content-Language: fr\r\n");
    }

    #[test]
    fn test_mime_version() {
        assert_eq!(MimeVersion::default().encode(), "MIME-Version: 1.0\r\n");
        assert_eq!(MimeVersion::from_str("1.0").unwrap(), MimeVersion::new(1, 0));
    }
}
