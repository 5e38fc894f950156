//! # Warning header
//!
//! Additional information about the status of a response
//! ([RFC 3261 §20.43](https://datatracker.ietf.org/doc/html/rfc3261#section-20.43)):
//!
//! ```text
//! Warning: 307 isi.edu "Session parameter 'foo' not understood"
//! Warning: 301 isi.edu "Incompatible network address type 'E.164'"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_text, match_token, merge_string, Matches, Merge};
use crate::parser::host::hostport;
use crate::parser::quoted::{check_text, escape_quoted};
use crate::parser::token::is_token;

/// Incompatible network protocol
pub const INCOMPATIBLE_NETWORK_PROTOCOL: u16 = 300;
/// Incompatible network address formats
pub const INCOMPATIBLE_NETWORK_ADDRESS: u16 = 301;
/// Incompatible transport protocol
pub const INCOMPATIBLE_TRANSPORT: u16 = 302;
/// Incompatible bandwidth units
pub const INCOMPATIBLE_BANDWIDTH_UNITS: u16 = 303;
/// Media type not available
pub const MEDIA_TYPE_NOT_AVAILABLE: u16 = 304;
/// Incompatible media format
pub const INCOMPATIBLE_MEDIA_FORMAT: u16 = 305;
/// Attribute not understood
pub const ATTRIBUTE_NOT_UNDERSTOOD: u16 = 306;
/// Session description parameter not understood
pub const SESSION_PARAMETER_NOT_UNDERSTOOD: u16 = 307;
/// Multicast not available
pub const MULTICAST_NOT_AVAILABLE: u16 = 330;
/// Unicast not available
pub const UNICAST_NOT_AVAILABLE: u16 = 331;
/// Insufficient bandwidth
pub const INSUFFICIENT_BANDWIDTH: u16 = 370;
/// Miscellaneous warning
pub const MISCELLANEOUS_WARNING: u16 = 399;

fn check_code(code: u16) -> Result<u16> {
    if !(100..=999).contains(&code) {
        return Err(Error::InvalidArgument(format!("Warning code {} is not three digits", code)));
    }
    Ok(code)
}

fn check_agent(agent: &str) -> Result<()> {
    if !Warning::is_valid_agent(agent) {
        return Err(Error::InvalidArgument(format!("Invalid warn-agent: '{}'", agent)));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Warning {
    code: u16,
    agent: String,
    text: String,
}

impl Warning {
    pub fn new(code: u16, agent: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let agent = agent.into();
        check_agent(&agent)?;
        let text = text.into();
        check_text("Warning text", &text)?;
        Ok(Warning {
            code: check_code(code)?,
            agent,
            text,
        })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn set_code(&mut self, code: u16) -> Result<()> {
        self.code = check_code(code)?;
        Ok(())
    }

    /// The host (with optional port) or pseudonym that added the warning.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn set_agent(&mut self, agent: impl Into<String>) -> Result<()> {
        let agent = agent.into();
        check_agent(&agent)?;
        self.agent = agent;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Any text without line breaks; it is written as a quoted string.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        check_text("Warning text", &text)?;
        self.text = text;
        Ok(())
    }

    /// `hostport / pseudonym`
    pub fn is_valid_agent(agent: &str) -> bool {
        is_token(agent)
            || (!agent.contains(char::is_whitespace) && crate::parser::parse_all(agent, hostport).is_ok())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.code, self.agent, escape_quoted(&self.text))
    }
}

typed_header!(Warning, Warning, crate::parser::headers::warning::warning);

impl Matches for Warning {
    fn matches(&self, template: &Self) -> bool {
        self.code == template.code
            && match_token(&self.agent, &template.agent)
            && match_text(&self.text, &template.text)
    }
}

impl Merge for Warning {
    fn merge(&mut self, other: &Self) {
        self.code = other.code;
        merge_string(&mut self.agent, &other.agent);
        merge_string(&mut self.text, &other.text);
    }
}
