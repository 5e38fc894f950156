use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser;
use crate::parser::token::is_token;

/// The `sent-protocol` of a Via header: `protocol-name SLASH protocol-version SLASH transport`.
///
/// Names compare case-insensitively and the transport is always written in
/// upper case.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Protocol {
    name: String,
    version: String,
    transport: String,
}

impl Protocol {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        transport: impl Into<String>,
    ) -> Result<Self> {
        let mut protocol = Protocol::default();
        protocol.set_name(name)?;
        protocol.set_version(version)?;
        protocol.set_transport(transport)?;
        Ok(protocol)
    }

    /// `SIP/2.0/<transport>`
    pub fn sip(transport: impl Into<String>) -> Result<Self> {
        Protocol::new("SIP", "2.0", transport)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = checked_token("protocol name", name.into())?;
        Ok(())
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> Result<()> {
        self.version = checked_token("protocol version", version.into())?;
        Ok(())
    }

    pub fn set_transport(&mut self, transport: impl Into<String>) -> Result<()> {
        self.transport = checked_token("transport", transport.into())?.to_ascii_uppercase();
        Ok(())
    }
}

fn checked_token(what: &str, value: String) -> Result<String> {
    if value.is_empty() || !is_token(&value) {
        return Err(Error::InvalidArgument(format!("Invalid {}: '{}'", what, value)));
    }
    Ok(value)
}

impl Default for Protocol {
    fn default() -> Self {
        Protocol {
            name: "SIP".to_string(),
            version: "2.0".to_string(),
            transport: "UDP".to_string(),
        }
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.version == other.version
            && self.transport.eq_ignore_ascii_case(&other.transport)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.name, self.version, self.transport.to_ascii_uppercase())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_all(s, parser::headers::via::sent_protocol)
    }
}
