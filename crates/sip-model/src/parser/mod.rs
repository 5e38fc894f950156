//! # SIP header parsing
//!
//! nom parsers for RFC 3261 header text, working on byte slices. Every typed
//! header implements `FromStr` through these parsers; this module also
//! exposes entry points that turn raw header lines into [`Header`] values.
//!
//! ```rust
//! use sip_model::headers::{Header, HeaderName};
//! use sip_model::parser::{parse_header, parse_header_block};
//!
//! let headers = parse_header("v", "SIP/2.0/UDP a.com;branch=z9hG4bK1, SIP/2.0/TCP b.com").unwrap();
//! assert_eq!(headers.len(), 2);
//! assert!(headers.iter().all(|h| h.name() == HeaderName::Via));
//!
//! let block = "Max-Forwards: 70\r\nSubject: lunch\r\n  plans\r\n\r\n";
//! let headers = parse_header_block(block).unwrap();
//! assert_eq!(headers[1].encode(), "Subject: lunch plans\r\n");
//! ```

use nom::{sequence::terminated, IResult};
use tracing::{debug, warn};

use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::headers::{ExtensionHeader, Header, HeaderName};

pub(crate) mod address;
pub(crate) mod headers;
pub(crate) mod host;
pub(crate) mod params;
pub mod quoted;
pub(crate) mod separators;
pub mod token;
pub(crate) mod uri;
pub mod utils;
pub(crate) mod whitespace;

/// Result type of every parser in this module.
pub(crate) type ParseResult<'a, O> = IResult<&'a [u8], O>;

/// Runs `parser` over the whole of `input`. Trailing whitespace is allowed,
/// anything else left over is an error.
pub(crate) fn parse_all<'a, O, F>(input: &'a str, mut parser: F) -> Result<O>
where
    F: FnMut(&'a [u8]) -> ParseResult<'a, O>,
{
    let (rest, value) = parser(input.as_bytes())?;
    let (rest, _) = whitespace::sws(rest)?;
    if !rest.is_empty() {
        return Err(Error::ParseError(format!(
            "Unexpected trailing input '{}' in '{}'",
            String::from_utf8_lossy(rest),
            input
        )));
    }
    Ok(value)
}

/// Parses one `Name: value` line with the default options.
pub fn parse_header_line(line: &str) -> Result<Vec<Header>> {
    parse_header_line_with(line, &ParseOptions::default())
}

/// Parses one unfolded `Name: value` line. List headers may yield several
/// headers.
pub fn parse_header_line_with(line: &str, options: &ParseOptions) -> Result<Vec<Header>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.len() > options.max_line_length {
        return Err(Error::LineTooLong {
            len: line.len(),
            max: options.max_line_length,
        });
    }
    // header-name HCOLON header-value
    let (rest, name) = terminated(token::token, separators::hcolon)(line.as_bytes())
        .map_err(|_| Error::ParseError(format!("Missing ':' in header line '{}'", line)))?;
    let value = &line[line.len() - rest.len()..];
    parse_header_with(&line[..name.len()], value, options)
}

/// Parses the value of a header with the default options.
pub fn parse_header(name: &str, value: &str) -> Result<Vec<Header>> {
    parse_header_with(name, value, &ParseOptions::default())
}

/// Parses the value of a header given its (possibly compact) name.
///
/// Values of comma-separated list headers are split at top-level commas and
/// each element becomes its own [`Header`]. In lenient mode a malformed value
/// of a known header is kept verbatim as an [`ExtensionHeader`].
pub fn parse_header_with(name: &str, value: &str, options: &ParseOptions) -> Result<Vec<Header>> {
    let name: HeaderName = name.trim().parse()?;
    let value = value.trim();

    if let HeaderName::Other(raw) = &name {
        if !options.unknown_as_extension {
            return Err(Error::InvalidHeader(format!("Unknown header '{}'", raw)));
        }
        debug!(header = %raw, "keeping unknown header as extension");
        return Ok(vec![Header::Extension(ExtensionHeader::new(raw.as_str(), value)?)]);
    }

    let parts = if name.is_comma_separated() {
        if value.is_empty() {
            return Ok(Vec::new());
        }
        utils::split_top_level_commas(value)
    } else {
        vec![value]
    };
    if parts.len() > options.max_list_entries {
        return Err(Error::InvalidHeader(format!(
            "{} has {} entries (max {})",
            name,
            parts.len(),
            options.max_list_entries
        )));
    }

    let mut headers = Vec::with_capacity(parts.len());
    for part in parts {
        match Header::parse_value(&name, part) {
            Ok(header) => headers.push(header),
            Err(e) if !options.strict => {
                warn!(header = %name, error = %e, "keeping malformed value verbatim");
                headers.push(Header::Extension(ExtensionHeader::new(name.as_str(), part)?));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(headers)
}

/// Parses a block of header lines with the default options.
pub fn parse_header_block(text: &str) -> Result<Vec<Header>> {
    parse_header_block_with(text, &ParseOptions::default())
}

/// Parses a block of header lines: continuation lines are unfolded first and
/// parsing stops at the first empty line after a header.
pub fn parse_header_block_with(text: &str, options: &ParseOptions) -> Result<Vec<Header>> {
    let unfolded = String::from_utf8(utils::unfold_lws(text.as_bytes()))
        .map_err(|e| Error::ParseError(format!("Header block is not UTF-8: {}", e)))?;

    let mut headers = Vec::new();
    let mut seen_line = false;
    for line in unfolded.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if seen_line {
                break;
            }
            continue;
        }
        seen_line = true;
        headers.extend(parse_header_line_with(line, options)?);
    }
    debug!(count = headers.len(), "parsed header block");
    Ok(headers)
}
