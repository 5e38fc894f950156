// Subject       = ( "Subject" / "s" ) HCOLON [TEXT-UTF8-TRIM]
// Organization  = "Organization" HCOLON [TEXT-UTF8-TRIM]
// Priority      = "Priority" HCOLON priority-value
// priority-value = "emergency" / "urgent" / "normal" / "non-urgent" / other-priority

use std::str;

use nom::combinator::{map, map_res, rest};

use crate::headers::text::{Organization, Priority, Subject};
use crate::parser::token::token_string;
use crate::parser::ParseResult;

// The rest of the value, trimmed. Line folding has already been undone.
pub(crate) fn text_utf8_trim(input: &[u8]) -> ParseResult<String> {
    map_res(rest, |b: &[u8]| str::from_utf8(b).map(|s| s.trim().to_string()))(input)
}

pub(crate) fn subject(input: &[u8]) -> ParseResult<Subject> {
    map(text_utf8_trim, Subject::from_parts)(input)
}

pub(crate) fn organization(input: &[u8]) -> ParseResult<Organization> {
    map(text_utf8_trim, Organization::from_parts)(input)
}

pub(crate) fn priority(input: &[u8]) -> ParseResult<Priority> {
    map(token_string, |s| Priority::from_token(&s))(input)
}
