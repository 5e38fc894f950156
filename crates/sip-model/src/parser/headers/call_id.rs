// callid  = word [ "@" word ]
// Call-ID  = ( "Call-ID" / "i" ) HCOLON callid
// In-Reply-To = "In-Reply-To" HCOLON callid *(COMMA callid)

use std::str;

use nom::{
    bytes::complete::tag,
    combinator::{map, map_res, opt, recognize},
    sequence::pair,
};

use crate::headers::call_id::{CallId, InReplyTo};
use crate::parser::token::word;
use crate::parser::ParseResult;

pub(crate) fn callid(input: &[u8]) -> ParseResult<String> {
    map_res(recognize(pair(word, opt(pair(tag(b"@"), word)))), |b: &[u8]| {
        str::from_utf8(b).map(str::to_string)
    })(input)
}

pub(crate) fn call_id(input: &[u8]) -> ParseResult<CallId> {
    map(callid, CallId::from_parts)(input)
}

pub(crate) fn in_reply_to(input: &[u8]) -> ParseResult<InReplyTo> {
    map(call_id, InReplyTo::from_call_id)(input)
}
