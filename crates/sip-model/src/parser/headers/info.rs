// Call-Info   = "Call-Info" HCOLON info *(COMMA info)
// info        = LAQUOT absoluteURI RAQUOT *( SEMI info-param)
// info-param  = ( "purpose" EQUAL ( "icon" / "info" / "card" / token ) ) / generic-param
// Alert-Info  = "Alert-Info" HCOLON alert-param *(COMMA alert-param)
// alert-param = LAQUOT absoluteURI RAQUOT *( SEMI generic-param )
// Error-Info  = "Error-Info" HCOLON error-uri *(COMMA error-uri)
// error-uri   = LAQUOT absoluteURI RAQUOT *( SEMI generic-param )

use nom::{
    combinator::map,
    sequence::{delimited, pair},
};

use crate::headers::info::{AlertInfo, CallInfo, ErrorInfo};
use crate::parser::params::generic_params0;
use crate::parser::separators::{laquot, raquot};
use crate::parser::uri::uri;
use crate::parser::ParseResult;
use crate::types::param::NameValueList;
use crate::types::uri::Uri;

fn bracketed_uri_params(input: &[u8]) -> ParseResult<(Uri, NameValueList)> {
    pair(delimited(laquot, uri, raquot), generic_params0)(input)
}

pub(crate) fn call_info(input: &[u8]) -> ParseResult<CallInfo> {
    map(bracketed_uri_params, |(u, p)| CallInfo::from_parts(u, p))(input)
}

pub(crate) fn alert_info(input: &[u8]) -> ParseResult<AlertInfo> {
    map(bracketed_uri_params, |(u, p)| AlertInfo::from_parts(u, p))(input)
}

pub(crate) fn error_info(input: &[u8]) -> ParseResult<ErrorInfo> {
    map(bracketed_uri_params, |(u, p)| ErrorInfo::from_parts(u, p))(input)
}
