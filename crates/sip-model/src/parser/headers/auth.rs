// credentials         = ("Digest" LWS digest-response) / other-response
// challenge           = ("Digest" LWS digest-cln *(COMMA digest-cln)) / other-challenge
// Authentication-Info = "Authentication-Info" HCOLON ainfo *(COMMA ainfo)

use nom::{
    combinator::{map, opt},
    sequence::{pair, preceded},
};

use crate::headers::auth::{
    AuthenticationInfo, Authorization, ProxyAuthenticate, ProxyAuthorization, WwwAuthenticate,
};
use crate::parser::params::auth_params;
use crate::parser::token::token_string;
use crate::parser::whitespace::lws;
use crate::parser::ParseResult;
use crate::types::param::{NameValueList, Separator};

fn scheme_and_params(input: &[u8]) -> ParseResult<(String, NameValueList)> {
    map(pair(token_string, opt(preceded(lws, auth_params))), |(scheme, params)| {
        (scheme, params.unwrap_or_else(|| NameValueList::with_separator(Separator::Comma)))
    })(input)
}

pub(crate) fn authorization(input: &[u8]) -> ParseResult<Authorization> {
    map(scheme_and_params, |(s, p)| Authorization::from_parts(s, p))(input)
}

pub(crate) fn proxy_authorization(input: &[u8]) -> ParseResult<ProxyAuthorization> {
    map(scheme_and_params, |(s, p)| ProxyAuthorization::from_parts(s, p))(input)
}

pub(crate) fn www_authenticate(input: &[u8]) -> ParseResult<WwwAuthenticate> {
    map(scheme_and_params, |(s, p)| WwwAuthenticate::from_parts(s, p))(input)
}

pub(crate) fn proxy_authenticate(input: &[u8]) -> ParseResult<ProxyAuthenticate> {
    map(scheme_and_params, |(s, p)| ProxyAuthenticate::from_parts(s, p))(input)
}

pub(crate) fn authentication_info(input: &[u8]) -> ParseResult<AuthenticationInfo> {
    map(auth_params, AuthenticationInfo::from_parts)(input)
}
