// Accept          = "Accept" HCOLON [ accept-range *(COMMA accept-range) ]
// accept-range    = media-range *(SEMI accept-param)
// Accept-Encoding = "Accept-Encoding" HCOLON [ encoding *(COMMA encoding) ]
// encoding        = codings *(SEMI accept-param)
// Accept-Language = "Accept-Language" HCOLON [ language *(COMMA language) ]
// language        = language-range *(SEMI accept-param)

use std::str;

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, map_res},
    sequence::pair,
};

use super::content::{language_tag, media_range};
use crate::headers::accept::{Accept, AcceptEncoding, AcceptLanguage};
use crate::parser::params::generic_params0;
use crate::parser::token::token_string;
use crate::parser::ParseResult;

pub(crate) fn accept(input: &[u8]) -> ParseResult<Accept> {
    map(media_range, Accept::new)(input)
}

pub(crate) fn accept_encoding(input: &[u8]) -> ParseResult<AcceptEncoding> {
    map(pair(token_string, generic_params0), |(coding, params)| {
        AcceptEncoding::from_parts(coding, params)
    })(input)
}

fn language_range(input: &[u8]) -> ParseResult<String> {
    alt((
        map_res(tag(b"*"), |b: &[u8]| str::from_utf8(b).map(str::to_string)),
        language_tag,
    ))(input)
}

pub(crate) fn accept_language(input: &[u8]) -> ParseResult<AcceptLanguage> {
    map(pair(language_range, generic_params0), |(range, params)| {
        AcceptLanguage::from_parts(range, params)
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_language_wildcard() {
        let (rem, lang) = accept_language(b"*;q=0.1").unwrap();
        assert!(rem.is_empty());
        assert_eq!(lang.language(), "*");
    }

    #[test]
    fn test_accept_encoding() {
        let (_, enc) = accept_encoding(b"gzip ; q=0.5").unwrap();
        assert_eq!(enc.coding(), "gzip");
        assert_eq!(enc.q().map(|q| q.into_inner()), Some(0.5));
    }
}
