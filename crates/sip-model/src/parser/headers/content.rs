// Content-Type        = ( "Content-Type" / "c" ) HCOLON media-type
// media-type          = m-type SLASH m-subtype *(SEMI m-parameter)
// Content-Disposition = "Content-Disposition" HCOLON disp-type *( SEMI disp-param )
// Content-Encoding    = ( "Content-Encoding" / "e" ) HCOLON content-coding *(COMMA content-coding)
// Content-Language    = "Content-Language" HCOLON language-tag *(COMMA language-tag)
// MIME-Version        = "MIME-Version" HCOLON 1*DIGIT "." 1*DIGIT

use std::str;

use nom::{
    bytes::complete::{tag, take_while_m_n},
    character::complete::digit1,
    combinator::{map, map_res, recognize},
    multi::many0,
    sequence::{pair, preceded, separated_pair, tuple},
};

use crate::headers::content::{
    ContentDisposition, ContentEncoding, ContentLanguage, ContentType, MimeVersion,
};
use crate::parser::params::generic_params0;
use crate::parser::separators::slash;
use crate::parser::token::token_string;
use crate::parser::ParseResult;
use crate::types::media_type::MediaRange;

pub(crate) fn media_range(input: &[u8]) -> ParseResult<MediaRange> {
    map(
        tuple((token_string, slash, token_string, generic_params0)),
        |(mtype, _, subtype, params)| MediaRange::from_parts(mtype, subtype, params),
    )(input)
}

pub(crate) fn content_type(input: &[u8]) -> ParseResult<ContentType> {
    map(media_range, ContentType::new)(input)
}

pub(crate) fn content_disposition(input: &[u8]) -> ParseResult<ContentDisposition> {
    map(pair(token_string, generic_params0), |(disp, params)| {
        ContentDisposition::from_parts(disp, params)
    })(input)
}

pub(crate) fn content_encoding(input: &[u8]) -> ParseResult<ContentEncoding> {
    map(token_string, ContentEncoding::from_parts)(input)
}

fn subtag(input: &[u8]) -> ParseResult<&[u8]> {
    take_while_m_n(1, 8, |c: u8| c.is_ascii_alphanumeric())(input)
}

// language-tag = primary-tag *( "-" subtag ), primary-tag = 1*8ALPHA
pub(crate) fn language_tag(input: &[u8]) -> ParseResult<String> {
    map_res(
        recognize(pair(
            take_while_m_n(1, 8, |c: u8| c.is_ascii_alphabetic()),
            many0(preceded(tag(b"-"), subtag)),
        )),
        |b: &[u8]| str::from_utf8(b).map(str::to_string),
    )(input)
}

pub(crate) fn content_language(input: &[u8]) -> ParseResult<ContentLanguage> {
    map(language_tag, ContentLanguage::from_parts)(input)
}

fn small_number(input: &[u8]) -> ParseResult<u32> {
    map_res(map_res(digit1, str::from_utf8), str::parse::<u32>)(input)
}

pub(crate) fn mime_version(input: &[u8]) -> ParseResult<MimeVersion> {
    map(separated_pair(small_number, tag(b"."), small_number), |(major, minor)| {
        MimeVersion::new(major, minor)
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_range_with_spaces() {
        let (rem, mr) = media_range(b"multipart/mixed ; boundary=\"unique-boundary-1\"").unwrap();
        assert!(rem.is_empty());
        assert_eq!(mr.parameter("boundary"), Some("unique-boundary-1"));
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag(b"en-US").unwrap().1, "en-US");
        assert_eq!(language_tag(b"i-cherokee,").unwrap().0, b",");
        assert!(language_tag(b"123").is_err());
    }

    #[test]
    fn test_mime_version() {
        let (_, v) = mime_version(b"1.0").unwrap();
        assert_eq!((v.major(), v.minor()), (1, 0));
        assert!(mime_version(b"1").is_err());
    }
}
