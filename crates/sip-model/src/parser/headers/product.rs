// Server         = "Server" HCOLON server-val *(LWS server-val)
// User-Agent     = "User-Agent" HCOLON server-val *(LWS server-val)
// server-val     = product / comment
// product        = token [SLASH product-version]
// product-version = token

use std::str;

use nom::{
    branch::alt,
    combinator::{map, map_res, opt},
    multi::many1,
    sequence::{pair, preceded, terminated},
};

use crate::headers::product::{Product, ProductInfo, Server, UserAgent};
use crate::parser::quoted::comment;
use crate::parser::separators::slash;
use crate::parser::token::token_string;
use crate::parser::whitespace::sws;
use crate::parser::ParseResult;

fn product(input: &[u8]) -> ParseResult<Product> {
    map(pair(token_string, opt(preceded(slash, token_string))), |(name, version)| {
        Product::from_parts(name, version)
    })(input)
}

fn server_val(input: &[u8]) -> ParseResult<ProductInfo> {
    alt((
        map(product, ProductInfo::Product),
        map_res(comment, |b: &[u8]| {
            str::from_utf8(b).map(|s| ProductInfo::Comment(s.to_string()))
        }),
    ))(input)
}

pub(crate) fn server_vals(input: &[u8]) -> ParseResult<Vec<ProductInfo>> {
    many1(terminated(server_val, sws))(input)
}

pub(crate) fn server(input: &[u8]) -> ParseResult<Server> {
    map(server_vals, Server::from_parts)(input)
}

pub(crate) fn user_agent(input: &[u8]) -> ParseResult<UserAgent> {
    map(server_vals, UserAgent::from_parts)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_vals() {
        let (rem, vals) = server_vals(b"HomeServer2/1.0 (Linux; x86) libfoo").unwrap();
        assert!(rem.is_empty());
        assert_eq!(vals.len(), 3);
        assert!(matches!(&vals[1], ProductInfo::Comment(c) if c == "Linux; x86"));
    }

    #[test]
    fn test_empty_value_rejected() {
        assert!(server_vals(b"").is_err());
    }
}
