// CSeq  = "CSeq" HCOLON 1*DIGIT LWS Method
// RSeq  = "RSeq" HCOLON response-num
// RAck  = "RAck" HCOLON response-num LWS CSeq-num LWS Method

use std::str;

use nom::{
    character::complete::digit1,
    combinator::{map_res, recognize},
    sequence::{separated_pair, tuple},
};

use crate::headers::cseq::{CSeq, RAck, RSeq};
use crate::parser::token::token;
use crate::parser::whitespace::lws;
use crate::parser::ParseResult;
use crate::types::method::Method;

pub(crate) fn seq_number(input: &[u8]) -> ParseResult<u32> {
    map_res(recognize(digit1), |b: &[u8]| {
        str::from_utf8(b)
            .map_err(|_| ())
            .and_then(|s| s.parse::<u32>().map_err(|_| ()))
    })(input)
}

pub(crate) fn method(input: &[u8]) -> ParseResult<Method> {
    map_res(token, |b: &[u8]| {
        str::from_utf8(b)
            .map_err(|_| ())
            .and_then(|s| s.parse::<Method>().map_err(|_| ()))
    })(input)
}

pub(crate) fn cseq(input: &[u8]) -> ParseResult<CSeq> {
    map_res(separated_pair(seq_number, lws, method), |(seq, m)| CSeq::new(seq, m))(input)
}

pub(crate) fn rseq(input: &[u8]) -> ParseResult<RSeq> {
    map_res(seq_number, RSeq::new)(input)
}

pub(crate) fn rack(input: &[u8]) -> ParseResult<RAck> {
    map_res(
        tuple((seq_number, lws, seq_number, lws, method)),
        |(rseq, _, cseq, _, m)| RAck::new(rseq, cseq, m),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cseq_requires_lws() {
        assert!(cseq(b"4711 INVITE").is_ok());
        assert!(cseq(b"4711INVITE").is_err());
        assert!(cseq(b"99999999999 INVITE").is_err());
    }

    #[test]
    fn test_rack() {
        let (rem, r) = rack(b"776656 1 INVITE").unwrap();
        assert!(rem.is_empty());
        assert_eq!(r.rseq(), 776656);
        assert_eq!(r.cseq(), 1);
    }
}
