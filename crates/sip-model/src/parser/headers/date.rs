// Date          = "Date" HCOLON SIP-date
// SIP-date      = rfc1123-date
// rfc1123-date  = wkday "," SP date1 SP time SP "GMT"

use std::str;

use nom::combinator::{map_res, rest};

use crate::headers::date::Date;
use crate::parser::ParseResult;

pub(crate) fn date(input: &[u8]) -> ParseResult<Date> {
    map_res(rest, |b: &[u8]| {
        str::from_utf8(b)
            .map_err(|_| ())
            .and_then(|s| Date::parse_rfc1123(s.trim()).map_err(|_| ()))
    })(input)
}
