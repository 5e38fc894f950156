// Retry-After  = "Retry-After" HCOLON delta-seconds [ comment ] *( SEMI retry-param )
// retry-param  = ("duration" EQUAL delta-seconds) / generic-param

use nom::{
    combinator::{map, opt},
    sequence::tuple,
};

use super::numeric::delta_seconds;
use crate::headers::retry_after::RetryAfter;
use crate::parser::params::generic_params0;
use crate::parser::quoted::parse_comment;
use crate::parser::ParseResult;

pub(crate) fn retry_after(input: &[u8]) -> ParseResult<RetryAfter> {
    map(
        tuple((delta_seconds, opt(parse_comment), generic_params0)),
        |(seconds, comment, params)| RetryAfter::from_parts(seconds, comment, params),
    )(input)
}
