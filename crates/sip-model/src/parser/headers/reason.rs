// Reason        = "Reason" HCOLON reason-value *(COMMA reason-value)
// reason-value  = protocol *(SEMI reason-params)
// protocol      = "SIP" / "Q.850" / token
// reason-params = protocol-cause / reason-text / reason-extension

use nom::{combinator::map, sequence::pair};

use crate::headers::reason::Reason;
use crate::parser::params::generic_params0;
use crate::parser::token::token_string;
use crate::parser::ParseResult;

pub(crate) fn reason(input: &[u8]) -> ParseResult<Reason> {
    map(pair(token_string, generic_params0), |(protocol, params)| {
        Reason::from_parts(protocol, params)
    })(input)
}
