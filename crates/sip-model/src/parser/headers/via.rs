// Via               =  ( "Via" / "v" ) HCOLON via-parm *(COMMA via-parm)
// via-parm          =  sent-protocol LWS sent-by *( SEMI via-params )
// sent-protocol     =  protocol-name SLASH protocol-version SLASH transport
// sent-by           =  host [ COLON port ]

use nom::{
    combinator::{map, map_res},
    sequence::tuple,
};

use crate::headers::via::Via;
use crate::parser::host::hostport;
use crate::parser::params::generic_params0;
use crate::parser::separators::slash;
use crate::parser::token::token_string;
use crate::parser::whitespace::lws;
use crate::parser::ParseResult;
use crate::types::protocol::Protocol;

pub(crate) fn sent_protocol(input: &[u8]) -> ParseResult<Protocol> {
    map_res(
        tuple((token_string, slash, token_string, slash, token_string)),
        |(name, _, version, _, transport)| Protocol::new(name, version, transport),
    )(input)
}

pub(crate) fn via(input: &[u8]) -> ParseResult<Via> {
    map(
        tuple((sent_protocol, lws, hostport, generic_params0)),
        |(protocol, _, sent_by, params)| Via::from_parts(protocol, sent_by, params),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_protocol_spacing() {
        let (rem, p) = sent_protocol(b"SIP / 2.0 / udp host").unwrap();
        assert_eq!(rem, b" host");
        assert_eq!(p.transport(), "UDP");
    }

    #[test]
    fn test_via_params() {
        let (rem, v) = via(b"SIP/2.0/UDP pc33.atlanta.com:5060 ;branch=z9hG4bK776asdhds;rport").unwrap();
        assert!(rem.is_empty());
        assert_eq!(v.port(), Some(5060));
        assert_eq!(v.branch(), Some("z9hG4bK776asdhds"));
        assert!(v.has_rport());
    }

    #[test]
    fn test_via_requires_sent_by() {
        assert!(via(b"SIP/2.0/UDP").is_err());
        assert!(via(b"SIP/2.0 host").is_err());
    }
}
