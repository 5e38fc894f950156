// Event              = ( "Event" / "o" ) HCOLON event-type *( SEMI event-param )
// event-param        = generic-param / ( "id" EQUAL token )
// Subscription-State = "Subscription-State" HCOLON substate-value *( SEMI subexp-params )
// substate-value     = "active" / "pending" / "terminated" / extension-substate
// subexp-params      = ("reason" EQUAL event-reason-value)
//                    / ("expires" EQUAL delta-seconds)
//                    / ("retry-after" EQUAL delta-seconds)
//                    / generic-param

use nom::{combinator::map, sequence::pair};

use crate::headers::event::{Event, SubscriptionState};
use crate::parser::params::generic_params0;
use crate::parser::token::token_string;
use crate::parser::ParseResult;

pub(crate) fn event(input: &[u8]) -> ParseResult<Event> {
    map(pair(token_string, generic_params0), |(event_type, params)| {
        Event::from_parts(event_type, params)
    })(input)
}

pub(crate) fn subscription_state(input: &[u8]) -> ParseResult<SubscriptionState> {
    map(pair(token_string, generic_params0), |(state, params)| {
        SubscriptionState::from_parts(&state, params)
    })(input)
}
