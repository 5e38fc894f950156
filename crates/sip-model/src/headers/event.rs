//! # Event notification headers
//!
//! `Event` names the event package of a SUBSCRIBE or NOTIFY and
//! `Subscription-State` reports the state of the subscription
//! ([RFC 6665 §8.2](https://datatracker.ietf.org/doc/html/rfc6665#section-8.2)).
//!
//! ```rust
//! use sip_model::headers::{Event, SubState, SubscriptionState};
//!
//! let event: Event = "dialog;id=1234".parse().unwrap();
//! assert_eq!(event.event_type(), "dialog");
//! assert_eq!(event.id(), Some("1234"));
//!
//! let state: SubscriptionState = "terminated;reason=timeout".parse().unwrap();
//! assert_eq!(state.state(), &SubState::Terminated);
//! assert_eq!(state.reason(), Some("timeout"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_token, merge_string, Matches, Merge};
use crate::parser::token::is_token;
use crate::types::param::{GenericValue, NameValueList};

fn check_token(what: &str, value: &str) -> Result<()> {
    if !is_token(value) {
        return Err(Error::InvalidArgument(format!("Invalid {}: '{}'", what, value)));
    }
    Ok(())
}

/// `Event: <package>[.<template>];id=<id>`
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Event {
    event_type: String,
    params: NameValueList,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Result<Self> {
        let event_type = event_type.into();
        check_token("event type", &event_type)?;
        Ok(Event {
            event_type,
            params: NameValueList::new(),
        })
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn set_event_type(&mut self, event_type: impl Into<String>) -> Result<()> {
        let event_type = event_type.into();
        check_token("event type", &event_type)?;
        self.event_type = event_type;
        Ok(())
    }

    /// The package name, without any template suffix.
    pub fn package(&self) -> &str {
        self.event_type.split('.').next().unwrap_or_default()
    }

    pub fn id(&self) -> Option<&str> {
        self.params.value("id")
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        check_token("event id", &id)?;
        self.params.put("id", GenericValue::Token(id));
        Ok(())
    }

    pub fn remove_id(&mut self) -> bool {
        self.params.remove("id")
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(event_type: String, params: NameValueList) -> Self {
        Event { event_type, params }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.event_type.eq_ignore_ascii_case(&other.event_type) && self.params == other.params
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.event_type)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(Event, Event, crate::parser::headers::event::event);

impl Matches for Event {
    fn matches(&self, template: &Self) -> bool {
        match_token(&self.event_type, &template.event_type) && self.params.matches(&template.params)
    }
}

impl Merge for Event {
    fn merge(&mut self, other: &Self) {
        merge_string(&mut self.event_type, &other.event_type);
        self.params.merge(&other.params);
    }
}

/// The value of a Subscription-State header.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub enum SubState {
    Active,
    Pending,
    Terminated,
    Extension(String),
}

impl SubState {
    fn from_token(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "active" => SubState::Active,
            "pending" => SubState::Pending,
            "terminated" => SubState::Terminated,
            _ => SubState::Extension(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SubState::Active => "active",
            SubState::Pending => "pending",
            SubState::Terminated => "terminated",
            SubState::Extension(s) => s,
        }
    }
}

impl PartialEq for SubState {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl fmt::Display for SubState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    state: SubState,
    params: NameValueList,
}

impl SubscriptionState {
    pub fn new(state: SubState) -> Result<Self> {
        check_token("subscription state", state.as_str())?;
        Ok(SubscriptionState {
            state,
            params: NameValueList::new(),
        })
    }

    pub fn active(expires: u32) -> Self {
        let mut s = SubscriptionState::from_parts("active", NameValueList::new());
        s.set_expires(expires);
        s
    }

    pub fn state(&self) -> &SubState {
        &self.state
    }

    pub fn set_state(&mut self, state: SubState) -> Result<()> {
        check_token("subscription state", state.as_str())?;
        self.state = state;
        Ok(())
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SubState::Terminated
    }

    pub fn expires(&self) -> Option<u32> {
        self.params.value("expires").and_then(|v| v.parse().ok())
    }

    pub fn set_expires(&mut self, expires: u32) {
        self.params.put("expires", GenericValue::Token(expires.to_string()));
    }

    /// `deactivated`, `probation`, `rejected`, `timeout`, `giveup`,
    /// `noresource` or an extension token.
    pub fn reason(&self) -> Option<&str> {
        self.params.value("reason")
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        check_token("event reason", &reason)?;
        self.params.put("reason", GenericValue::Token(reason));
        Ok(())
    }

    pub fn retry_after(&self) -> Option<u32> {
        self.params.value("retry-after").and_then(|v| v.parse().ok())
    }

    pub fn set_retry_after(&mut self, seconds: u32) {
        self.params.put("retry-after", GenericValue::Token(seconds.to_string()));
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub(crate) fn from_parts(state: &str, params: NameValueList) -> Self {
        SubscriptionState {
            state: SubState::from_token(state),
            params,
        }
    }
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(
    SubscriptionState,
    SubscriptionState,
    crate::parser::headers::event::subscription_state
);

impl Matches for SubscriptionState {
    fn matches(&self, template: &Self) -> bool {
        match_token(self.state.as_str(), template.state.as_str()) && self.params.matches(&template.params)
    }
}

impl Merge for SubscriptionState {
    fn merge(&mut self, other: &Self) {
        if !other.state.as_str().is_empty() {
            self.state = other.state.clone();
        }
        self.params.merge(&other.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use std::str::FromStr;

    #[test]
    fn test_event() {
        let mut event = Event::new("presence.winfo").unwrap();
        assert_eq!(event.package(), "presence");
        event.set_id("a1").unwrap();
        assert_eq!(event.encode(), "Event: presence.winfo;id=a1\r\n");
        assert!(event.set_id("two words").is_err());
        assert!(Event::new("").is_err());
        assert_eq!(Event::from_str("PRESENCE.winfo;id=a1").unwrap(), event);
    }

    #[test]
    fn test_event_matches_by_package() {
        let event = Event::from_str("dialog;id=7").unwrap();
        assert!(event.matches(&Event::new("dialog").unwrap()));
        assert!(!event.matches(&Event::new("presence").unwrap()));
    }

    #[test]
    fn test_subscription_state() {
        let mut state = SubscriptionState::active(3600);
        assert_eq!(state.encode(), "Subscription-State: active;expires=3600\r\n");
        state.set_state(SubState::Terminated).unwrap();
        state.set_reason("rejected").unwrap();
        state.set_retry_after(60);
        assert!(state.is_terminated());
        assert_eq!(state.retry_after(), Some(60));
        assert_eq!(
            SubscriptionState::from_str(&state.to_string()).unwrap(),
            state
        );
    }

    #[test]
    fn test_extension_substate() {
        let state = SubscriptionState::from_str("waiting").unwrap();
        assert_eq!(state.state(), &SubState::Extension("waiting".into()));
        assert!(SubscriptionState::new(SubState::Extension("not a token".into())).is_err());
    }
}
