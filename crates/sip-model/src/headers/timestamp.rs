//! # Timestamp header
//!
//! `Timestamp: 54.1 0.5`
//!
//! The time at which the client sent the request, echoed by the server
//! together with the delay it added
//! ([RFC 3261 §20.38](https://datatracker.ietf.org/doc/html/rfc3261#section-20.38)).
//! Both values are finite and non-negative.

use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_opt, Matches, Merge};

fn check_value(what: &str, value: f64) -> Result<NotNan<f64>> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Timestamp {} must be finite and non-negative, got {}",
            what, value
        )));
    }
    NotNan::new(value).map_err(|_| Error::InvalidArgument(format!("Timestamp {} is NaN", what)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    time: NotNan<f64>,
    delay: Option<NotNan<f64>>,
}

impl Timestamp {
    pub fn new(time: f64) -> Result<Self> {
        Ok(Timestamp {
            time: check_value("time", time)?,
            delay: None,
        })
    }

    pub fn with_delay(time: f64, delay: f64) -> Result<Self> {
        let mut ts = Timestamp::new(time)?;
        ts.set_delay(delay)?;
        Ok(ts)
    }

    pub fn time(&self) -> f64 {
        self.time.into_inner()
    }

    pub fn set_time(&mut self, time: f64) -> Result<()> {
        self.time = check_value("time", time)?;
        Ok(())
    }

    pub fn delay(&self) -> Option<f64> {
        self.delay.map(NotNan::into_inner)
    }

    pub fn set_delay(&mut self, delay: f64) -> Result<()> {
        self.delay = Some(check_value("delay", delay)?);
        Ok(())
    }

    pub fn remove_delay(&mut self) {
        self.delay = None;
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time)?;
        if let Some(delay) = self.delay {
            write!(f, " {}", delay)?;
        }
        Ok(())
    }
}

typed_header!(Timestamp, Timestamp, crate::parser::headers::timestamp::timestamp);

impl Matches for Timestamp {
    fn matches(&self, template: &Self) -> bool {
        self.time == template.time && match_opt(&self.delay, &template.delay)
    }
}

impl Merge for Timestamp {
    fn merge(&mut self, other: &Self) {
        self.time = other.time;
        if other.delay.is_some() {
            self.delay = other.delay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use std::str::FromStr;

    #[test]
    fn test_timestamp_validation() {
        assert!(Timestamp::new(-1.0).is_err());
        assert!(Timestamp::new(f64::INFINITY).is_err());
        assert!(Timestamp::new(f64::NAN).is_err());
        let mut ts = Timestamp::new(54.1).unwrap();
        assert!(ts.set_delay(-0.5).is_err());
        assert_eq!(ts.delay(), None);
    }

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Timestamp::from_str("54.1 0.5").unwrap();
        assert_eq!(ts.time(), 54.1);
        assert_eq!(ts.delay(), Some(0.5));
        assert_eq!(ts.encode(), "Timestamp: 54.1 0.5\r\n");
        assert_eq!(Timestamp::from_str("54").unwrap().to_string(), "54");
        assert!(Timestamp::from_str("abc").is_err());
    }

    #[test]
    fn test_timestamp_matches_and_merge() {
        let mut ts = Timestamp::new(10.0).unwrap();
        let echoed = Timestamp::with_delay(10.0, 0.25).unwrap();
        assert!(echoed.matches(&ts));
        assert!(!ts.matches(&echoed));
        ts.merge(&echoed);
        assert_eq!(ts, echoed);
    }
}
