//! # Date header
//!
//! `Date: Sat, 13 Nov 2010 23:29:00 GMT`
//!
//! The value is always expressed in GMT with whole-second precision
//! ([RFC 3261 §20.17](https://datatracker.ietf.org/doc/html/rfc3261#section-20.17)).
//!
//! ```rust
//! use sip_model::headers::Date;
//!
//! let date: Date = "Sat, 13 Nov 2010 23:29:00 GMT".parse().unwrap();
//! assert_eq!(date.timestamp(), 1289690940);
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date(DateTime<Utc>);

impl Date {
    /// Sub-second precision is dropped.
    pub fn new(time: DateTime<Utc>) -> Self {
        Date(time.trunc_subsecs(0))
    }

    pub fn now() -> Self {
        Date::new(Utc::now())
    }

    /// Seconds since the Unix epoch.
    pub fn from_timestamp(secs: i64) -> Result<Self> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Date)
            .ok_or_else(|| Error::InvalidArgument(format!("Timestamp {} is out of range", secs)))
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn set_time(&mut self, time: DateTime<Utc>) {
        *self = Date::new(time);
    }

    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub(crate) fn parse_rfc1123(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, RFC1123_FORMAT)
            .map(|naive| Date(Utc.from_utc_datetime(&naive)))
            .map_err(|e| Error::ParseError(format!("Invalid SIP date '{}': {}", s, e)))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RFC1123_FORMAT))
    }
}

impl std::convert::From<DateTime<Utc>> for Date {
    fn from(time: DateTime<Utc>) -> Self {
        Date::new(time)
    }
}

typed_header!(Date, Date, crate::parser::headers::date::date);

match_by_value!(Date);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use std::str::FromStr;

    #[test]
    fn test_date_round_trip() {
        let date = Date::from_str("Sat, 13 Nov 2010 23:29:00 GMT").unwrap();
        assert_eq!(date.encode(), "Date: Sat, 13 Nov 2010 23:29:00 GMT\r\n");
        assert_eq!(Date::from_timestamp(date.timestamp()).unwrap(), date);
    }

    #[test]
    fn test_date_rejects_other_zones() {
        assert!(Date::from_str("Sat, 13 Nov 2010 23:29:00 PST").is_err());
        assert!(Date::from_str("2010-11-13T23:29:00Z").is_err());
    }

    #[test]
    fn test_now_drops_subseconds() {
        let now = Date::now();
        assert_eq!(now.time().timestamp_subsec_nanos(), 0);
        assert_eq!(Date::from_str(&now.to_string()).unwrap(), now);
    }
}
