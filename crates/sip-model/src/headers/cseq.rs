//! # Sequence number headers
//!
//! CSeq ([RFC 3261 §20.16](https://datatracker.ietf.org/doc/html/rfc3261#section-20.16))
//! orders transactions within a dialog; RSeq and RAck
//! ([RFC 3262](https://datatracker.ietf.org/doc/html/rfc3262)) number and
//! acknowledge reliable provisional responses.
//!
//! All sequence numbers must be less than 2^31.
//!
//! ```rust
//! use sip_model::headers::{CSeq, RAck};
//! use sip_model::types::Method;
//!
//! let mut cseq = CSeq::new(314159, Method::Invite).unwrap();
//! cseq.increment().unwrap();
//! assert_eq!(cseq.to_string(), "314160 INVITE");
//!
//! let rack: RAck = "776656 1 INVITE".parse().unwrap();
//! assert_eq!(rack.method(), &Method::Invite);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::method::Method;

/// Upper bound (exclusive) of every SIP sequence number.
pub const MAX_SEQ_NUMBER: u32 = 1 << 31;

fn check_seq(what: &str, seq: u32) -> Result<u32> {
    if seq >= MAX_SEQ_NUMBER {
        return Err(Error::InvalidArgument(format!("{} {} must be less than 2^31", what, seq)));
    }
    Ok(seq)
}

/// `CSeq: <seq> <method>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSeq {
    seq: u32,
    method: Method,
}

impl CSeq {
    pub fn new(seq: u32, method: Method) -> Result<Self> {
        Ok(CSeq {
            seq: check_seq("CSeq", seq)?,
            method,
        })
    }

    pub fn seq_number(&self) -> u32 {
        self.seq
    }

    pub fn set_seq_number(&mut self, seq: u32) -> Result<()> {
        self.seq = check_seq("CSeq", seq)?;
        Ok(())
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Advances to the next sequence number.
    pub fn increment(&mut self) -> Result<()> {
        self.set_seq_number(self.seq + 1)
    }
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seq, self.method)
    }
}

typed_header!(CSeq, CSeq, crate::parser::headers::cseq::cseq);

/// `RSeq: <response-num>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RSeq(u32);

impl RSeq {
    pub fn new(seq: u32) -> Result<Self> {
        check_seq("RSeq", seq).map(RSeq)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn set_value(&mut self, seq: u32) -> Result<()> {
        self.0 = check_seq("RSeq", seq)?;
        Ok(())
    }

    pub fn increment(&mut self) -> Result<()> {
        self.set_value(self.0 + 1)
    }
}

impl fmt::Display for RSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

typed_header!(RSeq, RSeq, crate::parser::headers::cseq::rseq);

/// `RAck: <response-num> <CSeq-num> <method>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RAck {
    rseq: u32,
    cseq: u32,
    method: Method,
}

impl RAck {
    pub fn new(rseq: u32, cseq: u32, method: Method) -> Result<Self> {
        Ok(RAck {
            rseq: check_seq("RAck response number", rseq)?,
            cseq: check_seq("RAck CSeq number", cseq)?,
            method,
        })
    }

    pub fn rseq(&self) -> u32 {
        self.rseq
    }

    pub fn set_rseq(&mut self, rseq: u32) -> Result<()> {
        self.rseq = check_seq("RAck response number", rseq)?;
        Ok(())
    }

    pub fn cseq(&self) -> u32 {
        self.cseq
    }

    pub fn set_cseq(&mut self, cseq: u32) -> Result<()> {
        self.cseq = check_seq("RAck CSeq number", cseq)?;
        Ok(())
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// True when this RAck acknowledges the response carrying `rseq` to the
    /// request identified by `cseq`.
    pub fn acknowledges(&self, rseq: &RSeq, cseq: &CSeq) -> bool {
        self.rseq == rseq.value() && self.cseq == cseq.seq_number() && self.method == cseq.method
    }
}

impl fmt::Display for RAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.rseq, self.cseq, self.method)
    }
}

typed_header!(RAck, RAck, crate::parser::headers::cseq::rack);

match_by_value!(CSeq, RSeq, RAck);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use std::str::FromStr;

    #[test]
    fn test_cseq_range() {
        assert!(CSeq::new(MAX_SEQ_NUMBER, Method::Invite).is_err());
        let mut cseq = CSeq::new(MAX_SEQ_NUMBER - 1, Method::Invite).unwrap();
        assert!(cseq.increment().is_err());
        assert_eq!(cseq.seq_number(), MAX_SEQ_NUMBER - 1);
        assert!(cseq.set_seq_number(0).is_ok());
    }

    #[test]
    fn test_cseq_parse_and_encode() {
        let cseq = CSeq::from_str("4711   REGISTER").unwrap();
        assert_eq!(cseq.method(), &Method::Register);
        assert_eq!(cseq.encode(), "CSeq: 4711 REGISTER\r\n");
        assert!(CSeq::from_str("2147483648 INVITE").is_err());
        assert!(CSeq::from_str("1").is_err());

        let ext = CSeq::from_str("2 FOO").unwrap();
        assert_eq!(ext.method(), &Method::Extension("FOO".into()));
    }

    #[test]
    fn test_rseq() {
        let mut rseq = RSeq::from_str("988789").unwrap();
        rseq.increment().unwrap();
        assert_eq!(rseq.encode(), "RSeq: 988790\r\n");
        assert!(RSeq::new(MAX_SEQ_NUMBER).is_err());
    }

    #[test]
    fn test_rack_acknowledges() {
        let rack = RAck::from_str("776656 1 INVITE").unwrap();
        assert_eq!(rack.to_string(), "776656 1 INVITE");
        let rseq = RSeq::new(776656).unwrap();
        let cseq = CSeq::new(1, Method::Invite).unwrap();
        assert!(rack.acknowledges(&rseq, &cseq));
        assert!(!rack.acknowledges(&RSeq::new(1).unwrap(), &cseq));
        assert!(RAck::new(1, MAX_SEQ_NUMBER, Method::Invite).is_err());
    }
}
