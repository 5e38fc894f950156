//! # Header lists
//!
//! [`SipHeaderList`] holds every value of one repeated header in message
//! order. It knows how to combine values into a single comma-separated line
//! and which headers (the authentication headers and extension headers) must
//! instead be written one per line.
//!
//! ```rust
//! use sip_model::headers::{SipHeaderList, Via};
//!
//! let mut vias: SipHeaderList<Via> =
//!     "SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds".parse().unwrap();
//! vias.add_first("SIP/2.0/UDP bigbox3.site3.atlanta.com;branch=z9hG4bK77ef4c2312983.1".parse().unwrap());
//! assert_eq!(
//!     vias.encode(),
//!     "Via: SIP/2.0/UDP bigbox3.site3.atlanta.com;branch=z9hG4bK77ef4c2312983.1, \
//!      SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::EncodeOptions;
use crate::error::{Error, Result};
use crate::headers::header::TypedHeaderTrait;
use crate::headers::matching::{Matches, Merge};
use crate::parser::utils::split_top_level_commas;

/// An ordered list of headers of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipHeaderList<H> {
    headers: Vec<H>,
}

impl<H> Default for SipHeaderList<H> {
    fn default() -> Self {
        SipHeaderList { headers: Vec::new() }
    }
}

impl<H> SipHeaderList<H> {
    pub fn new() -> Self {
        SipHeaderList::default()
    }

    pub fn from_vec(headers: Vec<H>) -> Self {
        SipHeaderList { headers }
    }

    /// Appends a header at the end.
    pub fn push(&mut self, header: H) {
        self.headers.push(header);
    }

    /// Same as [`push`](Self::push).
    pub fn add_last(&mut self, header: H) {
        self.headers.push(header);
    }

    /// Inserts a header at the top, as a proxy does with its own Via.
    pub fn add_first(&mut self, header: H) {
        self.headers.insert(0, header);
    }

    /// Inserts at `index`. Fails if `index > len()`.
    pub fn insert(&mut self, index: usize, header: H) -> Result<()> {
        if index > self.headers.len() {
            return Err(Error::InvalidArgument(format!(
                "index {} out of bounds for list of {}",
                index,
                self.headers.len()
            )));
        }
        self.headers.insert(index, header);
        Ok(())
    }

    pub fn first(&self) -> Option<&H> {
        self.headers.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut H> {
        self.headers.first_mut()
    }

    pub fn last(&self) -> Option<&H> {
        self.headers.last()
    }

    pub fn get(&self, index: usize) -> Option<&H> {
        self.headers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut H> {
        self.headers.get_mut(index)
    }

    pub fn remove_first(&mut self) -> Option<H> {
        if self.headers.is_empty() {
            None
        } else {
            Some(self.headers.remove(0))
        }
    }

    pub fn remove_last(&mut self) -> Option<H> {
        self.headers.pop()
    }

    pub fn remove(&mut self, index: usize) -> Option<H> {
        if index < self.headers.len() {
            Some(self.headers.remove(index))
        } else {
            None
        }
    }

    /// Removes every header for which `pred` returns true and returns how many were removed.
    pub fn remove_matching<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&H) -> bool,
    {
        let before = self.headers.len();
        self.headers.retain(|h| !pred(h));
        before - self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn clear(&mut self) {
        self.headers.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, H> {
        self.headers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, H> {
        self.headers.iter_mut()
    }

    pub fn as_slice(&self) -> &[H] {
        &self.headers
    }

    pub fn into_vec(self) -> Vec<H> {
        self.headers
    }

    /// Moves all headers of `other` into this list, either above the
    /// existing ones (`top`) or below them.
    pub fn concatenate(&mut self, other: SipHeaderList<H>, top: bool) {
        if top {
            let mut combined = other.headers;
            combined.append(&mut self.headers);
            self.headers = combined;
        } else {
            self.headers.extend(other.headers);
        }
    }
}

impl<H: TypedHeaderTrait> SipHeaderList<H> {
    /// Values joined with `", "`.
    pub fn encode_body(&self) -> String {
        self.headers
            .iter()
            .map(|h| h.encode_body())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Header lines for the whole list.
    ///
    /// Comma-combinable headers produce a single `Name: a, b\r\n` line, the
    /// others one line per value. An empty list is `Name:\r\n`.
    pub fn encode(&self) -> String {
        self.encode_with(&EncodeOptions::default())
    }

    pub fn encode_with(&self, options: &EncodeOptions) -> String {
        let name = H::header_name();
        let name_str = match name.compact_form() {
            Some(compact) if options.compact_names => compact,
            _ => name.as_str(),
        };

        if self.headers.is_empty() {
            return format!("{}:\r\n", name_str);
        }

        if options.one_line_per_header || !name.is_comma_separated() {
            self.headers
                .iter()
                .map(|h| format!("{}: {}\r\n", name_str, h.encode_body()))
                .collect()
        } else {
            format!("{}: {}\r\n", name_str, self.encode_body())
        }
    }

    /// Replaces every header whose encoded value equals `target_encoding`
    /// with a copy of `replacement`. Returns the number replaced.
    pub fn replace(&mut self, target_encoding: &str, replacement: &H) -> usize {
        let target = target_encoding.trim();
        let mut count = 0;
        for h in self.headers.iter_mut() {
            if h.encode_body() == target {
                *h = replacement.clone();
                count += 1;
            }
        }
        trace!(header = %H::header_name(), count, "replaced list entries");
        count
    }
}

impl<H: Matches> SipHeaderList<H> {
    /// True when every header of `template` matches some header here.
    pub fn matches(&self, template: &SipHeaderList<H>) -> bool {
        template
            .headers
            .iter()
            .all(|t| self.headers.iter().any(|h| h.matches(t)))
    }
}

impl<H: Merge + Clone> SipHeaderList<H> {
    /// Merges positionally; extra headers of `other` are appended.
    pub fn merge(&mut self, other: &SipHeaderList<H>) {
        for (i, o) in other.headers.iter().enumerate() {
            match self.headers.get_mut(i) {
                Some(mine) => mine.merge(o),
                None => self.headers.push(o.clone()),
            }
        }
        debug!(merged = other.headers.len(), total = self.headers.len(), "merged header list");
    }
}

impl<H: Matches> Matches for SipHeaderList<H> {
    fn matches(&self, template: &Self) -> bool {
        SipHeaderList::matches(self, template)
    }
}

impl<H: Merge + Clone> Merge for SipHeaderList<H> {
    fn merge(&mut self, other: &Self) {
        SipHeaderList::merge(self, other)
    }
}

impl<H: TypedHeaderTrait> fmt::Display for SipHeaderList<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_body())
    }
}

impl<H> FromStr for SipHeaderList<H>
where
    H: TypedHeaderTrait + FromStr<Err = Error>,
{
    type Err = Error;

    /// Parses one header value. For comma-combinable headers the value is
    /// split into its elements; an empty value gives an empty list.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SipHeaderList::new());
        }
        if H::header_name().is_comma_separated() {
            split_top_level_commas(s)
                .into_iter()
                .map(H::from_str)
                .collect::<Result<Vec<_>>>()
                .map(SipHeaderList::from_vec)
        } else {
            Ok(SipHeaderList::from_vec(vec![H::from_str(s)?]))
        }
    }
}

impl<H> IntoIterator for SipHeaderList<H> {
    type Item = H;
    type IntoIter = std::vec::IntoIter<H>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl<'a, H> IntoIterator for &'a SipHeaderList<H> {
    type Item = &'a H;
    type IntoIter = std::slice::Iter<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl<H> FromIterator<H> for SipHeaderList<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        SipHeaderList {
            headers: iter.into_iter().collect(),
        }
    }
}

impl<H> Extend<H> for SipHeaderList<H> {
    fn extend<I: IntoIterator<Item = H>>(&mut self, iter: I) {
        self.headers.extend(iter);
    }
}

impl<H> From<Vec<H>> for SipHeaderList<H> {
    fn from(headers: Vec<H>) -> Self {
        SipHeaderList { headers }
    }
}
