//! Parsers for the value part of each typed header. The header name and
//! colon are handled by [`crate::parser`].

pub(crate) mod accept;
pub(crate) mod address;
pub(crate) mod auth;
pub(crate) mod call_id;
pub(crate) mod content;
pub(crate) mod cseq;
pub(crate) mod date;
pub(crate) mod event;
pub(crate) mod info;
pub(crate) mod numeric;
pub(crate) mod option_tags;
pub(crate) mod product;
pub(crate) mod reason;
pub(crate) mod retry_after;
pub(crate) mod text;
pub(crate) mod timestamp;
pub(crate) mod via;
pub(crate) mod warning;
