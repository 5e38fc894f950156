//! Value types shared by the SIP headers: parameters, hosts, URIs, addresses,
//! protocols, methods and media types.

pub mod address;
pub mod host;
pub mod media_type;
pub mod method;
pub mod param;
pub mod protocol;
pub mod uri;

pub use address::{Address, AddressForm};
pub use host::{Host, HostPort};
pub use media_type::MediaRange;
pub use method::Method;
pub use param::{GenericValue, NameValue, NameValueList, Separator};
pub use protocol::Protocol;
pub use uri::{GenericUri, SipUri, TelUri, Uri};
