//! HTTP probe transport
//!
//! One outbound request per probe invocation: fixed anonymous browser
//! identity, redirects followed, body buffered only for textual/JSON
//! content types. No retries, no cookies, no cache.

mod client;
mod request;
mod response;

pub use client::{HttpTransport, Transport};
pub use request::ProbeRequest;
pub use response::ProbeResponse;
