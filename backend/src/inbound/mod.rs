//! Inbound adapters translating external requests into driving-port calls.
//!
//! Framework details stay here; handlers only see the ports bundled in
//! [`http::state::HttpState`].

pub mod http;
