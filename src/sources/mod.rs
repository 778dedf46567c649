//! External feed retrieval
//!
//! Network access is an external collaborator of the parsing pipeline: the
//! splitter only sees an ordered sequence of payloads, however they were
//! obtained.

#[cfg(feature = "async")]
pub mod cnb;

#[cfg(feature = "async")]
pub use cnb::CnbSource;
