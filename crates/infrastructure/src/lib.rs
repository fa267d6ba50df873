//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_option_lookup;
mod static_option_lookup;

pub use http_option_lookup::HttpOptionLookup;
pub use static_option_lookup::StaticOptionLookup;
