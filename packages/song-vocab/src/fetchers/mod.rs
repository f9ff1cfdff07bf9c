//! Page fetchers.

pub mod http;

pub use http::HttpFetcher;
