//! Client for the ad-revenue reporting API.
//!
//! [`AdsenseClient::fetch_report`] turns one calendar day into a
//! [`smsdash_core::RevenueReport`]: a per-domain earnings breakdown plus the
//! top pages by earnings. [`RevenueReporter`] wraps the client so that a
//! failed or unconfigured fetch yields a zero-revenue report instead of an
//! error.

pub mod client;
pub mod error;
pub mod parse;
pub mod reporter;
pub mod types;

pub use client::{AdsenseClient, AdsenseOptions};
pub use error::AdsenseError;
pub use parse::{parse_domain_breakdown, parse_page_breakdown, split_url_channel};
pub use reporter::{RevenueReporter, NOT_CONFIGURED_NOTE, UNAVAILABLE_NOTE};
