//! Shared test utilities for the Webshare client crates.
//!
//! This crate provides:
//! - A scripted [`Transport`](webshare::Transport) that records requests
//! - Proptest generators for statuses and rate-limit hints
//! - Sample API payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{MockResponse, MockTransport, RecordedRequest, mock_client, test_config};
