//! # API Gateway
//!
//! Prefix-based request forwarding to the dictionary and task services.

pub mod forwarder;

pub use forwarder::{ForwardRequest, ForwardResponse, ForwardRoute, Forwarder};
