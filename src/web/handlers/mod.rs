//! # Web API Handlers
//!
//! HTTP request handlers for the gateway, task service and dictionary service.

pub mod gateway;
pub mod health;
pub mod items;
pub mod tasks;
