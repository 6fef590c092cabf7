//! Shared types, adapter traits, and core utilities for CIDR based session authentication.
//!
//! This crate contains the foundational types that are shared between the
//! decision engine, the service facade and all adapter implementations.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod account_adapter;
pub mod address;
pub mod error;
pub mod page_cache_adapter;
pub mod prelude;
pub mod range;
pub mod range_adapter;
pub mod types;

// vim: ts=4
