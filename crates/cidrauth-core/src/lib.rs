//! Decision engine for CIDR based session authentication.
//!
//! Configured ranges are matched against the client address of each request.
//! A matching range signs anonymous visitors in as the range's account, and a
//! session that was signed in this way is signed out again once its address
//! leaves every enabled range. Everything here is a pure function of the range
//! snapshot and request context it is given, apart from the account lookup
//! done through [`cidrauth_types::account_adapter::AccountAdapter`].

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod authorizer;
pub mod cache_policy;
pub mod extract;
pub mod registry;
pub mod settings;

mod prelude;

pub use authorizer::{Authorization, Decision, RequestAuthorizer, RequestContext, RequestState};
pub use cache_policy::should_deny_cache;
pub use registry::RangeRegistry;
pub use settings::CidrAuthOpts;

// vim: ts=4
