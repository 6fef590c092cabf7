//! Automatic session sign-in by client network range.
//!
//! Each configured range (an IPv4 address plus prefix length) is bound to an
//! account. Anonymous visitors whose address falls inside an enabled range are
//! signed in as that account. A session signed in this way is signed out again
//! as soon as its address is no longer covered by any enabled range. Sessions
//! established by other means are left alone.
//!
//! # Usage
//!
//! ```ignore
//! let auth = CidrAuthBuilder::new()
//! 	.opts(CidrAuthOpts::from_env()?)
//! 	.range_adapter(ranges)
//! 	.account_adapter(accounts)
//! 	.build()?;
//!
//! let router = Router::new()
//! 	.route("/", get(index))
//! 	.layer(axum::middleware::from_fn_with_state(auth.clone(), middleware::cidr_auth))
//! 	.layer(session_layer); // inserts a SessionHandle into the request extensions
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod admin;
pub mod app;
pub mod middleware;

mod prelude;

pub use app::{CidrAuth, CidrAuthBuilder, CidrAuthState, RequestOutcome};
pub use cidrauth_core::{CidrAuthOpts, Decision, RequestContext};
pub use middleware::SessionHandle;

// vim: ts=4
