//! Options for CIDR based sign-in
//!
//! Read from the host's configuration (camelCase keys) or from the environment:
//!
//! | Key               | Environment                   | Default      |
//! |-------------------|-------------------------------|--------------|
//! | `rangeMode`       | `CIDR_AUTH_RANGE_MODE`        | `literal`    |
//! | `serverMode`      | `CIDR_AUTH_SERVER_MODE`       | `standalone` |
//! | `enabled`         | `CIDR_AUTH_ENABLED`           | `true`       |
//! | `denyCacheHeader` | `CIDR_AUTH_DENY_CACHE_HEADER` | `true`       |

use serde::Deserialize;

use crate::extract::ServerMode;
use crate::prelude::*;
use cidrauth_types::range::RangeMode;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CidrAuthOpts {
	/// How range bounds are derived when a range is saved
	pub range_mode: RangeMode,
	/// Where the client address is read from
	pub server_mode: ServerMode,
	/// When false, requests pass through untouched
	pub enabled: bool,
	/// Stamp `Cache-Control: private, no-store` on responses to covered addresses
	pub deny_cache_header: bool,
}

impl Default for CidrAuthOpts {
	fn default() -> Self {
		Self {
			range_mode: RangeMode::default(),
			server_mode: ServerMode::default(),
			enabled: true,
			deny_cache_header: true,
		}
	}
}

impl CidrAuthOpts {
	pub fn from_env() -> CaResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Build options from a key lookup, falling back to defaults for absent keys
	pub fn from_lookup<F>(lookup: F) -> CaResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut opts = Self::default();

		if let Some(mode) = lookup("CIDR_AUTH_RANGE_MODE") {
			opts.range_mode = mode.parse()?;
		}
		if let Some(mode) = lookup("CIDR_AUTH_SERVER_MODE") {
			opts.server_mode = mode.parse()?;
		}
		if let Some(enabled) = lookup("CIDR_AUTH_ENABLED") {
			opts.enabled = parse_bool("CIDR_AUTH_ENABLED", &enabled)?;
		}
		if let Some(deny) = lookup("CIDR_AUTH_DENY_CACHE_HEADER") {
			opts.deny_cache_header = parse_bool("CIDR_AUTH_DENY_CACHE_HEADER", &deny)?;
		}

		if opts.range_mode == RangeMode::Literal {
			debug!("Range bounds use the literal (unmasked) start address");
		}

		Ok(opts)
	}
}

fn parse_bool(key: &str, value: &str) -> CaResult<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		other => Err(Error::ValidationError(format!("{}: expected a boolean, got '{}'", key, other))),
	}
}


// vim: ts=4
