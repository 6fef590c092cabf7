//! Client address extraction
//!
//! - Standalone mode: peer address from `ConnectInfo`
//! - Proxy mode: forwarding headers first, peer address as fallback

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use hyper::Request;
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use cidrauth_types::address::ipv4_numeric;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerMode {
	#[default]
	Standalone,
	Proxy,
}

impl std::str::FromStr for ServerMode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"standalone" => Ok(ServerMode::Standalone),
			"proxy" => Ok(ServerMode::Proxy),
			other => Err(Error::ValidationError(format!("unknown server mode '{}'", other))),
		}
	}
}

/// Extract client IP from request based on ServerMode
pub fn extract_client_ip<B>(req: &Request<B>, mode: ServerMode) -> Option<IpAddr> {
	let peer = || req.extensions().get::<ConnectInfo<SocketAddr>>().map(|ci| ci.0.ip());
	match mode {
		ServerMode::Standalone => peer(),
		ServerMode::Proxy => extract_from_xff(req)
			.or_else(|| extract_from_x_real_ip(req))
			.or_else(|| extract_from_forwarded(req))
			.or_else(peer),
	}
}

/// Numeric IPv4 client address, None if unknown or not IPv4
pub fn extract_client_addr<B>(req: &Request<B>, mode: ServerMode) -> Option<u32> {
	extract_client_ip(req, mode).as_ref().and_then(ipv4_numeric)
}

fn extract_from_xff<B>(req: &Request<B>) -> Option<IpAddr> {
	req.headers()
		.get("x-forwarded-for")
		.and_then(|h| h.to_str().ok())
		// "client, proxy1, proxy2": the leftmost entry is the original client
		.and_then(|s| s.split(',').next().map(str::trim).and_then(|ip| ip.parse().ok()))
}

fn extract_from_x_real_ip<B>(req: &Request<B>) -> Option<IpAddr> {
	req.headers()
		.get("x-real-ip")
		.and_then(|h| h.to_str().ok())
		.and_then(|s| s.trim().parse().ok())
}

/// RFC 7239: `for=192.0.2.60;proto=http` or `for="[2001:db8::1]"`
fn extract_from_forwarded<B>(req: &Request<B>) -> Option<IpAddr> {
	req.headers().get("forwarded").and_then(|h| h.to_str().ok()).and_then(|s| {
		s.split(',').next()?.split(';').find_map(|part| {
			let (key, value) = part.split_once('=')?;
			if !key.trim().eq_ignore_ascii_case("for") {
				return None;
			}
			value.trim().trim_matches('"').trim_matches('[').trim_matches(']').parse().ok()
		})
	})
}


// vim: ts=4
