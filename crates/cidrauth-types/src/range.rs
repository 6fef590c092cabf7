//! Configured address ranges and the bound calculation behind them
//!
//! A range is configured as an IPv4 address plus a prefix length. Its numeric
//! bounds are derived once, when the record is created or edited, and are stored
//! with it. Queries never recompute them.
//!
//! Two calculation modes exist:
//!
//! - [`RangeMode::Literal`] keeps the historical contract. The start is the
//!   configured address as given (not masked to the network base), and the end
//!   is `start + 2^(32 - prefix)`, or `start` itself for a /32.
//! - [`RangeMode::Masked`] computes the real network block: the start is the
//!   address masked with the prefix, the end is the broadcast address.
//!
//! Bounds are computed in u64 and clamped to `u32::MAX`, so a /0 never wraps.

use serde::{Deserialize, Serialize};

use crate::address::{format_ipv4, parse_ipv4};
use crate::prelude::*;

pub const MAX_PREFIX_LEN: u32 = 32;

/// How bounds are derived from a configured address and prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
	/// Start at the configured address, end `2^(32 - prefix)` above it
	#[default]
	Literal,
	/// Network base to broadcast address
	Masked,
}

impl std::str::FromStr for RangeMode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"literal" => Ok(RangeMode::Literal),
			"masked" => Ok(RangeMode::Masked),
			other => Err(Error::ValidationError(format!("unknown range mode '{}'", other))),
		}
	}
}

/// Inclusive numeric bounds of a range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeBounds {
	start: u32,
	end: u32,
}

impl RangeBounds {
	pub fn start(&self) -> u32 {
		self.start
	}

	pub fn end(&self) -> u32 {
		self.end
	}

	pub fn contains(&self, addr: u32) -> bool {
		self.start <= addr && addr <= self.end
	}

	pub fn start_dotted(&self) -> String {
		format_ipv4(self.start)
	}

	pub fn end_dotted(&self) -> String {
		format_ipv4(self.end)
	}
}

/// Validate a prefix length
pub fn check_prefix_len(prefix_len: u32) -> CaResult<u8> {
	if prefix_len > MAX_PREFIX_LEN {
		return Err(Error::PrefixRange(prefix_len));
	}
	u8::try_from(prefix_len).map_err(|_| Error::PrefixRange(prefix_len))
}

/// Derive the bounds of `address/prefix_len`
pub fn compute_range(address: u32, prefix_len: u32, mode: RangeMode) -> CaResult<RangeBounds> {
	let prefix_len = u32::from(check_prefix_len(prefix_len)?);
	let host_bits = MAX_PREFIX_LEN - prefix_len;

	let (start, end) = match mode {
		RangeMode::Literal => {
			let span: u64 = if host_bits > 0 { 1u64 << host_bits } else { 0 };
			let end = (u64::from(address) + span).min(u64::from(u32::MAX));
			(address, u32::try_from(end).unwrap_or(u32::MAX))
		}
		RangeMode::Masked => {
			let mask = u32::MAX.checked_shl(host_bits).unwrap_or(0);
			let start = address & mask;
			(start, start | !mask)
		}
	};

	Ok(RangeBounds { start, end })
}

/// Data needed to create or reconfigure a range
#[derive(Debug)]
pub struct CreateRangeData<'a> {
	pub id: &'a str,
	pub label: &'a str,
	pub enabled: bool,
	pub address: &'a str,
	pub prefix_len: u32,
	pub owner: AccountId,
}

/// A configured range bound to the account it signs in as
///
/// Deserializing checks that the stored bounds are the ones one of the range
/// modes derives from the stored address and prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredRangeRecord")]
pub struct RangeRecord {
	pub id: Box<str>,
	pub label: Box<str>,
	pub enabled: bool,
	address: Box<str>,
	prefix_len: u8,
	range_start: u32,
	range_end: u32,
	pub owner: AccountId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRangeRecord {
	id: Box<str>,
	label: Box<str>,
	enabled: bool,
	address: Box<str>,
	prefix_len: u32,
	range_start: u32,
	range_end: u32,
	owner: AccountId,
}

impl TryFrom<StoredRangeRecord> for RangeRecord {
	type Error = Error;

	fn try_from(stored: StoredRangeRecord) -> CaResult<Self> {
		let addr = parse_ipv4(&stored.address)?;
		let prefix_len = check_prefix_len(stored.prefix_len)?;
		let bounds = RangeBounds { start: stored.range_start, end: stored.range_end };

		let derived = [RangeMode::Literal, RangeMode::Masked]
			.into_iter()
			.any(|mode| compute_range(addr, stored.prefix_len, mode).is_ok_and(|b| b == bounds));
		if !derived {
			return Err(Error::ValidationError(format!(
				"range '{}': stored bounds {}..{} do not match {}/{}",
				stored.id, stored.range_start, stored.range_end, stored.address, prefix_len
			)));
		}

		Ok(Self {
			id: stored.id,
			label: stored.label,
			enabled: stored.enabled,
			address: stored.address,
			prefix_len,
			range_start: stored.range_start,
			range_end: stored.range_end,
			owner: stored.owner,
		})
	}
}

impl RangeRecord {
	pub fn new(data: CreateRangeData<'_>, mode: RangeMode) -> CaResult<Self> {
		let bounds = compute_range(parse_ipv4(data.address)?, data.prefix_len, mode)?;
		let prefix_len = check_prefix_len(data.prefix_len)?;

		Ok(Self {
			id: data.id.into(),
			label: data.label.into(),
			enabled: data.enabled,
			address: data.address.into(),
			prefix_len,
			range_start: bounds.start,
			range_end: bounds.end,
			owner: data.owner,
		})
	}

	/// Change the configured address and prefix, recomputing the bounds
	///
	/// On error the record is left untouched.
	pub fn reconfigure(&mut self, address: &str, prefix_len: u32, mode: RangeMode) -> CaResult<()> {
		let bounds = compute_range(parse_ipv4(address)?, prefix_len, mode)?;
		self.prefix_len = check_prefix_len(prefix_len)?;
		self.address = address.into();
		self.range_start = bounds.start;
		self.range_end = bounds.end;
		Ok(())
	}

	pub fn address(&self) -> &str {
		&self.address
	}

	pub fn prefix_len(&self) -> u8 {
		self.prefix_len
	}

	pub fn range_start(&self) -> u32 {
		self.range_start
	}

	pub fn range_end(&self) -> u32 {
		self.range_end
	}

	pub fn bounds(&self) -> RangeBounds {
		RangeBounds { start: self.range_start, end: self.range_end }
	}

	/// Whether `addr` lies within the stored bounds. Ignores `enabled`.
	pub fn covers(&self, addr: u32) -> bool {
		self.range_start <= addr && addr <= self.range_end
	}

	/// `address/prefix` notation
	pub fn cidr(&self) -> String {
		format!("{}/{}", self.address, self.prefix_len)
	}
}


// vim: ts=4
