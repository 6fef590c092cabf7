//! Shared fixtures for the integration tests

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use cidrauth::{CidrAuth, CidrAuthBuilder, CidrAuthOpts};
use cidrauth_range_adapter_memory::{MemoryAccountAdapter, MemoryPageCache, MemoryRangeAdapter};
use cidrauth_types::account_adapter::Account;
use cidrauth_types::range::{CreateRangeData, RangeMode, RangeRecord};

pub struct Fixture {
	pub auth: CidrAuth,
	pub ranges: Arc<MemoryRangeAdapter>,
	pub accounts: Arc<MemoryAccountAdapter>,
	pub page_cache: Arc<MemoryPageCache>,
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

pub fn range(id: &str, address: &str, prefix_len: u32, owner: &str) -> RangeRecord {
	RangeRecord::new(
		CreateRangeData { id, label: id, enabled: true, address, prefix_len, owner: owner.into() },
		RangeMode::Literal,
	)
	.unwrap()
}

pub fn account(id: &str, active: bool) -> Account {
	Account { id: id.into(), name: id.into(), active }
}

/// Accounts alice and bob are active, carol is not.
/// Ranges: lan 10.0.0.0/24 -> alice, lab 192.168.1.1/32 -> bob, old 172.16.0.0/16 -> carol.
pub fn fixture_with(opts: CidrAuthOpts) -> Fixture {
	init_tracing();

	let ranges = Arc::new(MemoryRangeAdapter::with_ranges(vec![
		range("lan", "10.0.0.0", 24, "alice"),
		range("lab", "192.168.1.1", 32, "bob"),
		range("old", "172.16.0.0", 16, "carol"),
	]));
	let accounts = Arc::new(MemoryAccountAdapter::new());
	accounts.insert(account("alice", true));
	accounts.insert(account("bob", true));
	accounts.insert(account("carol", false));
	let page_cache = Arc::new(MemoryPageCache::new());

	let auth = CidrAuthBuilder::new()
		.opts(opts)
		.range_adapter(ranges.clone())
		.account_adapter(accounts.clone())
		.page_cache(page_cache.clone())
		.build()
		.unwrap();

	Fixture { auth, ranges, accounts, page_cache }
}

pub fn fixture() -> Fixture {
	fixture_with(CidrAuthOpts::default())
}

pub fn ip(text: &str) -> std::net::IpAddr {
	text.parse().unwrap()
}

// vim: ts=4
