//! In-memory adapters
//!
//! Ranges keep their insertion order, which is the order handed to the
//! registry and therefore the first-match order. Updates keep a range in place.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use cidrauth_types::account_adapter::{Account, AccountAdapter, SessionAdapter};
use cidrauth_types::page_cache_adapter::PageCacheAdapter;
use cidrauth_types::prelude::*;
use cidrauth_types::range::RangeRecord;
use cidrauth_types::range_adapter::RangeAdapter;

// Ranges //
//********//
#[derive(Debug, Default)]
pub struct MemoryRangeAdapter {
	ranges: RwLock<Vec<RangeRecord>>,
}

impl MemoryRangeAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_ranges(ranges: Vec<RangeRecord>) -> Self {
		Self { ranges: RwLock::new(ranges) }
	}
}

#[async_trait]
impl RangeAdapter for MemoryRangeAdapter {
	async fn list_candidate_ranges(&self, addr: Option<u32>) -> CaResult<Vec<RangeRecord>> {
		let ranges = self.ranges.read();
		Ok(ranges
			.iter()
			.filter(|range| range.enabled && addr.is_none_or(|addr| range.covers(addr)))
			.cloned()
			.collect())
	}

	async fn list_ranges(&self) -> CaResult<Vec<RangeRecord>> {
		Ok(self.ranges.read().clone())
	}

	async fn read_range(&self, id: &str) -> CaResult<RangeRecord> {
		self.ranges.read().iter().find(|range| range.id.as_ref() == id).cloned().ok_or(Error::NotFound)
	}

	async fn create_range(&self, range: &RangeRecord) -> CaResult<()> {
		let mut ranges = self.ranges.write();
		if ranges.iter().any(|r| r.id == range.id) {
			return Err(Error::Conflict(format!("range '{}' already exists", range.id)));
		}
		ranges.push(range.clone());
		Ok(())
	}

	async fn update_range(&self, range: &RangeRecord) -> CaResult<()> {
		let mut ranges = self.ranges.write();
		let slot = ranges.iter_mut().find(|r| r.id == range.id).ok_or(Error::NotFound)?;
		*slot = range.clone();
		Ok(())
	}

	async fn delete_range(&self, id: &str) -> CaResult<()> {
		let mut ranges = self.ranges.write();
		let pos = ranges.iter().position(|r| r.id.as_ref() == id).ok_or(Error::NotFound)?;
		ranges.remove(pos);
		Ok(())
	}
}

// Accounts //
//**********//
#[derive(Debug, Default)]
pub struct MemoryAccountAdapter {
	accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, account: Account) {
		self.accounts.write().insert(account.id.clone(), account);
	}

	pub fn set_active(&self, id: &AccountId, active: bool) -> CaResult<()> {
		let mut accounts = self.accounts.write();
		let account = accounts.get_mut(id).ok_or(Error::NotFound)?;
		account.active = active;
		Ok(())
	}
}

#[async_trait]
impl AccountAdapter for MemoryAccountAdapter {
	async fn find_active_account(&self, id: &AccountId) -> CaResult<Option<Account>> {
		Ok(self.accounts.read().get(id).filter(|account| account.active).cloned())
	}
}

// Session //
//*********//
#[derive(Debug, Default)]
struct SessionState {
	account: Option<AccountId>,
	flag: bool,
}

/// A single session. Counts sign-ins and sign-outs for inspection.
#[derive(Debug, Default)]
pub struct MemorySession {
	state: RwLock<SessionState>,
	sign_ins: AtomicUsize,
	sign_outs: AtomicUsize,
}

impl MemorySession {
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// A session signed in by some other means, flag unset
	pub fn signed_in(account: AccountId) -> Self {
		Self { state: RwLock::new(SessionState { account: Some(account), flag: false }), ..Self::default() }
	}

	/// A session signed in by range, flag set
	pub fn signed_in_by_range(account: AccountId) -> Self {
		Self { state: RwLock::new(SessionState { account: Some(account), flag: true }), ..Self::default() }
	}

	pub fn account(&self) -> Option<AccountId> {
		self.state.read().account.clone()
	}

	pub fn is_flagged(&self) -> bool {
		self.state.read().flag
	}

	pub fn sign_in_count(&self) -> usize {
		self.sign_ins.load(Ordering::Relaxed)
	}

	pub fn sign_out_count(&self) -> usize {
		self.sign_outs.load(Ordering::Relaxed)
	}
}

#[async_trait]
impl SessionAdapter for MemorySession {
	async fn current_account(&self) -> CaResult<Option<AccountId>> {
		Ok(self.account())
	}

	async fn flag(&self) -> CaResult<bool> {
		Ok(self.is_flagged())
	}

	async fn set_flag(&self, flag: bool) -> CaResult<()> {
		self.state.write().flag = flag;
		Ok(())
	}

	async fn sign_in(&self, account: &Account) -> CaResult<()> {
		self.state.write().account = Some(account.id.clone());
		self.sign_ins.fetch_add(1, Ordering::Relaxed);
		Ok(())
	}

	async fn sign_out(&self) -> CaResult<()> {
		let mut state = self.state.write();
		state.account = None;
		state.flag = false;
		self.sign_outs.fetch_add(1, Ordering::Relaxed);
		Ok(())
	}
}

// Page cache //
//************//
#[derive(Debug, Default)]
pub struct MemoryPageCache {
	invalidations: AtomicUsize,
}

impl MemoryPageCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn invalidation_count(&self) -> usize {
		self.invalidations.load(Ordering::Relaxed)
	}
}

#[async_trait]
impl PageCacheAdapter for MemoryPageCache {
	async fn invalidate_all(&self) -> CaResult<()> {
		let count = self.invalidations.fetch_add(1, Ordering::Relaxed) + 1;
		debug!("Page cache invalidated ({} so far)", count);
		Ok(())
	}
}

// vim: ts=4
