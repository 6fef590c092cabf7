//! Adapter that stores configured ranges.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::range::RangeRecord;

/// Range storage
///
/// Every collection returned by an implementation is in a stable, caller-visible
/// order. When several ranges cover an address, the first one in that order wins.
#[async_trait]
pub trait RangeAdapter: Debug + Send + Sync {
	/// Enabled ranges that may cover `addr`
	///
	/// Implementations may pre-filter by bounds or return every enabled range.
	/// With `None` every enabled range is returned.
	async fn list_candidate_ranges(&self, addr: Option<u32>) -> CaResult<Vec<RangeRecord>>;

	/// All ranges, enabled or not
	async fn list_ranges(&self) -> CaResult<Vec<RangeRecord>>;

	async fn read_range(&self, id: &str) -> CaResult<RangeRecord>;

	/// Stores a new range. Fails with `Conflict` if the id is taken.
	async fn create_range(&self, range: &RangeRecord) -> CaResult<()>;

	/// Replaces an existing range. Fails with `NotFound` if the id is unknown.
	async fn update_range(&self, range: &RangeRecord) -> CaResult<()>;

	async fn delete_range(&self, id: &str) -> CaResult<()>;
}

// vim: ts=4
