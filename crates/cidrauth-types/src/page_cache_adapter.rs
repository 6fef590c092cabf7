//! Adapter for the host's rendered page cache.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait PageCacheAdapter: Debug + Send + Sync {
	/// Drops every cached page. Called after ranges change.
	async fn invalidate_all(&self) -> CaResult<()>;
}

// vim: ts=4
