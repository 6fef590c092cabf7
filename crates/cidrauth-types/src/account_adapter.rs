//! Adapters for the account directory and the per-request session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// An account a range can sign in as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	pub id: AccountId,
	pub name: Box<str>,
	pub active: bool,
}

#[async_trait]
pub trait AccountAdapter: Debug + Send + Sync {
	/// Looks up an account, returning None if it does not exist or is not active
	async fn find_active_account(&self, id: &AccountId) -> CaResult<Option<Account>>;
}

/// The session of the current request
///
/// `flag` marks a session whose authentication was established by range
/// sign-in. It lives in the session and is never recomputed.
#[async_trait]
pub trait SessionAdapter: Debug + Send + Sync {
	/// The signed-in account, None for an anonymous session
	async fn current_account(&self) -> CaResult<Option<AccountId>>;

	async fn flag(&self) -> CaResult<bool>;

	async fn set_flag(&self, flag: bool) -> CaResult<()>;

	async fn sign_in(&self, account: &Account) -> CaResult<()>;

	/// Ends the session. The flag goes with it.
	async fn sign_out(&self) -> CaResult<()>;
}

// vim: ts=4
