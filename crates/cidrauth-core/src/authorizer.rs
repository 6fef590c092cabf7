//! Per-request sign-in / sign-out decision
//!
//! Each request falls into exactly one [`RequestState`]:
//!
//! | State                | Session                      | Range match       | Outcome  |
//! |----------------------|------------------------------|-------------------|----------|
//! | `AnonymousNoMatch`   | anonymous                    | none or no addr   | no-op    |
//! | `AnonymousMatch`     | anonymous                    | some              | sign in  |
//! | `OwnedStillMatch`    | signed in by range, flag set | some              | no-op    |
//! | `OwnedNoLongerMatch` | signed in by range, flag set | none or no addr   | sign out |
//! | `Foreign`            | signed in some other way     | any               | no-op    |
//!
//! An unknown client address (absent or not IPv4) counts as no match, so a
//! session signed in by range is signed out from such an address rather than
//! left as a no-op.
//!
//! The session flag is looked at before any matching, so sessions established
//! by other means are never touched. An anonymous match signs in as the owner
//! of the first matching range, provided the account directory reports that
//! account as active.

use serde::Serialize;
use std::sync::Arc;

use crate::prelude::*;
use crate::registry::RangeRegistry;
use cidrauth_types::account_adapter::{Account, AccountAdapter};
use cidrauth_types::range::RangeRecord;

/// What a single request is evaluated on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
	/// Numeric client address. None if it could not be determined or is not IPv4,
	/// in which case no range can match.
	pub client_addr: Option<u32>,
	/// The session was signed in by range
	pub session_flag: bool,
	pub anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState<'a> {
	AnonymousNoMatch,
	AnonymousMatch(&'a RangeRecord),
	OwnedStillMatch,
	OwnedNoLongerMatch,
	Foreign,
}

impl<'a> RequestState<'a> {
	pub fn classify(ctx: &RequestContext, registry: RangeRegistry<'a>) -> Self {
		if !ctx.anonymous {
			if !ctx.session_flag {
				return RequestState::Foreign;
			}
			return match ctx.client_addr {
				Some(addr) if registry.is_authoritative(addr) => RequestState::OwnedStillMatch,
				_ => RequestState::OwnedNoLongerMatch,
			};
		}

		match ctx.client_addr.and_then(|addr| registry.first_match(addr)) {
			Some(range) => RequestState::AnonymousMatch(range),
			None => RequestState::AnonymousNoMatch,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			RequestState::AnonymousNoMatch => "anonymous_no_match",
			RequestState::AnonymousMatch(_) => "anonymous_match",
			RequestState::OwnedStillMatch => "owned_still_match",
			RequestState::OwnedNoLongerMatch => "owned_no_longer_match",
			RequestState::Foreign => "foreign",
		}
	}
}

/// Outcome of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "accountId", rename_all = "camelCase")]
pub enum Decision {
	NoOp,
	SignIn(AccountId),
	SignOut,
}

/// Outcome of a request, carrying the resolved account for a sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
	NoOp,
	SignIn { account: Account, range_id: Box<str> },
	SignOut,
}

impl Authorization {
	pub fn decision(&self) -> Decision {
		match self {
			Authorization::NoOp => Decision::NoOp,
			Authorization::SignIn { account, .. } => Decision::SignIn(account.id.clone()),
			Authorization::SignOut => Decision::SignOut,
		}
	}
}

#[derive(Debug, Clone)]
pub struct RequestAuthorizer {
	accounts: Arc<dyn AccountAdapter>,
}

impl RequestAuthorizer {
	pub fn new(accounts: Arc<dyn AccountAdapter>) -> Self {
		Self { accounts }
	}

	/// Evaluate one request against a range snapshot
	pub async fn evaluate_request(&self, ctx: &RequestContext, ranges: &[RangeRecord]) -> Decision {
		self.authorize(ctx, ranges).await.decision()
	}

	/// Like [`Self::evaluate_request`], but keeps the account to sign in as
	pub async fn authorize(&self, ctx: &RequestContext, ranges: &[RangeRecord]) -> Authorization {
		let state = RequestState::classify(ctx, RangeRegistry::new(ranges));

		match state {
			RequestState::AnonymousMatch(range) => self.resolve_owner(range).await,
			RequestState::OwnedNoLongerMatch => {
				info!(
					"Client address {:?} left all enabled ranges, signing out",
					ctx.client_addr.map(cidrauth_types::address::format_ipv4)
				);
				Authorization::SignOut
			}
			RequestState::AnonymousNoMatch
			| RequestState::OwnedStillMatch
			| RequestState::Foreign => {
				debug!("No range action ({})", state.name());
				Authorization::NoOp
			}
		}
	}

	async fn resolve_owner(&self, range: &RangeRecord) -> Authorization {
		match self.accounts.find_active_account(&range.owner).await {
			Ok(Some(account)) if account.active => {
				if account.id != range.owner {
					error!(
						"Account directory returned {} for owner {} of range {}",
						account.id, range.owner, range.id
					);
					return Authorization::NoOp;
				}
				info!("Range {} signs in as account {}", range.id, account.id);
				Authorization::SignIn { account, range_id: range.id.clone() }
			}
			Ok(_) => {
				debug!("Owner {} of range {} is missing or inactive", range.owner, range.id);
				Authorization::NoOp
			}
			Err(err) => {
				warn!("Account lookup for range {} failed: {}", range.id, err);
				Authorization::NoOp
			}
		}
	}
}


// vim: ts=4
