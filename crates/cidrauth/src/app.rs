//! Service state and per-request orchestration

use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;

use crate::prelude::*;
use cidrauth_core::{
	Authorization, CidrAuthOpts, Decision, RequestAuthorizer, RequestContext, should_deny_cache,
};
use cidrauth_types::account_adapter::{AccountAdapter, SessionAdapter};
use cidrauth_types::address::{ipv4_numeric, parse_ipv4};
use cidrauth_types::page_cache_adapter::PageCacheAdapter;
use cidrauth_types::range::{RangeBounds, RangeRecord, compute_range};
use cidrauth_types::range_adapter::RangeAdapter;

/// What happened to a request. Inserted into the request extensions by the middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOutcome {
	pub decision: Decision,
	pub deny_cache: bool,
}

#[derive(Debug)]
pub struct CidrAuthState {
	pub opts: CidrAuthOpts,
	pub range_adapter: Arc<dyn RangeAdapter>,
	pub account_adapter: Arc<dyn AccountAdapter>,
	pub page_cache: Option<Arc<dyn PageCacheAdapter>>,
	authorizer: RequestAuthorizer,
}

pub type CidrAuth = Arc<CidrAuthState>;

impl CidrAuthState {
	/// Bounds for `address/prefix_len` under the configured range mode
	///
	/// Used by the edit path to fill in the stored bounds before persisting.
	pub fn compute_range(&self, address: &str, prefix_len: u32) -> CaResult<RangeBounds> {
		compute_range(parse_ipv4(address)?, prefix_len, self.opts.range_mode)
	}

	pub fn should_deny_cache(&self, ranges: &[RangeRecord], addr: u32) -> bool {
		should_deny_cache(ranges, addr)
	}

	pub async fn evaluate_request(&self, ctx: &RequestContext, ranges: &[RangeRecord]) -> Decision {
		self.authorizer.evaluate_request(ctx, ranges).await
	}

	/// Candidate ranges for an address
	///
	/// Without a numeric address nothing can match and storage is not asked.
	/// A storage failure yields an empty snapshot.
	pub async fn snapshot(&self, addr: Option<u32>) -> Vec<RangeRecord> {
		let Some(addr) = addr else {
			return Vec::new();
		};
		match self.range_adapter.list_candidate_ranges(Some(addr)).await {
			Ok(ranges) => ranges,
			Err(err) => {
				warn!("Failed to load range snapshot: {}", err);
				Vec::new()
			}
		}
	}

	pub async fn request_context(
		&self,
		client_addr: Option<u32>,
		session: &dyn SessionAdapter,
	) -> CaResult<RequestContext> {
		let anonymous = session.current_account().await?.is_none();
		let session_flag = session.flag().await?;
		Ok(RequestContext { client_addr, session_flag, anonymous })
	}

	/// Evaluate a request and apply the decision to its session
	///
	/// Always completes. Without a session only the cache signal is computed.
	pub async fn handle_request(
		&self,
		client_ip: Option<IpAddr>,
		session: Option<&dyn SessionAdapter>,
	) -> RequestOutcome {
		let client_addr = client_ip.as_ref().and_then(ipv4_numeric);
		let ranges = self.snapshot(client_addr).await;
		let deny_cache = client_addr.is_some_and(|addr| should_deny_cache(&ranges, addr));

		let Some(session) = session else {
			debug!("No session on request, skipping range sign-in");
			return RequestOutcome { decision: Decision::NoOp, deny_cache };
		};

		let ctx = match self.request_context(client_addr, session).await {
			Ok(ctx) => ctx,
			Err(err) => {
				warn!("Failed to read session state: {}", err);
				return RequestOutcome { decision: Decision::NoOp, deny_cache };
			}
		};

		let authorization = self.authorizer.authorize(&ctx, &ranges).await;
		apply_authorization(session, &authorization).await;

		RequestOutcome { decision: authorization.decision(), deny_cache }
	}
}

async fn apply_authorization(session: &dyn SessionAdapter, authorization: &Authorization) {
	match authorization {
		Authorization::NoOp => {}
		Authorization::SignIn { account, range_id } => {
			if let Err(err) = session.sign_in(account).await {
				warn!("Sign-in as {} via range {} failed: {}", account.id, range_id, err);
				return;
			}
			if let Err(err) = session.set_flag(true).await {
				warn!("Failed to mark session of {} as range sign-in: {}", account.id, err);
			}
		}
		Authorization::SignOut => {
			if let Err(err) = session.sign_out().await {
				warn!("Range sign-out failed: {}", err);
			}
		}
	}
}

#[derive(Debug, Default)]
pub struct CidrAuthBuilder {
	opts: CidrAuthOpts,
	range_adapter: Option<Arc<dyn RangeAdapter>>,
	account_adapter: Option<Arc<dyn AccountAdapter>>,
	page_cache: Option<Arc<dyn PageCacheAdapter>>,
}

impl CidrAuthBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn opts(mut self, opts: CidrAuthOpts) -> Self {
		self.opts = opts;
		self
	}

	pub fn range_adapter(mut self, adapter: Arc<dyn RangeAdapter>) -> Self {
		self.range_adapter = Some(adapter);
		self
	}

	pub fn account_adapter(mut self, adapter: Arc<dyn AccountAdapter>) -> Self {
		self.account_adapter = Some(adapter);
		self
	}

	pub fn page_cache(mut self, adapter: Arc<dyn PageCacheAdapter>) -> Self {
		self.page_cache = Some(adapter);
		self
	}

	pub fn build(self) -> CaResult<CidrAuth> {
		let range_adapter = self
			.range_adapter
			.ok_or_else(|| Error::Internal("range adapter not configured".into()))?;
		let account_adapter = self
			.account_adapter
			.ok_or_else(|| Error::Internal("account adapter not configured".into()))?;

		info!(
			"CIDR sign-in ready (range mode: {:?}, server mode: {:?}, enabled: {})",
			self.opts.range_mode, self.opts.server_mode, self.opts.enabled
		);

		Ok(Arc::new(CidrAuthState {
			opts: self.opts,
			range_adapter,
			authorizer: RequestAuthorizer::new(account_adapter.clone()),
			account_adapter,
			page_cache: self.page_cache,
		}))
	}
}

// vim: ts=4
