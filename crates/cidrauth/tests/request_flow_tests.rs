//! End-to-end request evaluation against the in-memory adapters

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use async_trait::async_trait;
use std::sync::Arc;

use cidrauth::{CidrAuthBuilder, Decision, RequestOutcome};
use cidrauth_range_adapter_memory::{MemoryAccountAdapter, MemorySession};
use cidrauth_types::account_adapter::SessionAdapter;
use cidrauth_types::prelude::*;
use cidrauth_types::range::RangeRecord;
use cidrauth_types::range_adapter::RangeAdapter;
use common::*;

#[tokio::test]
async fn test_anonymous_in_range_signs_in_and_flags_session() {
	let fx = fixture();
	let session = MemorySession::anonymous();

	let outcome = fx.auth.handle_request(Some(ip("10.0.0.5")), Some(&session)).await;

	assert_eq!(outcome, RequestOutcome { decision: Decision::SignIn("alice".into()), deny_cache: true });
	assert_eq!(session.account(), Some("alice".into()));
	assert!(session.is_flagged());
	assert_eq!(session.sign_in_count(), 1);
}

#[tokio::test]
async fn test_anonymous_out_of_range_is_noop() {
	let fx = fixture();
	let session = MemorySession::anonymous();

	let outcome = fx.auth.handle_request(Some(ip("10.0.2.1")), Some(&session)).await;

	assert_eq!(outcome, RequestOutcome { decision: Decision::NoOp, deny_cache: false });
	assert_eq!(session.account(), None);
	assert!(!session.is_flagged());
}

#[tokio::test]
async fn test_single_address_range() {
	let fx = fixture();

	let session = MemorySession::anonymous();
	let outcome = fx.auth.handle_request(Some(ip("192.168.1.1")), Some(&session)).await;
	assert_eq!(outcome.decision, Decision::SignIn("bob".into()));

	let session = MemorySession::anonymous();
	let outcome = fx.auth.handle_request(Some(ip("192.168.1.2")), Some(&session)).await;
	assert_eq!(outcome.decision, Decision::NoOp);
	assert!(!outcome.deny_cache);
}

#[tokio::test]
async fn test_range_session_signed_out_after_leaving_range() {
	let fx = fixture();
	let session = MemorySession::anonymous();

	fx.auth.handle_request(Some(ip("10.0.0.5")), Some(&session)).await;
	let outcome = fx.auth.handle_request(Some(ip("10.0.0.200")), Some(&session)).await;
	assert_eq!(outcome.decision, Decision::NoOp);
	assert_eq!(session.account(), Some("alice".into()));

	let outcome = fx.auth.handle_request(Some(ip("10.0.2.1")), Some(&session)).await;
	assert_eq!(outcome, RequestOutcome { decision: Decision::SignOut, deny_cache: false });
	assert_eq!(session.account(), None);
	assert!(!session.is_flagged());
	assert_eq!(session.sign_out_count(), 1);
}

#[tokio::test]
async fn test_range_session_signed_out_when_range_disabled() {
	let fx = fixture();
	let session = MemorySession::signed_in_by_range("alice".into());

	let mut lan = fx.ranges.read_range("lan").await.unwrap();
	lan.enabled = false;
	fx.ranges.update_range(&lan).await.unwrap();

	let outcome = fx.auth.handle_request(Some(ip("10.0.0.5")), Some(&session)).await;
	assert_eq!(outcome.decision, Decision::SignOut);
}

#[tokio::test]
async fn test_foreign_session_never_touched() {
	let fx = fixture();
	let session = MemorySession::signed_in("dave".into());

	for addr in ["10.0.0.5", "10.0.2.1", "192.168.1.1"] {
		let outcome = fx.auth.handle_request(Some(ip(addr)), Some(&session)).await;
		assert_eq!(outcome.decision, Decision::NoOp);
	}
	assert_eq!(session.account(), Some("dave".into()));
	assert_eq!(session.sign_in_count(), 0);
	assert_eq!(session.sign_out_count(), 0);
}

#[tokio::test]
async fn test_cache_denied_even_when_owner_inactive() {
	let fx = fixture();
	let session = MemorySession::anonymous();

	let outcome = fx.auth.handle_request(Some(ip("172.16.3.4")), Some(&session)).await;

	assert_eq!(outcome, RequestOutcome { decision: Decision::NoOp, deny_cache: true });
	assert_eq!(session.account(), None);
}

#[tokio::test]
async fn test_owner_deactivated_later() {
	let fx = fixture();
	fx.accounts.set_active(&"alice".into(), false).unwrap();

	let session = MemorySession::anonymous();
	let outcome = fx.auth.handle_request(Some(ip("10.0.0.5")), Some(&session)).await;
	assert_eq!(outcome.decision, Decision::NoOp);
	assert!(outcome.deny_cache);
}

#[tokio::test]
async fn test_ipv6_and_unknown_clients() {
	let fx = fixture();

	let session = MemorySession::anonymous();
	let outcome = fx.auth.handle_request(Some(ip("::ffff:10.0.0.5")), Some(&session)).await;
	assert_eq!(outcome.decision, Decision::SignIn("alice".into()));

	let session = MemorySession::anonymous();
	let outcome = fx.auth.handle_request(Some(ip("2001:db8::1")), Some(&session)).await;
	assert_eq!(outcome, RequestOutcome { decision: Decision::NoOp, deny_cache: false });

	let session = MemorySession::signed_in_by_range("alice".into());
	let outcome = fx.auth.handle_request(None, Some(&session)).await;
	assert_eq!(outcome.decision, Decision::SignOut);
}

#[tokio::test]
async fn test_without_session_only_cache_signal() {
	let fx = fixture();
	let outcome = fx.auth.handle_request(Some(ip("10.0.0.5")), None).await;
	assert_eq!(outcome, RequestOutcome { decision: Decision::NoOp, deny_cache: true });
}

#[tokio::test]
async fn test_evaluate_request_and_compute_range() {
	let fx = fixture();
	let ranges = fx.ranges.list_candidate_ranges(None).await.unwrap();
	let ctx = cidrauth::RequestContext {
		client_addr: Some(0x0a00_0005),
		session_flag: false,
		anonymous: true,
	};
	assert_eq!(fx.auth.evaluate_request(&ctx, &ranges).await, Decision::SignIn("alice".into()));
	assert!(fx.auth.should_deny_cache(&ranges, 0x0a00_0005));

	let bounds = fx.auth.compute_range("10.0.0.0", 24).unwrap();
	assert_eq!(bounds.end_dotted(), "10.0.1.0");
	assert!(matches!(fx.auth.compute_range("10.0.0.0", 33), Err(Error::PrefixRange(33))));
	assert!(matches!(fx.auth.compute_range("10.0.0", 24), Err(Error::AddressFormat(_))));
}

#[derive(Debug)]
struct BrokenRanges;

#[async_trait]
impl RangeAdapter for BrokenRanges {
	async fn list_candidate_ranges(&self, _addr: Option<u32>) -> CaResult<Vec<RangeRecord>> {
		Err(Error::Internal("storage offline".into()))
	}
	async fn list_ranges(&self) -> CaResult<Vec<RangeRecord>> {
		Err(Error::Internal("storage offline".into()))
	}
	async fn read_range(&self, _id: &str) -> CaResult<RangeRecord> {
		Err(Error::Internal("storage offline".into()))
	}
	async fn create_range(&self, _range: &RangeRecord) -> CaResult<()> {
		Err(Error::Internal("storage offline".into()))
	}
	async fn update_range(&self, _range: &RangeRecord) -> CaResult<()> {
		Err(Error::Internal("storage offline".into()))
	}
	async fn delete_range(&self, _id: &str) -> CaResult<()> {
		Err(Error::Internal("storage offline".into()))
	}
}

#[tokio::test]
async fn test_storage_failure_never_fails_request() {
	init_tracing();
	let auth = CidrAuthBuilder::new()
		.range_adapter(Arc::new(BrokenRanges))
		.account_adapter(Arc::new(MemoryAccountAdapter::new()))
		.build()
		.unwrap();

	let session = MemorySession::anonymous();
	let outcome = auth.handle_request(Some(ip("10.0.0.5")), Some(&session)).await;
	assert_eq!(outcome, RequestOutcome { decision: Decision::NoOp, deny_cache: false });
}

#[tokio::test]
async fn test_builder_requires_adapters() {
	assert!(CidrAuthBuilder::new().build().is_err());
	assert!(
		CidrAuthBuilder::new().account_adapter(Arc::new(MemoryAccountAdapter::new())).build().is_err()
	);
}

#[tokio::test]
async fn test_session_flag_read_through_adapter() {
	let fx = fixture();
	let session = MemorySession::signed_in_by_range("alice".into());
	let ctx = fx.auth.request_context(Some(0x0a00_0005), &session).await.unwrap();
	assert!(!ctx.anonymous);
	assert!(ctx.session_flag);
	assert!(session.flag().await.unwrap());
}

#[test]
fn test_outcome_serialization() {
	let outcome = RequestOutcome { decision: Decision::SignIn("alice".into()), deny_cache: true };
	let json = serde_json::to_value(&outcome).unwrap();
	assert_eq!(json["denyCache"], true);
	assert_eq!(json["decision"]["action"], "signIn");
	assert_eq!(json["decision"]["accountId"], "alice");
}

// vim: ts=4
