//! axum middleware running range sign-in for every request

use axum::{
	body::Body,
	extract::State,
	http::{HeaderValue, Request, header},
	middleware::Next,
	response::Response,
};
use std::sync::Arc;

use crate::prelude::*;
use cidrauth_core::cache_policy::NO_STORE_CACHE_CONTROL;
use cidrauth_core::extract::extract_client_ip;
use cidrauth_types::account_adapter::SessionAdapter;

/// The request's session, put into the request extensions by the host's session layer
#[derive(Debug, Clone)]
pub struct SessionHandle(pub Arc<dyn SessionAdapter>);

pub async fn cidr_auth(State(auth): State<CidrAuth>, mut req: Request<Body>, next: Next) -> Response {
	if !auth.opts.enabled {
		return next.run(req).await;
	}

	let client_ip = extract_client_ip(&req, auth.opts.server_mode);
	let session = req.extensions().get::<SessionHandle>().cloned();
	let outcome = auth.handle_request(client_ip, session.as_ref().map(|s| s.0.as_ref())).await;

	let deny_cache = outcome.deny_cache && auth.opts.deny_cache_header;
	req.extensions_mut().insert(outcome);

	let mut res = next.run(req).await;
	if deny_cache {
		res.headers_mut()
			.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE_CACHE_CONTROL));
	}
	res
}

// vim: ts=4
