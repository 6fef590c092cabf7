//! Response cache policy for range-covered addresses
//!
//! A response served to an address inside an enabled range may carry content
//! of the range's account, so it must not land in a shared cache. This holds
//! whatever the authorizer decides for the request.

use cidrauth_types::range::RangeRecord;

use crate::registry::RangeRegistry;

pub const NO_STORE_CACHE_CONTROL: &str = "private, no-store";

pub fn should_deny_cache(ranges: &[RangeRecord], addr: u32) -> bool {
	RangeRegistry::new(ranges).is_authoritative(addr)
}


// vim: ts=4
