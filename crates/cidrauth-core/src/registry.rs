//! Containment queries over a snapshot of configured ranges

use cidrauth_types::range::RangeRecord;

/// Read-only view over the ranges supplied for one evaluation
///
/// The storage layer is expected to hand over enabled ranges only, but
/// `enabled` is checked again here. Order is preserved: the first matching
/// range in the supplied order is the authoritative one.
#[derive(Debug, Clone, Copy)]
pub struct RangeRegistry<'a> {
	ranges: &'a [RangeRecord],
}

impl<'a> RangeRegistry<'a> {
	pub fn new(ranges: &'a [RangeRecord]) -> Self {
		Self { ranges }
	}

	/// Enabled ranges covering `addr`, in snapshot order
	pub fn matching(self, addr: u32) -> impl Iterator<Item = &'a RangeRecord> {
		self.ranges.iter().filter(move |range| range.enabled && range.covers(addr))
	}

	pub fn first_match(self, addr: u32) -> Option<&'a RangeRecord> {
		self.matching(addr).next()
	}

	/// Whether any enabled range covers `addr`
	pub fn is_authoritative(self, addr: u32) -> bool {
		self.first_match(addr).is_some()
	}
}


// vim: ts=4
