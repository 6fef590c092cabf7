//! Conversion between dotted-decimal IPv4 text and its 32-bit numeric form

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::prelude::*;

/// Parse strict dotted-decimal IPv4 text into its numeric value
///
/// Exactly four decimal octets in 0..=255 separated by dots. Leading zeros,
/// surrounding whitespace and any trailing garbage are rejected.
pub fn parse_ipv4(text: &str) -> CaResult<u32> {
	Ipv4Addr::from_str(text).map(u32::from).map_err(|_| Error::AddressFormat(text.into()))
}

/// Canonical dotted-decimal rendering of a numeric IPv4 address
pub fn format_ipv4(addr: u32) -> String {
	Ipv4Addr::from(addr).to_string()
}

/// Numeric IPv4 form of a client address
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are unwrapped. Any other IPv6
/// address has no numeric form here and returns None.
pub fn ipv4_numeric(addr: &IpAddr) -> Option<u32> {
	match addr {
		IpAddr::V4(ip) => Some(u32::from(*ip)),
		IpAddr::V6(ip) => ip.to_ipv4_mapped().map(u32::from),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::net::Ipv6Addr;

	#[test]
	fn test_parse_ipv4() {
		assert_eq!(parse_ipv4("0.0.0.0").ok(), Some(0));
		assert_eq!(parse_ipv4("10.0.0.5").ok(), Some(0x0a00_0005));
		assert_eq!(parse_ipv4("192.0.34.166").ok(), Some(3_221_234_342));
		assert_eq!(parse_ipv4("255.255.255.255").ok(), Some(u32::MAX));
	}

	#[test]
	fn test_parse_ipv4_rejects_malformed() {
		for text in [
			"",
			"10.0.0",
			"10.0.0.0.1",
			"10.0.0.256",
			"10.0.0.-1",
			"10.a.0.1",
			" 10.0.0.1",
			"10.0.0.1 ",
			"10.0.0.1/24",
			"10..0.1",
			"010.0.0.1",
			"::1",
		] {
			assert!(
				matches!(parse_ipv4(text), Err(Error::AddressFormat(_))),
				"accepted {:?}",
				text
			);
		}
	}

	#[test]
	fn test_format_round_trip() {
		for text in ["0.0.0.0", "1.2.3.4", "10.0.1.0", "172.16.254.1", "255.255.255.255"] {
			let numeric = parse_ipv4(text).unwrap();
			assert_eq!(format_ipv4(numeric), text);
		}
		for numeric in [0u32, 1, 0x0a00_0100, 0xc0a8_0101, u32::MAX] {
			assert_eq!(parse_ipv4(&format_ipv4(numeric)).ok(), Some(numeric));
		}
	}

	#[test]
	fn test_ipv4_numeric() {
		let v4 = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1));
		assert_eq!(ipv4_numeric(&v4), Some(0xc0a8_0101));

		let mapped = IpAddr::V6(Ipv4Addr::new(10, 0, 0, 5).to_ipv6_mapped());
		assert_eq!(ipv4_numeric(&mapped), Some(0x0a00_0005));

		let v6 = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
		assert_eq!(ipv4_numeric(&v6), None);
	}
}

// vim: ts=4
