//! Common identifier types.

use serde::{Deserialize, Serialize};

// AccountId //
//***********//
/// Identifier of the account a range signs in as. Opaque to this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Box<str>);

impl AccountId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for AccountId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for AccountId {
	fn from(id: &str) -> Self {
		AccountId(id.into())
	}
}

impl From<String> for AccountId {
	fn from(id: String) -> Self {
		AccountId(id.into_boxed_str())
	}
}

// vim: ts=4
