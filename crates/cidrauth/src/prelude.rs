pub use crate::app::CidrAuth;
pub use cidrauth_types::prelude::*;

// vim: ts=4
