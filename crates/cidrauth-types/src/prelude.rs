pub use crate::error::{CaResult, Error};
pub use crate::types::AccountId;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
