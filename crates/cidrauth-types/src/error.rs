//! Error type shared by every cidrauth crate

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type CaResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	/// A record with the same identifier already exists
	Conflict(String),
	/// Input is not a strict dotted-decimal IPv4 address
	AddressFormat(Box<str>),
	/// Prefix length outside 0..=32
	PrefixRange(u32),
	ValidationError(String),
	Internal(String),
}

impl Error {
	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOT-FOUND",
			Error::PermissionDenied => "E-PERMISSION-DENIED",
			Error::Conflict(_) => "E-CONFLICT",
			Error::AddressFormat(_) => "E-ADDRESS-FORMAT",
			Error::PrefixRange(_) => "E-PREFIX-RANGE",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::Internal(_) => "E-INTERNAL",
		}
	}

	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::AddressFormat(_) | Error::PrefixRange(_) | Error::ValidationError(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			}
			Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::AddressFormat(addr) => write!(f, "invalid IPv4 address: '{}'", addr),
			Error::PrefixRange(prefix) => {
				write!(f, "prefix length must be between 0 and 32, got {}", prefix)
			}
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		// Internal details stay in the logs
		let message = match &self {
			Error::Internal(_) => "Internal server error".to_string(),
			err => err.to_string(),
		};
		let body = serde_json::json!({
			"error": {
				"code": self.code(),
				"message": message,
			}
		});
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
