//! Administrative edit path for ranges
//!
//! Validates submitted range forms, persists them through the range adapter
//! and produces listing rows. Bounds are computed here, at save time.

use serde::{Deserialize, Serialize};

use crate::app::CidrAuthState;
use crate::prelude::*;
use cidrauth_types::address::parse_ipv4;
use cidrauth_types::range::{CreateRangeData, MAX_PREFIX_LEN, RangeMode, RangeRecord, check_prefix_len};

const LABEL_MAX_LEN: usize = 255;

/// A submitted range form. All text, the way it arrives from the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeForm {
	pub id: String,
	pub label: String,
	pub ip_dotted: String,
	pub suffix: String,
	pub uid: String,
	#[serde(default)]
	pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
	pub field: &'static str,
	pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
	pub errors: Vec<FieldError>,
}

impl FormErrors {
	fn add(&mut self, field: &'static str, message: impl Into<String>) {
		self.errors.push(FieldError { field, message: message.into() });
	}

	pub fn has(&self, field: &str) -> bool {
		self.errors.iter().any(|e| e.field == field)
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}
}

impl std::fmt::Display for FormErrors {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let parts: Vec<String> =
			self.errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
		write!(f, "{}", parts.join("; "))
	}
}

impl From<FormErrors> for Error {
	fn from(errors: FormErrors) -> Self {
		Error::ValidationError(errors.to_string())
	}
}

fn is_machine_name(id: &str) -> bool {
	!id.is_empty() && id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl RangeForm {
	/// Check every field and build the record with its bounds
	pub fn validate(&self, mode: RangeMode) -> Result<RangeRecord, FormErrors> {
		let mut errors = FormErrors::default();

		let label = self.label.trim();
		if label.is_empty() {
			errors.add("label", "Label is required.");
		} else if label.chars().count() > LABEL_MAX_LEN {
			errors.add("label", format!("Label cannot be longer than {} characters.", LABEL_MAX_LEN));
		}

		if !is_machine_name(&self.id) {
			errors.add(
				"id",
				"The machine name must contain only lowercase letters, numbers, and underscores.",
			);
		}

		let address = self.ip_dotted.trim();
		if parse_ipv4(address).is_err() {
			errors.add("ip_dotted", "Please enter a valid IP address.");
		}

		let suffix = self.suffix.trim();
		let prefix_len = if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
			errors.add("suffix", "Please enter a valid CIDR Notation suffix.");
			None
		} else {
			match suffix.parse::<u32>().ok().filter(|p| check_prefix_len(*p).is_ok()) {
				Some(prefix_len) => Some(prefix_len),
				None => {
					errors.add(
						"suffix",
						format!("The suffix must be between 0 and {}.", MAX_PREFIX_LEN),
					);
					None
				}
			}
		};

		let uid = self.uid.trim();
		if uid.is_empty() {
			errors.add("uid", "Please select a user.");
		}

		let Some(prefix_len) = prefix_len else {
			return Err(errors);
		};
		if !errors.is_empty() {
			return Err(errors);
		}

		RangeRecord::new(
			CreateRangeData {
				id: &self.id,
				label,
				enabled: self.status,
				address,
				prefix_len,
				owner: uid.into(),
			},
			mode,
		)
		.map_err(|err| {
			let mut errors = FormErrors::default();
			errors.add("ip_dotted", err.to_string());
			errors
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveOutcome {
	Created,
	Updated,
}

/// Validate and store a submitted form
///
/// The page cache is flushed afterwards, since pages rendered for addresses
/// the old ranges did or did not cover may now be wrong.
pub async fn save_range(auth: &CidrAuthState, form: &RangeForm, is_new: bool) -> CaResult<SaveOutcome> {
	let range = form.validate(auth.opts.range_mode)?;

	let outcome = if is_new {
		auth.range_adapter.create_range(&range).await?;
		info!("Created new cidr {} ({})", range.label, range.cidr());
		SaveOutcome::Created
	} else {
		auth.range_adapter.update_range(&range).await?;
		info!("Updated cidr {} ({})", range.label, range.cidr());
		SaveOutcome::Updated
	};

	invalidate_page_cache(auth).await;
	Ok(outcome)
}

pub async fn delete_range(auth: &CidrAuthState, id: &str) -> CaResult<()> {
	auth.range_adapter.delete_range(id).await?;
	info!("Deleted cidr {}", id);
	invalidate_page_cache(auth).await;
	Ok(())
}

async fn invalidate_page_cache(auth: &CidrAuthState) {
	if let Some(cache) = &auth.page_cache
		&& let Err(err) = cache.invalidate_all().await
	{
		warn!("Failed to invalidate page cache: {}", err);
	}
}

/// A listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRow {
	pub label: Box<str>,
	pub id: Box<str>,
	pub status: &'static str,
	pub range_start: String,
	pub range_end: String,
	pub suffix: u8,
}

impl RangeRow {
	/// Shows the stored bounds, the ones matching uses
	pub fn new(range: &RangeRecord) -> Self {
		let bounds = range.bounds();

		Self {
			label: range.label.clone(),
			id: range.id.clone(),
			status: if range.enabled { "Enabled" } else { "Disabled" },
			range_start: bounds.start_dotted(),
			range_end: bounds.end_dotted(),
			suffix: range.prefix_len(),
		}
	}
}

pub async fn list_ranges(auth: &CidrAuthState) -> CaResult<Vec<RangeRow>> {
	let ranges = auth.range_adapter.list_ranges().await?;
	Ok(ranges.iter().map(RangeRow::new).collect())
}


// vim: ts=4
