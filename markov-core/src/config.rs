use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MarkovError;

pub const DEFAULT_INPUT: &str = "shakespeare_sonnet.txt";
pub const DEFAULT_CHAIN_LENGTH: usize = 3;
pub const DEFAULT_LINE_COUNT: usize = 13;
pub const DEFAULT_MAX_RESTARTS: usize = 1000;

/// Parameters of one generation run.
///
/// `MarkovConfig` gathers the corpus location, the chain order, the number
/// of lines to produce and the optional seed. Every field has a default so
/// a configuration file only has to name what it changes.
///
/// # Invariants (after `validate`)
/// - `chain_length >= 2`
/// - `max_restarts >= 1`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MarkovConfig {
	/// Corpus file to read.
	pub input_source: PathBuf,

	/// Order of the chain (window width, the key is `chain_length - 1` words).
	pub chain_length: usize,

	/// Number of generated lines.
	pub line_count: usize,

	/// Fixed seed for reproducible output, entropy when `None`.
	pub random_seed: Option<u64>,

	/// Maximum number of consecutive dead-end restarts before giving up.
	pub max_restarts: usize,
}

impl Default for MarkovConfig {
	fn default() -> Self {
		Self {
			input_source: PathBuf::from(DEFAULT_INPUT),
			chain_length: DEFAULT_CHAIN_LENGTH,
			line_count: DEFAULT_LINE_COUNT,
			random_seed: None,
			max_restarts: DEFAULT_MAX_RESTARTS,
		}
	}
}

impl MarkovConfig {
	/// Loads a configuration file.
	///
	/// The format is picked from the extension: `.json` is read as JSON,
	/// `.toml` (or no extension) as TOML.
	///
	/// # Errors
	/// - `Io` if the file cannot be read
	/// - `Config` if the extension is unknown or the content malformed
	pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MarkovError> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path)?;
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("json") => serde_json::from_str(&contents).map_err(|e| MarkovError::Config(e.to_string())),
			Some("toml") | None => toml::from_str(&contents).map_err(|e| MarkovError::Config(e.to_string())),
			Some(other) => Err(MarkovError::Config(format!("unsupported configuration extension '{}'", other))),
		}
	}

	/// Checks the values that cannot be expressed by the types alone.
	///
	/// # Errors
	/// - `InvalidOrder` if `chain_length < 2`
	/// - `Config` if `max_restarts` is zero
	pub fn validate(&self) -> Result<(), MarkovError> {
		if self.chain_length < 2 {
			return Err(MarkovError::InvalidOrder(self.chain_length));
		}
		if self.max_restarts == 0 {
			return Err(MarkovError::Config("max_restarts must be >= 1".to_owned()));
		}
		Ok(())
	}
}
