use std::path::PathBuf;

use thiserror::Error;

/// Every failure the passphrase pipeline can surface.
///
/// No variant is recovered from internally: the first error raised while
/// rolling dice or resolving a word aborts the whole generation call.
#[derive(Debug, Error)]
pub enum PassphraseError {
	/// The secure random source could not produce a value.
	#[error("secure random source failed: {0}")]
	Entropy(String),

	/// The wordlist does not exist, is not a regular file, or cannot be opened.
	#[error("wordlist is missing or unreadable: {}", .0.display())]
	InvalidConfiguration(PathBuf),

	/// The first line matching a dice code does not follow `<digits> <word>`.
	#[error("malformed wordlist line: {0:?}")]
	WordlistMalformed(String),

	/// The whole wordlist was scanned without a line matching the dice code.
	#[error("no word found for dice code {0}")]
	WordNotFound(String),

	/// A configuration option is unknown or holds an unusable value.
	#[error("invalid value for option '{key}': {reason}")]
	InvalidOption { key: String, reason: String },

	/// A random range whose lower bound exceeds its upper bound.
	#[error("invalid random range {min}..={max}")]
	InvalidRange { min: u32, max: u32 },

	/// Reading failed after the wordlist was opened.
	#[error("failed to read wordlist: {0}")]
	Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PassphraseError>;
