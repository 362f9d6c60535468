use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PassphraseError, Result};
use crate::io::WORDLIST_EXTENSION;
use super::wordlist::MatchMode;

/// Options driving passphrase generation.
///
/// Owned by a single generator and patched per key with `set`
/// (last write wins).
///
/// When deserialized, every option but `custom_wordlist_path`,
/// `wordlist_dir` and `match_mode` must be present.
///
/// # Invariants
/// - `number_of_dice >= 1`
/// - A non-empty `custom_wordlist_path` always takes precedence over `wordlist`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
	/// Dice rolled per word; also the length of every dice code.
	pub number_of_dice: usize,

	/// Named wordlist, looked up as `<wordlist_dir>/<wordlist>.txt`.
	pub wordlist: String,

	/// Explicit wordlist file overriding `wordlist` when non-empty.
	#[serde(default)]
	pub custom_wordlist_path: Option<PathBuf>,

	/// Uppercase the first character of every word.
	pub capitalize: bool,

	/// Word count used when a call does not give one.
	pub number_of_words: usize,

	/// Joins words, and the numeric prefix to the words.
	pub separator: String,

	/// Prepend a random number in `1..=999`.
	pub add_number: bool,

	/// Directory holding the named wordlists.
	#[serde(default = "default_wordlist_dir")]
	pub wordlist_dir: PathBuf,

	/// How a wordlist line is matched against a dice code.
	#[serde(default)]
	pub match_mode: MatchMode,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			number_of_dice: 5,
			wordlist: "eff_large".to_owned(),
			custom_wordlist_path: None,
			capitalize: false,
			number_of_words: 6,
			separator: " ".to_owned(),
			add_number: false,
			wordlist_dir: default_wordlist_dir(),
			match_mode: MatchMode::Contains,
		}
	}
}

/// A value given to `Config::set`.
///
/// Text is coerced for numeric and boolean options, so values coming
/// from query strings or environment variables can be used as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
	Int(usize),
	Bool(bool),
	Text(String),
}

impl From<usize> for ConfigValue {
	fn from(value: usize) -> Self {
		ConfigValue::Int(value)
	}
}

impl From<bool> for ConfigValue {
	fn from(value: bool) -> Self {
		ConfigValue::Bool(value)
	}
}

impl From<&str> for ConfigValue {
	fn from(value: &str) -> Self {
		ConfigValue::Text(value.to_owned())
	}
}

impl From<String> for ConfigValue {
	fn from(value: String) -> Self {
		ConfigValue::Text(value)
	}
}

impl From<PathBuf> for ConfigValue {
	fn from(value: PathBuf) -> Self {
		ConfigValue::Text(value.to_string_lossy().into_owned())
	}
}

impl Config {
	/// Every option accepted by `set`.
	pub const KEYS: [&'static str; 9] = [
		"number_of_dice",
		"wordlist",
		"custom_wordlist_path",
		"capitalize",
		"number_of_words",
		"separator",
		"add_number",
		"wordlist_dir",
		"match_mode",
	];

	/// Returns the wordlist file in use.
	///
	/// `custom_wordlist_path` when set and non-empty, otherwise
	/// `<wordlist_dir>/<wordlist>.txt`.
	pub fn wordlist_path(&self) -> PathBuf {
		match &self.custom_wordlist_path {
			Some(path) if !path.as_os_str().is_empty() => path.clone(),
			_ => self.wordlist_dir.join(format!("{}.{}", self.wordlist, WORDLIST_EXTENSION)),
		}
	}

	/// Checks the invariants of a whole configuration.
	///
	/// # Errors
	/// `InvalidOption` if `number_of_dice` is zero.
	pub fn validate(&self) -> Result<()> {
		if self.number_of_dice == 0 {
			return Err(invalid("number_of_dice", "must be at least 1"));
		}
		Ok(())
	}

	/// Sets a single option.
	///
	/// An empty `custom_wordlist_path` clears it.
	///
	/// # Errors
	/// `InvalidOption` if the key is unknown or the value has the wrong type
	/// or breaks an invariant. The configuration is left unchanged.
	pub fn set(&mut self, key: &str, value: ConfigValue) -> Result<()> {
		match key {
			"number_of_dice" => {
				let n = as_usize(key, value)?;
				if n == 0 {
					return Err(invalid(key, "must be at least 1"));
				}
				self.number_of_dice = n;
			}
			"number_of_words" => self.number_of_words = as_usize(key, value)?,
			"capitalize" => self.capitalize = as_bool(key, value)?,
			"add_number" => self.add_number = as_bool(key, value)?,
			"wordlist" => self.wordlist = as_text(key, value)?,
			"separator" => self.separator = as_text(key, value)?,
			"wordlist_dir" => self.wordlist_dir = PathBuf::from(as_text(key, value)?),
			"custom_wordlist_path" => {
				let path = as_text(key, value)?;
				self.custom_wordlist_path = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
			}
			"match_mode" => {
				self.match_mode = as_text(key, value)?
					.parse::<MatchMode>()
					.map_err(|reason| invalid(key, reason))?;
			}
			_ => return Err(invalid(key, "unknown option")),
		}
		Ok(())
	}
}

fn default_wordlist_dir() -> PathBuf {
	PathBuf::from("./wordlists")
}

fn invalid(key: &str, reason: impl Into<String>) -> PassphraseError {
	PassphraseError::InvalidOption { key: key.to_owned(), reason: reason.into() }
}

fn as_usize(key: &str, value: ConfigValue) -> Result<usize> {
	match value {
		ConfigValue::Int(n) => Ok(n),
		ConfigValue::Text(s) => s
			.trim()
			.parse()
			.map_err(|_| invalid(key, format!("expected a non-negative integer, got '{s}'"))),
		ConfigValue::Bool(_) => Err(invalid(key, "expected a non-negative integer, got a boolean")),
	}
}

fn as_bool(key: &str, value: ConfigValue) -> Result<bool> {
	match value {
		ConfigValue::Bool(b) => Ok(b),
		ConfigValue::Text(s) => match s.trim().to_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Ok(true),
			"false" | "0" | "no" | "off" => Ok(false),
			_ => Err(invalid(key, format!("expected a boolean, got '{s}'"))),
		},
		ConfigValue::Int(_) => Err(invalid(key, "expected a boolean, got an integer")),
	}
}

fn as_text(key: &str, value: ConfigValue) -> Result<String> {
	match value {
		ConfigValue::Text(s) => Ok(s),
		_ => Err(invalid(key, "expected a string")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn custom_path_takes_precedence() {
		let mut config = Config { wordlist: "eff_short".to_owned(), ..Config::default() };
		assert_eq!(config.wordlist_path(), PathBuf::from("./wordlists/eff_short.txt"));

		config.custom_wordlist_path = Some(PathBuf::from("/tmp/list.txt"));
		assert_eq!(config.wordlist_path(), PathBuf::from("/tmp/list.txt"));

		config.custom_wordlist_path = Some(PathBuf::new());
		assert_eq!(config.wordlist_path(), PathBuf::from("./wordlists/eff_short.txt"));
	}

	#[test]
	fn set_accepts_typed_and_textual_values() {
		let mut config = Config::default();
		config.set("number_of_dice", 4usize.into()).unwrap();
		config.set("number_of_words", "8".into()).unwrap();
		config.set("capitalize", true.into()).unwrap();
		config.set("add_number", "yes".into()).unwrap();
		config.set("separator", "-".into()).unwrap();
		config.set("match_mode", "anchored".into()).unwrap();

		assert_eq!(config.number_of_dice, 4);
		assert_eq!(config.number_of_words, 8);
		assert!(config.capitalize);
		assert!(config.add_number);
		assert_eq!(config.separator, "-");
		assert_eq!(config.match_mode, MatchMode::Anchored);
	}

	#[test]
	fn set_empty_custom_path_clears_it() {
		let mut config = Config::default();
		config.set("custom_wordlist_path", "/tmp/list.txt".into()).unwrap();
		assert_eq!(config.custom_wordlist_path, Some(PathBuf::from("/tmp/list.txt")));
		config.set("custom_wordlist_path", "".into()).unwrap();
		assert_eq!(config.custom_wordlist_path, None);
	}

	#[test]
	fn set_rejects_bad_values_and_keeps_config() {
		let mut config = Config::default();
		let before = config.clone();

		for (key, value) in [
			("number_of_dice", ConfigValue::Int(0)),
			("number_of_dice", ConfigValue::Text("five".to_owned())),
			("capitalize", ConfigValue::Int(1)),
			("separator", ConfigValue::Bool(true)),
			("match_mode", ConfigValue::Text("strict".to_owned())),
			("colour", ConfigValue::Bool(true)),
		] {
			assert!(
				matches!(config.set(key, value), Err(PassphraseError::InvalidOption { key: k, .. }) if k == key),
				"{key} should be rejected"
			);
		}
		assert_eq!(config, before);
	}

	#[test]
	fn every_key_is_settable() {
		let mut config = Config::default();
		for key in Config::KEYS {
			let value = match key {
				"number_of_dice" | "number_of_words" => ConfigValue::Text("3".to_owned()),
				"capitalize" | "add_number" => ConfigValue::Text("true".to_owned()),
				"match_mode" => ConfigValue::Text("contains".to_owned()),
				_ => ConfigValue::Text("value".to_owned()),
			};
			config.set(key, value).unwrap();
		}
	}

	#[test]
	fn deserialize_requires_core_options() {
		let full = r#"{
			"number_of_dice": 5,
			"wordlist": "eff_large",
			"capitalize": false,
			"number_of_words": 4,
			"separator": "-",
			"add_number": true
		}"#;
		let config: Config = serde_json::from_str(full).unwrap();
		assert_eq!(config.number_of_words, 4);
		assert_eq!(config.custom_wordlist_path, None);
		assert_eq!(config.wordlist_dir, PathBuf::from("./wordlists"));
		assert_eq!(config.match_mode, MatchMode::Contains);

		let missing_separator = r#"{
			"number_of_dice": 5,
			"wordlist": "eff_large",
			"capitalize": false,
			"number_of_words": 4,
			"add_number": true
		}"#;
		let err = serde_json::from_str::<Config>(missing_separator).unwrap_err();
		assert!(err.to_string().contains("separator"));
	}

	#[test]
	fn validate_rejects_zero_dice() {
		let config = Config { number_of_dice: 0, ..Config::default() };
		assert!(config.validate().is_err());
		assert!(Config::default().validate().is_ok());
	}
}
