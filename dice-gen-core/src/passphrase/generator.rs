use std::path::PathBuf;

use rand::TryCryptoRng;
use rand::rngs::OsRng;

use crate::error::Result;
use crate::io;
use super::config::{Config, ConfigValue};
use super::dice::{DiceSource, PREALLOC_LIMIT};
use super::index::WordIndex;
use super::wordlist::{self, WordResolver};

/// Bounds of the optional numeric prefix.
pub const NUMBER_MIN: u32 = 1;
pub const NUMBER_MAX: u32 = 999;

/// High-level diceware passphrase generator.
///
/// # Responsibilities
/// - Own the configuration and patch it per key
/// - Roll dice codes and resolve them against the configured wordlist
/// - Assemble passphrases (capitalization, separator, numeric prefix)
///
/// Every generation call is independent; the only state carried between
/// calls is the configuration and an optional preloaded `WordIndex`.
/// A generator is single-owner: share it behind a lock if needed.
#[derive(Debug)]
pub struct PassphraseGenerator<R: TryCryptoRng = OsRng> {
	config: Config,
	dice: DiceSource<R>,
	index: Option<WordIndex>,
}

impl PassphraseGenerator<OsRng> {
	/// Creates a generator backed by the operating system CSPRNG.
	///
	/// # Errors
	/// `InvalidOption` if the configuration breaks an invariant.
	/// The wordlist is not checked until it is used.
	pub fn new(config: Config) -> Result<Self> {
		Self::with_rng(config, OsRng)
	}
}

impl<R: TryCryptoRng> PassphraseGenerator<R> {
	/// Creates a generator drawing from the given secure generator.
	pub fn with_rng(config: Config, rng: R) -> Result<Self> {
		config.validate()?;
		Ok(Self { config, dice: DiceSource::with_rng(rng), index: None })
	}

	/// Current configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Patches one configuration option (last write wins).
	///
	/// Changing which wordlist is used drops a preloaded index.
	pub fn set_config(&mut self, key: &str, value: impl Into<ConfigValue>) -> Result<()> {
		self.config.set(key, value.into())?;
		if matches!(key, "wordlist" | "custom_wordlist_path" | "wordlist_dir") && self.index.take().is_some() {
			log::debug!("wordlist option '{key}' changed, preloaded index dropped");
		}
		Ok(())
	}

	/// Loads the current wordlist into memory for the following lookups.
	///
	/// # Errors
	/// `InvalidConfiguration` if the wordlist is missing or unreadable.
	pub fn preload(&mut self) -> Result<()> {
		self.index = Some(WordIndex::load(self.get_wordlist_path())?);
		Ok(())
	}

	/// Whether lookups are served from a preloaded index.
	pub fn is_preloaded(&self) -> bool {
		self.index.is_some()
	}

	/// Dice rolled per word.
	pub fn get_number_of_dice(&self) -> usize {
		self.config.number_of_dice
	}

	/// Wordlist file in use (custom path first, then the named wordlist).
	pub fn get_wordlist_path(&self) -> PathBuf {
		self.config.wordlist_path()
	}

	/// Rolls a single die.
	pub fn roll_die(&mut self) -> Result<u8> {
		self.dice.roll_die()
	}

	/// Rolls `number_of_dice` dice into a dice code.
	pub fn generate_diced_number(&mut self) -> Result<String> {
		self.dice.generate_diced_number(self.config.number_of_dice)
	}

	/// Extracts the word from a single wordlist line.
	pub fn resolve_word(&self, line: &str) -> Result<String> {
		wordlist::parse_line(line.as_bytes())
	}

	/// Looks up the word for a dice code in the configured wordlist.
	///
	/// Served from the preloaded index when present, otherwise by a file scan.
	pub fn get_word(&self, diced_number: &str) -> Result<String> {
		match &self.index {
			Some(index) => index.get(diced_number, self.config.match_mode),
			None => WordResolver::new(self.get_wordlist_path(), self.config.match_mode).resolve(diced_number),
		}
	}

	/// Generates `count` words.
	///
	/// The wordlist is checked before any die is rolled, so a bad path
	/// consumes no entropy. Words may repeat.
	///
	/// # Errors
	/// The first error of any word aborts the whole call.
	pub fn generate_words(&mut self, count: usize) -> Result<Vec<String>> {
		if self.index.is_none() {
			io::check_readable(self.get_wordlist_path())?;
		}

		let mut words = Vec::with_capacity(count.min(PREALLOC_LIMIT));
		for _ in 0..count {
			let diced_number = self.generate_diced_number()?;
			let word = self.get_word(&diced_number)?;
			words.push(if self.config.capitalize { capitalize(&word) } else { word });
		}

		log::debug!("generated {count} words");
		Ok(words)
	}

	/// Generates a passphrase.
	///
	/// # Parameters
	/// - `count`: number of words, `number_of_words` when `None`
	/// - `separator`: joins the words, the configured separator when `None`
	///
	/// # Behavior
	/// - With `add_number`, a number in `1..=999` is drawn after the words and
	///   prepended with the *configured* separator, whatever `separator` is.
	pub fn generate_passphrase(&mut self, count: Option<usize>, separator: Option<&str>) -> Result<String> {
		let count = count.unwrap_or(self.config.number_of_words);
		let words = self.generate_words(count)?;
		let passphrase = words.join(separator.unwrap_or(&self.config.separator));

		if !self.config.add_number {
			return Ok(passphrase);
		}

		let number = self.dice.roll_number(NUMBER_MIN, NUMBER_MAX)?;
		Ok(format!("{number}{}{passphrase}", self.config.separator))
	}
}

/// Uppercases the first character, leaving the rest untouched.
pub(crate) fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn capitalize_first_character_only() {
		assert_eq!(capitalize("apple"), "Apple");
		assert_eq!(capitalize("aPPLE pie"), "APPLE pie");
		assert_eq!(capitalize("éclair"), "Éclair");
		assert_eq!(capitalize("ßtraße"), "SStraße");
		assert_eq!(capitalize("42"), "42");
		assert_eq!(capitalize(""), "");
	}

	#[test]
	fn new_rejects_invalid_config() {
		let config = Config { number_of_dice: 0, ..Config::default() };
		assert!(PassphraseGenerator::new(config).is_err());
	}

	#[test]
	fn resolve_word_parses_one_line() {
		let generator = PassphraseGenerator::new(Config::default()).unwrap();
		assert_eq!(generator.resolve_word("23456 apple").unwrap(), "apple");
		assert!(generator.resolve_word("23456").is_err());
	}

	#[test]
	fn accessors_follow_config() {
		let mut generator = PassphraseGenerator::new(Config::default()).unwrap();
		assert_eq!(generator.get_number_of_dice(), 5);
		assert_eq!(generator.get_wordlist_path(), PathBuf::from("./wordlists/eff_large.txt"));

		generator.set_config("number_of_dice", 3usize).unwrap();
		generator.set_config("custom_wordlist_path", "/srv/words.txt").unwrap();
		assert_eq!(generator.get_number_of_dice(), 3);
		assert_eq!(generator.get_wordlist_path(), PathBuf::from("/srv/words.txt"));
		assert_eq!(generator.generate_diced_number().unwrap().len(), 3);
	}
}
