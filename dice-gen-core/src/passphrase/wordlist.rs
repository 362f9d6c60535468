use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PassphraseError, Result};
use crate::io;

/// Line grammar: one or more dice digits, whitespace, then the word.
///
/// Byte-oriented (`-u`): `.` accepts any byte but `\n`, `\s` is ASCII whitespace.
static LINE_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
	// Constant pattern, cannot fail to compile
	Regex::new(r"(?-u)^[1-6]+\s+(.+)$").unwrap()
});

/// Rule deciding whether a wordlist line matches a dice code.
///
/// # Variants
/// - `Contains`: the line contains the code anywhere. Compatible with the
///   historical lookup, but `123` also hits `1123 ...` or a word containing
///   `123`.
/// - `Anchored`: the line starts with the code, immediately followed by
///   whitespace.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	#[default]
	Contains,
	Anchored,
}

impl MatchMode {
	/// Tests a raw line against a dice code.
	pub fn matches(&self, line: &[u8], code: &[u8]) -> bool {
		match self {
			MatchMode::Contains => code.is_empty() || line.windows(code.len()).any(|w| w == code),
			MatchMode::Anchored => {
				line.starts_with(code) && line.get(code.len()).is_some_and(u8::is_ascii_whitespace)
			}
		}
	}
}

impl std::str::FromStr for MatchMode {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"contains" => Ok(MatchMode::Contains),
			"anchored" => Ok(MatchMode::Anchored),
			other => Err(format!("unknown match mode '{other}', expected 'contains' or 'anchored'")),
		}
	}
}

/// Extracts the word from a wordlist line.
///
/// The word is everything after the digits and the whitespace run,
/// internal whitespace included. Invalid UTF-8 is replaced lossily.
///
/// # Errors
/// `WordlistMalformed` if the line does not follow the grammar.
pub fn parse_line(line: &[u8]) -> Result<String> {
	LINE_GRAMMAR
		.captures(line)
		.and_then(|captures| captures.get(1))
		.map(|word| String::from_utf8_lossy(word.as_bytes()).into_owned())
		.ok_or_else(|| PassphraseError::WordlistMalformed(String::from_utf8_lossy(line).into_owned()))
}

/// Returns the word of the first line matching `code`.
///
/// The first match wins even when it is malformed: the scan never skips
/// past a matching line.
pub(crate) fn first_match<I, L>(lines: I, code: &str, mode: MatchMode) -> Result<String>
where
	I: IntoIterator<Item = std::io::Result<L>>,
	L: AsRef<[u8]>,
{
	for line in lines {
		let line = line?;
		let line = line.as_ref();
		if mode.matches(line, code.as_bytes()) {
			return parse_line(line).inspect_err(|_| log::warn!("wordlist line matching a dice code is malformed"));
		}
	}
	Err(PassphraseError::WordNotFound(code.to_owned()))
}

/// Resolves a dice code against any line source.
///
/// The reader is consumed up to the first matching line.
pub fn resolve_word<R: BufRead>(diced_number: &str, source: R, mode: MatchMode) -> Result<String> {
	first_match(io::read_lines(source), diced_number, mode)
}

/// Resolves dice codes against a wordlist file.
///
/// The file is reopened for every lookup and closed on every exit path;
/// nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct WordResolver {
	path: PathBuf,
	mode: MatchMode,
}

impl WordResolver {
	/// Creates a resolver for a wordlist path. The file is not touched yet.
	pub fn new<P: AsRef<Path>>(path: P, mode: MatchMode) -> Self {
		Self { path: path.as_ref().to_path_buf(), mode }
	}

	/// Path of the wordlist.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Looks up the word for a dice code.
	///
	/// # Errors
	/// - `InvalidConfiguration` if the file is missing or unreadable (nothing is read)
	/// - `WordlistMalformed` if the first matching line violates the grammar
	/// - `WordNotFound` if no line matches
	pub fn resolve(&self, diced_number: &str) -> Result<String> {
		let reader = io::open_wordlist(&self.path)?;
		resolve_word(diced_number, reader, self.mode)
	}
}
