use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{PassphraseError, Result};
use crate::io;
use super::wordlist::{MatchMode, first_match, parse_line};

/// In-memory copy of a wordlist.
///
/// # Responsibilities
/// - Keep every raw line, in file order
/// - Map each leading code (text before the first whitespace) to its first line
/// - Answer lookups exactly like a sequential file scan would
///
/// # Invariants
/// - `leading[code]` is the smallest line index whose leading code is `code`
/// - Lines are never modified after loading
#[derive(Clone, Debug)]
pub struct WordIndex {
	/// Wordlist the lines were read from.
	path: PathBuf,

	/// Raw lines, line endings stripped.
	lines: Vec<Vec<u8>>,

	/// Leading code → index of its first line.
	leading: HashMap<Vec<u8>, usize>,
}

impl WordIndex {
	/// Reads a whole wordlist file into memory.
	///
	/// # Errors
	/// - `InvalidConfiguration` if the file is missing or unreadable
	/// - `Io` if reading fails midway
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let reader = io::open_wordlist(path)?;
		let index = Self::from_reader(path, reader)?;
		log::debug!("indexed {} wordlist lines from {}", index.len(), path.display());
		Ok(index)
	}

	/// Builds an index from any line source; `path` is only kept for reference.
	pub fn from_reader<P: AsRef<Path>, R: BufRead>(path: P, reader: R) -> Result<Self> {
		let lines = io::read_lines(reader).collect::<std::io::Result<Vec<_>>>()?;

		let mut leading = HashMap::new();
		for (i, line) in lines.iter().enumerate() {
			// Lines without a whitespace can never match in anchored mode
			if let Some(end) = line.iter().position(u8::is_ascii_whitespace) {
				leading.entry(line[..end].to_vec()).or_insert(i);
			}
		}

		Ok(Self { path: path.as_ref().to_path_buf(), lines, leading })
	}

	/// Path of the wordlist this index was read from.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Number of lines held.
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Whether the wordlist had no lines.
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Looks up the word for a dice code.
	///
	/// Same errors as a file scan, minus the I/O ones.
	pub fn get(&self, diced_number: &str, mode: MatchMode) -> Result<String> {
		let code = diced_number.as_bytes();

		match mode {
			MatchMode::Anchored if !code.is_empty() && !code.iter().any(u8::is_ascii_whitespace) => {
				match self.leading.get(code) {
					Some(&i) => parse_line(&self.lines[i]),
					None => Err(PassphraseError::WordNotFound(diced_number.to_owned())),
				}
			}
			_ => first_match(self.lines.iter().map(Ok::<_, std::io::Error>), diced_number, mode),
		}
	}
}
