use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{PassphraseError, Result};

/// Extension used by named wordlists (`<dir>/<name>.txt`).
pub const WORDLIST_EXTENSION: &str = "txt";

/// Opens a wordlist for sequential reading.
///
/// The file must exist, be a regular file and be openable for reading;
/// otherwise `InvalidConfiguration` is returned before anything is read.
/// The handle is released when the returned reader is dropped.
pub(crate) fn open_wordlist<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
	let path = path.as_ref();
	let invalid = || PassphraseError::InvalidConfiguration(path.to_path_buf());

	if !path.is_file() {
		return Err(invalid());
	}
	let file = File::open(path).map_err(|_| invalid())?;
	log::debug!("opened wordlist {}", path.display());
	Ok(BufReader::new(file))
}

/// Checks that a wordlist can be opened, without reading it.
pub(crate) fn check_readable<P: AsRef<Path>>(path: P) -> Result<()> {
	open_wordlist(path).map(drop)
}

/// Iterates over the raw lines of a reader.
///
/// - Splits on `\n`, strips a trailing `\r`
/// - No encoding conversion: lines are returned as bytes
pub(crate) fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
	reader.split(b'\n').map(|line| {
		line.map(|mut bytes| {
			if bytes.last() == Some(&b'\r') {
				bytes.pop();
			}
			bytes
		})
	})
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./wordlists/eff_large.txt"` → `"eff_large"`
/// - `"eff_large.txt"` → `"eff_large"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists the named wordlists available in a directory.
///
/// Returns names only (no directory, no `.txt` extension), sorted.
/// Subdirectories are ignored.
pub fn list_wordlists<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(WORDLIST_EXTENSION)) {
			names.push(get_filename(&path)?);
		}
	}

	names.sort();
	Ok(names)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{Cursor, Write};

	#[test]
	fn read_lines_strips_line_endings() {
		let lines: Vec<Vec<u8>> = read_lines(Cursor::new("11 a\r\n12 b\n13 c"))
			.collect::<io::Result<_>>()
			.unwrap();
		assert_eq!(lines, vec![b"11 a".to_vec(), b"12 b".to_vec(), b"13 c".to_vec()]);
	}

	#[test]
	fn read_lines_keeps_invalid_utf8() {
		let lines: Vec<Vec<u8>> = read_lines(Cursor::new(vec![b'1', b' ', 0xff, b'\n']))
			.collect::<io::Result<_>>()
			.unwrap();
		assert_eq!(lines, vec![vec![b'1', b' ', 0xff]]);
	}

	#[test]
	fn open_rejects_missing_file_and_directory() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("missing.txt");

		assert!(matches!(
			open_wordlist(&missing),
			Err(PassphraseError::InvalidConfiguration(p)) if p == missing
		));
		assert!(matches!(
			check_readable(dir.path()),
			Err(PassphraseError::InvalidConfiguration(_))
		));
	}

	#[test]
	fn list_wordlists_returns_sorted_names() {
		let dir = tempfile::tempdir().unwrap();
		for name in ["b.txt", "a.txt", "notes.md"] {
			let mut file = File::create(dir.path().join(name)).unwrap();
			writeln!(file, "11 word").unwrap();
		}
		fs::create_dir(dir.path().join("nested.txt")).unwrap();

		assert_eq!(list_wordlists(dir.path()).unwrap(), vec!["a", "b"]);
	}

	#[test]
	fn get_filename_strips_extension() {
		assert_eq!(get_filename("./wordlists/eff_large.txt").unwrap(), "eff_large");
		assert_eq!(get_filename("eff_large").unwrap(), "eff_large");
	}
}
