#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use rand::{TryCryptoRng, TryRngCore};

/// Generator replaying a fixed list of 32-bit draws, failing once exhausted.
///
/// A draw `v` gives the die face `1 + v % 6` and the number `1 + v % 999`.
#[derive(Debug, Default)]
pub struct ScriptedRng {
	draws: VecDeque<u32>,
}

impl ScriptedRng {
	pub fn new(draws: &[u32]) -> Self {
		Self { draws: draws.iter().copied().collect() }
	}

	/// Draws producing the given dice faces, in order.
	pub fn faces(code: &str) -> Vec<u32> {
		code.bytes().map(|d| u32::from(d - b'1')).collect()
	}
}

impl TryRngCore for ScriptedRng {
	type Error = std::io::Error;

	fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
		self.draws.pop_front().ok_or_else(|| std::io::Error::other("script exhausted"))
	}

	fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
		let high = u64::from(self.try_next_u32()?);
		Ok(high << 32 | u64::from(self.try_next_u32()?))
	}

	fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
		for chunk in dst.chunks_mut(4) {
			let bytes = self.try_next_u32()?.to_le_bytes();
			chunk.copy_from_slice(&bytes[..chunk.len()]);
		}
		Ok(())
	}
}

impl TryCryptoRng for ScriptedRng {}

/// Writes a wordlist file and returns its path.
pub fn write_wordlist(dir: &Path, name: &str, contents: &str) -> PathBuf {
	let path = dir.join(name);
	fs::write(&path, contents).unwrap();
	path
}

/// The demo wordlist shipped with the workspace (two dice per word).
pub fn demo_wordlist() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("../wordlists/demo.txt")
}
