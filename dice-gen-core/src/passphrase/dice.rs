use rand::TryCryptoRng;
use rand::rngs::OsRng;

use crate::error::{PassphraseError, Result};

/// Number of faces of a die.
pub const DIE_FACES: u32 = 6;

/// Upper bound on buffers reserved ahead of generation.
pub(crate) const PREALLOC_LIMIT: usize = 1024;

/// Source of dice rolls and bounded random numbers.
///
/// Only cryptographically secure generators are accepted (`TryCryptoRng`);
/// the default is the operating system generator. Failures of the
/// generator are surfaced as `PassphraseError::Entropy`, never retried.
#[derive(Debug)]
pub struct DiceSource<R: TryCryptoRng = OsRng> {
	rng: R,
}

impl DiceSource<OsRng> {
	/// Creates a source backed by the operating system CSPRNG.
	pub fn new() -> Self {
		Self { rng: OsRng }
	}
}

impl Default for DiceSource<OsRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: TryCryptoRng> DiceSource<R> {
	/// Creates a source backed by the given secure generator.
	pub fn with_rng(rng: R) -> Self {
		Self { rng }
	}

	/// Rolls one die, uniformly in `1..=6`.
	pub fn roll_die(&mut self) -> Result<u8> {
		// Always <= 6
		self.roll_number(1, DIE_FACES).map(|face| face as u8)
	}

	/// Draws an integer uniformly in `min..=max`.
	///
	/// Uses rejection sampling over raw 32-bit draws, so the result carries
	/// no modulo bias.
	///
	/// # Errors
	/// - `InvalidRange` if `min > max`
	/// - `Entropy` if the generator fails
	pub fn roll_number(&mut self, min: u32, max: u32) -> Result<u32> {
		if min > max {
			return Err(PassphraseError::InvalidRange { min, max });
		}

		let span = u64::from(max - min) + 1;
		let zone = (1u64 << 32) - (1u64 << 32) % span;

		loop {
			let draw = self
				.rng
				.try_next_u32()
				.map_err(|e| PassphraseError::Entropy(e.to_string()))?;
			let draw = u64::from(draw);
			if draw < zone {
				// draw % span <= max - min
				return Ok(min + (draw % span) as u32);
			}
		}
	}

	/// Builds a dice code by rolling `number_of_dice` dice.
	///
	/// Digits are concatenated in roll order.
	pub fn generate_diced_number(&mut self, number_of_dice: usize) -> Result<String> {
		// Capacity is only a hint, never sized from an unchecked count
		let mut code = String::with_capacity(number_of_dice.min(PREALLOC_LIMIT));
		for _ in 0..number_of_dice {
			code.push(char::from(b'0' + self.roll_die()?));
		}
		Ok(code)
	}
}
