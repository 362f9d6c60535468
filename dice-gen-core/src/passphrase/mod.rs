//! Top-level module for the diceware pipeline.
//!
//! This module provides, leaf-first:
//! - Secure dice rolls and bounded random numbers (`DiceSource`)
//! - Wordlist line grammar and dice-code lookup (`WordResolver`)
//! - An optional in-memory copy of a wordlist (`WordIndex`)
//! - The generator options (`Config`)
//! - The passphrase assembly interface (`PassphraseGenerator`)

/// CSPRNG-backed dice and bounded numbers.
pub mod dice;

/// Line grammar, match modes and the sequential wordlist scan.
pub mod wordlist;

/// Pre-parsed wordlist kept in memory for repeated lookups.
///
/// Lookups give the same answers as a file scan in both match modes.
pub mod index;

/// Generator options and per-key patching.
pub mod config;

/// High-level interface: words, passphrases, and the public operations
/// consumed by front-ends.
pub mod generator;
