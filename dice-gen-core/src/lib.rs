//! Diceware passphrase generation library.
//!
//! This crate provides the full diceware pipeline:
//! - Cryptographically secure dice rolls (`DiceSource`)
//! - Wordlist line parsing and dice-code lookup (`WordResolver`, `WordIndex`)
//! - Passphrase assembly with capitalization and an optional numeric prefix
//!   (`PassphraseGenerator`)
//!
//! Wordlist file handling is kept internal; only `list_wordlists`, listing
//! the named wordlists of a directory, is exposed for front-ends.

/// Dice, wordlist lookup, configuration and the high-level generator.
pub mod passphrase;

/// Typed errors shared by every stage of the pipeline.
pub mod error;

/// I/O utilities (wordlist opening, line reading, directory listing).
///
/// Not exposed, except `list_wordlists`
pub(crate) mod io;

pub use error::{PassphraseError, Result};
pub use io::list_wordlists;
pub use passphrase::config::{Config, ConfigValue};
pub use passphrase::dice::DiceSource;
pub use passphrase::generator::PassphraseGenerator;
pub use passphrase::index::WordIndex;
pub use passphrase::wordlist::{MatchMode, WordResolver};
