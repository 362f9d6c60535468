use dice_gen_core::{Config, PassphraseError, PassphraseGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The demo wordlist maps two dice per word
    // Use `wordlist` + `wordlist_dir` for named lists, or a custom path
    let config = Config {
        number_of_dice: 2,
        custom_wordlist_path: Some("./wordlists/demo.txt".into()),
        number_of_words: 4,
        separator: "-".to_owned(),
        ..Config::default()
    };
    let mut app = PassphraseGenerator::new(config)?;

    println!("Wordlist: {}", app.get_wordlist_path().display());
    println!("Dice per word: {}", app.get_number_of_dice());

    // A single die, then a full dice code and its word
    println!("Rolled a {}", app.roll_die()?);
    let code = app.generate_diced_number()?;
    println!("Dice code {} -> {}", code, app.get_word(&code)?);

    // Lines can be parsed on their own
    println!("Parsed line: {}", app.resolve_word("23456 apple")?);

    // Default word count and separator
    println!("Passphrase: {}", app.generate_passphrase(None, None)?);

    // Explicit count and separator override the configuration
    println!("Passphrase: {}", app.generate_passphrase(Some(6), Some(" "))?);

    // The numeric prefix always uses the configured separator
    app.set_config("capitalize", true)?;
    app.set_config("add_number", true)?;
    println!("Passphrase: {}", app.generate_passphrase(None, Some("."))?);

    // Keep the wordlist in memory for repeated generations
    app.preload()?;
    for i in 0..5 {
        println!("Generated passphrase {}: {}", i + 1, app.generate_passphrase(None, None)?);
    }

    // Invalid options are rejected and leave the configuration untouched
    match app.set_config("number_of_dice", 0usize) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }

    // A missing wordlist fails before any die is rolled
    app.set_config("custom_wordlist_path", "./wordlists/missing.txt")?;
    match app.generate_passphrase(None, None) {
        Err(PassphraseError::InvalidConfiguration(path)) => println!("No wordlist at {}", path.display()),
        other => println!("Should not happen: {other:?}"),
    }

    Ok(())
}
