use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use dice_gen_core::{Config, PassphraseError, PassphraseGenerator, list_wordlists};
use serde::Deserialize;

/// Prefix of the environment variables overriding configuration options
/// (`DICE_GEN_NUMBER_OF_DICE`, `DICE_GEN_WORDLIST_DIR`, ...).
const ENV_PREFIX: &str = "DICE_GEN_";

/// Largest word count a request may ask for.
const MAX_WORDS: usize = 256;

/// Largest number of dice per word the server accepts.
const MAX_DICE: usize = 16;

/// Struct representing query parameters for the `/v1/passphrase` endpoint
#[derive(Deserialize)]
struct PassphraseParams {
	words: Option<usize>,
	separator: Option<String>,
	capitalize: Option<bool>,
	add_number: Option<bool>,
	wordlist: Option<String> // named wordlist, replaces any custom path for this request
}

#[derive(Deserialize)]
struct ConfigQuery {
	key: Option<String>,
	value: Option<String>
}

struct SharedData {
	generator: PassphraseGenerator
}

impl SharedData {
	/// Builds the shared generator and tries to keep its wordlist in memory.
	fn new(config: Config) -> Result<Self, PassphraseError> {
		let mut generator = PassphraseGenerator::new(config)?;
		preload(&mut generator);
		Ok(Self { generator })
	}
}

impl PassphraseParams {
	/// Whether the request changes options beyond the word count and separator.
	fn has_overrides(&self) -> bool {
		self.capitalize.is_some() || self.add_number.is_some() || self.wordlist.is_some()
	}

	/// Applies the request overrides to a copy of the shared configuration.
	fn apply(&self, mut config: Config) -> Result<Config, PassphraseError> {
		if let Some(capitalize) = self.capitalize {
			config.set("capitalize", capitalize.into())?;
		}
		if let Some(add_number) = self.add_number {
			config.set("add_number", add_number.into())?;
		}
		if let Some(wordlist) = &self.wordlist {
			config.set("wordlist", wordlist.as_str().into())?;
			config.set("custom_wordlist_path", "".into())?;
		}
		Ok(config)
	}
}

/// Rejects configurations the server will not generate from.
fn check_limits(config: &Config) -> Result<(), PassphraseError> {
	if config.number_of_words > MAX_WORDS {
		return Err(limit_error("number_of_words", MAX_WORDS));
	}
	if config.number_of_dice > MAX_DICE {
		return Err(limit_error("number_of_dice", MAX_DICE));
	}
	Ok(())
}

fn limit_error(key: &str, max: usize) -> PassphraseError {
	PassphraseError::InvalidOption { key: key.to_owned(), reason: format!("must be at most {max}") }
}

/// Loads the current wordlist in memory, keeping file scans on failure.
fn preload(generator: &mut PassphraseGenerator) {
	match generator.preload() {
		Ok(()) => log::info!("wordlist {} loaded", generator.get_wordlist_path().display()),
		Err(e) => log::warn!("wordlist not preloaded, lookups will read the file: {e}"),
	}
}

/// Maps a pipeline error to an HTTP response.
///
/// Bad options are client errors; everything else is reported as a server error.
fn error_response(e: PassphraseError) -> HttpResponse {
	let mut response = match e {
		PassphraseError::InvalidOption { .. } | PassphraseError::InvalidRange { .. } => HttpResponse::BadRequest(),
		_ => HttpResponse::InternalServerError(),
	};
	response.body(e.to_string())
}

/// HTTP GET endpoint `/v1/passphrase`
///
/// Generates a passphrase with the shared configuration. Overrides given in
/// the query only apply to this request.
#[get("/v1/passphrase")]
async fn get_passphrase(data: web::Data<Mutex<SharedData>>, query: web::Query<PassphraseParams>) -> impl Responder {
	if query.words.is_some_and(|words| words > MAX_WORDS) {
		return error_response(limit_error("words", MAX_WORDS));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let result = if query.has_overrides() {
		let config = shared_data.generator.config().clone();
		drop(shared_data);
		query.apply(config).and_then(|config| {
			PassphraseGenerator::new(config)?.generate_passphrase(query.words, query.separator.as_deref())
		})
	} else {
		shared_data.generator.generate_passphrase(query.words, query.separator.as_deref())
	};

	match result {
		Ok(passphrase) => HttpResponse::Ok().body(passphrase),
		Err(e) => error_response(e),
	}
}

#[get("/v1/wordlists")]
async fn get_wordlists(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let wordlist_dir = match data.lock() {
		Ok(m) => m.generator.config().wordlist_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	match list_wordlists(&wordlist_dir) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list wordlists")
	}
}

#[get("/v1/config")]
async fn get_config(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	match data.lock() {
		Ok(m) => HttpResponse::Ok().json(m.generator.config()),
		Err(_) => HttpResponse::InternalServerError().body("Generator lock failed"),
	}
}

#[put("/v1/config")]
async fn put_config(data: web::Data<Mutex<SharedData>>, query: web::Query<ConfigQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let (key, value) = match (&query.key, &query.value) {
		(Some(k), Some(v)) if !k.trim().is_empty() => (k.trim(), v.as_str()),
		_ => return HttpResponse::BadRequest().body("Missing option key or value"),
	};

	let mut candidate = shared_data.generator.config().clone();
	if let Err(e) = candidate.set(key, value.into()).and_then(|()| check_limits(&candidate)) {
		return error_response(e);
	}
	if let Err(e) = shared_data.generator.set_config(key, value) {
		return error_response(e);
	}
	if !shared_data.generator.is_preloaded() {
		preload(&mut shared_data.generator);
	}

	HttpResponse::Ok().body(format!("Option '{key}' updated"))
}

/// Registers every endpoint.
fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_passphrase)
		.service(get_wordlists)
		.service(get_config)
		.service(put_config);
}

/// Builds the startup configuration.
///
/// Starts from the bundled demo wordlist, then applies `DICE_GEN_<OPTION>`
/// environment variables on top.
fn startup_config() -> Result<Config, PassphraseError> {
	let mut config = Config {
		number_of_dice: 2,
		wordlist: "demo".to_owned(),
		separator: "-".to_owned(),
		..Config::default()
	};
	for key in Config::KEYS {
		if let Ok(value) = std::env::var(format!("{ENV_PREFIX}{}", key.to_uppercase())) {
			config.set(key, value.into())?;
		}
	}
	check_limits(&config)?;
	Ok(config)
}

/// Main entry point for the server.
///
/// Builds the shared generator, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to `DICE_GEN_BIND`, 127.0.0.1:5000 by default.
/// - Log verbosity follows `RUST_LOG`, `info` by default.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = startup_config().map_err(std::io::Error::other)?;
	let shared_data = SharedData::new(config).map_err(std::io::Error::other)?;
	let shared_generator = web::Data::new(Mutex::new(shared_data));

	let bind = std::env::var(format!("{ENV_PREFIX}BIND")).unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	log::info!("listening on {bind}");

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_generator.clone())
			.configure(configure)
	})
		.bind(bind)?
		.run()
		.await
}
