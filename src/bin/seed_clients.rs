//! Populates the client directory with sample employers.
//!
//! Usage: `seed_clients [--force] [CSV_PATH]`. Without a path the built-in
//! sample list is used. Without `--force` an already populated directory is
//! left untouched.

use std::env;
use std::fs::File;

use dotenvy::dotenv;

use client_directory::db::{establish_connection_pool, run_migrations};
use client_directory::models::config::ServerConfig;
use client_directory::repository::DieselRepository;
use client_directory::services::seed::{
    SeedOutcome, parse_clients_csv, sample_client_names, seed_clients,
};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut force = false;
    let mut csv_path = None;
    for arg in env::args().skip(1) {
        if arg == "--force" {
            force = true;
        } else {
            csv_path = Some(arg);
        }
    }

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let names = match &csv_path {
        Some(path) => File::open(path)
            .map_err(|e| format!("Cannot open {path}: {e}"))
            .and_then(|file| parse_clients_csv(file).map_err(|e| e.to_string())),
        None => sample_client_names().map_err(|e| e.to_string()),
    };
    let names = match names {
        Ok(names) => names,
        Err(err) => {
            log::error!("Failed to read client names: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to migrate database: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    match seed_clients(&repo, &names, force) {
        Ok(SeedOutcome::Inserted(count)) => log::info!("Inserted {count} clients"),
        Ok(SeedOutcome::Skipped { existing }) => {
            log::info!("Skipped seeding, {existing} clients already present (use --force)")
        }
        Err(err) => {
            log::error!("Seeding failed: {err}");
            std::process::exit(1);
        }
    }
}
