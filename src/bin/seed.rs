//! Loads the demo dataset into the database at `DATABASE_URL`.

use dotenvy::dotenv;
use trade_desk::infrastructure::seed_demo_data;
use trade_desk::{create_pool, run_migrations, Config};

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().unwrap_or_else(|e| {
        log::error!("{e}");
        std::process::exit(1);
    });

    let pool = create_pool(&config.database_url, 1).expect("Failed to create database connection pool");
    run_migrations(&pool).expect("Failed to run database migrations");

    match seed_demo_data(&pool) {
        Ok(Some(_)) => {}
        Ok(None) => log::warn!("Nothing seeded"),
        Err(e) => {
            log::error!("Seeding failed: {e}");
            std::process::exit(1);
        }
    }
}
