//! Fill a catalog database with sample categories and items.
//!
//! Usage: `populatedb [DATABASE_URL]`. Without an argument the URL is taken
//! from `APP_DATABASE_URL`, then `DATABASE_URL`.

use std::error::Error;

use inventory_catalog::db::{establish_connection_pool, run_migrations};
use inventory_catalog::repository::DieselRepository;
use inventory_catalog::seed::populate;

fn database_url() -> Option<String> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("APP_DATABASE_URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(database_url) = database_url() else {
        log::error!("No database url given; pass it as the first argument or set APP_DATABASE_URL");
        return Err("missing database url".into());
    };
    log::info!("Populating {database_url}");

    let pool = establish_connection_pool(&database_url)?;
    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;
    drop(conn);

    let report = populate(&DieselRepository::new(pool))?;
    log::info!(
        "Done: {} categories added, {} reused, {} items added",
        report.categories_created,
        report.categories_reused,
        report.items_created
    );
    Ok(())
}
