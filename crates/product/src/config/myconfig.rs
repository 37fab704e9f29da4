use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub bus_capacity: usize,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let db_min_conn = std::env::var("DB_MIN_CONN")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let db_max_conn = std::env::var("DB_MAX_CONN")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        let bus_capacity = std::env::var("BUS_CAPACITY")
            .unwrap_or_else(|_| "64".to_string())
            .parse::<usize>()
            .context("BUS_CAPACITY must be a valid usize integer")?;

        Ok(Self {
            database_url,
            run_migrations,
            db_min_conn,
            db_max_conn,
            bus_capacity,
        })
    }
}
