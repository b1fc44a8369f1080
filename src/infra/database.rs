use std::{str::FromStr, sync::Once};

use chrono_tz::Tz;
use log::LevelFilter;
use sqlx::{
    any::{AnyConnectOptions, AnyPoolOptions},
    AnyPool, ConnectOptions,
};

use crate::infra::{config::DatabaseConfig, error::AppError};

static INSTALL_DRIVERS: Once = Once::new();

/// Pooled engine handle bound to one driver/DSN pair. The pool itself is
/// thread-safe and meant to be shared across workers.
#[derive(Debug, Clone)]
pub struct Database {
    pub pool: AnyPool,
    /// Whether executed statements are echoed to the log.
    pub echo_sql: bool,
    /// Zone used to interpret database timestamps; doubles as the session
    /// zone for downstream queries.
    pub time_zone: Tz,
}

/// Builds the engine handle lazily; the first checkout opens the actual
/// connection. Driver/DSN validation errors are returned to the
/// orchestrator, which treats them as fatal.
pub fn init(config: &DatabaseConfig, zone: Tz) -> Result<Database, AppError> {
    INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

    check_driver(&config.driver, &config.dsn)?;

    let mut options = AnyConnectOptions::from_str(&config.dsn).map_err(AppError::DatabaseDsn)?;
    options = if config.show_sql {
        options.log_statements(LevelFilter::Info)
    } else {
        options.disable_statement_logging()
    };

    let pool = AnyPoolOptions::new().connect_lazy_with(options);

    Ok(Database {
        pool,
        echo_sql: config.show_sql,
        time_zone: zone,
    })
}

fn check_driver(driver: &str, dsn: &str) -> Result<(), AppError> {
    let scheme = dsn.split_once(':').map(|(scheme, _)| scheme).unwrap_or("");

    let matches = match driver {
        "sqlite" | "sqlite3" => scheme == "sqlite",
        "postgres" | "postgresql" => matches!(scheme, "postgres" | "postgresql"),
        "mysql" => matches!(scheme, "mysql" | "mariadb"),
        _ => {
            return Err(AppError::DatabaseDriver {
                driver: driver.to_owned(),
            })
        }
    };

    if matches {
        Ok(())
    } else {
        Err(AppError::DatabaseDsnMismatch {
            driver: driver.to_owned(),
        })
    }
}
