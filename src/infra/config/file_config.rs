use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, DatabaseConfig, MainConfig, RedisConfig, RunMode};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub main: Option<FileMainConfig>,
    pub redis: Option<FileRedisConfig>,
    pub database: Option<FileDatabaseConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(main) = self.main {
            main.merge_into(&mut config.main);
        }

        if let Some(redis) = self.redis {
            redis.merge_into(&mut config.redis);
        }

        if let Some(database) = self.database {
            database.merge_into(&mut config.database);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileMainConfig {
    pub mode: Option<RunMode>,
    pub time_zone: Option<String>,
    pub log_level: Option<String>,
    pub log_path: Option<PathBuf>,
}

impl FileMainConfig {
    fn merge_into(self, config: &mut MainConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        if let Some(time_zone) = self.time_zone {
            config.time_zone = time_zone;
        }

        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }

        if let Some(log_path) = self.log_path {
            config.log_path = Some(log_path);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileRedisConfig {
    pub host: Option<String>,
    pub password: Option<String>,
    pub db: Option<i64>,
}

impl FileRedisConfig {
    fn merge_into(self, config: &mut RedisConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }

        if let Some(password) = self.password {
            config.password = password;
        }

        if let Some(db) = self.db {
            config.db = db;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDatabaseConfig {
    pub driver: Option<String>,
    pub dsn: Option<String>,
    pub show_sql: Option<bool>,
}

impl FileDatabaseConfig {
    fn merge_into(self, config: &mut DatabaseConfig) {
        if let Some(driver) = self.driver {
            config.driver = driver;
        }

        if let Some(dsn) = self.dsn {
            config.dsn = dsn;
        }

        if let Some(show_sql) = self.show_sql {
            config.show_sql = show_sql;
        }
    }
}
