mod app_config;
mod file_config;
mod loader;

pub use app_config::{AppConfig, DatabaseConfig, MainConfig, RedisConfig, RunMode};
pub use loader::load;
