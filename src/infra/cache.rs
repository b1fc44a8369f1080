use std::time::Duration;

use bb8_redis::{
    bb8,
    redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo},
    RedisConnectionManager,
};

use crate::infra::{config::RedisConfig, error::AppError};

pub type CachePool = bb8::Pool<RedisConnectionManager>;

// Pool policy is fixed, not configurable; only address, password, and
// database index come from configuration.
const POOL_SIZE: u32 = 15;
const MIN_IDLE: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_PORT: u16 = 6379;

/// Builds the pooled cache client without touching the network:
/// connections are established on first checkout, so connectivity errors
/// surface to whichever caller performs the first cache operation.
pub fn init(config: &RedisConfig) -> Result<CachePool, AppError> {
    let manager =
        RedisConnectionManager::new(connection_info(config)).map_err(AppError::CacheInit)?;

    Ok(bb8::Pool::builder()
        .max_size(POOL_SIZE)
        .min_idle(Some(MIN_IDLE))
        .connection_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(Some(IDLE_TIMEOUT))
        .max_lifetime(None)
        .retry_connection(true)
        .build_unchecked(manager))
}

fn connection_info(config: &RedisConfig) -> ConnectionInfo {
    let (host, port) = split_host_port(&config.host);

    ConnectionInfo {
        addr: ConnectionAddr::Tcp(host, port),
        redis: RedisConnectionInfo {
            db: config.db,
            password: (!config.password.is_empty()).then(|| config.password.clone()),
            ..RedisConnectionInfo::default()
        },
    }
}

fn split_host_port(host: &str) -> (String, u16) {
    // "[v6]:port" and "[v6]" forms.
    if let Some((name, port)) = host
        .strip_prefix('[')
        .and_then(|rest| rest.split_once("]:"))
    {
        if let Ok(port) = port.parse() {
            return (name.to_owned(), port);
        }
    }
    if let Some(name) = host.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return (name.to_owned(), DEFAULT_PORT);
    }

    match host.rsplit_once(':') {
        // A second ':' in the name part means a bare IPv6 literal, not a
        // host:port pair.
        Some((name, port)) if !name.contains(':') => match port.parse() {
            Ok(port) => (name.to_owned(), port),
            Err(_) => (host.to_owned(), DEFAULT_PORT),
        },
        _ => (host.to_owned(), DEFAULT_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_policy_constants_are_fixed() {
        assert_eq!(POOL_SIZE, 15);
        assert_eq!(MIN_IDLE, 10);
        assert_eq!(ACQUIRE_TIMEOUT, Duration::from_secs(30));
        assert_eq!(IDLE_TIMEOUT, Duration::from_secs(60));
    }

    #[test]
    fn splits_host_and_port() {
        assert_eq!(split_host_port("cache.internal:6380"), ("cache.internal".to_owned(), 6380));
        assert_eq!(split_host_port("localhost"), ("localhost".to_owned(), DEFAULT_PORT));
        assert_eq!(split_host_port("localhost:notaport"), ("localhost:notaport".to_owned(), DEFAULT_PORT));
    }

    #[test]
    fn keeps_ipv6_literals_intact() {
        assert_eq!(split_host_port("::1"), ("::1".to_owned(), DEFAULT_PORT));
        assert_eq!(split_host_port("[::1]:6380"), ("::1".to_owned(), 6380));
        assert_eq!(split_host_port("[::1]"), ("::1".to_owned(), DEFAULT_PORT));
        assert_eq!(
            split_host_port("2001:db8::2"),
            ("2001:db8::2".to_owned(), DEFAULT_PORT)
        );
    }

    #[test]
    fn maps_credentials_and_database_index() {
        let info = connection_info(&RedisConfig {
            host: "127.0.0.1:6379".to_owned(),
            password: "secret".to_owned(),
            db: 5,
        });

        assert_eq!(info.redis.db, 5);
        assert_eq!(info.redis.password.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_password_maps_to_none() {
        let info = connection_info(&RedisConfig::default());

        assert_eq!(info.redis.password, None);
        assert_eq!(info.redis.db, 0);
    }

    // The pool schedules its idle reaper on the reactor at construction,
    // so these mirror the production path: a runtime entered from
    // synchronous code.
    #[test]
    fn init_succeeds_from_sync_code_inside_an_entered_runtime() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime must build");
        let _reactor = runtime.enter();

        let pool = init(&RedisConfig::default()).expect("construction must not fail");

        assert_eq!(pool.state().connections, 0);
    }

    #[test]
    fn init_performs_no_io_even_for_unreachable_server() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime must build");
        let _reactor = runtime.enter();

        let pool = init(&RedisConfig {
            host: "unreachable.invalid:1".to_owned(),
            password: String::new(),
            db: 0,
        })
        .expect("construction must not fail");

        assert_eq!(pool.state().connections, 0);
    }
}
