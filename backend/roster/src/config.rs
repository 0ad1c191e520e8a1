//! Environment lookups shared by the server and the client.
use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Reads `key` from the environment, falling back to `default` when unset.
///
/// Panics when the value (or the default) does not parse, misconfiguration is fatal at startup.
pub fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::try_load;

    #[test]
    fn test_default_used_when_unset() {
        let port: u16 = try_load("ROSTER_TEST_UNSET_PORT", "5000");
        let path: PathBuf = try_load("ROSTER_TEST_UNSET_PATH", "users.csv");

        assert_eq!(port, 5000);
        assert_eq!(path, PathBuf::from("users.csv"));
    }

    #[test]
    #[should_panic(expected = "Environment misconfigured!")]
    fn test_unparsable_default_panics() {
        let _: u16 = try_load("ROSTER_TEST_UNSET_BAD", "not-a-port");
    }
}
