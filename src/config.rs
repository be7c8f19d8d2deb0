//! Server configuration loaded from environment variables.

use std::time::Duration;

/// Runtime settings for the simulation server.
///
/// Every field has a default and can be set through a `LEADSIM_*` variable.
/// CLI flags on `serve` override what the environment provides.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind (from LEADSIM_HOST)
    pub host: String,
    /// Port for the HTTP API (from LEADSIM_PORT)
    pub port: u16,
    /// Most sessions kept in memory at once (from LEADSIM_MAX_SESSIONS)
    pub max_sessions: usize,
    /// Idle time after which a session is dropped (from LEADSIM_SESSION_TTL_MINUTES)
    pub session_ttl: chrono::Duration,
    /// How often expired sessions are swept (from LEADSIM_SWEEP_INTERVAL_SECS)
    pub sweep_interval: Duration,
    /// Mount the phase override route (from LEADSIM_DEBUG_ROUTES)
    pub debug_routes: bool,
    /// Fixed seed for scripted answers (from LEADSIM_RNG_SEED)
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let host = lookup("LEADSIM_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);

        let port = lookup("LEADSIM_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let max_sessions = parsed("LEADSIM_MAX_SESSIONS")
            .map(|n| n as usize)
            .unwrap_or(defaults.max_sessions);

        let session_ttl = parsed("LEADSIM_SESSION_TTL_MINUTES")
            .and_then(|m| i64::try_from(m).ok())
            .and_then(chrono::Duration::try_minutes)
            .unwrap_or(defaults.session_ttl);

        let sweep_interval = parsed("LEADSIM_SWEEP_INTERVAL_SECS")
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.sweep_interval);

        let debug_routes = lookup("LEADSIM_DEBUG_ROUTES")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.debug_routes);

        let rng_seed = parsed("LEADSIM_RNG_SEED");

        Self {
            host,
            port,
            max_sessions,
            session_ttl,
            sweep_interval,
            debug_routes,
            rng_seed,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_sessions: 1000,
            session_ttl: chrono::Duration::minutes(60),
            sweep_interval: Duration::from_secs(60),
            debug_routes: false,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("LEADSIM_HOST", "0.0.0.0"),
            ("LEADSIM_PORT", "8080"),
            ("LEADSIM_MAX_SESSIONS", "5"),
            ("LEADSIM_SESSION_TTL_MINUTES", "15"),
            ("LEADSIM_SWEEP_INTERVAL_SECS", "10"),
            ("LEADSIM_DEBUG_ROUTES", "true"),
            ("LEADSIM_RNG_SEED", "99"),
        ]);

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.max_sessions, 5);
        assert_eq!(config.session_ttl, chrono::Duration::minutes(15));
        assert_eq!(config.sweep_interval, Duration::from_secs(10));
        assert!(config.debug_routes);
        assert_eq!(config.rng_seed, Some(99));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = config_from(&[
            ("LEADSIM_PORT", "eighty"),
            ("LEADSIM_SWEEP_INTERVAL_SECS", "0"),
            ("LEADSIM_DEBUG_ROUTES", "nope"),
            ("LEADSIM_SESSION_TTL_MINUTES", "9000000000000000000"),
        ]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert!(!config.debug_routes);
        assert_eq!(config.session_ttl, chrono::Duration::minutes(60));
    }
}
