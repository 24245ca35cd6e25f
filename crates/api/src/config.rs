use kiosk_core::pairing::registry::{DEFAULT_CODE_TTL_SECS, DEFAULT_SWEEP_INTERVAL_SECS};
use kiosk_core::pairing::PairingConfig;

/// Longest accepted pairing code lifetime: one day.
pub const MAX_CODE_TTL_SECS: i64 = 86_400;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Lifetime of a pairing code in seconds (default: `300`, range `1..=86400`).
    pub pairing_code_ttl_secs: i64,
    /// Interval between pairing expiry sweeps in seconds (default: `5`, minimum `1`).
    pub pairing_sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                    |
    /// | `PAIRING_CODE_TTL_SECS`       | `300`                   |
    /// | `PAIRING_SWEEP_INTERVAL_SECS` | `5`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let pairing_code_ttl_secs =
            parse_code_ttl_secs(std::env::var("PAIRING_CODE_TTL_SECS").ok().as_deref());

        let pairing_sweep_interval_secs: u64 = std::env::var("PAIRING_SWEEP_INTERVAL_SECS")
            .ok()
            .map(|v| {
                v.parse()
                    .expect("PAIRING_SWEEP_INTERVAL_SECS must be a valid u64")
            })
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS)
            .max(1);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            pairing_code_ttl_secs,
            pairing_sweep_interval_secs,
        }
    }

    /// Registry settings derived from this configuration.
    pub fn pairing_config(&self) -> PairingConfig {
        PairingConfig {
            ttl: chrono::Duration::seconds(self.pairing_code_ttl_secs),
        }
    }
}

/// Parse `PAIRING_CODE_TTL_SECS`. Values below 1 are raised to 1; values
/// above [`MAX_CODE_TTL_SECS`] or non-integers abort startup.
fn parse_code_ttl_secs(raw: Option<&str>) -> i64 {
    let secs: i64 = raw
        .map(|v| {
            v.trim()
                .parse()
                .expect("PAIRING_CODE_TTL_SECS must be a valid integer")
        })
        .unwrap_or(DEFAULT_CODE_TTL_SECS);

    assert!(
        secs <= MAX_CODE_TTL_SECS,
        "PAIRING_CODE_TTL_SECS must be at most {MAX_CODE_TTL_SECS}, got {secs}"
    );
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_ttl_defaults_when_unset() {
        assert_eq!(parse_code_ttl_secs(None), DEFAULT_CODE_TTL_SECS);
        assert_eq!(parse_code_ttl_secs(Some(" 120 ")), 120);
    }

    #[test]
    fn non_positive_code_ttl_is_raised_to_one() {
        assert_eq!(parse_code_ttl_secs(Some("0")), 1);
        assert_eq!(parse_code_ttl_secs(Some("-30")), 1);
    }

    #[test]
    #[should_panic(expected = "PAIRING_CODE_TTL_SECS must be at most")]
    fn oversized_code_ttl_is_rejected() {
        parse_code_ttl_secs(Some("9223372036854775807"));
    }

    #[test]
    #[should_panic(expected = "PAIRING_CODE_TTL_SECS must be a valid integer")]
    fn non_numeric_code_ttl_is_rejected() {
        parse_code_ttl_secs(Some("five minutes"));
    }
}
