use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BOOKING_SUBMIT_DELAY_MS: u64 = 2000;
pub const DEFAULT_BOOKING_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub port: u16,
    pub booking_submit_delay_ms: u64,
    pub booking_window_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            port: DEFAULT_PORT,
            booking_submit_delay_ms: DEFAULT_BOOKING_SUBMIT_DELAY_MS,
            booking_window_days: DEFAULT_BOOKING_WINDOW_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            port: parse_or_default("PORT", DEFAULT_PORT),
            booking_submit_delay_ms: parse_or_default(
                "BOOKING_SUBMIT_DELAY_MS",
                DEFAULT_BOOKING_SUBMIT_DELAY_MS,
            ),
            booking_window_days: parse_or_default(
                "BOOKING_WINDOW_DAYS",
                DEFAULT_BOOKING_WINDOW_DAYS,
            ),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - authenticated routes will reject every request");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    pub fn booking_submit_delay(&self) -> Duration {
        Duration::from_millis(self.booking_submit_delay_ms)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.booking_submit_delay(), Duration::from_secs(2));
        assert_eq!(config.booking_window_days, 7);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_is_configured_requires_secret() {
        let config = AppConfig {
            jwt_secret: "secret".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_configured());
    }
}
