use serde::Deserialize;
use std::env;

// Top-level configuration container for the whole application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub jwt: JwtConfig,
    pub payment: PaymentConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Session token settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_hours: i64,
}

// Simulated payment gateway settings
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Opaque external-gateway latency for the simulated settlement.
    pub settlement_delay_ms: u64,
    /// Booking references are minted as `<prefix>-XXXXXX`.
    pub reference_prefix: String,
    pub currency: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "skydesk=debug,tower_http=debug".to_string()),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
                expires_in_hours: env::var("JWT_EXPIRES_IN_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .expect("JWT_EXPIRES_IN_HOURS must be a valid number"),
            },
            payment: PaymentConfig {
                settlement_delay_ms: env::var("SETTLEMENT_DELAY_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .expect("SETTLEMENT_DELAY_MS must be a valid number"),
                reference_prefix: env::var("BOOKING_REFERENCE_PREFIX")
                    .unwrap_or_else(|_| "SKY".to_string()),
                currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".to_string()),
            },
        }
    }
}
