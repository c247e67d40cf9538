use taskpulse_utils::{create_prefixed_secret, create_random_secret};
use tracing::{info, warn};
use url::Url;

/// Where reminder events are relayed to
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base url of the user facing service. When it is not set the events
    /// are published directly to the realtime hub of this process.
    pub base_url: Option<Url>,
    /// Shared secret sent in the `x-relay-secret` header
    pub secret: String,
    /// Upper bound for how long a relay request may take
    pub timeout_millis: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Key used by the operator facing service for the admin routes
    pub admin_api_key: String,
    /// Secret used to sign and verify session tokens
    pub session_secret: String,
    /// Port for the application to run on
    pub port: usize,
    pub relay: RelayConfig,
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_RELAY_TIMEOUT_MILLIS: u64 = 3000;

fn secret_from_env(var: &str, generate: impl FnOnce() -> String) -> String {
    match std::env::var(var) {
        Ok(secret) => secret,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                var
            );
            let secret = generate();
            info!("{} was generated and set to: {}", var, secret);
            secret
        }
    }
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display>(var: &str, default: T) -> T {
    match std::env::var(var) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    var, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = secret_from_env("ADMIN_API_KEY", || create_prefixed_secret("adm", 32));
        let session_secret = secret_from_env("SESSION_SECRET", || create_random_secret(32));
        let relay_secret = secret_from_env("RELAY_SECRET", || create_random_secret(32));
        let port = parse_env_or("PORT", DEFAULT_PORT);
        let timeout_millis = parse_env_or("RELAY_TIMEOUT_MILLIS", DEFAULT_RELAY_TIMEOUT_MILLIS);

        let base_url = match std::env::var("RELAY_BASE_URL") {
            Ok(url) => match Url::parse(&url) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(
                        "The given RELAY_BASE_URL: {} is not valid ({}), events will be published locally.",
                        url, e
                    );
                    None
                }
            },
            Err(_) => {
                info!("Did not find RELAY_BASE_URL environment variable. Events will be published locally.");
                None
            }
        };

        Self {
            admin_api_key,
            session_secret,
            port,
            relay: RelayConfig {
                base_url,
                secret: relay_secret,
                timeout_millis,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
