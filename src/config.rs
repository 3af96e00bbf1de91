use std::env;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "change-me-now";
const DEFAULT_ROUTE_SLUG: &str = "giggle-wormhole-otter-lounge";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Runtime configuration, read once at startup.
///
/// Every value has a development default so the server starts with no
/// environment at all. Without `DATABASE_URL` the in-memory store is used.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub admin_route_slug: String,
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub production: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());
        if database_url.is_none() {
            log::warn!("DATABASE_URL not set, responses are kept in memory only");
        }

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            admin_username: var_or("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME, production),
            admin_password: var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD, production),
            admin_route_slug: var_or("ADMIN_ROUTE_SLUG", DEFAULT_ROUTE_SLUG, production),
            database_url,
            bind_addr: var_or("BIND_ADDR", DEFAULT_BIND_ADDR, false),
            production,
        }
    }

    /// Key material for the admin session token. Changing the connection
    /// string invalidates every issued cookie.
    pub fn session_secret(&self) -> &str {
        self.database_url.as_deref().unwrap_or("local")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            admin_route_slug: DEFAULT_ROUTE_SLUG.to_string(),
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            production: false,
        }
    }
}

fn var_or(key: &str, default: &str, loud: bool) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => {
            if loud {
                log::warn!("{key} not set in production, using the development default");
            } else {
                log::info!("{key} not set, using default");
            }
            default.to_string()
        }
    }
}
