use armory_core::storage::{StorageConfig, DEFAULT_BUCKET};

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL (read separately in `main.rs`) have
/// defaults suitable for local development.
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
    /// Shared admin secret. When `None`, every admin request is rejected.
    pub admin_secret: Option<String>,
    /// Whether the admin cookie carries the `Secure` attribute.
    pub admin_cookie_secure: bool,
    /// Public URL derivation for stored images.
    pub storage: StorageConfig,
    /// Width/height used for diagrams stored without dimensions.
    pub default_diagram_size_px: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `ADMIN_SECRET`            | unset                   |
    /// | `ADMIN_COOKIE_SECURE`     | `false`                 |
    /// | `STORAGE_PUBLIC_URL`      | unset                   |
    /// | `STORAGE_BUCKET`          | `product-images`        |
    /// | `DEFAULT_DIAGRAM_SIZE_PX` | `1000`                  |
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

        let admin_secret = std::env::var("ADMIN_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let admin_cookie_secure: bool = std::env::var("ADMIN_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("ADMIN_COOKIE_SECURE must be true or false");

        let storage = StorageConfig::new(
            std::env::var("STORAGE_PUBLIC_URL").ok(),
            std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into()),
        );

        let default_diagram_size_px: u32 = std::env::var("DEFAULT_DIAGRAM_SIZE_PX")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("DEFAULT_DIAGRAM_SIZE_PX must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_secret,
            admin_cookie_secure,
            storage,
            default_diagram_size_px,
        }
    }
}
