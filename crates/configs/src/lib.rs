use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Literal token used when neither `config.toml` nor `ACCESS_TOKEN` provide one.
pub const DEFAULT_ACCESS_TOKEN: &str = "AIPEX2025";

/// Embedded store used when no networked backend is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Shared-secret settings for mutating endpoints.
///
/// The token has no rotation, scoping or expiry.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub access_token: String,
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present, fall back to defaults otherwise,
    /// then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = load_or_default(&path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env()?;
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

/// Missing file means defaults; a present but unreadable or invalid file is an error.
fn load_or_default(path: &str) -> Result<AppConfig> {
    if std::path::Path::new(path).exists() {
        load_from_file(path)
    } else {
        Ok(AppConfig::default())
    }
}

/// Parse an optional environment override; a set but malformed value is an error.
fn parse_env_override<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>> {
    match raw {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| anyhow!("{name} must be a number, got {v:?}")),
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_env_override::<u16>("SERVER_PORT", std::env::var("SERVER_PORT").ok())? {
            self.port = port;
        }
        if let Some(w) = parse_env_override::<usize>("TOKIO_WORKER_THREADS", std::env::var("TOKIO_WORKER_THREADS").ok())? {
            self.worker_threads = Some(w);
        }
        Ok(())
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Resolve the connection URL.
    ///
    /// Precedence: `AZURE_SQL_CONNECTION_STRING`, then `database.url` from the
    /// file, then `DATABASE_URL`, then the local SQLite file.
    pub fn normalize_from_env(&mut self) {
        let azure = std::env::var("AZURE_SQL_CONNECTION_STRING").ok();
        let fallback = std::env::var("DATABASE_URL").ok();
        self.url = resolve_database_url(azure.as_deref(), &self.url, fallback.as_deref());
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty"));
        }
        let lower = self.url.to_lowercase();
        let known = ["sqlite:", "postgres://", "postgresql://", "mysql://"];
        if !known.iter().any(|scheme| lower.starts_with(scheme)) {
            return Err(anyhow!("database.url must start with sqlite:, postgres://, postgresql:// or mysql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.idle_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    /// File backing a `sqlite:` URL, `None` for other backends and in-memory databases.
    pub fn sqlite_path(&self) -> Option<std::path::PathBuf> {
        if !self.is_sqlite() {
            return None;
        }
        let rest = &self.url["sqlite:".len()..];
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path.contains(":memory:") {
            return None;
        }
        Some(std::path::PathBuf::from(path))
    }
}

fn resolve_database_url(azure: Option<&str>, from_file: &str, fallback: Option<&str>) -> String {
    let non_empty = |s: &&str| !s.trim().is_empty();
    azure
        .filter(non_empty)
        .or(Some(from_file).filter(non_empty))
        .or(fallback.filter(non_empty))
        .unwrap_or(DEFAULT_DATABASE_URL)
        .to_string()
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(token) = std::env::var("ACCESS_TOKEN") {
            self.access_token = token;
        }
        if self.access_token.is_empty() {
            self.access_token = DEFAULT_ACCESS_TOKEN.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(anyhow!("auth.access_token must not be blank"));
        }
        Ok(())
    }

    pub fn uses_default_token(&self) -> bool {
        self.access_token == DEFAULT_ACCESS_TOKEN
    }
}
