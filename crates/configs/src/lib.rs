use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database-backed service under `/api/students`.
    #[serde(default)]
    pub server: ServerConfig,
    /// In-memory service under `/students`.
    #[serde(default = "ServerConfig::ephemeral_default")]
    pub ephemeral: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ephemeral: ServerConfig::ephemeral_default(),
            database: DatabaseConfig::default(),
        }
    }
}

/// A section may set any subset of its keys; an omitted or blank `host`
/// and an omitted or zero `port` take the section default in `normalize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

impl ServerConfig {
    pub fn ephemeral_default() -> Self {
        Self { port: 8081, ..Self::default() }
    }

    /// Host/port from `{prefix}_HOST` / `{prefix}_PORT`, falling back to `fallback`.
    pub fn from_env(prefix: &str, fallback: ServerConfig) -> Self {
        let host = std::env::var(format!("{prefix}_HOST")).unwrap_or(fallback.host);
        let port = std::env::var(format!("{prefix}_PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(fallback.port);
        Self { host, port, worker_threads: fallback.worker_threads }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Parse a config file; server sections come back normalized.
pub fn parse(content: &str) -> Result<AppConfig> {
    let mut cfg: AppConfig = toml::from_str(content)?;
    cfg.server.normalize(&ServerConfig::default());
    cfg.ephemeral.normalize(&ServerConfig::ephemeral_default());
    Ok(cfg)
}

impl AppConfig {
    /// `CONFIG_PATH` (default `config.toml`), see [`AppConfig::load_or_env_from`].
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// Config file when present, otherwise env-derived defaults. A file that
    /// exists but cannot be read or parsed is an error.
    /// The database url is only filled from env, callers that need it run
    /// `database.validate()`.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).map_err(|e| anyhow!("{path}: {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut cfg = AppConfig {
                    server: ServerConfig::from_env("SERVER", ServerConfig::default()),
                    ephemeral: ServerConfig::from_env("EPHEMERAL", ServerConfig::ephemeral_default()),
                    database: DatabaseConfig::default(),
                };
                cfg.server.normalize(&ServerConfig::default());
                cfg.ephemeral.normalize(&ServerConfig::ephemeral_default());
                cfg
            }
            Err(e) => return Err(anyhow!("{path}: {e}")),
        };
        cfg.database.normalize_from_env();
        Ok(cfg)
    }
}

impl ServerConfig {
    fn normalize(&mut self, defaults: &ServerConfig) {
        if self.host.trim().is_empty() {
            self.host = defaults.host.clone();
        }
        if self.port == 0 {
            self.port = defaults.port;
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = defaults.worker_threads,
        }
    }
}

impl DatabaseConfig {
    /// Pool settings for a given URL, everything else at defaults.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || self.is_sqlite()) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
