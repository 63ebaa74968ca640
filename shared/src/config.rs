use tracing::warn;

/// Which key-value store backs the response cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Redis(String), // connection url
    Memory,
    Disabled,
}

impl CacheBackend {
    pub fn name(&self) -> &str {
        match self {
            CacheBackend::Redis(_) => "redis",
            CacheBackend::Memory => "memory",
            CacheBackend::Disabled => "disabled",
        }
    }
}

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub cache_backend: CacheBackend,
    pub cache_max_entries: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 3001;
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let redis_url =
            lookup("REDIS_URL").unwrap_or_else(|| Self::DEFAULT_REDIS_URL.to_string());

        let cache_backend = match lookup("SHOWROOM_CACHE_BACKEND")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("redis") => CacheBackend::Redis(redis_url),
            Some("memory") => CacheBackend::Memory,
            Some("disabled") | Some("none") => CacheBackend::Disabled,
            Some(other) => {
                warn!("Unknown SHOWROOM_CACHE_BACKEND '{}', using redis", other);
                CacheBackend::Redis(redis_url)
            }
        };

        Self {
            host: lookup("SHOWROOM_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: lookup("SHOWROOM_HTTP_PORT")
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(Self::DEFAULT_HTTP_PORT),
            data_dir: lookup("SHOWROOM_DATA_DIR")
                .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            cache_backend,
            cache_max_entries: lookup("SHOWROOM_CACHE_MAX_ENTRIES")
                .and_then(|n| n.parse::<u64>().ok()),
            allowed_origins: lookup("SHOWROOM_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}
