//! Configuration module
//!
//! Environment-backed configuration for the relay. Required settings
//! (database URL, link secret, bucket for the S3 backend) fail startup
//! immediately; everything else has a default.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LINK_TTL_HOURS: i64 = 72;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 26;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 3600;
const DEFAULT_CLEANUP_BATCH_LIMIT: i64 = 500;
const MIN_LINK_SECRET_LEN: usize = 16;

/// Blob storage backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Base URL used to build absolute receiver links. Empty means the
    /// response carries only the relative `/r/{id}` path.
    pub public_base_url: Option<String>,
    /// Allowed CORS origins; `["*"]` means any origin.
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub database_url: String,
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub s3_endpoint: Option<String>,
    /// Shared secret for link token signing.
    pub link_secret: String,
    pub link_ttl_hours: i64,
    pub max_upload_size_bytes: usize,
    pub cleanup_interval_secs: u64,
    pub cleanup_batch_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            _ => StorageBackend::S3,
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|s| s.trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION").ok().filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            link_secret: env::var("LINK_SECRET")
                .map_err(|_| anyhow::anyhow!("LINK_SECRET must be set for token signing"))?,
            link_ttl_hours: env::var("LINK_TTL_HOURS")
                .unwrap_or_else(|_| DEFAULT_LINK_TTL_HOURS.to_string())
                .parse()
                .unwrap_or(DEFAULT_LINK_TTL_HOURS),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_MB")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
            cleanup_interval_secs: env::var("CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_CLEANUP_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECS),
            cleanup_batch_limit: env::var("CLEANUP_BATCH_LIMIT")
                .unwrap_or_else(|_| DEFAULT_CLEANUP_BATCH_LIMIT.to_string())
                .parse()
                .unwrap_or(DEFAULT_CLEANUP_BATCH_LIMIT),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.link_secret.len() < MIN_LINK_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "LINK_SECRET must be at least {} characters long",
                MIN_LINK_SECRET_LEN
            ));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.link_ttl_hours <= 0 {
            return Err(anyhow::anyhow!("LINK_TTL_HOURS must be positive"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using the S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.s3_endpoint.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or S3_ENDPOINT must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Bucket name for the configured backend. The memory backend uses a
    /// fixed namespace.
    pub fn bucket(&self) -> &str {
        match self.storage_backend {
            StorageBackend::S3 => self.s3_bucket.as_deref().unwrap_or_default(),
            StorageBackend::Memory => "memory",
        }
    }

    pub fn link_ttl_secs(&self) -> i64 {
        self.link_ttl_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 3000,
            public_base_url: None,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            database_url: "postgresql://localhost/dropgate".to_string(),
            storage_backend: StorageBackend::Memory,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            link_secret: "0123456789abcdef".to_string(),
            link_ttl_hours: 72,
            max_upload_size_bytes: 26 * 1024 * 1024,
            cleanup_interval_secs: 3600,
            cleanup_batch_limit: 500,
        }
    }

    #[test]
    fn valid_development_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn ttl_seconds_derive_from_hours() {
        let mut config = base_config();
        config.link_ttl_hours = 72;
        assert_eq!(config.link_ttl_secs(), 72 * 3600);
    }

    #[test]
    fn short_secret_is_rejected() {
        let mut config = base_config();
        config.link_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn s3_backend_requires_bucket() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_err());
        config.s3_bucket = Some("dropgate".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());
        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }
}
