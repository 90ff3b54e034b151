use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::config::env::{self, ConfigError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    #[serde(rename = "s3")]
    S3,
    #[serde(rename = "memory")]
    Memory,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::S3 => "s3",
            Provider::Memory => "memory",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s3" => Ok(Provider::S3),
            "memory" => Ok(Provider::Memory),
            other => Err(format!("unknown storage provider '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocalConfig {
    pub provider: Provider,
    pub port: u16,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    #[serde(rename = "corsAllowedOrigins")]
    pub cors_allowed_origins: Option<Vec<String>>,
    #[serde(rename = "maxUploadBytes")]
    pub max_upload_bytes: usize,
}

impl LocalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env::process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = env::parsed_or(&lookup, "STORAGE_PROVIDER", Provider::S3)?;

        let bucket_name = match provider {
            Provider::S3 => env::required(&lookup, "STORAGE_BUCKET")?,
            Provider::Memory => {
                env::optional(&lookup, "STORAGE_BUCKET").unwrap_or_else(|| "uploads".to_string())
            }
        };

        let cors_allowed_origins = env::optional(&lookup, "CORS_ALLOWED_ORIGINS").map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            provider,
            port: env::parsed_or(&lookup, "PORT", DEFAULT_PORT)?,
            bucket_name,
            cors_allowed_origins,
            max_upload_bytes: env::parsed_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}
