use serde::{Deserialize, Serialize};

use crate::domain::config::{
    env::{self, ConfigError},
    local::Provider,
};

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct S3Secrets {
    #[serde(rename = "endpoint")]
    pub endpoint: Option<String>,
    #[serde(rename = "region")]
    pub region: String,
    #[serde(rename = "accessKeyId")]
    pub access_key_id: Option<String>,
    #[serde(rename = "secretAccessKey")]
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtSecrets {
    #[serde(rename = "secret")]
    pub secret: String,
    #[serde(rename = "audience")]
    pub audience: Option<String>,
    #[serde(rename = "issuer")]
    pub issuer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Secrets {
    #[serde(rename = "s3Secrets")]
    pub s3_secrets: Option<S3Secrets>,
    #[serde(rename = "jwtSecrets")]
    pub jwt_secrets: JwtSecrets,
}

impl Secrets {
    pub fn from_env(provider: Provider) -> Result<Self, ConfigError> {
        Self::from_lookup(provider, env::process_env)
    }

    pub fn from_lookup<F>(provider: Provider, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let s3_secrets = match provider {
            Provider::S3 => {
                let access_key_id = env::optional(&lookup, "STORAGE_ACCESS_KEY_ID");
                let secret_access_key = env::optional(&lookup, "STORAGE_SECRET_ACCESS_KEY");
                // Static credentials come as a pair or not at all.
                if access_key_id.is_some() != secret_access_key.is_some() {
                    return Err(ConfigError::Invalid {
                        name: "STORAGE_SECRET_ACCESS_KEY",
                        reason: "access key id and secret access key must be set together"
                            .to_string(),
                    });
                }

                Some(S3Secrets {
                    endpoint: env::optional(&lookup, "STORAGE_ENDPOINT"),
                    region: env::optional(&lookup, "STORAGE_REGION")
                        .unwrap_or_else(|| DEFAULT_REGION.to_string()),
                    access_key_id,
                    secret_access_key,
                })
            }
            Provider::Memory => None,
        };

        Ok(Self {
            s3_secrets,
            jwt_secrets: JwtSecrets {
                secret: env::required(&lookup, "JWT_SECRET")?,
                audience: env::optional(&lookup, "JWT_AUDIENCE"),
                issuer: env::optional(&lookup, "JWT_ISSUER"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_secret_is_required() {
        let err = Secrets::from_lookup(Provider::Memory, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn s3_defaults_region() {
        let secrets = Secrets::from_lookup(Provider::S3, |name| {
            (name == "JWT_SECRET").then(|| "shh".to_string())
        })
        .unwrap();

        let s3 = secrets.s3_secrets.unwrap();
        assert_eq!(s3.region, "us-east-1");
        assert!(s3.endpoint.is_none());
        assert!(s3.access_key_id.is_none());
    }

    #[test]
    fn half_a_credential_pair_is_rejected() {
        let err = Secrets::from_lookup(Provider::S3, |name| match name {
            "JWT_SECRET" => Some("shh".to_string()),
            "STORAGE_ACCESS_KEY_ID" => Some("AKIA".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
