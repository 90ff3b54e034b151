use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    application::error::ApplicationError,
    domain::{config::secrets::JwtSecrets, models::identity::Identity},
};

const OBJECT_ID_CLAIM: &str = "http://schemas.microsoft.com/identity/claims/objectidentifier";

#[derive(Debug, Deserialize)]
struct Claims {
    preferred_username: Option<String>,
    upn: Option<String>,
    #[serde(rename = "http://schemas.microsoft.com/identity/claims/objectidentifier")]
    object_identifier: Option<String>,
    oid: Option<String>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity::new(
            claims.preferred_username.or(claims.upn),
            claims.object_identifier.or(claims.oid),
        )
    }
}

/// Verifies HS256 bearer tokens issued by the identity provider.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secrets: &JwtSecrets) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match secrets.audience {
            Some(ref audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(ref issuer) = secrets.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(secrets.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims.into())
    }
}

/// Extracts the credentials of an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that resolves the caller's `Identity` from the
/// `Authorization: Bearer` header and stores it in request extensions.
pub async fn require_identity(
    State(verifier): State<Arc<TokenVerifier>>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        warn!("Missing or malformed Authorization header");
        return ApplicationError::Unauthorized.into_response();
    };

    match verifier.verify(token) {
        Ok(identity) => {
            if identity.object_id.is_none() {
                debug!("Token carries no {} claim", OBJECT_ID_CLAIM);
            }
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            warn!("Rejected bearer token: {}", e);
            ApplicationError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use super::*;

    pub(crate) const SECRET: &str = "test-secret";

    pub(crate) fn jwt_secrets() -> JwtSecrets {
        JwtSecrets {
            secret: SECRET.to_string(),
            audience: None,
            issuer: None,
        }
    }

    pub(crate) fn token(claims: serde_json::Value) -> String {
        let mut claims = claims;
        claims["exp"] = json!(Utc::now().timestamp() + 600);
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn reads_azure_style_claims() {
        let verifier = TokenVerifier::new(&jwt_secrets());
        let identity = verifier
            .verify(&token(json!({
                "preferred_username": "ana@contoso.com",
                OBJECT_ID_CLAIM: "oid-1",
            })))
            .unwrap();

        assert_eq!(identity.principal_name.as_deref(), Some("ana@contoso.com"));
        assert_eq!(identity.object_id.as_deref(), Some("oid-1"));
    }

    #[test]
    fn falls_back_to_short_claim_names() {
        let verifier = TokenVerifier::new(&jwt_secrets());
        let identity = verifier
            .verify(&token(json!({ "upn": "ana@contoso.com", "oid": "oid-2" })))
            .unwrap();

        assert_eq!(identity.principal_name.as_deref(), Some("ana@contoso.com"));
        assert_eq!(identity.object_id.as_deref(), Some("oid-2"));
    }

    #[test]
    fn missing_claims_are_not_an_error() {
        let verifier = TokenVerifier::new(&jwt_secrets());
        let identity = verifier.verify(&token(json!({}))).unwrap();
        assert_eq!(identity, Identity::default());
    }

    #[test]
    fn rejects_wrong_secret_and_audience() {
        let other = TokenVerifier::new(&JwtSecrets {
            secret: "other".to_string(),
            audience: None,
            issuer: None,
        });
        assert!(other.verify(&token(json!({}))).is_err());

        let with_audience = TokenVerifier::new(&JwtSecrets {
            audience: Some("api://uploads".to_string()),
            ..jwt_secrets()
        });
        assert!(with_audience
            .verify(&token(json!({ "aud": "api://other" })))
            .is_err());
        assert!(with_audience
            .verify(&token(json!({ "aud": "api://uploads" })))
            .is_ok());
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("BEARER  abc ")), Some("abc"));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_eq!(bearer_token(&headers("Basic YWxhZGRpbjpvcGVu")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
