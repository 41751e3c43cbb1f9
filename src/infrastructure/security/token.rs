// src/infrastructure/security/token.rs
//
// Bearer tokens are issued by the external session service. The core only
// needs to verify the signature and recover (actor id, role); issuance,
// expiry policy and refresh live outside this repository.
use crate::application::dto::AuthenticatedActor;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::identity::TokenAuthenticator;
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies `base64url(payload).base64url(hmac)` tokens where the payload
/// is `actor_id|username|role`.
pub struct HmacTokenAuthenticator {
    secret: Vec<u8>,
}

impl HmacTokenAuthenticator {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn verify(&self, token: &str) -> Option<String> {
        let (payload_b64, sig_b64) = token.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(sig_b64).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(&payload);
        mac.verify_slice(&signature).ok()?;

        String::from_utf8(payload).ok()
    }

    fn parse(payload: &str) -> Option<(i64, String, String)> {
        let mut parts = payload.splitn(3, '|');
        let id = parts.next()?.parse::<i64>().ok()?;
        let username = parts.next()?.to_string();
        let role = parts.next()?.to_string();
        Some((id, username, role))
    }

    /// Signing half of the codec, used by the seeding tooling and tests.
    pub fn issue(&self, actor_id: i64, username: &str, role: &str) -> String {
        let payload = format!("{actor_id}|{username}|{role}");
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("hmac accepts any key length");
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }
}

#[async_trait]
impl TokenAuthenticator for HmacTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedActor> {
        let payload = self
            .verify(token)
            .ok_or_else(|| ApplicationError::unauthorized("invalid token"))?;

        let (id, username, role) = Self::parse(&payload)
            .ok_or_else(|| ApplicationError::unauthorized("malformed token payload"))?;

        if id <= 0 {
            return Err(ApplicationError::unauthorized("malformed token payload"));
        }

        let role = role
            .parse()
            .map_err(|_| ApplicationError::unauthorized("unknown role in token"))?;

        Ok(AuthenticatedActor {
            id,
            username,
            role,
            ip_address: None,
        })
    }
}
