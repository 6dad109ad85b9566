//! Server-verified admin sessions.
//!
//! The admin password is configured out of band; login compares a SHA-256
//! digest in constant time and issues an opaque expiring token that travels
//! in an HttpOnly cookie. Sessions live in process memory, so a restart
//! logs everyone out.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct AdminAuth {
    password_digest: Option<Vec<u8>>,
    ttl: Duration,
    sessions: Mutex<HashMap<String, Instant>>,
}

impl AdminAuth {
    /// `password: None` leaves the admin surface locked: every login
    /// attempt fails until a password is configured.
    pub fn new(password: Option<&str>, ttl: Duration) -> AdminAuth {
        AdminAuth {
            password_digest: password.map(|p| Sha256::digest(p.as_bytes()).to_vec()),
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        let Some(expected) = &self.password_digest else {
            return false;
        };
        let digest = Sha256::digest(candidate.as_bytes());
        digest.as_slice().ct_eq(expected.as_slice()).into()
    }

    /// Issue a fresh session token. Expired sessions are pruned here so the
    /// map cannot grow without bound.
    pub async fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let expires = Instant::now() + self.ttl;
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        sessions.retain(|_, expiry| *expiry > now);
        sessions.insert(token.clone(), expires);
        token
    }

    pub async fn validate(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(expiry) if *expiry > Instant::now() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    pub async fn revoke(&self, token: &str) {
        self.sessions.lock().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_verification_is_exact() {
        let auth = AdminAuth::new(Some("retouch-studio"), Duration::from_secs(60));
        assert!(auth.verify_password("retouch-studio"));
        assert!(!auth.verify_password("retouch-studio "));
        assert!(!auth.verify_password(""));
    }

    #[test]
    fn unconfigured_password_rejects_everything() {
        let auth = AdminAuth::new(None, Duration::from_secs(60));
        assert!(!auth.verify_password(""));
        assert!(!auth.verify_password("anything"));
    }

    #[tokio::test]
    async fn issued_tokens_validate_until_revoked() {
        let auth = AdminAuth::new(Some("pw"), Duration::from_secs(60));
        let token = auth.issue().await;
        assert!(auth.validate(&token).await);
        assert!(!auth.validate("not-a-token").await);

        auth.revoke(&token).await;
        assert!(!auth.validate(&token).await);
    }

    #[tokio::test]
    async fn expired_tokens_stop_validating() {
        let auth = AdminAuth::new(Some("pw"), Duration::ZERO);
        let token = auth.issue().await;
        assert!(!auth.validate(&token).await);
    }
}
