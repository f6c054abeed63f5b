use std::sync::{Arc, RwLock};

use serde::Serialize;
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;

use crate::storage::{KvStore, AUTH_KEY};

/// A SHA-256 digest of an admin credential.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn of(input: &str) -> Self {
        let hash = Sha256::digest(input.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    pub fn from_hex(value: &str) -> Result<Self, String> {
        let bytes = hex::decode(value.trim()).map_err(|e| format!("Invalid digest hex: {e}"))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| "Digest must be 32 bytes (64 hex characters)".to_string())?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn matches(&self, other: &Digest) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Digest(..)")
    }
}

/// Granted credential. The hex digest doubles as the sync bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthOutcome {
    Granted,
    Denied,
}

/// Shared-secret capability gate for board mutations.
///
/// This only decides whether the admin surface is unlocked; the remote store
/// must still authorize pushes itself.
pub struct SessionGate {
    target: Option<Digest>,
    session: Arc<dyn KvStore>,
    granted: RwLock<Option<Credential>>,
}

impl SessionGate {
    pub fn new(target: Option<Digest>, session: Arc<dyn KvStore>) -> Self {
        Self {
            target,
            session,
            granted: RwLock::new(None),
        }
    }

    pub fn authenticate(&self, raw: &str) -> AuthOutcome {
        let Some(target) = self.target else {
            tracing::warn!("Admin login attempted but no admin digest is configured");
            return AuthOutcome::Denied;
        };

        let digest = Digest::of(raw);
        if !digest.matches(&target) {
            tracing::info!("Admin login denied");
            return AuthOutcome::Denied;
        }

        let credential = Credential(digest.to_hex());
        if let Err(e) = self.session.set(AUTH_KEY, credential.as_str()) {
            tracing::warn!("Failed to cache session credential: {e}");
        }
        self.set_granted(Some(credential));
        tracing::info!("Admin login granted");
        AuthOutcome::Granted
    }

    /// Restore a credential cached earlier in this session. Stale values are dropped.
    pub fn restore(&self) -> bool {
        let cached = match self.session.get(AUTH_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("Failed to read session credential: {e}");
                return false;
            }
        };

        let valid = match (self.target, Digest::from_hex(&cached)) {
            (Some(target), Ok(digest)) => digest.matches(&target),
            _ => false,
        };

        if !valid {
            tracing::info!("Discarding stale session credential");
            if let Err(e) = self.session.remove(AUTH_KEY) {
                tracing::warn!("Failed to clear session credential: {e}");
            }
            return false;
        }

        self.set_granted(Some(Credential(cached.trim().to_lowercase())));
        tracing::info!("Admin session restored");
        true
    }

    pub fn revoke(&self) {
        if let Err(e) = self.session.remove(AUTH_KEY) {
            tracing::warn!("Failed to clear session credential: {e}");
        }
        self.set_granted(None);
    }

    pub fn credential(&self) -> Option<Credential> {
        self.granted.read().ok().and_then(|g| g.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.credential().is_some()
    }

    /// Check a bearer token presented by a caller against the granted credential.
    pub fn verify(&self, token: &str) -> Option<Credential> {
        let granted = self.credential()?;
        let token = token.trim().to_ascii_lowercase();
        let matches: bool = token.as_bytes().ct_eq(granted.as_str().as_bytes()).into();
        matches.then_some(granted)
    }

    fn set_granted(&self, credential: Option<Credential>) {
        match self.granted.write() {
            Ok(mut granted) => *granted = credential,
            Err(poisoned) => *poisoned.into_inner() = credential,
        }
    }
}
