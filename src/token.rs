//! Token value and the shared token slot.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Where a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenProvenance {
    /// Extracted directly from the OS keystore.
    Direct,
    /// Delivered by the privileged helper.
    Helper,
}

/// Credential for querying the tracking network's report service.
///
/// Opaque bytes; the report service consumes the base64 transport form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    raw: Vec<u8>,
    provenance: TokenProvenance,
}

impl AuthToken {
    /// Decode raw token bytes. Empty input is not a token; absence and
    /// garbage both yield `None`.
    pub fn decode(raw: Vec<u8>, provenance: TokenProvenance) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self { raw, provenance })
    }

    pub fn provenance(&self) -> TokenProvenance {
        self.provenance
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Token text under the fixed single-byte encoding (Latin-1).
    pub fn text(&self) -> String {
        self.raw.iter().map(|&b| b as char).collect()
    }

    /// Base64 transport form sent to the report service.
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.raw)
    }
}

/// Single shared slot holding the most recently acquired token.
///
/// Cheap to clone; clones share the slot. Each successful acquisition
/// overwrites the previous token, never merges with it.
#[derive(Debug, Clone)]
pub struct TokenStore {
    tx: watch::Sender<Option<AuthToken>>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Overwrite the slot with a freshly acquired token.
    pub fn put(&self, token: AuthToken) {
        tracing::debug!(provenance = ?token.provenance(), "token stored");
        self.tx.send_replace(Some(token));
    }

    pub fn current(&self) -> Option<AuthToken> {
        self.tx.borrow().clone()
    }

    /// Subscribe to token arrivals (read-only).
    pub fn watch(&self) -> watch::Receiver<Option<AuthToken>> {
        self.tx.subscribe()
    }
}
