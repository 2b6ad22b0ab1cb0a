//! # Signing Identity
//!
//! The authority keypair that signs and pays for anchor transactions.
//! Resolved exactly once, at startup; immutable and shared afterwards.
//!
//! ## Resolution Order
//!
//! 1. Key file path (must exist, JSON array of 64 bytes)
//! 2. Inline secret (JSON array of 64 bytes, or base58 string)
//! 3. Freshly generated keypair, with a warning

use crate::config::IdentityConfig;
use crate::domain::errors::IdentityError;
use shared_crypto::{Address, Ed25519KeyPair, Ed25519Signature};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Where the identity came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    KeyFile(PathBuf),
    Inline,
    /// Process-local, lost on restart.
    Ephemeral,
}

/// The process-wide signing authority.
#[derive(Debug)]
pub struct SigningIdentity {
    keypair: Ed25519KeyPair,
    source: IdentitySource,
}

impl SigningIdentity {
    /// Resolve from configuration. Errors here are fatal startup errors.
    pub fn resolve(config: &IdentityConfig) -> Result<Self, IdentityError> {
        if let Some(path) = &config.keypair_path {
            let path = expand_home(path);
            let keypair = load_key_file(&path)?;
            info!(issuer = %keypair.address(), path = %path.display(), "[sx-02] Loaded ledger keypair from file");
            return Ok(Self::from_keypair(keypair, IdentitySource::KeyFile(path)));
        }

        if let Some(secret) = &config.keypair_inline {
            let keypair = parse_inline_secret(secret)?;
            info!(issuer = %keypair.address(), "[sx-02] Loaded ledger keypair from inline secret");
            return Ok(Self::from_keypair(keypair, IdentitySource::Inline));
        }

        let identity = Self::ephemeral();
        warn!(
            issuer = %identity.address(),
            "[sx-02] No ledger keypair configured; generated an ephemeral keypair. \
             Attestations signed with it cannot be tied to a stable issuer after restart"
        );
        Ok(identity)
    }

    /// Wrap an existing keypair.
    pub fn from_keypair(keypair: Ed25519KeyPair, source: IdentitySource) -> Self {
        Self { keypair, source }
    }

    /// Generate a process-local keypair.
    pub fn ephemeral() -> Self {
        Self::from_keypair(Ed25519KeyPair::generate(), IdentitySource::Ephemeral)
    }

    /// Public address (issuer and fee payer).
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// Sign a serialized message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        self.keypair.sign(message)
    }

    pub fn source(&self) -> &IdentitySource {
        &self.source
    }

    pub fn is_ephemeral(&self) -> bool {
        self.source == IdentitySource::Ephemeral
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

fn load_key_file(path: &Path) -> Result<Ed25519KeyPair, IdentityError> {
    if !path.exists() {
        return Err(IdentityError::KeyFileNotFound(path.to_path_buf()));
    }
    let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
        IdentityError::KeyFileUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?);
    let bytes = parse_byte_array(&contents).map_err(|reason| IdentityError::MalformedKeyFile {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(Ed25519KeyPair::from_keypair_slice(&bytes)?)
}

fn parse_inline_secret(secret: &str) -> Result<Ed25519KeyPair, IdentityError> {
    let trimmed = secret.trim();
    let bytes = if trimmed.starts_with('[') {
        parse_byte_array(trimmed).map_err(IdentityError::MalformedInlineSecret)?
    } else {
        let decoded = bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| IdentityError::MalformedInlineSecret(format!("not base58: {e}")))?;
        let decoded = Zeroizing::new(decoded);
        if decoded.len() != 64 {
            return Err(IdentityError::MalformedInlineSecret(format!(
                "base58 secret decodes to {} bytes, expected 64",
                decoded.len()
            )));
        }
        decoded
    };
    Ok(Ed25519KeyPair::from_keypair_slice(&bytes)?)
}

/// Parse `[n, n, ...]` with exactly 64 entries in 0..=255.
fn parse_byte_array(text: &str) -> Result<Zeroizing<Vec<u8>>, String> {
    let bytes: Vec<u8> = serde_json::from_str(text.trim()).map_err(|e| e.to_string())?;
    let bytes = Zeroizing::new(bytes);
    if bytes.len() != 64 {
        return Err(format!("expected 64 bytes, found {}", bytes.len()));
    }
    Ok(bytes)
}
