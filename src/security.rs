use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with bcrypt
///
/// Every call draws a fresh random salt, which bcrypt embeds in the returned
/// digest together with the cost, so the digest alone is enough to verify.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a password against a stored bcrypt digest
///
/// A malformed digest is reported as a mismatch rather than an error.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match bcrypt::verify(password, digest) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password digest could not be parsed: {}", e);
            false
        }
    }
}

// =============================================================================
// Signed Tokens
// =============================================================================

/// HMAC-SHA256 keyed with the application secret
pub type SigningKey = Hmac<Sha256>;

/// Build the signing key from the configured secret
pub fn signing_key(secret: &str) -> Result<SigningKey, InvalidLength> {
    SigningKey::new_from_slice(secret.as_bytes())
}

/// Compute the hex-encoded HMAC-SHA256 of `data`
pub fn sign(data: &str, key: &SigningKey) -> String {
    let mut mac = key.clone();
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify HMAC-SHA256 signature
///
/// # Arguments
/// * `data` - The data that was signed
/// * `signature` - The hex-encoded HMAC signature
/// * `key` - The signing key derived from the application secret
pub fn verify_hmac(data: &str, signature: &str, key: &SigningKey) -> bool {
    let mut mac = key.clone();
    mac.update(data.as_bytes());

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::debug!("Invalid hex signature format");
            return false;
        }
    };

    // Constant-time comparison
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Encode a session token for `user_id`: `<user_id>.<signature>`
pub fn encode_session_token(user_id: i64, key: &SigningKey) -> String {
    let payload = user_id.to_string();
    let signature = sign(&payload, key);
    format!("{payload}.{signature}")
}

/// Decode and authenticate a session token
///
/// Returns `None` for anything that is not a well-formed token signed with
/// `key`.
pub fn decode_session_token(token: &str, key: &SigningKey) -> Option<i64> {
    let (payload, signature) = token.split_once('.')?;

    if !verify_hmac(payload, signature, key) {
        tracing::warn!("Rejected session token with invalid signature");
        return None;
    }

    payload.parse().ok()
}
