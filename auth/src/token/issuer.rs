use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::signer::TokenSigner;

/// Stateless issuer for access and refresh tokens.
///
/// Holds two independent signers (one per secret) and two independent
/// expiries, both supplied at construction. Mints and verifies tokens but
/// keeps no persistent state.
pub struct TokenIssuer {
    access: TokenSigner,
    refresh: TokenSigner,
    access_validity: Duration,
    refresh_validity: Duration,
}

/// A minted token together with its expiration instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `access_secret` - Signing secret for access tokens
    /// * `refresh_secret` - Signing secret for refresh tokens
    /// * `access_validity` - Access token lifetime
    /// * `refresh_validity` - Refresh token lifetime
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_validity: Duration,
        refresh_validity: Duration,
    ) -> Self {
        Self {
            access: TokenSigner::new(access_secret),
            refresh: TokenSigner::new(refresh_secret),
            access_validity,
            refresh_validity,
        }
    }

    /// Mint a short-lived access token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn mint_access(
        &self,
        account_id: &str,
        email: &str,
        session_id: &str,
    ) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(account_id, email, session_id, self.access_validity);
        self.mint(&self.access, claims)
    }

    /// Mint a long-lived refresh token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn mint_refresh(
        &self,
        account_id: &str,
        email: &str,
        session_id: &str,
    ) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(account_id, email, session_id, self.refresh_validity);
        self.mint(&self.refresh, claims)
    }

    /// Verify an access token against the access secret.
    ///
    /// # Errors
    /// * `Expired` / `InvalidSignature` / `Malformed` - Verification failures
    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.access.decode(token)
    }

    /// Verify a refresh token against the refresh secret.
    ///
    /// # Errors
    /// * `Expired` / `InvalidSignature` / `Malformed` - Verification failures
    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.refresh.decode(token)
    }

    fn mint(&self, signer: &TokenSigner, claims: TokenClaims) -> Result<IssuedToken, TokenError> {
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| TokenError::EncodingFailed("expiry out of range".to_string()))?;
        let token = signer.encode(&claims)?;

        Ok(IssuedToken { token, expires_at })
    }
}
