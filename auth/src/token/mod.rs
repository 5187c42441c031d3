pub mod claims;
pub mod errors;
pub mod issuer;
pub mod signer;

pub use claims::TokenClaims;
pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use signer::TokenSigner;
