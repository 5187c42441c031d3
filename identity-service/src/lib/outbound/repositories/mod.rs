pub mod credential;
pub mod profile;
pub mod session;
pub mod transaction;

pub use credential::PostgresCredentialStore;
pub use profile::PostgresProfileStore;
pub use session::PostgresSessionStore;
pub use transaction::PostgresTransactionCoordinator;
