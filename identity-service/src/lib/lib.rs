pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::credential;
pub use domain::profile;
pub use domain::session;
pub use domain::transaction;
pub use outbound::repositories;
