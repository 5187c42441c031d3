pub mod delay;
pub mod repositories;
