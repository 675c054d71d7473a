pub mod domain;

pub use domain::JoinError;
