//! Users

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::UsersServiceError;
pub(crate) use repository::PgUsersRepository;
pub use service::*;
