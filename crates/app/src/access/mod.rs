//! Access Control

mod errors;
mod policy;
mod roles;
mod service;

pub use errors::AccessServiceError;
pub use policy::*;
pub use roles::*;
pub use service::*;
