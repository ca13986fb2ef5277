//! Stores

mod errors;
mod handlers;
pub(crate) mod members;

pub(crate) use handlers::*;
