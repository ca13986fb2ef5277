//! Shared application domain, access control and persistence modules.

pub mod access;
pub mod auth;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;
pub mod uuids;

#[cfg(test)]
mod test;
