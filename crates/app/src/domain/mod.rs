//! Hilo Domain Concerns

mod amounts;
pub mod memberships;
pub mod orders;
pub mod products;
pub mod stores;
pub mod users;
