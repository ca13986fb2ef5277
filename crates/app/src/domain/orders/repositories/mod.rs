//! Order Repositories

mod items;
mod orders;
mod sequences;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::{OrderChanges, PgOrdersRepository};
pub(crate) use sequences::PgOrderSequencesRepository;
