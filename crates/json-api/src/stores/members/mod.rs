//! Store Members

mod errors;
mod handlers;

pub(crate) use handlers::*;
