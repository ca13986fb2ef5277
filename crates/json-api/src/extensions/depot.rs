//! Depot helper extensions.

use std::any::Any;

use hilo_app::access::Actor;
use salvo::prelude::{Depot, StatusError};

const ACTOR_DEPOT_KEY: &str = "actor";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the authenticated caller for downstream handlers.
    fn insert_actor(&mut self, actor: Actor);

    fn actor_or_401(&self) -> Result<Actor, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.insert(ACTOR_DEPOT_KEY, actor);
    }

    fn actor_or_401(&self) -> Result<Actor, StatusError> {
        self.get::<Actor>(ACTOR_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
