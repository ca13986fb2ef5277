//! Shared test infrastructure.

pub(crate) mod helpers;

pub(crate) use context::{TEST_JWT_SECRET, TestContext};
