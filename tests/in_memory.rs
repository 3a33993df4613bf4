//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `provider_lifecycle_tests`: Register, update, remove and reload
//! - `expansion_tests`: Tool expansion through the cache

mod in_memory {
    pub mod helpers;

    mod expansion_tests;
    mod provider_lifecycle_tests;
}
