//! Entity store persistence adapters.
//!
//! The bundled adapter keeps users and exercises in memory and can persist
//! them to a JSON snapshot between runs. It only translates between the
//! domain types and its storage representation; no business rules live here.

mod in_memory_entity_store;
mod snapshot_file;

pub use in_memory_entity_store::InMemoryEntityStore;
