//! Storage port traits.

mod persistence;

pub use persistence::PersistencePort;
