//! Domain entities of the catalog, free of persistence and HTTP concerns.

pub mod category;
pub mod item;
pub mod types;
