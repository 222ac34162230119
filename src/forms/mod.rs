//! Form payloads submitted by the catalog pages and the rules that guard them.

pub mod categories;
pub mod items;
pub mod validation;
