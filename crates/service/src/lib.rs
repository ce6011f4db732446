//! Service layer for stored results.
//! - Upsert by natural key, windowed listing, lookup and removal by id.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod pagination;
pub mod db;
pub mod results;
#[cfg(test)]
pub mod test_support;
