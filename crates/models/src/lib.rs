//! Storage layer: sea-orm entities for artists and songs, the field rules
//! they must satisfy, and the audited create/update paths.

pub mod errors;
pub mod db;
pub mod validation;
pub mod audit;
pub mod artist;
pub mod song;

#[cfg(test)]
mod tests;
