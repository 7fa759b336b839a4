//! Service layer: artist and song use cases on top of the `models` crate.
//! - One transaction per call; writes commit only on success.
//! - Field validation lives in `models`; lookups that miss become `NotFound`.

pub mod errors;
pub mod domain;
pub mod tx;
pub mod artist_service;
pub mod song_service;
#[cfg(test)]
pub mod test_support;
