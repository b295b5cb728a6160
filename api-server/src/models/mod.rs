//! Request / response models
//!
//! Prediction and feature payloads are the core crate's own types; only the
//! request bodies and the health payload live here.

pub mod request;
pub mod health;

pub use request::*;
pub use health::*;
