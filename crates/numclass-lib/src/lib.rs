//! Number classification library entry points.
//!
//! This crate exposes the pure classification functions (primality, perfection,
//! Armstrong property, digit sum, parity) and the fact provider used to attach a
//! trivia sentence to each classification. Higher-level consumers (the HTTP
//! service) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod classify;
pub mod error;
pub mod fact;

pub use classify::{
    classify_properties, digit_sum, is_armstrong, is_perfect, is_prime, Classification, Property,
};
pub use error::{Error, Result};
pub use fact::{
    CachedFactProvider, FactClientConfig, FactOutcome, FactProvider, FunFact, NumbersApiClient,
    DEFAULT_NUMBERS_API_BASE_URL, FACT_FETCH_ERROR, NO_FACT_AVAILABLE,
};
