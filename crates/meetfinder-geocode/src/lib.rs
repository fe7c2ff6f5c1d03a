//! Postcode geocoding for meetfinder.
//!
//! [`PostcodesClient`] talks to a postcodes.io-compatible endpoint;
//! [`CoordinateResolver`] sits in front of any [`PostcodeLookup`] and
//! memoizes results (including failures) for the lifetime of one run.

pub mod client;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod types;

pub use client::PostcodesClient;
pub use error::{GeocodeError, LookupFailure};
pub use lookup::PostcodeLookup;
pub use resolver::{normalize_postcode, CoordinateResolver};
