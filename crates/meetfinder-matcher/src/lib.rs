//! Distance matching of a competitions table against one origin postcode.

pub mod engine;
pub mod error;
pub mod result;

pub use engine::MatchingEngine;
pub use error::QueryFailure;
pub use result::{DistanceSummary, Match, MatchResult, ResolutionStats, DISTANCE_COLUMN};
