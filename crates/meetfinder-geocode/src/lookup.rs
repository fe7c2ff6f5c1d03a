use std::future::Future;

use meetfinder_core::Coordinate;

use crate::error::GeocodeError;

/// Capability to turn an already-normalized postcode into a coordinate.
///
/// Implemented by [`crate::PostcodesClient`] for the live service; tests
/// substitute deterministic stubs.
pub trait PostcodeLookup {
    fn lookup(
        &self,
        postcode: &str,
    ) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}
