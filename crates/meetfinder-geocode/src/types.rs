//! Response types for the postcodes.io `GET /postcodes/{postcode}` endpoint.
//!
//! Only the fields needed for geocoding are modelled; everything else in the
//! result object is ignored.

use serde::Deserialize;

/// Top-level envelope: `{"status": 200, "result": {...}}`.
#[derive(Debug, Deserialize)]
pub struct PostcodeEnvelope {
    pub status: u16,
    #[serde(default)]
    pub result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct PostcodeResult {
    /// Null for postcodes without a grid reference (e.g. some PO boxes).
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}
