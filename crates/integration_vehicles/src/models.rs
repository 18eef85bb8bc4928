//! vPIC response models

use serde::{Deserialize, Serialize};

/// Envelope returned by the vPIC manufacturer listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerList {
    /// Number of results in this response
    #[serde(rename = "Count", default)]
    pub count: u64,

    /// Human-readable status message
    #[serde(rename = "Message", default)]
    pub message: String,

    /// Manufacturer records
    #[serde(rename = "Results", default)]
    pub results: Vec<Manufacturer>,
}

/// One vehicle manufacturer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    /// vPIC manufacturer identifier
    #[serde(rename = "Mfr_ID", default)]
    pub id: u64,

    /// Registered manufacturer name
    #[serde(rename = "Mfr_Name", default)]
    pub name: String,

    /// Common (brand) name, if any
    #[serde(rename = "Mfr_CommonName", default)]
    pub common_name: Option<String>,

    /// Country of registration
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
}
