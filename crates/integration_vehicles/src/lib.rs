//! NHTSA vPIC vehicle data integration
//!
//! Client for the NHTSA Product Information Catalog Vehicle Listing API
//! (<https://vpic.nhtsa.dot.gov/api/>). Provides the full manufacturer list
//! without requiring an API key.

mod client;
mod models;

pub use client::{VehiclesClient, VehiclesConfig, VehiclesError, VpicClient};
pub use models::{Manufacturer, ManufacturerList};
