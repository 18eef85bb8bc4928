//! ipify public IP integration
//!
//! Minimal client for <https://www.ipify.org/>, which returns the caller's
//! public IP address as a one-field JSON object.

mod client;

pub use client::{IpClient, IpConfig, IpError, IpifyClient, PublicIp};
