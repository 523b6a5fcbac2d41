//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the HTTPS-only
//! request-token, access-token, and authorization endpoints, the signature method, and how
//! protocol parameters travel (Authorization header or query string). `upwork` ships a
//! ready-made descriptor for Upwork's OAuth 1.0a endpoints.

pub mod descriptor;
pub mod upwork;

pub use descriptor::*;
