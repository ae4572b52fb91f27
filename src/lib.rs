//! Rangde Library
//!
//! This library provides the core of the Rangde token engine: contrast-driven
//! colour scale generation, a nine-layer design-token alias pipeline, alias
//! graph validation and a rule engine for bulk aliasing.

// Module declarations
pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod workspace;
