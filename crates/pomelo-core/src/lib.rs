//! Core data types for the Pomelo SBOM generator.
//!
//! This crate defines the fundamental types shared by all other Pomelo
//! crates: Maven coordinates, licenses, file locations and the
//! [`location::FileResolver`] trait, emitted package records with purl
//! construction, and cataloger configuration.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod coordinate;
pub mod license;
pub mod location;
pub mod package;
