//! # eicr-schema
//!
//! JSON Schema generation, validation, and registry for eicr.
//!
//! Types are defined in `eicr-core` with `#[derive(JsonSchema)]`. This crate
//! collects their schemas by name, validates incoming JSON against them, and
//! backs the `eicr schema` export command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
