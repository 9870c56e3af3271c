//! Use cases for the robomart delivery backend.
//!
//! Workflows orchestrate the domain model through abstract ports; the
//! infrastructure crate provides the concrete adapters. The central
//! workflow is [`workflows::delivery::generate_delivery_plan`], which
//! drives one robot's plan request end-to-end inside a storage
//! transaction.

pub mod errors;
pub mod ports;
pub mod workflows;
