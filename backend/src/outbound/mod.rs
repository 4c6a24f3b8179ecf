//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process stores, the default when no database is set
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **id**: time-ordered identifier generation
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod id;
pub mod memory;
pub mod persistence;
