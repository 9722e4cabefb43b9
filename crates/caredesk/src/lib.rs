//! CareDesk domain library.
//!
//! Everything the hospital management screens need server-side: typed records
//! for the patient, doctor, billing, prescription, and staff-schedule
//! collections, the list query engine that drives filtered views and summary
//! statistics, reporting, and a CSV roster importer for legacy exports.

pub mod config;
pub mod error;
pub mod query;
pub mod registry;
pub mod reporting;
pub mod roster;
pub mod telemetry;
