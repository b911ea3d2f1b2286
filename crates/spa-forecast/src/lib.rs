//! Monthly financial projections for an appointment-based spa.
//!
//! [`projection::ProjectionEngine`] turns an [`assumptions::AssumptionRecord`] into a
//! [`projection::ProjectionResult`]. The remaining modules are the service shell around
//! it: catalog import, the input-editing layer, pt-BR formatting, summaries, static
//! reference data, configuration, telemetry and the HTTP router.

pub mod assumptions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod projection;
pub mod reference;
pub mod report;
pub mod telemetry;

pub use assumptions::{AssumptionPatch, AssumptionRecord};
pub use catalog::ServiceCatalog;
pub use projection::{compute, ProjectionEngine, ProjectionResult};
