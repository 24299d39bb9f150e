//! Application services: target fan-out, per-instance collection, and
//! result aggregation.

pub mod aggregate;
pub mod orchestrator;
#[cfg(test)]
pub(crate) mod test_support;
pub mod worker;

pub use aggregate::aggregate_reports;
pub use orchestrator::Orchestrator;
pub use worker::TargetWorker;
