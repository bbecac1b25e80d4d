//! Services admin server library

pub mod api;
pub mod category;
pub mod config;
pub mod db;
pub mod metrics_exporter;
pub mod supervisor;
pub mod validation;

pub mod test_helpers;
