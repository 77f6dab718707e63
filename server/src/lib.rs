//! Heartline Admin Server
//!
//! Role-gated admin console for the Heartline dating app. Every page and
//! action is checked against the session's permission context, and every
//! performed action is reported to the audit sink.

pub mod api;
pub mod audit;
pub mod config;
pub mod dashboard;
pub mod permissions;
pub mod session;
