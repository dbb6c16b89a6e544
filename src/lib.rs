//! matricula - student and enrollment record-keeping service
//!
//! A REST backend over a relational store: pure validation layer,
//! persistence gateway, record services, and an axum HTTP boundary.

pub mod cli;
pub mod config;
pub mod http;
pub mod observability;
pub mod schema;
pub mod service;
pub mod store;
