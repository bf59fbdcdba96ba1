//! Presence override pass: ports, normalization, decision and orchestration

pub mod decision;
pub mod normalizer;
pub mod ports;
pub mod service;
