//! Direct messages and the read-state gate.

pub mod controller;
pub mod repository;
pub mod router;
pub mod service;
