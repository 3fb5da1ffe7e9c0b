//! Classes, filtered by who is asking.

pub mod controller;
pub mod router;
pub mod scope;
pub mod service;
