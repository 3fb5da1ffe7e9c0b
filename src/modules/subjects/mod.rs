//! Subjects taught at the school. Anyone signed in can list them; only
//! admins can add one.

pub mod controller;
pub mod router;
pub mod service;
