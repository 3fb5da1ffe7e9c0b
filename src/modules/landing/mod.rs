//! `GET /`: sends each caller to their area, or to sign-in.

pub mod controller;
pub mod router;
