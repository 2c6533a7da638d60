//! HTTP handlers for the escalations API.

pub mod escalations;
