//! HTTP handlers, one module per resource.

pub mod application;
pub mod auth;
pub mod message;
pub mod project;
