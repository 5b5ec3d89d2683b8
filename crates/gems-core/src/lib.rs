//! Core types and trait definitions for the hidden-gems service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the record model, the [`store::GemStore`] abstraction, the duplicate
//! detector, and the submission flow that ties them together.

pub mod duplicate;
pub mod error;
pub mod gem;
pub mod service;
pub mod store;
pub mod submission;

pub use error::{Error, Result, ValidationError};
