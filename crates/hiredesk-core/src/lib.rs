//! Domain types and the backend API seam for the hiredesk recruiting
//! dashboard.
//!
//! This crate is free of HTTP and terminal dependencies. The backend that owns
//! candidates, interviews and documents is reached only through the
//! [`api::RecruitingApi`] trait.

pub mod api;
pub mod candidate;
pub mod dashboard;
pub mod document;
pub mod draft;
pub mod error;
pub mod filter;
pub mod interview;
pub mod user;

pub use error::{ApiError, DraftError, Result};
