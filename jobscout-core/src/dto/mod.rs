//! Data Transfer Objects for the job-listing API
//!
//! Request and response bodies exactly as they travel over the wire. The
//! client converts them into domain types at the boundary.

pub mod auth;
pub mod job;
pub mod scraper;
