//! Core domain types
//!
//! This module contains the structures the client reasons about: the
//! authenticated session, job listings, scraper runs and the navigable
//! routes of the application. They are shared between the HTTP client
//! (which produces them) and the CLI (which renders them).

pub mod job;
pub mod route;
pub mod scraper;
pub mod session;
pub mod user;
