//! JobScout Core
//!
//! Core types shared by the JobScout client and CLI.
//!
//! This crate contains:
//! - Domain types: Sessions, users, job records, scraper runs and routes
//! - DTOs: Request and response bodies exchanged with the job-listing API

pub mod domain;
pub mod dto;
