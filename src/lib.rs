//! Course-schedule extraction for the university registration portal.
//!
//! Scrapes the offered-courses grid and the manual-entry slots of a captured
//! registration page, normalizes everything into [`model::CourseSection`]
//! records, dedups them, and hands the list to the schedule viewer through a
//! one-shot readiness handshake.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod handoff;
pub mod logging;
pub mod merge;
pub mod model;
pub mod schedule;
