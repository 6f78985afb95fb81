//! JD analysis pipeline and its HTTP surface.
//!
//! Everything except `handlers` is pure: no clock, no I/O, no randomness.

pub mod catalog;
pub mod checklist;
pub mod company;
pub mod engine;
pub mod export;
pub mod handlers;
pub mod plan;
pub mod questions;
pub mod rounds;
pub mod scoring;
pub mod skills;
