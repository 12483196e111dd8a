//! Data models for the SyllaTech API

pub mod booking;
pub mod email;
pub mod submission;
pub mod visit;
