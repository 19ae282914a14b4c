//! Utility functions and types for the SIM reader CLI

pub mod display;
pub mod reader;
