//! Step definitions for the homework bot BDD tests

pub mod polling_steps;
