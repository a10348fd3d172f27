//! Imagify command line components.
//!
//! The binary is a thin wrapper over these modules so the argument
//! parsing and the scripted demo session can be driven from tests.

pub mod cli;
pub mod demo;
pub mod logging;
