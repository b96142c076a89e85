//! Common test utilities for serpent-projects
//!
//! - Mock toolchain implementations that record calls instead of running pip
//! - Fixtures for project directories on disk

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
