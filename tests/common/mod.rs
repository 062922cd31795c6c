//! Common test utilities

#![allow(dead_code)]

pub mod home_mock;
pub mod test_fixtures;

pub use home_mock::MockHomeServer;
pub use test_fixtures::*;
