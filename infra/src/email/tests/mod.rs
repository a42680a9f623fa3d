//! Unit tests for email module

#[cfg(test)]
pub mod adapter_tests;
