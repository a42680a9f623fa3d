//! Unit tests for directory module
