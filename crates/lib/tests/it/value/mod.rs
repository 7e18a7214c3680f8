//! Value model integration tests
//!
//! Covers the Value sum type and its conversions, plus the
//! insertion-ordered Map with its dot-path operations.

mod map_tests;
