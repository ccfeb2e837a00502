//! Configurations for test cases and examples. Not intended for actual use.

pub mod adventure_works;
