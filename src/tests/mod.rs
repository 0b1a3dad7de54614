//! Integration-style tests for the watchface host binary.

mod watchface_tests;
