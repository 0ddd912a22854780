//! Integration tests for the dip crates.
//!
//! End-to-end checks that raw input, the operations and PNG output work
//! together the way the command-line exercises use them.
