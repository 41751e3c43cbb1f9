// tests/support/mod.rs
// Shared in-memory doubles used by several integration test binaries. Some
// symbols are unused in individual test crates; silence those warnings at
// the module level to keep CI output clean.
#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;
