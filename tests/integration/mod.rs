//! Integration test suite for muruby
//!
//! These tests drive the compiled binary against fixture repositories in
//! temporary directories. Nothing is downloaded: upstream sources are local
//! git repositories and the SDL2 install is simulated, so only `git` is
//! needed. Tests that need it skip themselves when it is missing.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cache**: `muruby cache path|list|clean`
//! - **create**: the `create` pipeline, preconditions and re-runs

#[path = "../common/mod.rs"]
mod common;

mod cache;
mod create;
