//! Workspace-level integration test package
//!
//! The end-to-end suites live in `tests/`; member crates are exercised
//! through their public APIs only.
