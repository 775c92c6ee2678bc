//! # Token-Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # end-to-end lifecycle scenarios
//!     └── properties.rs   # randomized property sweeps
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-tests
//!
//! # By category
//! cargo test -p ledger-tests integration::scenarios::
//! cargo test -p ledger-tests integration::properties::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
