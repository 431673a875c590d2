//! # OCMS Core Test Suite
//!
//! Unified test crate.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks for the containers
//! └── src/integration/  # Cross-crate flows through the core container
//!     ├── fixtures.rs
//!     ├── course_flows.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ocms-tests
//! cargo test -p ocms-tests integration::concurrency
//! cargo bench -p ocms-tests
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
