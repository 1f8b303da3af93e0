//! # Reserve-Pool Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per component
//! │   ├── rp_01_curve_engine.rs
//! │   └── rp_02_reserve_ledger.rs
//! │
//! └── integration/      # Cross-component flows
//!     ├── harness.rs    # Fully wired in-memory pool
//!     ├── flows.rs
//!     ├── properties.rs
//!     ├── event_flow.rs
//!     └── telemetry.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rp-tests
//!
//! # By category
//! cargo test -p rp-tests integration::flows
//! cargo test -p rp-tests integration::properties
//!
//! # Benchmarks
//! cargo bench -p rp-tests
//! ```
