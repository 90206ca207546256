//! alphagrow-test - Regression test framework for alphagrow
//!
//! Supports two modes, chosen with the `REGTEST_MODE` environment
//! variable:
//!
//! - **Compare** (default): checks run in memory
//! - **Display**: intermediate images are also written under
//!   `tests/regout` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use alphagrow_test::RegParams;
//!
//! let mut rp = RegParams::new("dilate");
//! rp.compare_values(5.0, opaque as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Synthetic inputs come from [`fixtures`].

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // alphagrow-test is at crates/alphagrow-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
