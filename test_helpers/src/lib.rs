//! Test helpers shared across crates.
//!
//! [`cwd`] serialises changes to the process working directory and
//! [`tree`] builds throwaway project layouts on disk.

pub mod cwd;
pub mod tree;
