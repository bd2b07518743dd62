//! Packaging helper for GN/ninja builds of the base library.
//!
//! This crate wraps one fixed packaging recipe around the external GN
//! generator and ninja build runner:
//!
//! - **Vendoring** - copy the Chromium buildtools whitelist from a
//!   source checkout, optionally zipped for distribution
//! - **Generation** - run gn once per build variant
//!   (debug/release × static/shared)
//! - **Building** - run ninja against the generated output directories
//! - **Packaging** - collect headers and built binaries into a staging
//!   tree and archive it
//!
//! # Architecture
//!
//! ```text
//! vendor ──────────────► copy / zip buildtools   (standalone modes)
//!
//! gn ──► ninja ──► collect ──► archive           (--package pipeline)
//! ```
//!
//! Control flow is strictly linear and synchronous; the first failing
//! stage aborts everything after it. The toolchain environment is an
//! explicit [`ToolchainEnv`] value applied per command, never written
//! into the process environment.

pub mod archive;
pub mod collect;
pub mod exec;
pub mod fsutil;
pub mod gn;
pub mod ninja;
pub mod package;
pub mod preflight;
pub mod toolchain;
pub mod variant;
pub mod vendor;

pub use toolchain::ToolchainEnv;
pub use variant::{expand_build_type, BuildVariant};
