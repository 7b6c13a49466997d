#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Hue application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (environment loading and session wiring),
//! `error.rs` (application error type).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level errors.
pub mod error;

pub use bootstrap::{BootstrapDependencies, PreferenceSession, run_app, run_app_with};
pub use error::{AppError, AppResult};
