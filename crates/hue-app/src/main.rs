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

//! Binary entrypoint that loads preferences from the environment and reports
//! the resulting state.

use hue_app::{AppResult, run_app};

/// Bootstraps the preference session and logs its initial state.
fn main() -> AppResult<()> {
    run_app()
}
