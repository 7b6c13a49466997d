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
#![allow(clippy::module_name_repetitions)]

//! Reactive color-scheme preference state for the Hue front-end.
//!
//! Layout: `observable.rs` (single-threaded observable cell), `scheme.rs`
//! (`ColorSchemeMode`), `store.rs` (`PreferenceStore` context object),
//! `config.rs` (environment-sourced initial values), `error.rs`.

pub mod config;
pub mod error;
pub mod observable;
pub mod scheme;
pub mod store;

pub use config::{COLOR_SCHEME_ENV, DARK_THEME_ENV, PreferenceConfig};
pub use error::{PreferenceError, PreferenceResult};
pub use observable::{Observable, Subscription};
pub use scheme::ColorSchemeMode;
pub use store::{PreferenceSnapshot, PreferenceStore};
