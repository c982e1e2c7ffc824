//! Layered, live-reloading configuration for Rust applications. Point at
//! your sources, merge them by precedence, read typed values by dot-path.
//!
//! Layerfig ingests configuration fragments from structured files (JSON and
//! TOML), prefixed environment variables, and programmatic overrides,
//! deep-merges them into one nested tree, and serves reads through typed
//! accessors with lazy coercion. An optional watcher keeps the tree
//! up to date as the backing files change.
//!
//! ```no_run
//! use layerfig::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_file("/etc/myapp/defaults.json")
//!     .with_file("myapp.toml")
//!     .with_env("MYAPP")
//!     .build()?;
//!
//! let host = config.get_string("database.host")?;
//! let port = config.get_int("database.port")?;
//! # Ok::<(), layerfig::ConfigError>(())
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! First file added           lowest priority
//!        ↑ overridden by
//! Later files                in call order
//!        ↑ overridden by
//! Environment vars           PREFIX__SECTION__KEY
//!        ↑ overridden by
//! Overrides                  .with_value()
//! ```
//!
//! Every layer is **sparse**: it only specifies the keys it wants to
//! override, and where both sides hold a nested mapping the mappings merge
//! key-by-key instead of replacing wholesale. A config file doesn't need to
//! be complete, an env var can target a single key, and an override touches
//! exactly one path.
//!
//! # Dot-paths and coercion
//!
//! Values are addressed by dot-separated paths (`"database.url"`) walked
//! through the nested tree. The typed getters coerce what they find:
//! anything renders as a string, numeric strings parse as integers, and a
//! small truthy/falsy vocabulary (`yes`, `on`, `0`, ...) parses as
//! booleans. Environment values are always stored as raw text and coerced
//! on read, so `MYAPP__PORT=8080` behaves like a number where one is
//! wanted.
//!
//! Lookups fail with precise errors: a missing key, an intermediate
//! segment that isn't a mapping, or a value that won't coerce each carry
//! the offending key. `Config::validate` checks a list of required keys
//! and reports the first failure. An explicit `null` in a source counts as
//! present — validation is about presence, not shape.
//!
//! # Caching
//!
//! [`CachedConfig`] decorates a shared store with a flat path → value
//! cache, so hot keys are resolved and coerced once rather than on every
//! read. The cache is deliberately oblivious to store mutations; whoever
//! reloads the store invalidates, wholesale or per key.
//!
//! # Live reload
//!
//! [`ConfigWatcher`] observes a list of files through filesystem
//! notifications (debounced) with a modification-time poll as fallback,
//! and on each change rebuilds the whole file layer before touching the
//! live store — one bad file abandons the reload, so readers never see a
//! partially-applied configuration. Registered callbacks run after each
//! applied reload, in order, with the updated store.
//!
//! The store shared with a watcher lives behind `Arc<RwLock<Config>>`:
//! readers take the read lock, reloads take the write lock. The watcher
//! loop runs on whatever thread calls [`start`](ConfigWatcher::start) and
//! stops via [`WatcherHandle::stop`].
//!
//! # Errors
//!
//! All fallible operations return [`ConfigError`]. The builder collects
//! per-source failures and reports them together from `build()`; watcher
//! reloads and notification hiccups are logged via `tracing` and never
//! kill the watch loop.

pub mod error;
pub mod value;

mod builder;
mod cache;
mod coerce;
mod config;
mod env;
mod file;
pub(crate) mod merge;
mod path;
mod watcher;

pub use builder::ConfigBuilder;
pub use cache::CachedConfig;
pub use config::Config;
pub use error::ConfigError;
pub use file::SourceFormat;
pub use value::{Mapping, Value};
pub use watcher::{ConfigWatcher, WatcherHandle};
