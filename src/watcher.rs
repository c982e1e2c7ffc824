//! Live reload: watch configuration files and merge changes into a shared
//! store.
//!
//! The watcher reconciles three inputs into one single-threaded event loop:
//! debounced filesystem notifications, a periodic modification-time poll
//! (the fallback for platforms or paths where notifications are unreliable),
//! and a stop signal. All three drive the same reload path: rebuild from
//! every watched file, and only on full success merge into the live store
//! and invoke the registered callbacks — a partially-applied configuration
//! is never observable.
//!
//! [`start`](ConfigWatcher::start) blocks the calling thread; run it on a
//! background thread and keep a [`WatcherHandle`] to stop it:
//!
//! ```no_run
//! use std::sync::{Arc, RwLock};
//! use std::time::Duration;
//! use layerfig::{Config, ConfigWatcher};
//!
//! let store = Arc::new(RwLock::new(Config::new()));
//! let mut watcher = ConfigWatcher::new(
//!     Arc::clone(&store),
//!     Duration::from_secs(30),
//!     vec!["app.json".into()],
//! )?;
//! watcher.on_reload(|config| {
//!     println!("reloaded: {:?}", config.data());
//! });
//!
//! let handle = watcher.handle();
//! std::thread::spawn(move || watcher.start());
//! // ... later ...
//! handle.stop();
//! # Ok::<(), layerfig::ConfigError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime};

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::ConfigError;
use crate::file;
use crate::merge;
use crate::value::Mapping;

/// Window for coalescing rapid change notifications into one reload.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

type ReloadCallback = Box<dyn Fn(&Config) + Send>;

/// Everything the event loop reacts to, multiplexed onto one channel.
/// The periodic tick is the channel's receive timeout, not a message.
enum Signal {
    Notify(DebounceEventResult),
    Stop,
}

/// Stop control for a running [`ConfigWatcher`]. Cloneable and cheap;
/// calling [`stop`](WatcherHandle::stop) more than once is harmless.
#[derive(Clone)]
pub struct WatcherHandle {
    tx: Sender<Signal>,
}

impl WatcherHandle {
    /// Signal the watcher loop to exit. The loop observes the signal
    /// between iterations — a reload already in progress runs to
    /// completion first.
    pub fn stop(&self) {
        let _ = self.tx.send(Signal::Stop);
    }
}

/// Watches a set of configuration files and keeps a shared [`Config`]
/// up to date.
///
/// On each applied reload the watched files are loaded in listed order
/// (later files override earlier, the usual merge rule), the result is
/// merged into the store, its last-modified stamp is updated, and every
/// callback runs in registration order on the watcher's own thread.
pub struct ConfigWatcher {
    config: Arc<RwLock<Config>>,
    files: Vec<PathBuf>,
    interval: Duration,
    callbacks: Vec<ReloadCallback>,
    signal_tx: Sender<Signal>,
    signal_rx: Receiver<Signal>,
    // Held until the loop exits; dropping it releases the watches.
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl ConfigWatcher {
    /// Set up watches for `files` (their parent directories, deduplicated)
    /// and a polling fallback at `interval`.
    ///
    /// A directory that cannot be watched is logged and skipped — polling
    /// still covers its files. Failing to create the notification backend
    /// at all is an error.
    pub fn new(
        config: Arc<RwLock<Config>>,
        interval: Duration,
        files: Vec<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let files: Vec<PathBuf> = files.iter().map(|f| normalize(f)).collect();

        let (signal_tx, signal_rx) = mpsc::channel();
        let notify_tx = signal_tx.clone();
        let mut debouncer = new_debouncer(DEBOUNCE_WINDOW, move |events: DebounceEventResult| {
            let _ = notify_tx.send(Signal::Notify(events));
        })?;

        let mut dirs: Vec<PathBuf> = Vec::new();
        for path in &files {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        for dir in &dirs {
            match debouncer.watcher().watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => debug!("watching directory: {}", dir.display()),
                Err(e) => warn!(
                    "cannot watch {}, relying on polling: {e}",
                    dir.display()
                ),
            }
        }

        Ok(Self {
            config,
            files,
            interval,
            callbacks: Vec::new(),
            signal_tx,
            signal_rx,
            _debouncer: debouncer,
        })
    }

    /// Register a callback to run after every applied reload, in
    /// registration order. Callbacks run synchronously on the watcher's
    /// thread; a blocking callback delays subsequent event processing.
    pub fn on_reload(&mut self, callback: impl Fn(&Config) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// A handle that can stop the loop from another thread.
    pub fn handle(&self) -> WatcherHandle {
        WatcherHandle {
            tx: self.signal_tx.clone(),
        }
    }

    /// Run the event loop on the calling thread until stopped.
    ///
    /// Consuming `self` makes the lifecycle one-way: a watcher runs once
    /// and cannot be restarted after it stops.
    pub fn start(self) {
        info!(
            files = self.files.len(),
            interval_ms = self.interval.as_millis() as u64,
            "config watcher started"
        );

        loop {
            match self.signal_rx.recv_timeout(self.interval) {
                Ok(Signal::Notify(Ok(events))) => {
                    if events.iter().any(|event| self.is_watched(&event.path)) {
                        self.reload();
                    }
                }
                Ok(Signal::Notify(Err(e))) => {
                    // Notification trouble is never fatal: polling still runs.
                    error!("config watcher notification error: {e}");
                }
                Ok(Signal::Stop) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if self.any_file_changed() {
                        self.reload();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("config watcher stopped");
        // Dropping self releases the notification subscription.
    }

    fn is_watched(&self, changed: &Path) -> bool {
        let changed = normalize(changed);
        self.files.iter().any(|f| *f == changed)
    }

    /// Poll check: does any watched file have a modification time newer
    /// than the store's last applied reload?
    fn any_file_changed(&self) -> bool {
        let last = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_modified();
        self.files.iter().any(|f| modified_after(f, last))
    }

    /// Rebuild from all watched files and merge into the live store.
    ///
    /// All-or-nothing: if any file fails to load, the store is left
    /// untouched and no callbacks fire.
    fn reload(&self) {
        let mut fresh = Mapping::new();
        for path in &self.files {
            match file::load_mapping(path) {
                Ok(mapping) => merge::deep_merge(&mut fresh, mapping),
                Err(e) => {
                    error!("config reload abandoned: {e}");
                    return;
                }
            }
        }

        {
            let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
            config.merge_mapping(fresh);
            config.touch();
        }

        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        debug!("config reloaded from {} files", self.files.len());
        for callback in &self.callbacks {
            callback(&config);
        }
    }
}

fn modified_after(path: &Path, last: SystemTime) -> bool {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => mtime > last,
        Err(_) => false,
    }
}

/// Resolve to a canonical path when possible so notification paths and
/// configured paths compare equal regardless of symlinks or relative
/// spellings. Falls back to the raw path for files that don't exist yet.
fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
