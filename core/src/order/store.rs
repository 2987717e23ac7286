//! Durable shared order list plus the cross-process reposition signal.
//!
//! The order file is a JSON array of widget names, nothing else; writes go
//! through a temp file in the same directory followed by an atomic rename,
//! so a reader sees either the old or the new list, never a torn one.
//! There is no lock: reorders are human-paced and every reader re-derives
//! its own geometry, so last-writer-wins on the full replace is adequate.
//!
//! The broadcast is a rewrite of a nonce file in the store directory;
//! peers watch the directory and treat any signal-file change as "re-read
//! shared state and re-render".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

pub const ORDER_FILE: &str = "order.json";
pub const SIGNAL_FILE: &str = "reposition.signal";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] io::Error),
    #[error("order serialization: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("signal watch: {0}")]
    Watch(#[from] notify::Error),
    #[error("no data directory available")]
    NoDataDir,
}

/// Durable order list shared by all cooperating widget processes.
pub trait OrderStore {
    /// Current persisted order. Malformed or missing data reads as empty;
    /// store trouble must never take a widget down.
    fn read(&self) -> Vec<String>;

    /// Atomic full replace.
    fn write(&self, names: &[String]) -> Result<(), StoreError>;

    /// Fire-and-forget signal telling every peer (including this process)
    /// to recompute its slot from current geometry.
    fn broadcast(&self) -> Result<(), StoreError>;
}

/// File-backed store in a directory shared by every widget process.
pub struct FileOrderStore {
    dir: PathBuf,
    nonce: AtomicU64,
}

impl FileOrderStore {
    /// Open (creating if needed) a store in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            nonce: AtomicU64::new(0),
        })
    }

    /// Open the store at the default per-user location.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
        Self::open(base.join("ledge"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn order_path(&self) -> PathBuf {
        self.dir.join(ORDER_FILE)
    }

    fn signal_path(&self) -> PathBuf {
        self.dir.join(SIGNAL_FILE)
    }
}

impl OrderStore for FileOrderStore {
    fn read(&self) -> Vec<String> {
        match fs::read(self.order_path()) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "malformed order file, treating as empty");
                Vec::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "order file unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, names: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_vec(names)?;
        // Per-process temp name: concurrent writers race on the rename,
        // never on the temp file itself.
        let tmp = self
            .dir
            .join(format!("{ORDER_FILE}.{}.tmp", std::process::id()));
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, self.order_path())?;
        tracing::debug!(count = names.len(), "order file replaced");
        Ok(())
    }

    fn broadcast(&self) -> Result<(), StoreError> {
        let n = self.nonce.fetch_add(1, Ordering::Relaxed);
        fs::write(
            self.signal_path(),
            format!("{} {n}", std::process::id()),
        )?;
        Ok(())
    }
}

/// Reposition signals from peer processes, delivered to the single event
/// thread. The watcher runs on its own notify-owned thread and only feeds
/// the channel.
pub struct RepositionSignals {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl RepositionSignals {
    pub fn subscribe(store: &FileOrderStore) -> Result<Self, StoreError> {
        let (tx, rx) = mpsc::channel(16);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| {
                let Ok(event) = res else { return };
                let is_signal = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().is_some_and(|n| n == SIGNAL_FILE));
                if is_signal
                    && matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                {
                    let _ = tx.blocking_send(());
                }
            },
            notify::Config::default(),
        )?;

        // Watch the directory, not the file: the signal file may not exist
        // until the first broadcast.
        watcher.watch(store.dir(), RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll from the event thread. Drains the channel so a
    /// burst of signals coalesces into one reposition.
    pub fn poll(&mut self) -> bool {
        let mut signalled = false;
        while self.rx.try_recv().is_ok() {
            signalled = true;
        }
        signalled
    }
}
