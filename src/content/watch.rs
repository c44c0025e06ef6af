//! Content directory watcher.
//!
//! Watcher → Debouncer (pure timing) → `ContentLoader::refresh`
//!
//! Any content change reloads the whole snapshot; there is no per-file
//! invalidation.
//!
//! A content directory that does not exist yet is covered by a
//! non-recursive watch on its nearest existing ancestor. Watches are
//! re-synced before every reload, so a directory created (or recreated)
//! while serving gets its recursive watch.

use super::{ContentLoader, ContentStore};
use crate::{debug, log};
use anyhow::Result;
use crossbeam::channel::{self, Receiver};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::{FxHashMap, FxHashSet};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;

/// Poll interval while waiting for the debounce window to close.
const TICK_MS: u64 = 100;

/// Watch the loader's directories and refresh `store` on change.
///
/// The thread exits when `shutdown` fires or its sender is dropped.
pub fn spawn_watcher(
    loader: ContentLoader,
    store: Arc<ContentStore>,
    shutdown: Receiver<()>,
) -> Result<JoinHandle<()>> {
    let (tx, rx) = channel::unbounded::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })?;

    let mut watched = FxHashMap::default();
    sync_watches(&mut watcher, loader.dirs(), &mut watched);

    Ok(thread::spawn(move || {
        run(watcher, watched, &rx, &shutdown, &loader, &store);
    }))
}

fn run(
    mut watcher: RecommendedWatcher,
    mut watched: FxHashMap<PathBuf, RecursiveMode>,
    events: &Receiver<notify::Result<Event>>,
    shutdown: &Receiver<()>,
    loader: &ContentLoader,
    store: &ContentStore,
) {
    let mut debouncer = Debouncer::new();

    loop {
        channel::select! {
            recv(shutdown) -> _ => break,
            recv(events) -> msg => match msg {
                Ok(Ok(event)) => debouncer.add_event(&event, Instant::now()),
                Ok(Err(e)) => log!("watch"; "error: {}", e),
                Err(_) => break,
            },
            default(Duration::from_millis(TICK_MS)) => {}
        }

        if let Some(changed) = debouncer.take_if_ready(Instant::now()) {
            debug!("watch"; "{} changed path(s)", changed.len());
            sync_watches(&mut watcher, loader.dirs(), &mut watched);
            if let Err(e) = loader.refresh(store) {
                log!("watch"; "reload failed, keeping previous content: {:#}", e);
            }
        }
    }

    debug!("watch"; "stopped");
}

/// Path and mode that cover `dir`.
///
/// An existing directory is watched recursively. A missing one is covered
/// by its nearest existing ancestor, non-recursively, so its creation
/// still produces an event.
fn watch_target(dir: &Path) -> Option<(PathBuf, RecursiveMode)> {
    if dir.is_dir() {
        return Some((dir.to_path_buf(), RecursiveMode::Recursive));
    }
    dir.ancestors()
        .skip(1)
        .find(|p| p.is_dir())
        .map(|p| (p.to_path_buf(), RecursiveMode::NonRecursive))
}

/// Bring the watcher's watches in line with what `dirs` need now.
fn sync_watches(
    watcher: &mut RecommendedWatcher,
    dirs: [&Path; 2],
    watched: &mut FxHashMap<PathBuf, RecursiveMode>,
) {
    let mut wanted: FxHashMap<PathBuf, RecursiveMode> = FxHashMap::default();
    for (path, mode) in dirs.into_iter().filter_map(watch_target) {
        let entry = wanted.entry(path).or_insert(mode);
        if mode == RecursiveMode::Recursive {
            *entry = mode;
        }
    }

    watched.retain(|path, mode| {
        if wanted.get(path) == Some(mode) {
            return true;
        }
        // the path may already be gone
        let _ = watcher.unwatch(path);
        false
    });

    for (path, mode) in wanted {
        if watched.contains_key(&path) {
            continue;
        }
        match watcher.watch(&path, mode) {
            Ok(()) => {
                if mode == RecursiveMode::Recursive {
                    log!("watch"; "{}", path.display());
                } else {
                    log!("watch"; "{} (waiting for missing content directory)", path.display());
                }
                watched.insert(path, mode);
            }
            Err(e) => log!("watch"; "failed to watch {}: {}", path.display(), e),
        }
    }
}

/// Collects changed paths until no event arrived for `DEBOUNCE_MS`.
struct Debouncer {
    changes: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            changes: FxHashSet::default(),
            last_event: None,
        }
    }

    fn add_event(&mut self, event: &Event, now: Instant) {
        use notify::EventKind;

        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            // Metadata-only changes (mtime/atime/chmod) are noise
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => {}
            _ => return,
        }

        for path in event.paths.iter().filter(|p| !is_temp_file(p)) {
            self.changes.insert(path.clone());
            self.last_event = Some(now);
        }
    }

    fn take_if_ready(&mut self, now: Instant) -> Option<FxHashSet<PathBuf>> {
        let last_event = self.last_event?;
        if now.duration_since(last_event) < Duration::from_millis(DEBOUNCE_MS) {
            return None;
        }

        self.last_event = None;
        let changes = std::mem::take(&mut self.changes);
        (!changes.is_empty()).then_some(changes)
    }
}

/// Editor swap/backup files and dotfiles.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
