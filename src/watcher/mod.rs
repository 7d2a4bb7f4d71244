//! File watching for live re-serialization.
//!
//! Uses notify crate for cross-platform file system events.
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// A watched file and the directory its events arrive on.
#[derive(Debug)]
struct Target {
    path: PathBuf,
    name: Option<OsString>,
    root: PathBuf,
}

impl Target {
    fn new(path: &Path) -> Self {
        // Canonicalize so event paths from the OS (which are always absolute
        // and canonical) match our stored paths.
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let root = watch_root_for(&path);
        Self { path, name, root }
    }

    fn matches(&self, event_path: &Path) -> bool {
        event_path == self.root
            || event_path == self.path
            || self
                .name
                .as_ref()
                .is_some_and(|name| event_path.file_name().is_some_and(|f| f == name))
    }
}

/// Watches a set of files and emits debounced change notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    targets: Vec<Target>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Create a watcher for every path in `paths`.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or a path cannot be watched.
    pub fn new<P: AsRef<Path>>(paths: &[P], debounce: Duration) -> notify::Result<Self> {
        let targets: Vec<Target> = paths.iter().map(|p| Target::new(p.as_ref())).collect();

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        let roots: BTreeSet<&Path> = targets.iter().map(|t| t.root.as_path()).collect();
        for root in roots {
            watcher.watch(root, RecursiveMode::NonRecursive)?;
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            targets,
            debounce,
            pending_since: None,
        })
    }

    /// The canonical paths of the files being watched.
    pub fn target_paths(&self) -> impl Iterator<Item = &Path> {
        self.targets.iter().map(|t| t.path.as_path())
    }

    /// Returns true once a debounced file change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut saw_relevant_event = false;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => {
                    saw_relevant_event = true;
                }
                Ok(ev) => {
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "irrelevant watch event");
                }
                Err(err) => {
                    tracing::warn!(%err, "file watcher error");
                }
            }
        }

        if saw_relevant_event {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|path| self.targets.iter().any(|target| target.matches(path)))
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event(paths: Vec<PathBuf>) -> Event {
        Event {
            kind: EventKind::Any,
            paths,
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_directory_level_event_is_relevant_for_watched_file() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("form.json");
        std::fs::write(&path, "[]").expect("write");
        let watcher = FileWatcher::new(&[&path], Duration::from_millis(10)).expect("watcher");

        assert!(
            watcher.is_relevant(&event(vec![canonical_dir])),
            "directory-level events should count as relevant for many backends"
        );
    }

    #[test]
    fn test_event_for_any_target_is_relevant() {
        let dir = tempdir().expect("tempdir");
        let doc_dir = dir.path().join("docs");
        let values_dir = dir.path().join("answers");
        std::fs::create_dir_all(&doc_dir).expect("mkdir");
        std::fs::create_dir_all(&values_dir).expect("mkdir");
        let doc = doc_dir.join("form.json");
        let values = values_dir.join("values.json");
        std::fs::write(&doc, "[]").expect("write");
        std::fs::write(&values, "{}").expect("write");

        let watcher = FileWatcher::new(&[&doc, &values], Duration::from_millis(10)).expect("watcher");
        assert_eq!(watcher.target_paths().count(), 2);

        let values_event = event(vec![values.canonicalize().expect("canonicalize")]);
        assert!(watcher.is_relevant(&values_event));
        let other = event(vec![dir.path().join("elsewhere").join("other.txt")]);
        assert!(!watcher.is_relevant(&other));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        let root = watch_root_for(Path::new("form.json"));
        assert_eq!(root, PathBuf::from("."));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("values.json");
        std::fs::write(&path, "{}").expect("write");

        let mut watcher = FileWatcher::new(&[&path], Duration::from_millis(50)).expect("watcher");

        // Give the backend time to register the watch
        std::thread::sleep(Duration::from_millis(500));

        std::fs::write(&path, r#"{"x":"world"}"#).expect("write");

        // Poll until the change is ready or timeout after 5 seconds
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.take_change_ready() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        assert!(
            detected,
            "watcher should detect real file modification within 5 seconds"
        );
    }
}
