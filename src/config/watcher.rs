//! Settings File Watcher
//!
//! Monitors the persisted runtime-configuration file for external edits
//! and triggers a [`ConfigStore::reload`] once the file has settled.
//! Reloads go through the same store entry point as API writes, so a
//! watcher-triggered reload can never interleave with an explicit `set`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info, warn};

use crate::config::store::ConfigStore;

/// Watches the settings file and reloads the store on changes.
///
/// Rapid event bursts (editor save cycles, write-then-rename) are
/// debounced so the store reloads once per settled edit.
pub struct SettingsWatcher {
    store: Arc<ConfigStore>,
    debounce: Duration,
}

impl SettingsWatcher {
    pub fn new(store: Arc<ConfigStore>, debounce: Duration) -> Self {
        Self { store, debounce }
    }

    /// Spawn the watcher as a background tokio task.
    ///
    /// Returns a `JoinHandle` that can be aborted to stop watching. The
    /// watcher runs until aborted or until the process exits.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.run().await {
                error!(error = %e, "settings watcher exited with error");
            }
        })
    }

    async fn run(&self) -> Result<(), notify::Error> {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(16);

        let settings_path = self.store.path().to_path_buf();
        // Watch the parent directory: our own persist and most editors
        // replace the file atomically, which unwatches a fixed file path.
        let watch_dir = settings_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let _watcher = {
            let tx = tx.clone();
            let closure_path = settings_path.clone();
            let mut watcher = RecommendedWatcher::new(
                move |res: Result<notify::Event, notify::Error>| match res {
                    Ok(event) => {
                        if is_relevant_event(event.kind)
                            && event_touches(&event, &closure_path)
                        {
                            // Best-effort send; a full channel means a
                            // reload is already queued.
                            let _ = tx.try_send(());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "filesystem watcher error");
                    }
                },
                notify::Config::default(),
            )?;
            watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
            info!(path = %settings_path.display(), "settings watcher started");
            watcher
        };

        loop {
            if rx.recv().await.is_none() {
                debug!("settings watcher channel closed, shutting down");
                break;
            }

            // Debounce: let the burst finish, then drain what queued up.
            tokio::time::sleep(self.debounce).await;
            while rx.try_recv().is_ok() {}

            debug!("settings file changed on disk, reloading");
            self.store.reload().await;
        }

        Ok(())
    }
}

/// Filesystem events that may indicate the settings file changed.
fn is_relevant_event(kind: EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Whether any path in the event names our settings file. The event may
/// carry sibling paths since we watch the whole parent directory.
fn event_touches(event: &notify::Event, settings_path: &PathBuf) -> bool {
    let file_name = match settings_path.file_name() {
        Some(name) => name,
        None => return false,
    };
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some_and(|name| name == file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Event Relevance Tests
    // ==========================================================================

    #[test]
    fn test_create_events_are_relevant() {
        assert!(is_relevant_event(EventKind::Create(
            notify::event::CreateKind::File
        )));
    }

    #[test]
    fn test_modify_events_are_relevant() {
        assert!(is_relevant_event(EventKind::Modify(
            notify::event::ModifyKind::Data(notify::event::DataChange::Content)
        )));
    }

    #[test]
    fn test_remove_events_are_relevant() {
        assert!(is_relevant_event(EventKind::Remove(
            notify::event::RemoveKind::File
        )));
    }

    #[test]
    fn test_access_events_are_ignored() {
        assert!(!is_relevant_event(EventKind::Access(
            notify::event::AccessKind::Read
        )));
    }

    // ==========================================================================
    // Path Filter Tests
    // ==========================================================================

    fn event_with_paths(paths: Vec<&str>) -> notify::Event {
        let mut event = notify::Event::new(EventKind::Modify(
            notify::event::ModifyKind::Data(notify::event::DataChange::Content),
        ));
        event.paths = paths.into_iter().map(PathBuf::from).collect();
        event
    }

    #[test]
    fn test_event_for_our_file_matches() {
        let event = event_with_paths(vec!["/data/settings.json"]);
        assert!(event_touches(&event, &PathBuf::from("/data/settings.json")));
    }

    #[test]
    fn test_event_for_sibling_file_is_filtered() {
        let event = event_with_paths(vec!["/data/other.json", "/data/settings.json.swp"]);
        assert!(!event_touches(&event, &PathBuf::from("/data/settings.json")));
    }

    #[test]
    fn test_rename_into_place_matches_by_file_name() {
        // A temp-file rename reports the destination path.
        let event = event_with_paths(vec!["/data/settings.json"]);
        assert!(event_touches(&event, &PathBuf::from("settings.json")));
    }
}
