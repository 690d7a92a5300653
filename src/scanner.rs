//! Bounded directory scanner running on a worker thread.
//!
//! Each scan builds a fresh tree to `max_depth`, keeping every folder and at
//! most `max_files_per_folder` files per folder. Entries are sorted by name
//! before the cap is applied so a fixed directory snapshot always produces
//! the same tree. The worker never touches shared state: it hands its result
//! back over a channel, tagged with the generation that requested it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::SpiderConfig;
use crate::error::ScanError;
use crate::tree::{NodeId, NodeKind, ScanStats, SpiderNode, SpiderTree};

/// Completed scan, as produced by the worker thread.
pub struct ScanResult {
    pub tree: SpiderTree,
    pub stats: ScanStats,
}

/// Message sent exactly once per scan request, success or failure.
pub struct ScanOutcome {
    /// Token of the request that started this scan. Consumers must drop
    /// outcomes whose generation is not the latest issued.
    pub generation: u64,
    pub root: PathBuf,
    pub result: Result<ScanResult, ScanError>,
}

/// Depth- and width-bounded recursive scanner.
pub struct DirScanner {
    config: SpiderConfig,
    stats: ScanStats,
}

impl DirScanner {
    pub fn new(config: SpiderConfig) -> Self {
        Self {
            config,
            stats: ScanStats::default(),
        }
    }

    /// Scan `root` into a fresh tree. Fails fast if the root is not a
    /// directory or the limits are out of range.
    pub fn scan(mut self, root: &Path) -> Result<ScanResult, ScanError> {
        self.config.validate()?;
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        let start = Instant::now();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut tree = SpiderTree::new(SpiderNode::new(
            name,
            root.to_path_buf(),
            NodeKind::Folder,
            0,
        ));
        let root_id = tree.root();
        self.scan_folder(&mut tree, root_id)?;

        self.stats.duration_ms = start.elapsed().as_millis();
        debug!(
            path = %root.display(),
            folders = self.stats.folders,
            files = self.stats.files,
            "scan complete"
        );
        Ok(ScanResult {
            tree,
            stats: self.stats,
        })
    }

    fn scan_folder(&mut self, tree: &mut SpiderTree, node_id: NodeId) -> Result<(), ScanError> {
        let (path, depth) = match tree.node(node_id) {
            Some(node) => (node.path.clone(), node.depth),
            None => return Ok(()),
        };
        if depth >= self.config.max_depth {
            return Ok(());
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                // Recovered locally: the folder stays, childless and flagged.
                if let Some(node) = tree.node_mut(node_id) {
                    node.inaccessible = true;
                }
                self.stats.inaccessible_dirs += 1;
                warn!(path = %path.display(), "permission denied, skipping folder");
                return Ok(());
            }
            Err(err) => return Err(ScanError::io(path, err)),
        };

        let mut folders: Vec<(String, PathBuf)> = Vec::new();
        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| ScanError::io(&path, err))?;
            let entry_path = entry.path();
            let entry_name = entry.file_name().to_string_lossy().into_owned();
            if entry_path.is_dir() {
                folders.push((entry_name, entry_path));
            } else {
                files.push((entry_name, entry_path));
            }
        }

        // Deterministic selection: sort each group by name, then cap files.
        folders.sort_by(|a, b| a.0.cmp(&b.0));
        files.sort_by(|a, b| a.0.cmp(&b.0));
        let cap = self.config.max_files_per_folder;
        if files.len() > cap {
            self.stats.files_truncated += (files.len() - cap) as u64;
            files.truncate(cap);
        }

        let child_depth = depth + 1;
        let mut folder_ids = Vec::with_capacity(folders.len());
        for (entry_name, entry_path) in folders {
            let id = tree.add_child(
                node_id,
                SpiderNode::new(entry_name, entry_path, NodeKind::Folder, child_depth),
            );
            self.stats.folders += 1;
            folder_ids.push(id);
        }
        for (entry_name, entry_path) in files {
            tree.add_child(
                node_id,
                SpiderNode::new(entry_name, entry_path, NodeKind::File, child_depth),
            );
            self.stats.files += 1;
        }

        for id in folder_ids {
            self.scan_folder(tree, id)?;
        }
        Ok(())
    }
}

/// Run a scan on a fresh worker thread. Exactly one `ScanOutcome` is sent on
/// `tx`, whatever happens; panics inside the worker are converted into
/// `ScanError::Failed`.
pub fn spawn_scan(root: PathBuf, config: SpiderConfig, generation: u64, tx: Sender<ScanOutcome>) {
    thread::spawn(move || {
        debug!(path = %root.display(), generation, "scan worker started");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            DirScanner::new(config).scan(&root)
        }));
        let result = match result {
            Ok(result) => result,
            Err(_) => Err(ScanError::Failed {
                message: "scan worker panicked".to_string(),
            }),
        };
        if let Err(err) = &result {
            warn!(path = %root.display(), generation, "scan failed: {err}");
        }
        // The receiver may be gone if the app is shutting down.
        let _ = tx.send(ScanOutcome {
            generation,
            root,
            result,
        });
    });
}
