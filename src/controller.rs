//! Click-driven navigation over scanned trees.
//!
//! The controller is single-threaded by contract: scan workers only produce
//! and send; every mutation of the tree, the views, and the history happens
//! here, on the coordinating thread, from `poll()` and the input methods.
//! Each scan request carries a fresh generation token; completions from
//! superseded requests are discarded so rapid re-rooting can never install
//! a stale tree over a newer one.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use glam::Vec2;
use tracing::{debug, info};

use crate::config::SpiderConfig;
use crate::layout;
use crate::scanner::{self, ScanOutcome, ScanResult};
use crate::tree::{NodeId, NodeKind, ScanStats, SpiderTree};
use crate::tree_view::{self, TreeView};
use crate::web_view::{self, WebView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Scanning,
    Displaying,
    Error,
}

/// What a node activation asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// A folder was activated; a rescan from its path has started.
    Navigated,
    /// A file was activated; center the graphical view here.
    Focus(Vec2),
    /// Unknown node or no tree; nothing happened.
    Ignored,
}

pub struct NavigationController {
    config: SpiderConfig,
    state: ControllerState,
    status: String,
    tree: Option<SpiderTree>,
    stats: Option<ScanStats>,
    web: Option<WebView>,
    text: Option<TreeView>,
    /// Root paths of previously displayed trees, innermost last.
    history: Vec<PathBuf>,
    center: Vec2,
    generation: u64,
    tx: Sender<ScanOutcome>,
    rx: Receiver<ScanOutcome>,
}

impl NavigationController {
    pub fn new(config: SpiderConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            config,
            state: ControllerState::Idle,
            status: "READY".to_string(),
            tree: None,
            stats: None,
            web: None,
            text: None,
            history: Vec::new(),
            center: Vec2::ZERO,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn config(&self) -> &SpiderConfig {
        &self.config
    }

    /// Apply new limits. The displayed tree is re-laid-out and re-rendered
    /// under the new limits; scan-time limits take effect on the next scan.
    pub fn set_config(&mut self, config: SpiderConfig) {
        self.config = config;
        if let Some(tree) = self.tree.as_mut() {
            layout::assign_positions(tree, self.center, &self.config);
            self.web = Some(web_view::build(tree));
            self.text = Some(tree_view::build(tree, &self.config));
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ControllerState::Scanning
    }

    pub fn web_view(&self) -> Option<&WebView> {
        self.web.as_ref()
    }

    pub fn tree_view(&self) -> Option<&TreeView> {
        self.text.as_ref()
    }

    pub fn stats(&self) -> Option<&ScanStats> {
        self.stats.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Path of the tree currently on screen, if any.
    pub fn displayed_root(&self) -> Option<PathBuf> {
        self.tree
            .as_ref()
            .and_then(|t| t.root_path())
            .map(Path::to_path_buf)
    }

    pub fn node_path(&self, id: NodeId) -> Option<PathBuf> {
        self.tree
            .as_ref()
            .and_then(|t| t.node(id))
            .map(|n| n.path.clone())
    }

    /// Select a fresh root, forgetting navigation history. Rejects paths
    /// that do not name a directory without disturbing the current display.
    pub fn open_root(&mut self, path: &Path) {
        if !path.is_dir() {
            self.status = format!("INVALID DIRECTORY: {}", path.display());
            return;
        }
        self.history.clear();
        self.start_scan(path.to_path_buf());
    }

    /// Rescan whatever is currently displayed, keeping history.
    pub fn rescan(&mut self) {
        if let Some(root) = self.displayed_root() {
            self.start_scan(root);
        }
    }

    /// Route a click on a node from either view.
    pub fn activate(&mut self, id: NodeId) -> Activation {
        let Some(tree) = self.tree.as_ref() else {
            return Activation::Ignored;
        };
        let Some(node) = tree.node(id) else {
            return Activation::Ignored;
        };
        match node.kind {
            NodeKind::Folder => {
                let target = node.path.clone();
                if let Some(current) = tree.root_path().map(Path::to_path_buf) {
                    self.history.push(current);
                }
                info!(path = %target.display(), "navigating into folder");
                self.start_scan(target);
                Activation::Navigated
            }
            NodeKind::File => Activation::Focus(node.pos),
        }
    }

    /// Pop the most recent root off the history and rescan it. No-op when
    /// the history is empty.
    pub fn back(&mut self) {
        if let Some(previous) = self.history.pop() {
            info!(path = %previous.display(), "navigating back");
            self.start_scan(previous);
        }
    }

    /// Re-run the layout around a new center and rebuild the graphical
    /// view. The text view does not depend on positions.
    pub fn relayout(&mut self, center: Vec2) {
        self.center = center;
        if let Some(tree) = self.tree.as_mut() {
            layout::assign_positions(tree, center, &self.config);
            self.web = Some(web_view::build(tree));
        }
    }

    /// Drain completed scans. Call from the coordinating thread each
    /// frame/tick. Returns true if the display changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation != self.generation {
                debug!(
                    generation = outcome.generation,
                    current = self.generation,
                    path = %outcome.root.display(),
                    "discarding superseded scan result"
                );
                continue;
            }
            match outcome.result {
                Ok(result) => {
                    self.install(result);
                    changed = true;
                }
                Err(err) => {
                    // The previous tree and views stay on screen.
                    self.state = ControllerState::Error;
                    self.status = format!("ERROR: {err}");
                    changed = true;
                }
            }
        }
        changed
    }

    fn start_scan(&mut self, path: PathBuf) {
        if let Err(err) = self.config.validate() {
            self.state = ControllerState::Error;
            self.status = format!("ERROR: {err}");
            return;
        }
        self.generation += 1;
        self.state = ControllerState::Scanning;
        self.status = format!("SCANNING: {}", path.display());
        scanner::spawn_scan(path, self.config.clone(), self.generation, self.tx.clone());
    }

    fn install(&mut self, result: ScanResult) {
        let ScanResult { mut tree, stats } = result;
        layout::assign_positions(&mut tree, self.center, &self.config);
        self.web = Some(web_view::build(&tree));
        self.text = Some(tree_view::build(&tree, &self.config));
        self.status = match tree.root_path() {
            Some(path) => format!(
                "DISPLAYING: {} ({} folders, {} files, {} ms)",
                path.display(),
                stats.folders,
                stats.files,
                stats.duration_ms
            ),
            None => "DISPLAYING".to_string(),
        };
        self.tree = Some(tree);
        self.stats = Some(stats);
        self.state = ControllerState::Displaying;
    }
}
