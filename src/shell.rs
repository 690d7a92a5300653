//! Fire-and-forget OS integration.

use std::path::Path;

use tracing::warn;

/// Open `path` in the platform file manager. Failures are logged, never
/// surfaced: the core consumes no return value from this collaborator.
pub fn reveal(path: &Path) {
    if let Err(err) = open::that_detached(path) {
        warn!(path = %path.display(), "failed to open in file manager: {err}");
    }
}
