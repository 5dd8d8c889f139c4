use super::toolpath::{process_gcode, Toolpath, ToolpathOptions};
use cncview_core::{thread_safe_rw, Coordinate, ThreadSafeRw};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cache shared between a tessellation worker and its readers
pub type SharedToolpathCache = ThreadSafeRw<ToolpathCache>;

/// Outcome of offering a toolpath to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheUpdate {
    /// A new toolpath was stored
    Rebuilt,
    /// Text and offset matched the stored toolpath; nothing was rebuilt
    Unchanged,
    /// A newer input version was already published; the offer was dropped
    Superseded,
}

/// Holds the toolpath for the latest input version.
///
/// Inputs are numbered by the caller. Results are accepted in version order
/// only, so a slow rebuild of old text can never replace the toolpath of
/// newer text, whatever order the rebuilds finish in.
#[derive(Debug, Clone, Default)]
pub struct ToolpathCache {
    options: ToolpathOptions,
    content_hash: Option<u64>,
    version: u64,
    toolpath: Option<Arc<Toolpath>>,
}

impl ToolpathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ToolpathOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Wrap a cache for sharing across threads
    pub fn shared(options: ToolpathOptions) -> SharedToolpathCache {
        thread_safe_rw(Self::with_options(options))
    }

    pub fn options(&self) -> &ToolpathOptions {
        &self.options
    }

    /// Change palette or arc resolution. The next `update` rebuilds.
    pub fn set_options(&mut self, options: ToolpathOptions) {
        if options != self.options {
            self.options = options;
            self.content_hash = None;
        }
    }

    /// Hash identifying a (text, offset) input
    pub fn content_hash(text: &str, offset: Coordinate) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        for component in offset.to_array() {
            component.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn needs_update(&self, new_hash: u64) -> bool {
        self.content_hash != Some(new_hash) || self.toolpath.is_none()
    }

    /// Store a toolpath built from input `version` whose content hash is
    /// `hash`. Versions older than the latest published one are rejected.
    pub fn publish(&mut self, version: u64, hash: u64, toolpath: Toolpath) -> CacheUpdate {
        if version < self.version {
            warn!(
                "Dropping toolpath for version {}, version {} already published",
                version, self.version
            );
            return CacheUpdate::Superseded;
        }

        debug!(
            "Publishing toolpath version {} ({} segments)",
            version,
            toolpath.segments().len()
        );
        self.version = version;
        self.content_hash = Some(hash);
        self.toolpath = Some(Arc::new(toolpath));
        CacheUpdate::Rebuilt
    }

    /// Rebuild for new input unless it matches what is already cached
    pub fn update(&mut self, version: u64, text: &str, offset: Coordinate) -> CacheUpdate {
        if version < self.version {
            return CacheUpdate::Superseded;
        }

        let hash = Self::content_hash(text, offset);
        if !self.needs_update(hash) {
            self.version = version;
            return CacheUpdate::Unchanged;
        }

        let toolpath = process_gcode(text, &self.options).with_offset(offset);
        self.publish(version, hash, toolpath)
    }

    /// Snapshot of the current toolpath
    pub fn current(&self) -> Option<Arc<Toolpath>> {
        self.toolpath.clone()
    }

    /// Latest accepted input version
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.toolpath.is_none()
    }

    /// Drop the cached toolpath. The version is kept so stale results
    /// stay rejected.
    pub fn clear(&mut self) {
        self.content_hash = None;
        self.toolpath = None;
    }
}
