//! Resource lookups for script prelude fragments

use dmn_eval_core::{ResourceError, ResourceLookup};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Resources stored as files below a root directory
#[derive(Debug, Clone)]
pub struct DirectoryResourceLookup {
    root: PathBuf,
}

impl DirectoryResourceLookup {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLookup for DirectoryResourceLookup {
    fn find_resource(&self, name: &str) -> Result<Option<Vec<u8>>, ResourceError> {
        let relative = Path::new(name);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            // only names inside the root are served
            return Ok(None);
        }

        match std::fs::read(self.root.join(relative)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory resources
#[derive(Debug, Clone, Default)]
pub struct StaticResourceLookup {
    resources: HashMap<String, Vec<u8>>,
}

impl StaticResourceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource (builder style)
    pub fn with_resource<S: Into<String>, B: Into<Vec<u8>>>(mut self, name: S, content: B) -> Self {
        self.resources.insert(name.into(), content.into());
        self
    }
}

impl ResourceLookup for StaticResourceLookup {
    fn find_resource(&self, name: &str) -> Result<Option<Vec<u8>>, ResourceError> {
        Ok(self.resources.get(name).cloned())
    }
}
