//! Per-expression compiled artifact slot
//!
//! A slot moves from empty to populated exactly once and never goes back.
//! Readers take the lock-free `OnceLock` path; only a cold slot takes the
//! slot's own install lock, re-checks, compiles and installs. The lock is
//! never held while the artifact is evaluated.

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Artifact together with the language it was compiled for
struct Installed<T: ?Sized> {
    language: String,
    artifact: Arc<T>,
}

/// Lazily populated, single-writer slot for one compiled artifact
pub struct CompiledSlot<T: ?Sized> {
    installed: OnceLock<Installed<T>>,
    install_lock: Mutex<()>,
}

impl<T: ?Sized> CompiledSlot<T> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            installed: OnceLock::new(),
            install_lock: Mutex::new(()),
        }
    }

    /// Installed artifact, if it was compiled for `language`
    pub fn get(&self, language: &str) -> Option<Arc<T>> {
        self.installed
            .get()
            .filter(|installed| installed.language == language)
            .map(|installed| installed.artifact.clone())
    }

    /// Language the installed artifact was compiled for
    pub fn language(&self) -> Option<&str> {
        self.installed.get().map(|installed| installed.language.as_str())
    }

    pub fn is_populated(&self) -> bool {
        self.installed.get().is_some()
    }

    /// Return the installed artifact, compiling and installing it on first use
    ///
    /// `compile` runs at most once per slot across all threads as long as it
    /// succeeds. A failed compilation leaves the slot empty. If the slot
    /// already holds an artifact for another language, a fresh artifact is
    /// compiled for the caller and not installed.
    pub fn get_or_try_install<E, F>(&self, language: &str, compile: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<Arc<T>, E>,
    {
        if let Some(installed) = self.installed.get() {
            return Self::reuse_or_compile(installed, language, compile);
        }

        let _guard = self.install_lock.lock();

        // another thread may have installed while we waited
        if let Some(installed) = self.installed.get() {
            return Self::reuse_or_compile(installed, language, compile);
        }

        let artifact = compile()?;
        let installed = self.installed.get_or_init(|| Installed {
            language: language.to_string(),
            artifact,
        });
        debug!("Installed compiled artifact for language '{}'", language);

        Ok(installed.artifact.clone())
    }

    fn reuse_or_compile<E, F>(installed: &Installed<T>, language: &str, compile: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<Arc<T>, E>,
    {
        if installed.language == language {
            Ok(installed.artifact.clone())
        } else {
            debug!(
                "Slot holds an artifact for '{}', compiling uncached for '{}'",
                installed.language, language
            );
            compile()
        }
    }
}

impl<T: ?Sized> Default for CompiledSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for CompiledSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSlot")
            .field("language", &self.language())
            .field("populated", &self.is_populated())
            .finish()
    }
}
