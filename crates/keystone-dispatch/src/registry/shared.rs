//! Lock-guarded registry handle and the process-wide instance.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use keystone_config::{ClientConfig, default_clients};
use once_cell::sync::Lazy;

use super::ConfigRegistry;

static GLOBAL_REGISTRY: Lazy<SharedRegistry> =
    Lazy::new(|| SharedRegistry::new(ConfigRegistry::with_defaults(default_clients())));

/// Returns the process-wide registry, seeded with the built-in configurations
/// on first use.
#[must_use]
pub fn global() -> &'static SharedRegistry {
    &GLOBAL_REGISTRY
}

/// Cloneable handle to a registry behind a single lock.
///
/// Every [`Self::read`] or [`Self::write`] closure runs under the lock, so a
/// mutate-then-read sequence placed in one `write` call cannot interleave with
/// another thread's mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ConfigRegistry>>,
}

impl SharedRegistry {
    /// Wraps `registry` in a new shared handle.
    #[must_use]
    pub fn new(registry: ConfigRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    // Registry operations never leave partial state behind, so a poisoned
    // lock still guards a consistent registry.
    fn lock(&self) -> MutexGuard<'_, ConfigRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `read` against the registry under the lock.
    pub fn read<T>(&self, read: impl FnOnce(&ConfigRegistry) -> T) -> T {
        read(&*self.lock())
    }

    /// Runs `write` against the registry under the lock.
    pub fn write<T>(&self, write: impl FnOnce(&mut ConfigRegistry) -> T) -> T {
        write(&mut *self.lock())
    }

    /// Registers `config`, replacing any entry with the same name.
    pub fn register(&self, config: ClientConfig) {
        self.write(|registry| registry.register(config));
    }

    /// Enables `name` globally.
    pub fn enable(&self, name: &str) {
        self.write(|registry| registry.enable(name));
    }

    /// Disables `name` globally.
    pub fn disable(&self, name: &str) {
        self.write(|registry| registry.disable(name));
    }

    /// Copies the current registry state.
    #[must_use]
    pub fn snapshot(&self) -> ConfigRegistry {
        self.read(ConfigRegistry::clone)
    }
}
