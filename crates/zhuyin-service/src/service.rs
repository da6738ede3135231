use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use tracing::{debug, debug_span, info, warn};
use zhuyin_core::dict::CompiledTables;
use zhuyin_core::resolver::Explanation;
use zhuyin_core::{ResolvedChar, Resolver};

use crate::source::{LoadError, Resources};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    #[error("polyphone data not loaded")]
    NotLoaded,
    #[error("polyphone data failed to load: {0}")]
    LoadFailed(String),
}

#[derive(Debug)]
enum LoadState {
    Unloaded,
    Loaded(Arc<Resolver>),
    Failed(String),
}

/// Owns the one-time load of the polyphone tables and hands out the
/// resulting resolver.
///
/// Loading is serialized: concurrent `load` calls build the tables once and
/// later calls return immediately. A failed load is recorded and can be
/// retried with another explicit `load`.
#[derive(Debug)]
pub struct ZhuyinService {
    resources: Resources,
    state: RwLock<LoadState>,
    gate: Mutex<()>,
}

/// Pending background load.
#[derive(Debug)]
pub struct LoadHandle {
    handle: JoinHandle<Result<(), LoadError>>,
}

impl LoadHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the load finishes.
    pub fn wait(self) -> Result<(), LoadError> {
        self.handle.join().unwrap_or(Err(LoadError::Panicked))
    }
}

impl ZhuyinService {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            state: RwLock::new(LoadState::Unloaded),
            gate: Mutex::new(()),
        }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn is_loaded(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            LoadState::Loaded(_)
        )
    }

    /// Load the configured resources. No-op once loaded.
    pub fn load(&self) -> Result<(), LoadError> {
        self.load_with(|| self.resources.load())
    }

    /// Load with a custom loader. No-op once loaded; `loader` is not called.
    pub fn load_with<F>(&self, loader: F) -> Result<(), LoadError>
    where
        F: FnOnce() -> Result<CompiledTables, LoadError>,
    {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_loaded() {
            debug!("polyphone data already loaded");
            return Ok(());
        }

        let _span = debug_span!("load", source = %self.resources.dictionary).entered();
        let result = loader();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(tables) => {
                info!(
                    entries = tables.dictionary.len(),
                    polyphonic = tables.dictionary.polyphonic_count(),
                    tones = tables.tones.len(),
                    "polyphone data loaded"
                );
                let resolver = Resolver::new(Arc::new(tables.dictionary), Arc::new(tables.tones));
                *state = LoadState::Loaded(Arc::new(resolver));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load polyphone data");
                *state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Start `load` on a named background thread.
    pub fn load_in_background(self: &Arc<Self>) -> Result<LoadHandle, LoadError> {
        let service = Arc::clone(self);
        let handle = thread::Builder::new()
            .name("zhuyin-loader".into())
            .spawn(move || service.load())
            .map_err(LoadError::Spawn)?;
        Ok(LoadHandle { handle })
    }

    pub fn resolver(&self) -> Result<Arc<Resolver>, AnnotateError> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Loaded(resolver) => Ok(Arc::clone(resolver)),
            LoadState::Unloaded => Err(AnnotateError::NotLoaded),
            LoadState::Failed(reason) => Err(AnnotateError::LoadFailed(reason.clone())),
        }
    }

    pub fn process(&self, text: &str) -> Result<Vec<ResolvedChar>, AnnotateError> {
        Ok(self.resolver()?.resolve(text))
    }

    pub fn annotate(&self, text: &str) -> Result<String, AnnotateError> {
        Ok(self.resolver()?.annotate(text))
    }

    pub fn explain(&self, text: &str) -> Result<Explanation, AnnotateError> {
        Ok(self.resolver()?.explain(text))
    }

    /// Annotate `text`, or return it unchanged if the data is unavailable.
    pub fn annotate_or_plain(&self, text: &str) -> String {
        self.annotate(text).unwrap_or_else(|e| {
            warn!(error = %e, "annotation unavailable, returning plain text");
            text.to_string()
        })
    }
}
