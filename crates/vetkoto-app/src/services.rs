//! Shared handles used by background actions

use std::path::PathBuf;
use std::sync::Arc;

use vetkoto_core::SchemaRegistry;
use vetkoto_remote::{CsvConverter, RemoteStore};

use crate::label_cache::LabelCache;
use crate::section::SectionLoader;
use crate::table::TableRenderer;

/// Everything a spawned action needs, cheap to clone into a task.
pub struct Services<S> {
    pub store: Arc<S>,
    pub registry: SchemaRegistry,
    pub cache: LabelCache,
    pub converter: Arc<CsvConverter>,
    pub sections: Arc<SectionLoader>,
    /// Directory CSV exports are written to
    pub export_dir: PathBuf,
}

impl<S> Clone for Services<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            registry: self.registry.clone(),
            cache: self.cache.clone(),
            converter: Arc::clone(&self.converter),
            sections: Arc::clone(&self.sections),
            export_dir: self.export_dir.clone(),
        }
    }
}

impl<S> Services<S>
where
    S: RemoteStore + Send + Sync + 'static,
{
    pub fn new(
        store: Arc<S>,
        registry: SchemaRegistry,
        converter: CsvConverter,
        sections: SectionLoader,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            store,
            registry,
            cache: LabelCache::new(),
            converter: Arc::new(converter),
            sections: Arc::new(sections),
            export_dir,
        }
    }

    /// Table renderer sharing this store and label cache.
    pub fn renderer(&self) -> TableRenderer<S> {
        TableRenderer::new(
            Arc::clone(&self.store),
            self.registry.clone(),
            self.cache.clone(),
        )
    }
}
