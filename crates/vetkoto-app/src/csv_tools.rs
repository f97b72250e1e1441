//! CSV export and best-effort import

use std::path::{Path, PathBuf};

use vetkoto_core::prelude::*;
use vetkoto_core::{display_value, export_csv, export_file_name, Entity, EntitySchema, Record};
use vetkoto_remote::{CsvConverter, ListQuery, RemoteStore};

use crate::form::input_value;

/// Notice shown when an export finds nothing to write.
pub const NO_DATA: &str = "No data to export.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub entity: Entity,
    /// `None` when there was nothing to export.
    pub path: Option<PathBuf>,
    pub rows: usize,
}

impl ExportOutcome {
    pub fn summary(&self) -> String {
        match &self.path {
            Some(path) => format!("Exported {} rows to {}", self.rows, path.display()),
            None => NO_DATA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub entity: Entity,
    pub total: usize,
    pub created: usize,
    pub failed: usize,
}

impl ImportOutcome {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} / {} rows into {} ({} failed)",
            self.created, self.total, self.entity, self.failed
        )
    }
}

/// Write every row of `entity` to `<dir>/<entity>_export.csv`.
pub async fn export_entity<S>(store: &S, entity: Entity, dir: &Path) -> Result<ExportOutcome>
where
    S: RemoteStore + Sync,
{
    let rows = store.list(entity, &ListQuery::all()).await?;
    let Some(text) = export_csv(&rows)? else {
        info!("Nothing to export for {}", entity);
        return Ok(ExportOutcome {
            entity,
            path: None,
            rows: 0,
        });
    };

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(entity.as_str()));
    tokio::fs::write(&path, text).await?;
    info!("Exported {} {} rows to {:?}", rows.len(), entity, path);

    Ok(ExportOutcome {
        entity,
        path: Some(path),
        rows: rows.len(),
    })
}

/// Keep only editable fields, dropping the identifier.
pub fn prepare_import_row(schema: &EntitySchema, row: Record) -> Record {
    row.into_inner()
        .into_iter()
        .filter(|(key, _)| key != schema.primary_key)
        .filter_map(|(key, value)| {
            let field = schema.field(&key)?;
            let value = input_value(field.input, &display_value(&value));
            Some((key, value))
        })
        .collect()
}

/// Convert `path` and create one record per row.
///
/// A failed conversion is an error; failed creates are only counted.
pub async fn import_file<S>(
    store: &S,
    schema: &EntitySchema,
    converter: &CsvConverter,
    path: &Path,
) -> Result<ImportOutcome>
where
    S: RemoteStore + Sync,
{
    let entity = schema.entity;
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| Error::import(format!("{}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "import.csv".to_string());

    let document = converter.convert(&file_name, contents).await?;
    let total = document.data.len();
    let mut created = 0;

    for (index, row) in document.data.into_iter().enumerate() {
        let payload = prepare_import_row(schema, row);
        match store.create(entity, payload).await {
            Ok(_) => created += 1,
            Err(e) => warn!("Import row {} into {} failed: {}", index + 1, entity, e),
        }
    }

    let outcome = ImportOutcome {
        entity,
        total,
        created,
        failed: total - created,
    };
    info!("{}", outcome.summary());
    Ok(outcome)
}
