//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action runs on its own tokio task and reports back through the
//! message channel. Failures become messages carrying the error text.

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, error};

use vetkoto_core::{Entity, Record, RecordId, ResultExt};
use vetkoto_remote::RemoteStore;

use crate::csv_tools::{export_entity, import_file};
use crate::dashboard::load_dashboard;
use crate::form::{build_form, FormMode};
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::search::run_search;
use crate::services::Services;

/// Execute an action by spawning a background task
pub fn handle_action<S>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, services: &Services<S>)
where
    S: RemoteStore + Send + Sync + 'static,
{
    let services = services.clone();
    match action {
        UpdateAction::LoadSection { id } => {
            tokio::spawn(async move {
                let result = services.sections.load(&id).await.map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::SectionLoaded { id, result }).await;
            });
        }

        UpdateAction::RenderTable { entity } => {
            tokio::spawn(async move {
                let result = services
                    .renderer()
                    .render(entity, None)
                    .await
                    .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::TableLoaded { entity, result }).await;
            });
        }

        UpdateAction::RunSearch(request) => {
            tokio::spawn(async move {
                let renderer = services.renderer();
                let result = run_search(&renderer, request.entity, &request.query)
                    .await
                    .map_err(|e| e.to_string());
                let _ = msg_tx
                    .send(Message::SearchResults {
                        entity: request.entity,
                        token: request.token,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::LoadDashboard => {
            tokio::spawn(async move {
                let today = Local::now().date_naive();
                let result = load_dashboard(
                    services.store.as_ref(),
                    &services.registry,
                    &services.cache,
                    today,
                )
                .await
                .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::DashboardLoaded(result)).await;
            });
        }

        UpdateAction::OpenForm { entity, id } => {
            tokio::spawn(async move {
                let msg = open_form(&services, entity, id).await;
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::SubmitForm {
            entity,
            mode,
            payload,
        } => {
            tokio::spawn(async move {
                let msg = submit_form(&services, entity, mode, payload).await;
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::DeleteRecord { entity, id } => {
            tokio::spawn(async move {
                let msg = match services.store.remove(entity, &id).await {
                    Ok(()) => Message::RecordDeleted { entity },
                    Err(e) => {
                        error!("Failed to delete {} {}: {}", entity, id, e);
                        Message::DeleteFailed {
                            error: e.to_string(),
                        }
                    }
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::ExportCsv { entity } => {
            tokio::spawn(async move {
                let result = export_entity(services.store.as_ref(), entity, &services.export_dir)
                    .await
                    .with_context(|| format!("Failed to export {}", entity))
                    .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::ExportFinished(result)).await;
            });
        }

        UpdateAction::ImportCsv { entity, path } => {
            tokio::spawn(async move {
                let schema = services.registry.schema(entity);
                let result = import_file(
                    services.store.as_ref(),
                    schema,
                    &services.converter,
                    &path,
                )
                .await
                .with_context(|| format!("Failed to import {} into {}", path.display(), entity))
                .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::ImportFinished(result)).await;
            });
        }
    }
}

/// Fetch the record being edited (if any) and build its form.
async fn open_form<S>(services: &Services<S>, entity: Entity, id: Option<RecordId>) -> Message
where
    S: RemoteStore + Send + Sync + 'static,
{
    let existing = match id {
        Some(id) => match services.store.get(entity, &id).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("Failed to fetch {} {}: {}", entity, id, e);
                return Message::FormLoadFailed {
                    error: e.to_string(),
                };
            }
        },
        None => None,
    };

    let form = build_form(
        services.store.as_ref(),
        &services.registry,
        entity,
        existing.as_ref(),
    )
    .await;
    Message::FormReady(Box::new(form))
}

async fn submit_form<S>(
    services: &Services<S>,
    entity: Entity,
    mode: FormMode,
    payload: Record,
) -> Message
where
    S: RemoteStore + Send + Sync + 'static,
{
    let result = match mode {
        FormMode::Create => services.store.create(entity, payload).await,
        FormMode::Edit => services.store.update(entity, payload).await,
    };
    match result {
        Ok(record) => {
            debug!("{:?} {} succeeded", mode, entity);
            Message::FormSaved {
                entity,
                mode,
                record,
            }
        }
        Err(e) => {
            error!("Failed to save {}: {}", entity, e);
            Message::FormSaveFailed {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use tokio::time::timeout;

    use super::*;
    use crate::section::SectionLoader;
    use vetkoto_core::SchemaRegistry;
    use vetkoto_remote::test_utils::{alice_store, clinic_store};
    use vetkoto_remote::{CsvConverter, MemoryStore, Operation};

    fn services(store: MemoryStore) -> Services<MemoryStore> {
        Services::new(
            Arc::new(store),
            SchemaRegistry::clinic(),
            CsvConverter::Local,
            SectionLoader::new(None),
            PathBuf::from("."),
        )
    }

    async fn run(action: UpdateAction, services: &Services<MemoryStore>) -> Message {
        let (tx, mut rx) = mpsc::channel(4);
        handle_action(action, tx, services);
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("action timed out")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_render_table_reports_rows() {
        let services = services(alice_store());
        let msg = run(
            UpdateAction::RenderTable {
                entity: Entity::Owners,
            },
            &services,
        )
        .await;

        match msg {
            Message::TableLoaded { entity, result } => {
                assert_eq!(entity, Entity::Owners);
                assert!(!result.unwrap().is_empty());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_without_primary_key_fails_before_calling() {
        let store = clinic_store();
        let services = services(store);
        let mut payload = Record::new();
        payload.insert("owner_name", json!("Nobody"));

        let msg = run(
            UpdateAction::SubmitForm {
                entity: Entity::Owners,
                mode: FormMode::Edit,
                payload,
            },
            &services,
        )
        .await;

        assert!(matches!(msg, Message::FormSaveFailed { .. }));
        assert_eq!(services.store.calls(Operation::Update), 0);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let store = clinic_store();
        store.set_failing(Operation::Remove, true);
        let services = services(store);

        let msg = run(
            UpdateAction::DeleteRecord {
                entity: Entity::Owners,
                id: RecordId::from(1),
            },
            &services,
        )
        .await;
        assert!(matches!(msg, Message::DeleteFailed { .. }));
    }

    #[tokio::test]
    async fn test_export_failure_keeps_store_error() {
        let store = clinic_store();
        store.set_failing(Operation::List, true);
        let services = services(store);

        let msg = run(
            UpdateAction::ExportCsv {
                entity: Entity::Owners,
            },
            &services,
        )
        .await;

        let Message::ExportFinished(Err(error)) = msg else {
            panic!("expected a failed export");
        };
        assert!(!error.is_empty());
    }

    #[tokio::test]
    async fn test_open_form_for_missing_record_fails() {
        let services = services(clinic_store());
        let msg = run(
            UpdateAction::OpenForm {
                entity: Entity::Owners,
                id: Some(RecordId::from(999)),
            },
            &services,
        )
        .await;
        assert!(matches!(msg, Message::FormLoadFailed { .. }));
    }

    #[tokio::test]
    async fn test_open_form_for_create_is_blank() {
        let services = services(clinic_store());
        let msg = run(
            UpdateAction::OpenForm {
                entity: Entity::Owners,
                id: None,
            },
            &services,
        )
        .await;

        let Message::FormReady(form) = msg else {
            panic!("expected FormReady");
        };
        assert_eq!(form.mode, FormMode::Create);
        assert!(form.hidden_id.is_none());
    }

    #[tokio::test]
    async fn test_load_section_uses_builtin_fragment() {
        let services = services(clinic_store());
        let msg = run(
            UpdateAction::LoadSection {
                id: "visits".into(),
            },
            &services,
        )
        .await;

        match msg {
            Message::SectionLoaded { id, result } => {
                assert_eq!(id, "visits");
                assert!(result.is_ok());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
