//! Landing section summary: counts, upcoming vaccinations, recent activity

use chrono::NaiveDate;

use vetkoto_core::prelude::*;
use vetkoto_core::{Entity, Record, SchemaRegistry};
use vetkoto_remote::{ListQuery, RemoteStore};

use crate::label_cache::LabelCache;
use crate::table::cell_text;

/// Shown in place of the feed when any activity query fails.
pub const ACTIVITY_FAILED: &str = "Failed to load recent activity.";

/// Items per activity group.
const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Visit,
    Diagnosis,
    Prescription,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub owners: usize,
    pub patients: usize,
    pub visits: usize,
    pub upcoming_vaccinations: usize,
    pub activity: std::result::Result<Vec<ActivityItem>, String>,
}

/// Parse the date part of a `YYYY-MM-DD[...]` value.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let date = text.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Load the summary. Count failures propagate; activity failures are
/// reported inside the summary.
pub async fn load_dashboard<S>(
    store: &S,
    registry: &SchemaRegistry,
    cache: &LabelCache,
    today: NaiveDate,
) -> Result<DashboardSummary>
where
    S: RemoteStore + Sync,
{
    let all = ListQuery::all();
    let owners = store.list(Entity::Owners, &all).await?.len();
    let patients = store.list(Entity::Patients, &all).await?.len();
    let visits = store.list(Entity::Visits, &all).await?.len();
    let upcoming_vaccinations = store
        .list(Entity::Vaccinations, &all)
        .await?
        .iter()
        .filter(|row| parse_date(&row.text("next_due")).is_some_and(|due| due > today))
        .count();

    let activity = match recent_activity(store, registry, cache).await {
        Ok(items) => Ok(items),
        Err(e) => {
            error!("Failed to load recent activity: {}", e);
            Err(ACTIVITY_FAILED.to_string())
        }
    };

    Ok(DashboardSummary {
        owners,
        patients,
        visits,
        upcoming_vaccinations,
        activity,
    })
}

async fn recent_activity<S>(
    store: &S,
    registry: &SchemaRegistry,
    cache: &LabelCache,
) -> Result<Vec<ActivityItem>>
where
    S: RemoteStore + Sync,
{
    let mut items = Vec::new();

    for row in latest(store, Entity::Visits, "visit_date").await? {
        let patient = label(store, registry, cache, Entity::Visits, &row, "patient_name").await;
        items.push(ActivityItem {
            kind: ActivityKind::Visit,
            text: format!("Visit for {} on {}", patient, row.text("visit_date")),
        });
    }

    for row in latest(store, Entity::Diagnoses, "diagnosis_date").await? {
        let patient = label(store, registry, cache, Entity::Diagnoses, &row, "patient_name").await;
        items.push(ActivityItem {
            kind: ActivityKind::Diagnosis,
            text: format!("Diagnosis for {}: {}", patient, row.text("description")),
        });
    }

    for row in latest(store, Entity::Prescriptions, "prescription_date").await? {
        let medication = label(store, registry, cache, Entity::Prescriptions, &row, "med_name").await;
        items.push(ActivityItem {
            kind: ActivityKind::Prescription,
            text: format!(
                "Prescription for {} given on {}",
                medication,
                row.text("start_date")
            ),
        });
    }

    Ok(items)
}

async fn latest<S>(store: &S, entity: Entity, date_column: &str) -> Result<Vec<Record>>
where
    S: RemoteStore + Sync,
{
    let query = ListQuery::new()
        .limit(RECENT_LIMIT)
        .order_by(date_column, false);
    store.list(entity, &query).await
}

async fn label<S>(
    store: &S,
    registry: &SchemaRegistry,
    cache: &LabelCache,
    entity: Entity,
    row: &Record,
    column: &str,
) -> String
where
    S: RemoteStore + Sync,
{
    match cell_text(store, cache, registry.schema(entity), row, column).await {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => "unknown".to_string(),
        Err(e) => {
            warn!("Unresolved {} for {} activity: {}", column, entity, e);
            "unknown".to_string()
        }
    }
}
