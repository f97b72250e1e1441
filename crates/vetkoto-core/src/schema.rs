//! Static per-entity metadata
//!
//! The [`SchemaRegistry`] is built once at startup and handed to every
//! component that needs to know how an entity is listed, rendered or edited.
//! Foreign keys are resolved only through the [`Relation`]s declared here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Key of the synthetic row-actions column.
pub const ACTIONS_COLUMN: &str = "actions";

/// Closed set of clinic entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Owners,
    Patients,
    Veterinarians,
    Visits,
    Diagnoses,
    Medications,
    Prescriptions,
    Allergies,
    Vaccinations,
}

impl Entity {
    /// All entities, in navigation order.
    pub const ALL: [Entity; 9] = [
        Entity::Owners,
        Entity::Patients,
        Entity::Veterinarians,
        Entity::Visits,
        Entity::Diagnoses,
        Entity::Medications,
        Entity::Prescriptions,
        Entity::Allergies,
        Entity::Vaccinations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Owners => "owners",
            Entity::Patients => "patients",
            Entity::Veterinarians => "veterinarians",
            Entity::Visits => "visits",
            Entity::Diagnoses => "diagnoses",
            Entity::Medications => "medications",
            Entity::Prescriptions => "prescriptions",
            Entity::Allergies => "allergies",
            Entity::Vaccinations => "vaccinations",
        }
    }

    /// Name with the first letter capitalized ("Owners").
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Entity::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s.trim())
            .ok_or_else(|| Error::unknown_entity(s))
    }
}

/// Kind of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Data,
    Actions,
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    const fn data(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: ColumnKind::Data,
        }
    }

    const fn actions() -> Self {
        Self {
            key: ACTIONS_COLUMN,
            label: "Actions",
            kind: ColumnKind::Actions,
        }
    }

    pub fn is_actions(&self) -> bool {
        self.kind == ColumnKind::Actions
    }
}

/// Input control type of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Number,
    Date,
    TextArea,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Number => "number",
            InputType::Date => "date",
            InputType::TextArea => "textarea",
        }
    }
}

/// One editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub input: InputType,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl Field {
    const fn new(key: &'static str, label: &'static str, input: InputType) -> Self {
        Self {
            key,
            label,
            input,
            required: false,
            placeholder: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }
}

/// A further hop taken on the related record before reading the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// Field on the intermediate record holding the next id.
    pub field: &'static str,
    pub entity: Entity,
}

/// Foreign-key relation from a local field to a label on another entity.
///
/// `visit_id -> visits => patient_id -> patients.patient_name` is expressed as
/// `local_field: "visit_id", entity: Visits, through: Some(Hop { field:
/// "patient_id", entity: Patients }), label_field: "patient_name"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub local_field: &'static str,
    pub entity: Entity,
    pub label_field: &'static str,
    pub through: Option<Hop>,
}

impl Relation {
    const fn direct(local_field: &'static str, entity: Entity, label_field: &'static str) -> Self {
        Self {
            local_field,
            entity,
            label_field,
            through: None,
        }
    }

    const fn via(
        local_field: &'static str,
        entity: Entity,
        hop_field: &'static str,
        hop_entity: Entity,
        label_field: &'static str,
    ) -> Self {
        Self {
            local_field,
            entity,
            label_field,
            through: Some(Hop {
                field: hop_field,
                entity: hop_entity,
            }),
        }
    }

    /// Column this relation supplies text for.
    pub fn display_field(&self) -> &'static str {
        self.label_field
    }

    pub fn is_direct(&self) -> bool {
        self.through.is_none()
    }

    /// Entity the label is finally read from.
    pub fn target_entity(&self) -> Entity {
        self.through.map(|hop| hop.entity).unwrap_or(self.entity)
    }
}

/// Metadata for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub entity: Entity,
    pub primary_key: &'static str,
    /// Table or view read by `list` and `options`.
    pub list_source: &'static str,
    /// Table written by get/create/update/remove.
    pub table: &'static str,
    pub columns: &'static [Column],
    pub fields: &'static [Field],
    pub relations: &'static [Relation],
    pub search_columns: &'static [&'static str],
}

impl EntitySchema {
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Relation whose display field is `column`.
    pub fn relation_for_column(&self, column: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.display_field() == column)
    }

    /// Direct relation declared on `field`, used to render a select.
    pub fn select_relation(&self, field: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|r| r.is_direct() && r.local_field == field)
    }

    /// Column for the server-side filter: the first candidate stored on the
    /// listed rows. Relation-resolved columns only exist after rendering.
    pub fn preferred_search_column(&self) -> Option<&'static str> {
        self.search_columns
            .iter()
            .copied()
            .find(|column| self.relation_for_column(column).is_none())
    }
}

// ─────────────────────────────────────────────────────────────────
// Canonical clinic schema
// ─────────────────────────────────────────────────────────────────

use InputType::{Date, Email, Number, Text, TextArea};

const OWNERS: EntitySchema = EntitySchema {
    entity: Entity::Owners,
    primary_key: "owner_id",
    list_source: "owners",
    table: "owners",
    columns: &[
        Column::data("owner_id", "ID"),
        Column::data("owner_name", "Name"),
        Column::data("phone", "Phone"),
        Column::data("email", "Email"),
        Column::data("address", "Address"),
        Column::data("city", "City"),
        Column::data("created_at", "Created At"),
        Column::actions(),
    ],
    fields: &[
        Field::new("owner_name", "Name", Text).required(),
        Field::new("phone", "Phone", Text),
        Field::new("email", "Email", Email).placeholder("name@example.com"),
        Field::new("address", "Address", Text),
        Field::new("city", "City", Text),
    ],
    relations: &[],
    search_columns: &["owner_name", "email", "phone", "city"],
};

const PATIENTS: EntitySchema = EntitySchema {
    entity: Entity::Patients,
    primary_key: "patient_id",
    list_source: "patients",
    table: "patients",
    columns: &[
        Column::data("patient_id", "ID"),
        Column::data("patient_name", "Pet Name"),
        Column::data("owner_name", "Owner"),
        Column::data("species", "Species"),
        Column::data("breed", "Breed"),
        Column::data("sex", "Sex"),
        Column::data("microchip", "Microchip"),
        Column::actions(),
    ],
    fields: &[
        Field::new("owner_id", "Owner ID", Number).required(),
        Field::new("patient_name", "Pet Name", Text).required(),
        Field::new("species", "Species", Text).required(),
        Field::new("breed", "Breed", Text),
        Field::new("sex", "Sex", Text),
        Field::new("microchip", "Microchip", Text),
    ],
    relations: &[Relation::direct("owner_id", Entity::Owners, "owner_name")],
    search_columns: &["patient_name", "species", "breed", "owner_name"],
};

const VETERINARIANS: EntitySchema = EntitySchema {
    entity: Entity::Veterinarians,
    primary_key: "veterinarian_id",
    list_source: "veterinarians",
    table: "veterinarians",
    columns: &[
        Column::data("veterinarian_id", "ID"),
        Column::data("vet_name", "Name"),
        Column::data("license", "License"),
        Column::actions(),
    ],
    fields: &[
        Field::new("vet_name", "Full Name", Text).required(),
        Field::new("license", "License No.", Text),
    ],
    relations: &[],
    search_columns: &["vet_name", "license"],
};

const VISITS: EntitySchema = EntitySchema {
    entity: Entity::Visits,
    primary_key: "visit_id",
    list_source: "visits",
    table: "visits",
    columns: &[
        Column::data("visit_id", "ID"),
        Column::data("patient_name", "Pet"),
        Column::data("visit_date", "Visit Date"),
        Column::data("vet_name", "Veterinarian"),
        Column::data("reason", "Reason for Visit"),
        Column::data("notes", "Notes"),
        Column::actions(),
    ],
    fields: &[
        Field::new("patient_id", "Patient ID", Number).required(),
        Field::new("visit_date", "Visit Date", Date)
            .required()
            .placeholder("YYYY-MM-DD"),
        Field::new("veterinarian_id", "Veterinarian ID", Number).required(),
        Field::new("reason", "Reason for Visit", Text),
        Field::new("notes", "Notes", TextArea),
    ],
    relations: &[
        Relation::direct("patient_id", Entity::Patients, "patient_name"),
        Relation::direct("veterinarian_id", Entity::Veterinarians, "vet_name"),
    ],
    search_columns: &["patient_name", "vet_name", "reason"],
};

const DIAGNOSES: EntitySchema = EntitySchema {
    entity: Entity::Diagnoses,
    primary_key: "diagnosis_id",
    list_source: "diagnoses",
    table: "diagnoses",
    columns: &[
        Column::data("diagnosis_id", "ID"),
        Column::data("visit_id", "Visit ID"),
        Column::data("patient_name", "Pet"),
        Column::data("description", "Diagnosis"),
        Column::data("severity", "Severity"),
        Column::data("vet_name", "Veterinarian"),
        Column::data("diagnosis_date", "Created At"),
        Column::actions(),
    ],
    fields: &[
        Field::new("visit_id", "Visit ID", Number).required(),
        Field::new("description", "Diagnosis", Text).required(),
        Field::new("severity", "Severity", Text),
    ],
    relations: &[
        Relation::direct("visit_id", Entity::Visits, "visit_id"),
        Relation::via(
            "visit_id",
            Entity::Visits,
            "patient_id",
            Entity::Patients,
            "patient_name",
        ),
        Relation::via(
            "visit_id",
            Entity::Visits,
            "veterinarian_id",
            Entity::Veterinarians,
            "vet_name",
        ),
    ],
    search_columns: &["description", "patient_name", "severity"],
};

const MEDICATIONS: EntitySchema = EntitySchema {
    entity: Entity::Medications,
    primary_key: "medication_id",
    list_source: "medications",
    table: "medications",
    columns: &[
        Column::data("medication_id", "ID"),
        Column::data("med_name", "Name"),
        Column::data("unit", "Unit"),
        Column::data("stock", "Stock"),
        Column::actions(),
    ],
    fields: &[
        Field::new("med_name", "Medication Name", Text).required(),
        Field::new("unit", "Unit", Text).placeholder("mg, ml, tablet"),
        Field::new("stock", "Stock", Number),
    ],
    relations: &[],
    search_columns: &["med_name", "unit"],
};

const PRESCRIPTIONS: EntitySchema = EntitySchema {
    entity: Entity::Prescriptions,
    primary_key: "prescription_id",
    list_source: "prescriptions",
    table: "prescriptions",
    columns: &[
        Column::data("prescription_id", "ID"),
        Column::data("visit_id", "Visit"),
        Column::data("patient_name", "Patient Name"),
        Column::data("med_name", "Medication"),
        Column::data("dose", "Dose"),
        Column::data("frequency", "Frequency"),
        Column::data("duration", "Duration"),
        Column::data("route", "Route"),
        Column::data("prescription_date", "Prescription Date"),
        Column::actions(),
    ],
    fields: &[
        Field::new("visit_id", "Visit ID", Number).required(),
        Field::new("medication_id", "Medication ID", Number).required(),
        Field::new("dose", "Dose", Text).required(),
        Field::new("frequency", "Frequency", Text),
        Field::new("route", "Route", Text),
        Field::new("duration", "Duration", Text),
        Field::new("start_date", "Start Date", Date).placeholder("YYYY-MM-DD"),
    ],
    relations: &[
        Relation::direct("medication_id", Entity::Medications, "med_name"),
        Relation::direct("visit_id", Entity::Visits, "visit_id"),
        Relation::via(
            "visit_id",
            Entity::Visits,
            "patient_id",
            Entity::Patients,
            "patient_name",
        ),
    ],
    search_columns: &["med_name", "patient_name", "dose"],
};

const ALLERGIES: EntitySchema = EntitySchema {
    entity: Entity::Allergies,
    primary_key: "allergy_id",
    list_source: "allergies_view",
    table: "allergies",
    columns: &[
        Column::data("allergy_id", "ID"),
        Column::data("patient_name", "Patient"),
        Column::data("allergen", "Allergen"),
        Column::data("severity", "Severity"),
        Column::actions(),
    ],
    fields: &[
        Field::new("patient_id", "Patient ID", Number).required(),
        Field::new("allergen", "Allergen", Text).required(),
        Field::new("severity", "Severity", Text),
    ],
    relations: &[Relation::direct("patient_id", Entity::Patients, "patient_name")],
    search_columns: &["allergen", "patient_name"],
};

const VACCINATIONS: EntitySchema = EntitySchema {
    entity: Entity::Vaccinations,
    primary_key: "vaccination_id",
    list_source: "vaccinations_view",
    table: "vaccinations",
    columns: &[
        Column::data("vaccination_id", "ID"),
        Column::data("patient_name", "Patient"),
        Column::data("vaccine", "Vaccine"),
        Column::data("date_given", "Date Given"),
        Column::data("next_due", "Next Due"),
        Column::actions(),
    ],
    fields: &[
        Field::new("patient_id", "Patient ID", Number).required(),
        Field::new("vaccine", "Vaccine", Text).required(),
        Field::new("date_given", "Date Given", Date).placeholder("YYYY-MM-DD"),
        Field::new("next_due", "Next Due", Date).placeholder("YYYY-MM-DD"),
    ],
    relations: &[Relation::direct("patient_id", Entity::Patients, "patient_name")],
    search_columns: &["vaccine", "patient_name"],
};

/// Registry of entity metadata, indexed by [`Entity`].
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<EntitySchema>,
}

impl SchemaRegistry {
    /// The clinic schema used by the dashboard.
    pub fn clinic() -> Self {
        let schemas = vec![
            OWNERS,
            PATIENTS,
            VETERINARIANS,
            VISITS,
            DIAGNOSES,
            MEDICATIONS,
            PRESCRIPTIONS,
            ALLERGIES,
            VACCINATIONS,
        ];
        debug_assert!(schemas
            .iter()
            .zip(Entity::ALL)
            .all(|(schema, entity)| schema.entity == entity));
        Self { schemas }
    }

    pub fn schema(&self, entity: Entity) -> &EntitySchema {
        // `clinic()` stores one schema per entity in `Entity::ALL` order
        &self.schemas[entity as usize]
    }

    /// Look up by name, failing with an unknown-entity error.
    pub fn lookup(&self, name: &str) -> Result<&EntitySchema> {
        let entity: Entity = name.parse()?;
        Ok(self.schema(entity))
    }

    /// Entity for a section id, when the id names one.
    pub fn entity_for(&self, id: &str) -> Option<Entity> {
        id.parse().ok()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.schemas.iter().map(|s| s.entity)
    }

    pub fn columns(&self, entity: Entity) -> &'static [Column] {
        self.schema(entity).columns
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::clinic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_round_trips_through_name() {
        for entity in Entity::ALL {
            assert_eq!(entity.as_str().parse::<Entity>().unwrap(), entity);
        }
    }

    #[test]
    fn test_unknown_entity_is_rejected() {
        let err = "hamsters".parse::<Entity>().unwrap_err();
        assert!(matches!(err, Error::UnknownEntity { name } if name == "hamsters"));
    }

    #[test]
    fn test_preferred_search_column_skips_resolved_columns() {
        let registry = SchemaRegistry::clinic();
        assert_eq!(
            registry.schema(Entity::Owners).preferred_search_column(),
            Some("owner_name")
        );
        assert_eq!(
            registry.schema(Entity::Visits).preferred_search_column(),
            Some("reason")
        );
        assert_eq!(
            registry.schema(Entity::Prescriptions).preferred_search_column(),
            Some("dose")
        );
        for entity in registry.entities() {
            let schema = registry.schema(entity);
            if let Some(column) = schema.preferred_search_column() {
                assert!(schema.relation_for_column(column).is_none(), "{entity}");
            }
        }
    }

    #[test]
    fn test_registry_indexes_every_entity() {
        let registry = SchemaRegistry::clinic();
        for entity in Entity::ALL {
            assert_eq!(registry.schema(entity).entity, entity);
        }
    }

    #[test]
    fn test_every_schema_ends_with_actions_column() {
        let registry = SchemaRegistry::clinic();
        for entity in registry.entities() {
            let columns = registry.columns(entity);
            assert!(columns.last().is_some_and(Column::is_actions), "{entity}");
            assert_eq!(columns.iter().filter(|c| c.is_actions()).count(), 1);
        }
    }

    #[test]
    fn test_primary_key_is_first_column_and_not_editable() {
        let registry = SchemaRegistry::clinic();
        for entity in registry.entities() {
            let schema = registry.schema(entity);
            assert_eq!(schema.columns[0].key, schema.primary_key);
            assert!(!schema.is_field(schema.primary_key), "{entity}");
        }
    }

    #[test]
    fn test_relations_point_at_editable_fields() {
        let registry = SchemaRegistry::clinic();
        for entity in registry.entities() {
            let schema = registry.schema(entity);
            for relation in schema.relations {
                assert!(schema.is_field(relation.local_field), "{entity}");
            }
        }
    }

    #[test]
    fn test_views_used_for_listing() {
        let registry = SchemaRegistry::clinic();
        let allergies = registry.schema(Entity::Allergies);
        assert_eq!(allergies.list_source, "allergies_view");
        assert_eq!(allergies.table, "allergies");
        assert_eq!(
            registry.schema(Entity::Vaccinations).list_source,
            "vaccinations_view"
        );
    }

    #[test]
    fn test_through_relation_targets_final_entity() {
        let registry = SchemaRegistry::clinic();
        let diagnoses = registry.schema(Entity::Diagnoses);
        let rel = diagnoses.relation_for_column("patient_name").unwrap();
        assert_eq!(rel.local_field, "visit_id");
        assert_eq!(rel.entity, Entity::Visits);
        assert_eq!(rel.target_entity(), Entity::Patients);
        assert!(!rel.is_direct());
    }

    #[test]
    fn test_select_relation_ignores_through_hops() {
        let registry = SchemaRegistry::clinic();
        let prescriptions = registry.schema(Entity::Prescriptions);
        let rel = prescriptions.select_relation("visit_id").unwrap();
        assert!(rel.is_direct());
        assert_eq!(rel.label_field, "visit_id");
        assert!(prescriptions.select_relation("dose").is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = SchemaRegistry::clinic();
        assert_eq!(registry.lookup("owners").unwrap().primary_key, "owner_id");
        assert!(registry.lookup("dashboard").is_err());
        assert_eq!(registry.entity_for("visits"), Some(Entity::Visits));
        assert_eq!(registry.entity_for("dashboard"), None);
    }

    #[test]
    fn test_entity_title() {
        assert_eq!(Entity::Owners.title(), "Owners");
        assert_eq!(Entity::Vaccinations.title(), "Vaccinations");
    }
}
