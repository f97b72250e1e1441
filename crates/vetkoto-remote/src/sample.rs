//! Sample clinic used by demo mode

use serde_json::{json, Value};

use vetkoto_core::{Entity, Record};

fn rows(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

/// Rows per entity. Foreign keys reference rows that exist.
pub fn clinic_rows() -> Vec<(Entity, Vec<Record>)> {
    vec![
        (
            Entity::Owners,
            rows(vec![
                json!({"owner_id": 1, "owner_name": "Alice Moreira", "phone": "+351 912 000 101", "email": "alice@example.com", "address": "Rua das Flores 12", "city": "Porto", "created_at": "2025-01-14"}),
                json!({"owner_id": 2, "owner_name": "Bruno Santos", "phone": "+351 913 000 202", "email": "bruno@example.com", "address": "Av. da Liberdade 80", "city": "Lisboa", "created_at": "2025-02-03"}),
                json!({"owner_id": 3, "owner_name": "Carla Ito", "phone": "+351 914 000 303", "email": "carla@example.com", "address": "Largo do Paço 4", "city": "Braga", "created_at": "2025-03-21"}),
                json!({"owner_id": 4, "owner_name": "Diogo Reyes", "phone": null, "email": "diogo@example.com", "address": null, "city": "Coimbra", "created_at": "2025-05-09"}),
            ]),
        ),
        (
            Entity::Patients,
            rows(vec![
                json!({"patient_id": 1, "owner_id": 1, "patient_name": "Rex", "species": "Dog", "breed": "Labrador", "sex": "M", "microchip": "941000024680135"}),
                json!({"patient_id": 2, "owner_id": 1, "patient_name": "Mimi", "species": "Cat", "breed": "Siamese", "sex": "F", "microchip": null}),
                json!({"patient_id": 3, "owner_id": 2, "patient_name": "Bolt", "species": "Dog", "breed": "Border Collie", "sex": "M", "microchip": "941000024680222"}),
                json!({"patient_id": 4, "owner_id": 3, "patient_name": "Kiwi", "species": "Bird", "breed": "Cockatiel", "sex": "F", "microchip": null}),
                json!({"patient_id": 5, "owner_id": 4, "patient_name": "Nala", "species": "Cat", "breed": "European Shorthair", "sex": "F", "microchip": "941000024680399"}),
            ]),
        ),
        (
            Entity::Veterinarians,
            rows(vec![
                json!({"veterinarian_id": 1, "vet_name": "Dr. Helena Costa", "license": "OMV-1021"}),
                json!({"veterinarian_id": 2, "vet_name": "Dr. Rui Almeida", "license": "OMV-2213"}),
                json!({"veterinarian_id": 3, "vet_name": "Dr. Sofia Nunes", "license": "OMV-3307"}),
            ]),
        ),
        (
            Entity::Visits,
            rows(vec![
                json!({"visit_id": 1, "patient_id": 1, "veterinarian_id": 1, "visit_date": "2026-03-02", "reason": "Annual checkup", "notes": "Healthy, slight tartar"}),
                json!({"visit_id": 2, "patient_id": 2, "veterinarian_id": 2, "visit_date": "2026-04-18", "reason": "Vomiting", "notes": null}),
                json!({"visit_id": 3, "patient_id": 3, "veterinarian_id": 1, "visit_date": "2026-06-11", "reason": "Limping on front leg", "notes": "X-ray taken"}),
                json!({"visit_id": 4, "patient_id": 4, "veterinarian_id": 3, "visit_date": "2026-07-30", "reason": "Feather plucking", "notes": null}),
                json!({"visit_id": 5, "patient_id": 5, "veterinarian_id": 2, "visit_date": "2026-09-05", "reason": "Vaccination", "notes": null}),
                json!({"visit_id": 6, "patient_id": 1, "veterinarian_id": 3, "visit_date": "2026-10-01", "reason": "Ear infection", "notes": "Drops prescribed"}),
            ]),
        ),
        (
            Entity::Diagnoses,
            rows(vec![
                json!({"diagnosis_id": 1, "visit_id": 2, "description": "Gastritis", "severity": "Mild", "diagnosis_date": "2026-04-18"}),
                json!({"diagnosis_id": 2, "visit_id": 3, "description": "Sprained carpus", "severity": "Moderate", "diagnosis_date": "2026-06-11"}),
                json!({"diagnosis_id": 3, "visit_id": 4, "description": "Stress-related plucking", "severity": "Mild", "diagnosis_date": "2026-07-30"}),
                json!({"diagnosis_id": 4, "visit_id": 6, "description": "Otitis externa", "severity": "Moderate", "diagnosis_date": "2026-10-01"}),
            ]),
        ),
        (
            Entity::Medications,
            rows(vec![
                json!({"medication_id": 1, "med_name": "Amoxicillin", "unit": "mg", "stock": 240}),
                json!({"medication_id": 2, "med_name": "Meloxicam", "unit": "ml", "stock": 35}),
                json!({"medication_id": 3, "med_name": "Maropitant", "unit": "tablet", "stock": 60}),
                json!({"medication_id": 4, "med_name": "Otomax", "unit": "ml", "stock": 12}),
            ]),
        ),
        (
            Entity::Prescriptions,
            rows(vec![
                json!({"prescription_id": 1, "visit_id": 2, "medication_id": 3, "dose": "1 tablet", "frequency": "Daily", "route": "Oral", "duration": "4 days", "start_date": "2026-04-18", "prescription_date": "2026-04-18"}),
                json!({"prescription_id": 2, "visit_id": 3, "medication_id": 2, "dose": "0.5 ml", "frequency": "Daily", "route": "Oral", "duration": "7 days", "start_date": "2026-06-11", "prescription_date": "2026-06-11"}),
                json!({"prescription_id": 3, "visit_id": 6, "medication_id": 4, "dose": "4 drops", "frequency": "Twice daily", "route": "Topical", "duration": "10 days", "start_date": "2026-10-01", "prescription_date": "2026-10-01"}),
            ]),
        ),
        (
            Entity::Allergies,
            rows(vec![
                json!({"allergy_id": 1, "patient_id": 1, "allergen": "Chicken protein", "severity": "Moderate"}),
                json!({"allergy_id": 2, "patient_id": 2, "allergen": "Penicillin", "severity": "Severe"}),
                json!({"allergy_id": 3, "patient_id": 5, "allergen": "Flea saliva", "severity": "Mild"}),
            ]),
        ),
        (
            Entity::Vaccinations,
            rows(vec![
                json!({"vaccination_id": 1, "patient_id": 1, "vaccine": "Rabies", "date_given": "2026-03-02", "next_due": "2027-03-02"}),
                json!({"vaccination_id": 2, "patient_id": 3, "vaccine": "DHPP", "date_given": "2025-06-11", "next_due": "2026-06-11"}),
                json!({"vaccination_id": 3, "patient_id": 5, "vaccine": "FVRCP", "date_given": "2026-09-05", "next_due": "2027-09-05"}),
                json!({"vaccination_id": 4, "patient_id": 2, "vaccine": "FeLV", "date_given": "2025-11-20", "next_due": "2026-11-20"}),
            ]),
        ),
    ]
}
