//! Prescription payload validation.
//!
//! Pure functions with no side effects: a draft either becomes a fully-typed
//! [`PrescriptionBody`] or fails with the first violated rule.
//!
//! Required fields are checked in a fixed order (name, age, gender, dateOfPrescription,
//! inscription, instructions, doctorInformation) and the first absent one short-circuits
//! with `MissingField` naming it. Presence is checked explicitly per field: an empty or
//! whitespace-only string counts as missing, but a legitimate zero does not — age `0` is
//! valid. The inscription shape is checked after all required fields are present.

use crate::error::{PrescriptionError, PrescriptionResult};
use crate::model::{Medicine, MedicineDraft, PrescriptionBody, PrescriptionDraft};
use rx_types::NonEmptyText;

/// Validates a candidate payload into a [`PrescriptionBody`].
///
/// # Errors
///
/// Returns [`PrescriptionError::MissingField`] for the first absent required field, or
/// [`PrescriptionError::InvalidInscriptionFormat`] when the inscription is empty or any
/// element violates the medicine shape.
pub fn validate_draft(draft: PrescriptionDraft) -> PrescriptionResult<PrescriptionBody> {
    let name = require_text("name", draft.name)?;
    let age = require_age(draft.age)?;
    let gender = require_text("gender", draft.gender)?;
    let date_of_prescription =
        require_text("dateOfPrescription", draft.date_of_prescription)?;
    let inscription = draft
        .inscription
        .ok_or(PrescriptionError::MissingField("inscription"))?;
    let instructions = require_text("instructions", draft.instructions)?;
    let doctor_information = require_text("doctorInformation", draft.doctor_information)?;

    let inscription = validate_inscription(inscription)?;

    Ok(PrescriptionBody {
        name,
        age,
        gender,
        date_of_prescription,
        inscription,
        instructions,
        doctor_information,
    })
}

fn require_text(
    field: &'static str,
    value: Option<String>,
) -> PrescriptionResult<NonEmptyText> {
    let value = value.ok_or(PrescriptionError::MissingField(field))?;
    NonEmptyText::new(value).map_err(|_| PrescriptionError::MissingField(field))
}

fn require_age(value: Option<i64>) -> PrescriptionResult<u32> {
    let age = value.ok_or(PrescriptionError::MissingField("age"))?;
    u32::try_from(age).map_err(|_| PrescriptionError::MissingField("age"))
}

/// Checks the inscription shape: a non-empty array whose every element has non-empty
/// `name`/`dosage` and JSON-numeric `frequency`/`quantity`.
fn validate_inscription(entries: Vec<MedicineDraft>) -> PrescriptionResult<Vec<Medicine>> {
    if entries.is_empty() {
        return Err(PrescriptionError::InvalidInscriptionFormat);
    }

    entries.into_iter().map(validate_medicine).collect()
}

fn validate_medicine(entry: MedicineDraft) -> PrescriptionResult<Medicine> {
    let name = entry
        .name
        .and_then(|n| NonEmptyText::new(n).ok())
        .ok_or(PrescriptionError::InvalidInscriptionFormat)?;
    let dosage = entry
        .dosage
        .and_then(|d| NonEmptyText::new(d).ok())
        .ok_or(PrescriptionError::InvalidInscriptionFormat)?;
    let frequency = require_number(entry.frequency)?;
    let quantity = require_number(entry.quantity)?;

    Ok(Medicine {
        name,
        dosage,
        frequency,
        quantity,
    })
}

fn require_number(value: Option<serde_json::Value>) -> PrescriptionResult<f64> {
    value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .ok_or(PrescriptionError::InvalidInscriptionFormat)
}
