//! Prescription data model.
//!
//! A `Prescription` is the single persisted record type: one document per patient visit,
//! holding the patient details, the inscription (the list of prescribed medicines) and
//! free-text instructions. Medicines are embedded and have no identity or lifecycle of
//! their own.
//!
//! Wire format is camelCase JSON; the identifier is serialized as `_id` to match the
//! document store's native key.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use rx_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The input identifier was not a well-formed prescription id.
#[derive(Debug, thiserror::Error)]
#[error("not a valid prescription id: {0:?}")]
pub struct IdFormatError(String);

/// Canonical prescription identifier: a 24-character lowercase hex ObjectId.
///
/// Once constructed, the contained identifier is guaranteed well-formed. Use
/// [`PrescriptionId::parse`] for externally supplied identifiers (API paths, CLI input) and
/// [`PrescriptionId::generate`] when the store layer allocates a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrescriptionId(ObjectId);

impl PrescriptionId {
    /// Allocates a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Validates and parses an externally supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdFormatError`] if `input` is not a 24-character hex ObjectId. Callers that
    /// speak the API contract map this to `NotFound` before any store lookup.
    pub fn parse(input: &str) -> Result<Self, IdFormatError> {
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| IdFormatError(input.to_owned()))
    }

    /// Returns the canonical 24-character hex form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Display for PrescriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for PrescriptionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for PrescriptionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PrescriptionId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A single prescribed medicine, embedded in its parent prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[schema(value_type = String, example = "Paracetamol")]
    pub name: NonEmptyText,
    #[schema(value_type = String, example = "500mg")]
    pub dosage: NonEmptyText,
    /// Times per day.
    pub frequency: f64,
    /// Units dispensed.
    pub quantity: f64,
}

/// A persisted prescription record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "65b2f1ab9d3e2a4f1c8d0e77")]
    pub id: PrescriptionId,
    #[schema(value_type = String, example = "Jane Doe")]
    pub name: NonEmptyText,
    pub age: u32,
    #[schema(value_type = String, example = "Female")]
    pub gender: NonEmptyText,
    #[schema(value_type = String, example = "2025-01-01")]
    pub date_of_prescription: NonEmptyText,
    pub inscription: Vec<Medicine>,
    #[schema(value_type = String, example = "Take after meals")]
    pub instructions: NonEmptyText,
    #[schema(value_type = String, example = "Dr. Mark Doe, MD")]
    pub doctor_information: NonEmptyText,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl Prescription {
    /// Assembles a record from a validated body, a store-assigned id and a creation instant.
    pub fn from_parts(id: PrescriptionId, body: PrescriptionBody, stamped_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: body.name,
            age: body.age,
            gender: body.gender,
            date_of_prescription: body.date_of_prescription,
            inscription: body.inscription,
            instructions: body.instructions,
            doctor_information: body.doctor_information,
            created_at: stamped_at,
            updated_at: stamped_at,
        }
    }

    /// Builds a full replacement of this record's mutable fields.
    ///
    /// The identifier and `created_at` are preserved; `updated_at` takes the given instant.
    pub fn replacing(&self, body: PrescriptionBody, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            name: body.name,
            age: body.age,
            gender: body.gender,
            date_of_prescription: body.date_of_prescription,
            inscription: body.inscription,
            instructions: body.instructions,
            doctor_information: body.doctor_information,
            created_at: self.created_at,
            updated_at,
        }
    }
}

/// A validated prescription body: everything but the store-assigned id and timestamps.
///
/// Produced only by [`crate::validation::validate_draft`], so holding one means every
/// invariant of the data model is satisfied.
#[derive(Debug, Clone)]
pub struct PrescriptionBody {
    pub name: NonEmptyText,
    pub age: u32,
    pub gender: NonEmptyText,
    pub date_of_prescription: NonEmptyText,
    pub inscription: Vec<Medicine>,
    pub instructions: NonEmptyText,
    pub doctor_information: NonEmptyText,
}

/// A candidate prescription payload as supplied by a caller.
///
/// Every field is optional so validation can observe absence and report the exact missing
/// field, rather than the deserializer rejecting the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionDraft {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub date_of_prescription: Option<String>,
    pub inscription: Option<Vec<MedicineDraft>>,
    pub instructions: Option<String>,
    pub doctor_information: Option<String>,
}

/// A candidate medicine entry.
///
/// `frequency` and `quantity` are kept as raw JSON values so a non-numeric value is a
/// validation outcome (`InvalidInscriptionFormat`) instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineDraft {
    pub name: Option<String>,
    pub dosage: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub frequency: Option<serde_json::Value>,
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_hex() {
        let id = PrescriptionId::generate();
        let parsed = PrescriptionId::parse(&id.to_hex()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in ["", "123", "not-an-object-id-at-all!!", "65b2f1ab9d3e2a4f1c8d0e7"] {
            assert!(PrescriptionId::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn id_serializes_as_plain_hex_string() {
        let id = PrescriptionId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
    }

    #[test]
    fn prescription_wire_format_is_camel_case_with_underscore_id() {
        let body = PrescriptionBody {
            name: NonEmptyText::new("Jane Doe").unwrap(),
            age: 30,
            gender: NonEmptyText::new("Female").unwrap(),
            date_of_prescription: NonEmptyText::new("2025-01-01").unwrap(),
            inscription: vec![Medicine {
                name: NonEmptyText::new("Paracetamol").unwrap(),
                dosage: NonEmptyText::new("500mg").unwrap(),
                frequency: 2.0,
                quantity: 10.0,
            }],
            instructions: NonEmptyText::new("Take after meals").unwrap(),
            doctor_information: NonEmptyText::new("Dr. Mark Doe, MD").unwrap(),
        };
        let record =
            Prescription::from_parts(PrescriptionId::generate(), body, chrono::Utc::now());
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("_id").is_some());
        assert!(value.get("dateOfPrescription").is_some());
        assert!(value.get("doctorInformation").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["inscription"][0]["name"], "Paracetamol");
    }

    #[test]
    fn draft_tolerates_missing_and_null_fields() {
        let draft: PrescriptionDraft =
            serde_json::from_str(r#"{"name": "Jane Doe", "age": null}"#).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Jane Doe"));
        assert!(draft.age.is_none());
        assert!(draft.inscription.is_none());
    }
}
