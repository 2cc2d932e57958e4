use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Table that holds ingredient rows.
pub const INGREDIENTS_TABLE: &str = "ingredients";

// ============ Identifier ============

/// Opaque identifier of a stored ingredient.
///
/// Hosted tables key rows either by an integer sequence or by a UUID, so the
/// identifier deserializes from a JSON number as well as a JSON string. It is
/// always carried and rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IngredientId(String);

impl IngredientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for IngredientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for IngredientId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for IngredientId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IngredientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

// ============ Safety level ============

/// Skin-safety risk tier of an ingredient.
///
/// Serialized as the exact strings stored in the `safety_level` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SafetyLevel {
    /// Safe for general use.
    #[default]
    #[serde(rename = "Aman")]
    Safe,
    /// Use with caution on sensitive skin.
    #[serde(rename = "Hati-hati untuk Kulit Sensitif")]
    CautionSensitiveSkin,
    /// Only with a doctor's prescription.
    #[serde(rename = "Perlu Resep Dokter")]
    RequiresPrescription,
}

impl SafetyLevel {
    /// All levels, in the order a picker should offer them.
    pub const ALL: [Self; 3] = [
        Self::Safe,
        Self::CautionSensitiveSkin,
        Self::RequiresPrescription,
    ];

    /// Value stored in the table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Aman",
            Self::CautionSensitiveSkin => "Hati-hati untuk Kulit Sensitif",
            Self::RequiresPrescription => "Perlu Resep Dokter",
        }
    }

    /// Short label for pickers and listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Aman",
            Self::CautionSensitiveSkin => "Hati-hati (Sensitif)",
            Self::RequiresPrescription => "Perlu Resep Dokter",
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the stored safety level values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSafetyLevel(pub String);

impl fmt::Display for UnknownSafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allowed: Vec<&str> = SafetyLevel::ALL.iter().map(|l| l.as_str()).collect();
        write!(
            f,
            "Unknown safety level '{}'. Must be one of: {}",
            self.0,
            allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownSafetyLevel {}

impl FromStr for SafetyLevel {
    type Err = UnknownSafetyLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownSafetyLevel(s.to_string()))
    }
}

// ============ Records ============

/// Read a nullable column, mapping `null` to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The editable attributes of an ingredient.
///
/// This is the body sent on insert and update; the field names are the
/// table's column names. Rows with `null` or missing columns still load:
/// text becomes `""` and the safety level becomes [`SafetyLevel::Safe`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngredientFields {
    /// Canonical display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// URL-safe identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-text list of skin benefits.
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: String,
    /// Safety classification.
    #[serde(default, deserialize_with = "null_as_default")]
    pub safety_level: SafetyLevel,
}

/// A stored ingredient row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    #[serde(flatten)]
    pub fields: IngredientFields,
    /// Creation time, when the table exposes one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Ingredient {
    #[must_use]
    pub fn new(id: impl Into<IngredientId>, fields: IngredientFields) -> Self {
        Self {
            id: id.into(),
            fields,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_deserializes_from_number_and_string() {
        let from_number: IngredientId = serde_json::from_str("42").unwrap();
        let from_text: IngredientId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(from_number.as_str(), "42");
        assert_eq!(from_text.as_str(), "a1b2");
    }

    #[test]
    fn id_serializes_as_text() {
        let json = serde_json::to_string(&IngredientId::from(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn safety_level_wire_values() {
        assert_eq!(
            serde_json::to_string(&SafetyLevel::CautionSensitiveSkin).unwrap(),
            "\"Hati-hati untuk Kulit Sensitif\""
        );
        let parsed: SafetyLevel = serde_json::from_str("\"Perlu Resep Dokter\"").unwrap();
        assert_eq!(parsed, SafetyLevel::RequiresPrescription);
    }

    #[test]
    fn safety_level_defaults_to_safe() {
        assert_eq!(SafetyLevel::default(), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::default().as_str(), "Aman");
    }

    #[test]
    fn safety_level_from_str_rejects_unknown() {
        assert_eq!("Aman".parse::<SafetyLevel>(), Ok(SafetyLevel::Safe));
        let err = "safe".parse::<SafetyLevel>().unwrap_err();
        assert_eq!(err, UnknownSafetyLevel("safe".to_string()));
        assert!(err.to_string().contains("Perlu Resep Dokter"));
    }

    #[test]
    fn safety_level_rejects_unknown_wire_value() {
        let result: Result<SafetyLevel, _> = serde_json::from_str("\"Bahaya\"");
        assert!(result.is_err());
    }

    #[test]
    fn fields_serialize_with_column_names() {
        let fields = IngredientFields {
            name: "Niacinamide".to_string(),
            slug: "niacinamide".to_string(),
            description: "Vitamin B3".to_string(),
            benefits: "Brightening".to_string(),
            safety_level: SafetyLevel::Safe,
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["name"], "Niacinamide");
        assert_eq!(value["slug"], "niacinamide");
        assert_eq!(value["safety_level"], "Aman");
    }

    #[test]
    fn ingredient_row_deserializes_with_extra_columns() {
        let json = r#"{
            "id": 42,
            "name": "Retinol",
            "slug": "retinol",
            "description": "Vitamin A derivative",
            "benefits": "Anti-aging",
            "safety_level": "Perlu Resep Dokter",
            "created_at": "2024-05-01T08:30:00.123456+00:00",
            "image_url": null
        }"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.id, IngredientId::from(42));
        assert_eq!(ingredient.fields.slug, "retinol");
        assert_eq!(
            ingredient.fields.safety_level,
            SafetyLevel::RequiresPrescription
        );
        assert!(ingredient.created_at.is_some());
    }

    #[test]
    fn ingredient_row_with_null_columns_loads_defaults() {
        let json = r#"{"id":7,"name":"Retinol","slug":"retinol","description":null,"benefits":"b","safety_level":null}"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.fields.name, "Retinol");
        assert_eq!(ingredient.fields.description, "");
        assert_eq!(ingredient.fields.benefits, "b");
        assert_eq!(ingredient.fields.safety_level, SafetyLevel::Safe);
    }

    #[test]
    fn ingredient_row_with_missing_columns_loads_defaults() {
        let ingredient: Ingredient = serde_json::from_str(r#"{"id":8,"name":null}"#).unwrap();
        assert_eq!(ingredient.fields, IngredientFields::default());
    }
}
