use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Clone, PartialEq, FromRow)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Request body for create and update. Only `name` is read from clients.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngredientInput {
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn tomato() -> Ingredient {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Ingredient {
            id: 1,
            name: "토마토".to_string(),
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    #[test]
    fn test_serialize_live_ingredient() {
        let value = serde_json::to_value(tomato()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "토마토",
                "created_at": "2024-03-01T12:00:00Z",
                "updated_at": "2024-03-01T12:00:00Z",
            })
        );
    }

    #[test]
    fn test_serialize_keeps_deleted_at_when_set() {
        let mut item = tomato();
        item.deleted_at = Some(item.updated_at);

        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("deleted_at").is_some());
    }

    #[test]
    fn test_input_ignores_unknown_fields() {
        let input: IngredientInput =
            serde_json::from_value(json!({ "id": 42, "name": "양파", "extra": true })).unwrap();
        assert_eq!(input.name, "양파");
    }

    #[test]
    fn test_input_missing_name_is_empty() {
        let input: IngredientInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.name.is_empty());
    }

    #[test]
    fn test_input_rejects_non_string_name() {
        let result = serde_json::from_value::<IngredientInput>(json!({ "name": 7 }));
        assert!(result.is_err());
    }
}
