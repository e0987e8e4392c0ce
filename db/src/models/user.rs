use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    #[serde(skip_serializing)]
    pub otp_expires: Option<NaiveDateTime>,
    pub verified: bool,
    pub store_config: Json<StoreConfig>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Per-user store settings embedded on the user record.
///
/// Every field is optional on the wire; absent fields fall back to the
/// defaults below, so a bare `{}` in the column is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub store_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gst: Option<String>,
    /// Percentage, kept as text because the UI treats it as free-form input.
    pub tax_rate: String,
    pub address: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "My Store".to_string(),
            phone: None,
            email: None,
            gst: None,
            tax_rate: "18".to_string(),
            address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.store_name, "My Store");
        assert_eq!(config.tax_rate, "18");
        assert_eq!(config.phone, None);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let config = StoreConfig {
            store_name: "Corner Shop".to_string(),
            tax_rate: "5".to_string(),
            ..StoreConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["storeName"], "Corner Shop");
        assert_eq!(json["taxRate"], "5");
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"storeName":"Kiosk","gst":"GST-42"}"#).unwrap();
        assert_eq!(config.store_name, "Kiosk");
        assert_eq!(config.gst.as_deref(), Some("GST-42"));
        assert_eq!(config.tax_rate, "18");
    }
}
