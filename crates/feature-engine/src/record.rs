//! Raw Customer Record

use serde::{Deserialize, Serialize};

/// Value that counts as a subscribed service
pub const SUBSCRIBED: &str = "Yes";

/// Numeric input that may arrive as a number, a string, or not at all
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// JSON number
    Number(f64),
    /// JSON string, parsed on use
    Text(String),
    /// `null` or absent
    #[default]
    Missing,
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Coerce a numeric input, falling back to `default` when it is not a finite number.
pub fn coerce_or_default(value: &NumericInput, default: f64) -> f64 {
    let parsed = match value {
        NumericInput::Number(v) => Some(*v),
        NumericInput::Text(s) => s.trim().parse::<f64>().ok(),
        NumericInput::Missing => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}

/// One customer's attributes as submitted for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCustomerRecord {
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: i64,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    /// Tenure in months
    pub tenure: i64,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    /// Total charges; coerced to 0 when not numeric
    #[serde(rename = "TotalCharges", default)]
    pub total_charges: NumericInput,
}

impl RawCustomerRecord {
    /// Service fields in the order they were counted at training time
    pub fn service_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("PhoneService", self.phone_service.as_str()),
            ("MultipleLines", self.multiple_lines.as_str()),
            ("InternetService", self.internet_service.as_str()),
            ("OnlineSecurity", self.online_security.as_str()),
            ("OnlineBackup", self.online_backup.as_str()),
            ("DeviceProtection", self.device_protection.as_str()),
            ("TechSupport", self.tech_support.as_str()),
            ("StreamingTV", self.streaming_tv.as_str()),
            ("StreamingMovies", self.streaming_movies.as_str()),
        ]
    }

    /// Every categorical field, in column order of the training frame
    pub fn categorical_fields(&self) -> [(&'static str, &str); 15] {
        [
            ("gender", self.gender.as_str()),
            ("Partner", self.partner.as_str()),
            ("Dependents", self.dependents.as_str()),
            ("PhoneService", self.phone_service.as_str()),
            ("MultipleLines", self.multiple_lines.as_str()),
            ("InternetService", self.internet_service.as_str()),
            ("OnlineSecurity", self.online_security.as_str()),
            ("OnlineBackup", self.online_backup.as_str()),
            ("DeviceProtection", self.device_protection.as_str()),
            ("TechSupport", self.tech_support.as_str()),
            ("StreamingTV", self.streaming_tv.as_str()),
            ("StreamingMovies", self.streaming_movies.as_str()),
            ("Contract", self.contract.as_str()),
            ("PaperlessBilling", self.paperless_billing.as_str()),
            ("PaymentMethod", self.payment_method.as_str()),
        ]
    }
}
