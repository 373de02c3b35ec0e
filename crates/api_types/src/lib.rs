//! UI-facing shapes of the four finance entities.
//!
//! Every domain object carries the storage `Id` plus flattened, camelCase
//! attributes. Inputs are kept separate from the objects returned by the
//! repositories because form inputs are loosely typed: numbers may arrive
//! as strings and are coerced when mapped to storage.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use numeric::{Numeric, parse_float, parse_int};

pub mod numeric {
    use super::*;

    /// A numeric input as it comes from a form or JSON payload.
    ///
    /// Serialized untagged, so both `12.5` and `"12.5"` are accepted.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum Numeric {
        Number(f64),
        Text(String),
    }

    impl Numeric {
        /// Float coercion: the longest leading decimal literal wins, so
        /// `"12.5 EUR"` is `12.5` and `"EUR"` is `None`.
        pub fn to_f64(&self) -> Option<f64> {
            match self {
                Self::Number(value) => value.is_finite().then_some(*value),
                Self::Text(text) => parse_float(text),
            }
        }

        /// Integer coercion: leading digits only, fractions are truncated.
        pub fn to_i64(&self) -> Option<i64> {
            match self {
                Self::Number(value) if value.is_finite() => Some(value.trunc() as i64),
                Self::Number(_) => None,
                Self::Text(text) => parse_int(text),
            }
        }
    }

    impl From<f64> for Numeric {
        fn from(value: f64) -> Self {
            Self::Number(value)
        }
    }

    impl From<i64> for Numeric {
        fn from(value: i64) -> Self {
            Self::Number(value as f64)
        }
    }

    impl From<&str> for Numeric {
        fn from(value: &str) -> Self {
            Self::Text(value.to_string())
        }
    }

    impl From<String> for Numeric {
        fn from(value: String) -> Self {
            Self::Text(value)
        }
    }

    impl fmt::Display for Numeric {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Number(value) => write!(f, "{value}"),
                Self::Text(text) => f.write_str(text),
            }
        }
    }

    /// Parses the leading decimal literal of `raw`, ignoring leading
    /// whitespace and any trailing garbage.
    pub fn parse_float(raw: &str) -> Option<f64> {
        let s = raw.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end = 1;
        }

        let int_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut digits = end - int_start;

        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if frac_end > frac_start {
                digits += frac_end - frac_start;
                end = frac_end;
            }
        }
        if digits == 0 {
            return None;
        }

        if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
                exp_end += 1;
            }
            let exp_digits = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits {
                end = exp_end;
            }
        }

        s[..end].parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Parses the leading (optionally signed) decimal integer of `raw`.
    pub fn parse_int(raw: &str) -> Option<i64> {
        let s = raw.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return None;
        }
        let value = rest[..len].parse::<i64>().ok()?;
        Some(if negative { -value } else { value })
    }
}

pub mod budget {
    use super::*;

    pub const DEFAULT_ALERT_THRESHOLD: i64 = 80;

    pub fn default_alert_methods() -> Vec<String> {
        vec!["email".to_string(), "push".to_string()]
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        #[serde(rename = "Id")]
        pub id: i64,
        pub monthly_limit: Option<f64>,
        pub spent: f64,
        /// Budget month, `YYYY-MM`.
        pub month: Option<String>,
        /// Percentage of the limit that triggers an alert.
        pub alert_threshold: i64,
        pub alert_methods: Vec<String>,
        /// Category display name (or raw id when the relation is not expanded).
        pub category: Option<String>,
    }

    /// Alert channels, either as a list or already joined with `,`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AlertMethods {
        List(Vec<String>),
        Joined(String),
    }

    impl AlertMethods {
        pub fn joined(&self) -> String {
            match self {
                Self::List(methods) => methods.join(","),
                Self::Joined(joined) => joined.clone(),
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct BudgetInput {
        pub monthly_limit: Option<Numeric>,
        pub spent: Option<Numeric>,
        pub month: Option<String>,
        pub alert_threshold: Option<Numeric>,
        pub alert_methods: Option<AlertMethods>,
        /// Category display name, used to build the record name.
        pub category: Option<String>,
        /// Related category record id.
        #[serde(alias = "category_c")]
        pub category_id: Option<Numeric>,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        #[serde(rename = "Id")]
        pub id: i64,
        pub name: Option<String>,
        /// `income` or `expense`.
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub icon: Option<String>,
        pub color: Option<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CategoryInput {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub icon: Option<String>,
        pub color: Option<String>,
    }
}

pub mod savings_goal {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SavingsGoal {
        #[serde(rename = "Id")]
        pub id: i64,
        pub name: Option<String>,
        pub target_amount: Option<f64>,
        pub current_amount: Option<f64>,
        pub deadline: Option<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct SavingsGoalInput {
        pub name: Option<String>,
        pub target_amount: Option<Numeric>,
        pub current_amount: Option<Numeric>,
        pub deadline: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        #[serde(rename = "Id")]
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub date: Option<String>,
        pub description: String,
        pub category: Option<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct TransactionInput {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<Numeric>,
        pub date: Option<String>,
        pub description: Option<String>,
        #[serde(alias = "category_c")]
        pub category_id: Option<Numeric>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float_takes_leading_literal() {
        assert_eq!(parse_float("12.5"), Some(12.5));
        assert_eq!(parse_float("  -3.25e2xyz"), Some(-325.0));
        assert_eq!(parse_float("42 EUR"), Some(42.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("7."), Some(7.0));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float("EUR 42"), None);
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn parse_int_stops_at_first_non_digit() {
        assert_eq!(parse_int("17"), Some(17));
        assert_eq!(parse_int(" -4"), Some(-4));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("+"), None);
    }

    #[test]
    fn numeric_accepts_numbers_and_strings() {
        let values: Vec<Numeric> = serde_json::from_str(r#"[100, "250.75", "n/a"]"#).unwrap();
        assert_eq!(values[0].to_f64(), Some(100.0));
        assert_eq!(values[1].to_f64(), Some(250.75));
        assert_eq!(values[1].to_i64(), Some(250));
        assert_eq!(values[2].to_f64(), None);
        assert_eq!(Numeric::from(12.9).to_i64(), Some(12));
        assert_eq!(Numeric::from(f64::NAN).to_f64(), None);
    }

    #[test]
    fn numeric_display_keeps_input_text() {
        assert_eq!(Numeric::from(2500.0).to_string(), "2500");
        assert_eq!(Numeric::from(12.5).to_string(), "12.5");
        assert_eq!(Numeric::from("12,50").to_string(), "12,50");
    }

    #[test]
    fn alert_methods_join_lists() {
        let list = budget::AlertMethods::List(vec!["email".into(), "sms".into()]);
        assert_eq!(list.joined(), "email,sms");
        let joined = budget::AlertMethods::Joined("push".into());
        assert_eq!(joined.joined(), "push");
    }

    #[test]
    fn domain_objects_use_ui_field_names() {
        let budget = budget::Budget {
            id: 3,
            monthly_limit: Some(500.0),
            spent: 0.0,
            month: Some("2024-05".to_string()),
            alert_threshold: 80,
            alert_methods: budget::default_alert_methods(),
            category: Some("Food".to_string()),
        };
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["Id"], 3);
        assert_eq!(value["monthlyLimit"], 500.0);
        assert_eq!(value["alertMethods"][1], "push");

        let input: transaction::TransactionInput =
            serde_json::from_str(r#"{"type":"expense","amount":"9.99","categoryId":4}"#).unwrap();
        assert_eq!(input.kind.as_deref(), Some("expense"));
        assert_eq!(input.category_id.and_then(|id| id.to_i64()), Some(4));
        assert_eq!(input.description, None);
    }

    #[test]
    fn inputs_accept_storage_relation_key() {
        let budget: budget::BudgetInput =
            serde_json::from_str(r#"{"monthlyLimit":300,"category_c":"7"}"#).unwrap();
        assert_eq!(budget.category_id.and_then(|id| id.to_i64()), Some(7));

        let transaction: transaction::TransactionInput =
            serde_json::from_str(r#"{"amount":12,"category_c":5}"#).unwrap();
        assert_eq!(transaction.category_id.and_then(|id| id.to_i64()), Some(5));
    }
}
