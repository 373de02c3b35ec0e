//! Savings targets with a deadline.

use api_types::savings_goal::{SavingsGoal, SavingsGoalInput};
use records::SortDirection;
use serde::{Deserialize, Serialize};

use crate::{
    lenient,
    schema::{self, Schema, non_empty},
};

pub struct SavingsGoals;

#[derive(Clone, Debug, Deserialize)]
pub struct SavingsGoalRecord {
    #[serde(rename = "Id", deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub target_amount_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub current_amount_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub deadline_c: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SavingsGoalFields {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_c: Option<String>,
    pub target_amount_c: Option<f64>,
    pub current_amount_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_c: Option<String>,
}

fn fields(id: Option<i64>, name: Option<String>, input: &SavingsGoalInput) -> SavingsGoalFields {
    SavingsGoalFields {
        id,
        name,
        name_c: input.name.clone(),
        target_amount_c: schema::float(input.target_amount.as_ref()),
        current_amount_c: schema::float_or(input.current_amount.as_ref(), 0.0),
        deadline_c: input.deadline.clone(),
    }
}

impl Schema for SavingsGoals {
    type Record = SavingsGoalRecord;
    type Domain = SavingsGoal;
    type Input = SavingsGoalInput;
    type Fields = SavingsGoalFields;

    const ENTITY: &'static str = "savings goal";
    const TABLE: &'static str = "savings_goal_c";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "name_c",
        "target_amount_c",
        "current_amount_c",
        "deadline_c",
    ];
    const ORDER: Option<(&'static str, SortDirection)> = Some(("deadline_c", SortDirection::Asc));

    fn to_domain(record: SavingsGoalRecord) -> SavingsGoal {
        let name = non_empty(record.name_c.as_deref())
            .or(non_empty(record.name.as_deref()))
            .map(str::to_string);
        SavingsGoal {
            id: record.id,
            name,
            target_amount: record.target_amount_c,
            current_amount: record.current_amount_c,
            deadline: record.deadline_c,
        }
    }

    fn create_fields(input: &SavingsGoalInput) -> SavingsGoalFields {
        fields(None, input.name.clone(), input)
    }

    /// The display name is fixed at creation; renames only touch `name_c`.
    fn update_fields(id: i64, input: &SavingsGoalInput) -> SavingsGoalFields {
        fields(Some(id), None, input)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn goal_maps_amounts_and_name() {
        let record: SavingsGoalRecord = serde_json::from_value(json!({
            "Id": 8,
            "Name": "Emergency fund",
            "target_amount_c": 5000,
            "current_amount_c": 1250.5,
            "deadline_c": "2025-12-31"
        }))
        .unwrap();
        let goal = SavingsGoals::to_domain(record);
        assert_eq!(goal.id, 8);
        assert_eq!(goal.name.as_deref(), Some("Emergency fund"));
        assert_eq!(goal.target_amount, Some(5000.0));
        assert_eq!(goal.current_amount, Some(1250.5));
        assert_eq!(goal.deadline.as_deref(), Some("2025-12-31"));
    }

    #[test]
    fn current_amount_defaults_to_zero_on_write() {
        let input = SavingsGoalInput {
            name: Some("Bike".to_string()),
            target_amount: Some("800".into()),
            current_amount: None,
            deadline: Some("2025-04-01".to_string()),
        };
        assert_eq!(
            serde_json::to_value(SavingsGoals::create_fields(&input)).unwrap(),
            json!({
                "Name": "Bike",
                "name_c": "Bike",
                "target_amount_c": 800.0,
                "current_amount_c": 0.0,
                "deadline_c": "2025-04-01"
            })
        );

        let update = serde_json::to_value(SavingsGoals::update_fields(3, &input)).unwrap();
        assert_eq!(update["Id"], 3);
        assert!(update.get("Name").is_none());
        assert_eq!(update["name_c"], "Bike");
    }
}
