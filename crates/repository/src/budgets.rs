//! Monthly spending limits per category.

use api_types::budget::{
    Budget, BudgetInput, DEFAULT_ALERT_THRESHOLD, default_alert_methods,
};
use records::{Relation, SortDirection};
use serde::{Deserialize, Serialize};

use crate::{
    lenient,
    schema::{self, Schema, non_empty},
};

pub struct Budgets;

#[derive(Clone, Debug, Deserialize)]
pub struct BudgetRecord {
    #[serde(rename = "Id", deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub monthly_limit_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub spent_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub month_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub alert_threshold_c: Option<f64>,
    /// Comma separated alert channels.
    #[serde(default, deserialize_with = "lenient::text")]
    pub alert_methods_c: Option<String>,
    #[serde(default)]
    pub category_c: Option<Relation>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetFields {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub monthly_limit_c: Option<f64>,
    pub spent_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_c: Option<String>,
    pub alert_threshold_c: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_methods_c: Option<String>,
    pub category_c: Option<i64>,
}

/// `"{category} Budget - {month}"`, leaving out whichever part is missing.
fn display_name(input: &BudgetInput) -> String {
    let mut name = match non_empty(input.category.as_deref()) {
        Some(category) => format!("{category} Budget"),
        None => "Budget".to_string(),
    };
    if let Some(month) = non_empty(input.month.as_deref()) {
        name.push_str(" - ");
        name.push_str(month);
    }
    name
}

fn fields(id: Option<i64>, name: Option<String>, input: &BudgetInput) -> BudgetFields {
    BudgetFields {
        id,
        name,
        monthly_limit_c: schema::float(input.monthly_limit.as_ref()),
        spent_c: schema::float_or(input.spent.as_ref(), 0.0),
        month_c: input.month.clone(),
        alert_threshold_c: schema::int_or(input.alert_threshold.as_ref(), DEFAULT_ALERT_THRESHOLD),
        alert_methods_c: input.alert_methods.as_ref().map(|methods| methods.joined()),
        category_c: schema::relation_id(input.category_id.as_ref()),
    }
}

impl Schema for Budgets {
    type Record = BudgetRecord;
    type Domain = Budget;
    type Input = BudgetInput;
    type Fields = BudgetFields;

    const ENTITY: &'static str = "budget";
    const TABLE: &'static str = "budget_c";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "monthly_limit_c",
        "spent_c",
        "month_c",
        "alert_threshold_c",
        "alert_methods_c",
        "category_c",
    ];
    const ORDER: Option<(&'static str, SortDirection)> = Some(("month_c", SortDirection::Desc));

    fn to_domain(record: BudgetRecord) -> Budget {
        let alert_methods = match non_empty(record.alert_methods_c.as_deref()) {
            Some(methods) => methods.split(',').map(str::to_string).collect(),
            None => default_alert_methods(),
        };
        Budget {
            id: record.id,
            monthly_limit: record.monthly_limit_c,
            spent: record.spent_c.unwrap_or(0.0),
            month: record.month_c,
            alert_threshold: record
                .alert_threshold_c
                .map(|threshold| threshold.trunc() as i64)
                .filter(|threshold| *threshold != 0)
                .unwrap_or(DEFAULT_ALERT_THRESHOLD),
            alert_methods,
            category: record.category_c.as_ref().and_then(Relation::resolve),
        }
    }

    fn create_fields(input: &BudgetInput) -> BudgetFields {
        fields(None, Some(display_name(input)), input)
    }

    fn update_fields(id: i64, input: &BudgetInput) -> BudgetFields {
        fields(Some(id), None, input)
    }
}
