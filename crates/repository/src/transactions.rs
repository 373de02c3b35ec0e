//! Income and expense entries.

use api_types::transaction::{Transaction, TransactionInput};
use records::{Relation, SortDirection};
use serde::{Deserialize, Serialize};

use crate::{
    lenient,
    schema::{self, Schema, non_empty},
};

pub struct Transactions;

#[derive(Clone, Debug, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Id", deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub type_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub amount_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description_c: Option<String>,
    #[serde(default)]
    pub category_c: Option<Relation>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionFields {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_c: Option<String>,
    pub amount_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_c: Option<String>,
    pub description_c: String,
    pub category_c: Option<i64>,
}

/// Explicit name, else the description, else `"{type} - {amount}"`.
fn display_name(input: &TransactionInput) -> String {
    if let Some(name) = non_empty(input.name.as_deref()).or(non_empty(input.description.as_deref()))
    {
        return name.to_string();
    }

    let amount = input.amount.as_ref().map(ToString::to_string);
    let parts: Vec<&str> = [input.kind.as_deref(), amount.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        "Transaction".to_string()
    } else {
        parts.join(" - ")
    }
}

fn fields(id: Option<i64>, input: &TransactionInput) -> TransactionFields {
    TransactionFields {
        id,
        name: display_name(input),
        type_c: input.kind.clone(),
        amount_c: schema::float(input.amount.as_ref()),
        date_c: input.date.clone(),
        description_c: input.description.clone().unwrap_or_default(),
        category_c: schema::relation_id(input.category_id.as_ref()),
    }
}

impl Schema for Transactions {
    type Record = TransactionRecord;
    type Domain = Transaction;
    type Input = TransactionInput;
    type Fields = TransactionFields;

    const ENTITY: &'static str = "transaction";
    const TABLE: &'static str = "transaction_c";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "type_c",
        "amount_c",
        "date_c",
        "description_c",
        "category_c",
    ];
    const ORDER: Option<(&'static str, SortDirection)> = Some(("date_c", SortDirection::Desc));

    fn to_domain(record: TransactionRecord) -> Transaction {
        Transaction {
            id: record.id,
            name: record.name.unwrap_or_default(),
            kind: record.type_c,
            amount: record.amount_c,
            date: record.date_c,
            description: record.description_c.unwrap_or_default(),
            category: record.category_c.as_ref().and_then(Relation::resolve),
        }
    }

    fn create_fields(input: &TransactionInput) -> TransactionFields {
        fields(None, input)
    }

    fn update_fields(id: i64, input: &TransactionInput) -> TransactionFields {
        fields(Some(id), input)
    }
}
