//! Query parameters accepted by the fetch calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ID_FIELD;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default)]
    pub fields: Vec<FieldSelection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
    #[serde(default, rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl Query {
    /// A query returning the given fields. `Id` is always returned by the
    /// service and does not need to be listed.
    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(FieldSelection::new).collect(),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.into(),
            sort_type: direction,
        });
        self
    }

    pub fn paging(mut self, limit: u32, offset: u32) -> Self {
        self.paging_info = Some(PagingInfo { limit, offset });
        self
    }

    /// Exact-match filter on `field`.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field_name: field.into(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        });
        self
    }

    /// Whether `field` is part of the selection. An empty selection selects
    /// everything.
    pub fn selects(&self, field: &str) -> bool {
        field == ID_FIELD
            || self.fields.is_empty()
            || self.fields.iter().any(|selection| selection.field.name == field)
    }
}

/// `{ "field": { "Name": "<field>" } }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub field: FieldName,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_serializes_to_service_shape() {
        let query = Query::select(["Name", "type_c"])
            .order_by("date_c", SortDirection::Desc)
            .paging(100, 0)
            .filter_eq("type_c", "expense");

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "fields": [
                    { "field": { "Name": "Name" } },
                    { "field": { "Name": "type_c" } }
                ],
                "orderBy": [{ "fieldName": "date_c", "sorttype": "DESC" }],
                "pagingInfo": { "limit": 100, "offset": 0 },
                "where": [{ "FieldName": "type_c", "Operator": "EqualTo", "Values": ["expense"] }]
            })
        );
    }

    #[test]
    fn unordered_query_omits_optional_keys() {
        let value = serde_json::to_value(Query::select(["Name"])).unwrap();
        assert!(value.get("orderBy").is_none());
        assert!(value.get("pagingInfo").is_none());
        assert!(value.get("where").is_none());
    }

    #[test]
    fn selects_always_includes_id() {
        let query = Query::select(["Name"]);
        assert!(query.selects("Id"));
        assert!(query.selects("Name"));
        assert!(!query.selects("amount_c"));
        assert!(Query::default().selects("amount_c"));
    }
}
