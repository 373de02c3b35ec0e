//! Income and expense categories.

use api_types::category::{Category, CategoryInput};
use records::{Query, RecordClient};
use serde::{Deserialize, Serialize};

use crate::{
    Repository, lenient,
    repository::{LIST_LIMIT, Reporting},
    schema::{Schema, non_empty},
};

const TYPE_FIELD: &str = "type_c";

pub struct Categories;

#[derive(Clone, Debug, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "Id", deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub type_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub icon_c: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color_c: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryFields {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_c: Option<String>,
}

fn fields(id: Option<i64>, input: &CategoryInput) -> CategoryFields {
    CategoryFields {
        id,
        name: input.name.clone(),
        name_c: input.name.clone(),
        type_c: input.kind.clone(),
        icon_c: input.icon.clone(),
        color_c: input.color.clone(),
    }
}

impl Schema for Categories {
    type Record = CategoryRecord;
    type Domain = Category;
    type Input = CategoryInput;
    type Fields = CategoryFields;

    const ENTITY: &'static str = "category";
    const TABLE: &'static str = "category_c";
    const FIELDS: &'static [&'static str] = &["Name", "name_c", TYPE_FIELD, "icon_c", "color_c"];

    fn to_domain(record: CategoryRecord) -> Category {
        let name = non_empty(record.name_c.as_deref())
            .or(non_empty(record.name.as_deref()))
            .map(str::to_string);
        Category {
            id: record.id,
            name,
            kind: record.type_c,
            icon: record.icon_c,
            color: record.color_c,
        }
    }

    fn create_fields(input: &CategoryInput) -> CategoryFields {
        fields(None, input)
    }

    fn update_fields(id: i64, input: &CategoryInput) -> CategoryFields {
        fields(Some(id), input)
    }
}

impl<C: RecordClient> Repository<Categories, C> {
    /// Categories whose type is exactly `kind`.
    ///
    /// Meant for filling pickers, so a failure is only logged: no toast is
    /// raised and the list is simply empty.
    pub async fn list_by_type(&self, kind: &str) -> Vec<Category> {
        let query = Query::select(Categories::FIELDS.iter().copied())
            .filter_eq(TYPE_FIELD, kind)
            .paging(LIST_LIMIT, 0);
        self.fetch(&query, Reporting::LogOnly).await
    }
}
