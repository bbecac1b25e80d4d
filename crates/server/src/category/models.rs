use edit_workflow::CategoryRecord;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct CategoryRow {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        CategoryRecord {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
        }
    }
}
