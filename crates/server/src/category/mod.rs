pub mod db;
pub mod models;
pub mod mutations;
pub mod queries;
pub mod store;

pub use models::CategoryRow;
pub use mutations::CreateCategoryInput;
pub use store::SqliteCategoryStore;
