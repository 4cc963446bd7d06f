use diesel::prelude::*;
use jiff_diesel::DateTime;

/// Category model for reading from database
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewCategory model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
}

/// UpdateCategory model for partial updates
///
/// Only `name` is assignable. Identifier and timestamps are never taken
/// from request input.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::categories)]
pub struct UpdateCategory {
    pub name: Option<String>,
}

impl UpdateCategory {
    /// Returns true when no column would be touched by this changeset.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
