use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::DateTime;

use super::Category;

/// Product model for reading from database
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewProduct model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

/// UpdateProduct model for updates
///
/// `name`, `price` and `quantity` are always replaced; `category_id` only
/// when supplied. The new category reference is not checked for existence.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct {
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub category_id: Option<i32>,
}

/// A product joined with the category it references.
///
/// `category` is `None` when the reference is dangling.
#[derive(Debug, Clone)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Option<Category>,
}

impl ProductWithCategory {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}
