mod category;
mod product;

pub use category::{Category, NewCategory, UpdateCategory};
pub use product::{NewProduct, Product, ProductWithCategory, UpdateProduct};
