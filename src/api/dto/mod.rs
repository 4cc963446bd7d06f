//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `envelope` - The `{status, message?, data?}` wrapper shared by every endpoint
//! - `error` - Error envelope
//! - `numeric` - Lenient numeric request values
//! - `text` - Lenient text request values
//! - `category` / `product` - Resource request/response DTOs

mod category;
mod envelope;
mod error;
mod numeric;
mod product;
mod text;

pub use category::{
    CategoryResponse, CategoryWithProductsResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
pub use envelope::{ApiResponse, MessageResponse};
pub use error::ErrorResponse;
pub use numeric::NumericInput;
pub use product::{
    CreateProductRequest, ProductCatalogEntry, ProductCatalogResponse, ProductDetailResponse,
    ProductResponse, UpdateProductRequest,
};
pub use text::TextInput;

/// Formats a stored timestamp as an ISO-8601 string.
pub(crate) fn format_timestamp(value: jiff_diesel::DateTime) -> String {
    value.to_jiff().strftime("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
