use utoipa::OpenApi;

pub const CATEGORY_TAG: &str = "Categories";
pub const PRODUCT_TAG: &str = "Products";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog",
        description = "Category and product catalog API",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::MessageResponse,
        )
    ),
    tags(
        (name = CATEGORY_TAG, description = "Category management endpoints"),
        (name = PRODUCT_TAG, description = "Product management endpoints"),
    )
)]
pub struct ApiDoc;
