//! Product request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{
    ApiResponse, CreateProductRequest, ErrorResponse, MessageResponse, ProductDetailResponse,
    ProductResponse, UpdateProductRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{RecordId, ValidatedInput};

/// Creates product routes, mounted under `/api/products`.
///
/// Routes:
/// - POST /create        - Create a product
/// - GET  /productsList  - List all products with category names
/// - GET  /view/{id}     - Get product by ID
/// - POST /update/{id}   - Update product by ID
/// - POST /delete/{id}   - Delete product by ID
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_product))
        .routes(routes!(list_products))
        .routes(routes!(get_product))
        .routes(routes!(update_product))
        .routes(routes!(delete_product))
}

/// POST /api/products/create - Create a product
///
/// The referenced category must exist.
#[utoipa::path(
    post,
    path = "/create",
    tag = PRODUCT_TAG,
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn create_product(
    State(state): State<AppState>,
    ValidatedInput(payload): ValidatedInput<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductResponse>>)> {
    let product = state
        .services
        .products
        .create_product(payload.into_new_product()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Product created successfully",
            ProductResponse::from(product),
        )),
    ))
}

/// GET /api/products/productsList - List all products
#[utoipa::path(
    get,
    path = "/productsList",
    tag = PRODUCT_TAG,
    responses(
        (status = 200, description = "All products with category names", body = ApiResponse<Vec<ProductDetailResponse>>)
    )
)]
async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProductDetailResponse>>>> {
    let rows = state.services.products.list_products().await?;
    let responses = rows.into_iter().map(ProductDetailResponse::from).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// GET /api/products/view/{id} - Get product by ID
#[utoipa::path(
    get,
    path = "/view/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ApiResponse<ProductDetailResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<ProductDetailResponse>>> {
    let row = state.services.products.get_product(id).await?;
    Ok(Json(ApiResponse::success(ProductDetailResponse::from(row))))
}

/// POST /api/products/update/{id} - Update product by ID
#[utoipa::path(
    post,
    path = "/update/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn update_product(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidatedInput(payload): ValidatedInput<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<ProductResponse>>> {
    let product = state
        .services
        .products
        .update_product(id, payload.into_update_product()?)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Product updated successfully",
        ProductResponse::from(product),
    )))
}

/// POST /api/products/delete/{id} - Delete product by ID
#[utoipa::path(
    post,
    path = "/delete/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn delete_product(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<MessageResponse>> {
    state.services.products.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
