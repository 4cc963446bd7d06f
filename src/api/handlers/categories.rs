//! Category request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    ApiResponse, CategoryResponse, CategoryWithProductsResponse, CreateCategoryRequest,
    ErrorResponse, MessageResponse, ProductCatalogResponse, UpdateCategoryRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{RecordId, ValidatedInput};

/// Creates category routes, mounted under `/api/categories`.
///
/// Routes:
/// - POST /create               - Create a category
/// - GET  /categoriesList       - List all categories
/// - GET  /view/{id}            - Get category by ID
/// - POST /update/{id}          - Update category by ID
/// - POST /delete/{id}          - Delete category by ID
/// - GET  /productsWithCategory - Flat product listing with category names
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_category))
        .routes(routes!(list_categories))
        .routes(routes!(get_category))
        .routes(routes!(update_category))
        .routes(routes!(delete_category))
        .routes(routes!(products_with_category))
}

/// Route for a category with its nested products, mounted under `/api`.
pub fn category_products_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(category_products))
}

/// POST /api/categories/create - Create a category
#[utoipa::path(
    post,
    path = "/create",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedInput(payload): ValidatedInput<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CategoryResponse>>)> {
    let category = state
        .services
        .categories
        .create_category(payload.into_new_category()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Category created successfully",
            CategoryResponse::from(category),
        )),
    ))
}

/// GET /api/categories/categoriesList - List all categories
#[utoipa::path(
    get,
    path = "/categoriesList",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "All categories ordered by id", body = ApiResponse<Vec<CategoryResponse>>)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryResponse>>>> {
    let categories = state.services.categories.list_categories().await?;
    let responses = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// GET /api/categories/view/{id} - Get category by ID
#[utoipa::path(
    get,
    path = "/view/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<CategoryResponse>>> {
    let category = state.services.categories.get_category(id).await?;
    Ok(Json(ApiResponse::success(CategoryResponse::from(category))))
}

/// POST /api/categories/update/{id} - Update category by ID
///
/// Only `name` is applied; a body without it returns the category unchanged.
#[utoipa::path(
    post,
    path = "/update/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn update_category(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidatedInput(payload): ValidatedInput<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<CategoryResponse>>> {
    let category = state
        .services
        .categories
        .update_category(id, payload.into_update_category())
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Category updated successfully",
        CategoryResponse::from(category),
    )))
}

/// POST /api/categories/delete/{id} - Delete category by ID
#[utoipa::path(
    post,
    path = "/delete/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn delete_category(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<MessageResponse>> {
    state.services.categories.delete_category(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

/// GET /api/categories/productsWithCategory - Every product with its category name
#[utoipa::path(
    get,
    path = "/productsWithCategory",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "Flat product listing", body = ApiResponse<ProductCatalogResponse>)
    )
)]
async fn products_with_category(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductCatalogResponse>>> {
    let rows = state.services.categories.products_with_category_name().await?;
    Ok(Json(ApiResponse::success(ProductCatalogResponse::from(rows))))
}

/// GET /api/categoriesWiseProducts/{id} - Category with its products
#[utoipa::path(
    get,
    path = "/categoriesWiseProducts/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category with nested products", body = ApiResponse<CategoryWithProductsResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn category_products(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<CategoryWithProductsResponse>>> {
    let result = state.services.categories.category_with_products(id).await?;
    Ok(Json(ApiResponse::success(CategoryWithProductsResponse::from(result))))
}
