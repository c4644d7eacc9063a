//! 产品处理器

use axum::{extract::State, http::StatusCode, response::Json};

use super::{
    model::Product,
    rules::{CreateRules, IdRules, UpdateRules},
    service::ProductService,
};
use crate::core::{error::Result, response::DataResponse, validation::Validated};

pub const DELETED_MESSAGE: &str = "Producto eliinado";

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Product>>>> {
    let products = state.product_service.list_products().await?;
    Ok(Json(DataResponse::new(products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Validated(id): Validated<IdRules>,
) -> Result<Json<DataResponse<Product>>> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(DataResponse::new(product)))
}

pub async fn create_product(
    State(state): State<AppState>,
    Validated(product): Validated<CreateRules>,
) -> Result<(StatusCode, Json<DataResponse<Product>>)> {
    let product = state.product_service.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

pub async fn update_product(
    State(state): State<AppState>,
    Validated((id, changes)): Validated<UpdateRules>,
) -> Result<Json<DataResponse<Product>>> {
    let product = state.product_service.update_product(id, changes).await?;
    Ok(Json(DataResponse::new(product)))
}

/// 不读取请求体
pub async fn update_availability(
    State(state): State<AppState>,
    Validated(id): Validated<IdRules>,
) -> Result<Json<DataResponse<Product>>> {
    let product = state.product_service.toggle_availability(id).await?;
    Ok(Json(DataResponse::new(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Validated(id): Validated<IdRules>,
) -> Result<Json<DataResponse<&'static str>>> {
    state.product_service.delete_product(id).await?;
    Ok(Json(DataResponse::new(DELETED_MESSAGE)))
}
