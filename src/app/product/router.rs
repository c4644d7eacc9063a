//! 产品路由

use axum::{
    routing::{get, MethodRouter},
    Router,
};

use super::handler::{
    create_product, delete_product, get_product, list_products, update_availability,
    update_product, AppState,
};

/// 集合路由：GET 列表，POST 创建
pub fn collection() -> MethodRouter<AppState> {
    get(list_products).post(create_product)
}

/// 产品资源的全部路由（相对挂载前缀）
pub fn routes() -> Router<AppState> {
    Router::new().route("/", collection()).route(
        "/:id",
        get(get_product)
            .put(update_product)
            .patch(update_availability)
            .delete(delete_product),
    )
}
