//! # 产品 API
//!
//! 基于 axum 的单表 `products` CRUD 服务：
//! - `app`: 产品资源（模型、校验规则、服务、处理器、路由）
//! - `core`: 错误类型、响应封装、校验链、中间件
//! - `infrastructure`: 存储网关（Postgres、内存）与日志
//! - `config`: TOML + 环境变量配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, response::Json, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::app::product::{self, handler::AppState, service::ProductService};
use crate::config::{AppConfig, ServerConfig, StoreKind};
use crate::core::{middleware::request_logging_middleware, response::MessageResponse};
use crate::infrastructure::memory::MemoryProductStore;
use crate::infrastructure::store::{ProductStore, StoreResult};

/// 产品资源挂载点
pub const API_PREFIX: &str = "/api/products";

/// 基于存储网关构建完整的 HTTP 应用
pub fn app(store: Arc<dyn ProductStore>, config: &ServerConfig) -> Router {
    let state = AppState {
        product_service: ProductService::new(store),
    };

    Router::new()
        .route("/api", get(liveness))
        .nest(API_PREFIX, product::router::routes())
        // nest 只匹配不带尾部斜杠的前缀，集合路由另挂一份
        .route(&format!("{API_PREFIX}/"), product::router::collection())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeout_seconds)))
        .with_state(state)
}

async fn liveness() -> Json<MessageResponse> {
    Json(MessageResponse { msg: "Desde Api" })
}

/// 按配置选择存储网关
pub fn build_store(config: &AppConfig) -> StoreResult<Arc<dyn ProductStore>> {
    match config.store {
        StoreKind::Memory => Ok(Arc::new(MemoryProductStore::new())),
        #[cfg(feature = "database")]
        StoreKind::Postgres => {
            let manager = infrastructure::database::DatabaseManager::new(&config.database)?;
            Ok(Arc::new(manager))
        }
        #[cfg(not(feature = "database"))]
        StoreKind::Postgres => Err(infrastructure::store::StoreError::Unavailable(
            "built without the `database` feature".to_string(),
        )),
    }
}

/// 启动时的一次性连接检查
///
/// 成功后同步表结构。失败时记录日志并返回错误，调用方继续提供服务，
/// 请求在处理器层失败。
pub async fn connect_db(store: &dyn ProductStore) -> StoreResult<()> {
    let result: StoreResult<()> = async {
        store.ping().await?;
        store.sync(false).await
    }
    .await;

    match &result {
        Ok(()) => info!("Conexion exitosa a la BD"),
        Err(e) => error!("Hubo un error: {}", e),
    }
    result
}

/// 删除并重建 products 表
pub async fn clear_db(store: &dyn ProductStore) -> StoreResult<()> {
    store.sync(true).await?;
    info!("Datos eliminados correctamente");
    Ok(())
}
