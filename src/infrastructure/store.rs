//! 持久化网关
//!
//! 处理器只能通过 [`ProductStore`] 访问 `products` 表。所有失败都以
//! [`StoreError`] 返回，以区分数据库不可达与语句执行失败；记录不存在为 `Ok(None)`。

use async_trait::async_trait;
use thiserror::Error;

use crate::app::product::model::{NewProduct, Product};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage query failed: {0}")]
    Query(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 连通性检查
    async fn ping(&self) -> StoreResult<()>;

    /// 表不存在时创建；`force` 时先删除
    async fn sync(&self, force: bool) -> StoreResult<()>;

    /// 全部记录，id 从大到小
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>>;

    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    /// 覆盖已有记录的名称、价格和可用状态
    async fn update(&self, product: &Product) -> StoreResult<Option<Product>>;

    /// 返回是否删除了记录
    async fn destroy(&self, id: i64) -> StoreResult<bool>;
}
