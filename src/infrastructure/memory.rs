//! 内存存储
//!
//! 进程内的 `products` 表替身，供测试及 `store = "memory"` 配置使用

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::store::{ProductStore, StoreError, StoreResult};
use crate::app::product::model::{NewProduct, Product};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: Mutex<Table>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(&self, f: impl FnOnce(&mut Table) -> T) -> StoreResult<T> {
        let mut table = self
            .table
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(f(&mut table))
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn ping(&self) -> StoreResult<()> {
        self.with_table(|_| ())
    }

    async fn sync(&self, force: bool) -> StoreResult<()> {
        self.with_table(|table| {
            if force {
                *table = Table::default();
            }
        })
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        self.with_table(|table| {
            table
                .rows
                .values()
                .rev()
                .cloned()
                .collect()
        })
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        self.with_table(|table| table.rows.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        self.with_table(|table| {
            table.last_id += 1;
            let product = Product {
                id: table.last_id,
                name: product.name,
                price: product.price,
                availability: true,
            };
            table.rows.insert(product.id, product.clone());
            product
        })
    }

    async fn update(&self, product: &Product) -> StoreResult<Option<Product>> {
        self.with_table(|table| {
            table.rows.get_mut(&product.id).map(|row| {
                *row = product.clone();
                row.clone()
            })
        })
    }

    async fn destroy(&self, id: i64) -> StoreResult<bool> {
        self.with_table(|table| table.rows.remove(&id).is_some())
    }
}
