//! 产品业务服务

use std::sync::Arc;

use super::model::{NewProduct, Product, ProductChanges};
use crate::core::error::{AppError, Result};
use crate::infrastructure::store::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_product(&self, id: i64) -> Result<Product> {
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product> {
        Ok(self.store.create(product).await?)
    }

    pub async fn update_product(&self, id: i64, changes: ProductChanges) -> Result<Product> {
        let mut product = self.get_product(id).await?;
        product.apply(changes);
        self.save(&product).await
    }

    /// 翻转库存可用状态
    pub async fn toggle_availability(&self, id: i64) -> Result<Product> {
        let mut product = self.get_product(id).await?;
        product.toggle_availability();
        self.save(&product).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<()> {
        self.get_product(id).await?;
        if self.store.destroy(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    // 查询与写入之间记录可能已被删除
    async fn save(&self, product: &Product) -> Result<Product> {
        self.store.update(product).await?.ok_or(AppError::NotFound)
    }
}
