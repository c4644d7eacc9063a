//! 产品数据模型

use serde::{Deserialize, Serialize};

/// `products` 表的一行（HTTP 输出形态）
///
/// 不含存储层维护的时间戳
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// 创建输入；availability 取列默认值
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// 可变字段整体替换
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl Product {
    pub fn apply(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.price = changes.price;
        self.availability = changes.availability;
    }

    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}
