//! 核心响应处理模块

use serde::Serialize;

/// 成功响应，`{data: ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{msg: ...}`，用于存活检查
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}
