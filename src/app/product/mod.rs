//! 产品资源：模型、校验规则、服务、处理器、路由

pub mod handler;
pub mod model;
pub mod router;
pub mod rules;
pub mod service;
