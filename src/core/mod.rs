//! 核心层

pub mod error;
pub mod middleware;
pub mod response;
pub mod validation;
