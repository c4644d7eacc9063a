//! 日志基础设施

use tracing_subscriber::{fmt, EnvFilter};

pub struct Logger;

impl Logger {
    /// 安装全局 fmt subscriber，`RUST_LOG` 优先于 `level`
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        fmt().with_env_filter(filter).with_target(false).init();
    }
}
