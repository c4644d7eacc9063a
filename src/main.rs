use product_api::config::AppConfig;
use product_api::infrastructure::logger::Logger;
use std::env;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = AppConfig::load()?;
    Logger::init(&config.logging.level);

    let store = product_api::build_store(&config)?;

    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--clear" => {
                return Ok(match product_api::clear_db(store.as_ref()).await {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        error!("{}", e);
                        ExitCode::FAILURE
                    }
                });
            }
            _ => {
                print_usage();
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    // 连接失败已在 `connect_db` 中记录，监听照常启动
    let _ = product_api::connect_db(store.as_ref()).await;

    let app = product_api::app(store, &config.server);
    let listener = TcpListener::bind(config.bind_address()).await?;

    info!("🚀 服务器运行在 http://{}", config.bind_address());
    info!("   GET    /api                - liveness");
    info!("   GET    {}       - list", product_api::API_PREFIX);
    info!("   GET    {}/:id   - get one", product_api::API_PREFIX);
    info!("   POST   {}       - create", product_api::API_PREFIX);
    info!("   PUT    {}/:id   - update", product_api::API_PREFIX);
    info!("   PATCH  {}/:id   - toggle availability", product_api::API_PREFIX);
    info!("   DELETE {}/:id   - delete", product_api::API_PREFIX);

    axum::serve(listener, app).await?;
    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    println!("用法: product_api [--clear]");
    println!();
    println!("  (无参数)  启动 HTTP 服务");
    println!("  --clear   删除并重建 products 表");
}
