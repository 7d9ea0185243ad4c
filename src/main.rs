use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

// 从 lib.rs 导入模块
use rating_engine::config::AppConfig;
use rating_engine::runtime::lifetime;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let start = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting schema bootstrap...
        Project: {}
        Version: {}
        System: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.system_name
    );

    match lifetime::startup::prepare_startup(config).await {
        Ok(_startup) => {
            debug!(
                "Bootstrap completed in {} ms",
                chrono::Utc::now()
                    .signed_duration_since(start)
                    .num_milliseconds()
            );
            warn!("Database schema is up to date");
        }
        Err(e) => {
            error!("Bootstrap failed: {}", e);
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    }
}
