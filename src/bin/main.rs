use anyhow::{anyhow, Result};
use cache_selector::config::{self, LogConfig, ProbeMode};
use cache_selector::redis::ProcessEnv;
use cache_selector::selector::{BackendSelector, Capabilities, SelectionOutcome};
use cache_selector::settings::{OutputFormat, SiteSettings};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// 偵測 Redis 並輸出快取後端設定
#[derive(Debug, Parser)]
#[command(name = "cache_selector", version, about)]
struct Cli {
    /// 應用根目錄（覆蓋配置）
    #[arg(long)]
    app_root: Option<String>,

    /// 輸出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// 探測方式（覆蓋配置）
    #[arg(long, value_enum)]
    probe: Option<ProbeMode>,

    /// 探測超時秒數（覆蓋配置）
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置，無效時使用預設值
    let app_config = config::init_config();

    // 初始化日誌系統
    init_logging(&app_config.log)?;
    if let Some(err) = config::config_load_error() {
        warn!("無法加載應用程序配置，使用預設值: {}", err);
    }

    let mut selector_config = app_config.selector.clone();
    if let Some(app_root) = cli.app_root {
        selector_config.app_root = app_root;
    }
    if let Some(probe) = cli.probe {
        selector_config.probe_mode = probe;
    }
    if let Some(secs) = cli.timeout_secs {
        selector_config.probe_timeout_secs = secs;
    }

    let capabilities = Capabilities::detect(&selector_config.app_root, &selector_config.module_dir);
    let selection = BackendSelector::from_config(&selector_config)
        .select(&ProcessEnv::system(), &capabilities)
        .await;

    match &selection.outcome {
        SelectionOutcome::Selected => info!("快取後端選擇完成：Redis"),
        SelectionOutcome::Degraded(reason) => info!("快取後端選擇完成：資料庫 ({})", reason),
    }

    let settings = SiteSettings::build(&selection, &capabilities, &selector_config);
    println!("{}", settings.render(cli.format)?);

    Ok(())
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let level = match log_config.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };

    // 設定輸出到 stdout，日誌寫到 stderr
    let builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(level)
        .with_writer(std::io::stderr);

    let result = if log_config.format == "json" {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}
