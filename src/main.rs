mod types;
mod error;
mod config;
mod fetcher;
mod extractor;
mod search;
mod metrics;
mod report;

use config::ScoutConfig;
use error::{ScoutError, ScoutResult};
use metrics::MetricsInput;
use report::ResultView;
use search::{CancelSignal, HttpPageHost, PageHost, PageQueryOrchestrator};
use types::{ExtractionResult, PageSnapshot};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "kgr-scout",
    about = "查詢 intitle 結果數並計算 KGR / EKGR / KDROI",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// 搜尋引擎主機
    #[arg(long, global = true, default_value = "www.google.com")]
    host: String,

    /// 等待頁面載入的上限（秒）
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// 單次請求超時（秒）
    #[arg(long, global = true, default_value_t = 30)]
    request_timeout: u64,

    /// 最大重試次數
    #[arg(long, global = true, default_value_t = 3)]
    retries: u32,

    /// Accept-Language 標頭
    #[arg(long, global = true)]
    lang: Option<String>,

    /// 以 JSON 輸出
    #[arg(long, global = true)]
    json: bool,

    /// 輸出更多日誌（-v info，-vv debug）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 查詢 intitle:"關鍵詞" 的結果數
    Count {
        keyword: Vec<String>,
    },
    /// 顯示一般搜尋網址
    Open {
        keyword: Vec<String>,
    },
    /// 計算 KGR、EKGR 與 KDROI
    Metrics {
        /// 標題結果數
        #[arg(long, default_value = "")]
        titles: String,
        /// 月搜尋量
        #[arg(long, default_value = "")]
        volume: String,
        /// 關鍵字難度 (0-100)
        #[arg(long, default_value = "")]
        kd: String,
    },
    /// 查詢結果數後直接計算指標
    Analyze {
        keyword: Vec<String>,
        #[arg(long, default_value = "")]
        volume: String,
        #[arg(long, default_value = "")]
        kd: String,
    },
    /// 對已存檔的頁面執行擷取
    Extract {
        file: PathBuf,
        /// 檔案內容已是純文字
        #[arg(long)]
        text: bool,
    },
}

impl Cli {
    fn config(&self) -> ScoutConfig {
        let config = ScoutConfig::new()
            .with_search_host(self.host.clone())
            .with_load_timeout(self.timeout)
            .with_request_timeout(self.request_timeout)
            .with_max_retries(self.retries);

        match &self.lang {
            Some(lang) => config.with_accept_language(lang.clone()),
            None => config,
        }
    }
}

fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.config();
    let view = match &cli.command {
        Command::Count { keyword } => run_count(&config, &keyword.join(" "), cli.json, cli.verbose > 0).await?,
        Command::Open { keyword } => run_open(&config, &keyword.join(" ")),
        Command::Metrics { titles, volume, kd } => run_metrics(titles, volume, kd, cli.json)?,
        Command::Analyze { keyword, volume, kd } => {
            run_analyze(&config, &keyword.join(" "), volume, kd, cli.json).await?
        }
        Command::Extract { file, text } => run_extract(file, *text, cli.json)?,
    };

    view.print();
    Ok(if view.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// 查詢時顯示的載入動畫
fn loading_spinner(keyword: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(format!("🔄 查詢 intitle:\"{}\" ...", keyword));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// 執行一次 intitle 查詢；Ctrl+C 會取消等待
async fn search_count(config: &ScoutConfig, keyword: &str) -> ScoutResult<ExtractionResult> {
    if keyword.trim().is_empty() {
        return Err(ScoutError::EmptyKeyword);
    }

    let host: Arc<dyn PageHost> = Arc::new(HttpPageHost::new(config)?);
    let orchestrator = PageQueryOrchestrator::new(host, config.clone());

    let (cancel_handle, cancel) = CancelSignal::channel();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_handle.cancel();
        }
    });

    let spinner = loading_spinner(keyword.trim());
    let outcome = orchestrator.search_intitle_count(keyword, cancel).await;
    spinner.finish_and_clear();
    ctrl_c.abort();

    if let Err(e) = &outcome {
        if !e.is_validation() {
            error!(action = "count", component = "cli", host = orchestrator.host_name(), error = ?e, "查詢失敗");
        }
    }

    outcome
}

async fn run_count(config: &ScoutConfig, keyword: &str, json: bool, verbose: bool) -> Result<ResultView> {
    let outcome = search_count(config, keyword).await;

    if let Ok(result) = &outcome {
        if json {
            print_json(result)?;
            return Ok(ResultView::Success(String::new()));
        }
        if verbose {
            report::print_extraction_details(result);
        }
    }

    Ok(ResultView::from_count(&outcome))
}

fn run_open(config: &ScoutConfig, keyword: &str) -> ResultView {
    match search::manual_search_url(&config.search_host, keyword) {
        Ok(url) => ResultView::Success(url),
        Err(e) => ResultView::Empty(e.to_string()),
    }
}

fn run_metrics(titles: &str, volume: &str, kd: &str, json: bool) -> Result<ResultView> {
    let outcome = MetricsInput::parse(titles, volume, kd).map(|input| metrics::calculate(&input));

    if let (Ok(output), true) = (&outcome, json) {
        print_json(output)?;
        return Ok(ResultView::Success(String::new()));
    }

    Ok(ResultView::from_metrics(&outcome))
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    extraction: &'a ExtractionResult,
    metrics: &'a metrics::MetricsOutput,
}

async fn run_analyze(
    config: &ScoutConfig,
    keyword: &str,
    volume: &str,
    kd: &str,
    json: bool,
) -> Result<ResultView> {
    let extraction = match search_count(config, keyword).await {
        Ok(result) => result,
        Err(e) => return Ok(ResultView::from_count(&Err(e))),
    };

    // 結果數為 0 時與手動留白一樣被視為未填寫
    let outcome = MetricsInput::parse(&extraction.count, volume, kd).map(|input| metrics::calculate(&input));

    if let (Ok(output), true) = (&outcome, json) {
        print_json(&AnalyzeReport { extraction: &extraction, metrics: output })?;
        return Ok(ResultView::Success(String::new()));
    }

    println!("標題結果數: {}", extraction.count);
    Ok(ResultView::from_metrics(&outcome))
}

fn run_extract(file: &Path, plain_text: bool, json: bool) -> Result<ResultView> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("無法讀取 {}", file.display()))?;

    let snapshot = if plain_text {
        PageSnapshot::from_text(content)
    } else {
        extractor::snapshot_from_html(&content)
    };
    let result = extractor::extract_result_count(&snapshot);

    if json {
        print_json(&result)?;
        return Ok(ResultView::Success(String::new()));
    }

    report::print_extraction_details(&result);
    Ok(ResultView::from_count(&Ok(result)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
