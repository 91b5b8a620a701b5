use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;
use service::storage::JsonFileStorage;
use service::{Api, ApiClient};
use tracing::{error, info, warn};
use ui::console::{ConsoleNavigator, ConsoleView, Invocation};
use ui::{PageController, Shell};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 生效
    dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
    info!(service = "jeevandhara", event = "logger_init", "tracing subscriber initialized");
}

async fn run(cfg: configs::AppConfig, invocation: Invocation) -> anyhow::Result<()> {
    common::env::ensure_session_dir(&cfg.storage.session_file).await?;
    let storage = Arc::new(JsonFileStorage::open(&cfg.storage.session_file).await?);
    let client = ApiClient::from_config(&cfg.api, storage)?;
    let navigator = Arc::new(ConsoleNavigator::default());
    let shell = Shell {
        api: Api::new(client),
        view: Arc::new(ConsoleView::new(invocation.assume_yes)),
        navigator: navigator.clone(),
        ui: cfg.ui.clone(),
    };

    let page = PageController::boot(&shell, &invocation.path).await?;
    for event in invocation.events(page.page()) {
        if !page.dispatch(event.clone()).await {
            warn!(page = %page.page(), ?event, "nothing on this page handles the event");
        }
    }
    page.settle().await;

    // follow one navigation so the landing page shows its data
    if let Some(next) = navigator.take() {
        drop(page);
        PageController::boot(&shell, next.file_name()).await?;
    }
    if invocation.show_metrics {
        print!("{}", service::observability::encode_metrics());
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "jeevandhara",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match Invocation::parse(&args) {
        Ok(inv) => inv,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::from(2);
        }
    };

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "jeevandhara", event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "jeevandhara", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "jeevandhara",
        event = "start",
        %service_id,
        pid,
        version,
        page = %invocation.path,
        api = %cfg.api.base_url,
        "client starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = run(cfg, invocation) => match res {
                Ok(()) => {
                    info!(service = "jeevandhara", event = "stop", %service_id, pid, "client finished");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "jeevandhara", event = "run_failed", error = %e, "page run failed");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "jeevandhara", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, exiting");
                ExitCode::SUCCESS
            }
        }
    })
}
