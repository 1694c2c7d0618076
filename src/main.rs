use std::path::PathBuf;

use actor_core::{
    config::{Config, DeliveryMode},
    CaseRule, Filter,
};
use actor_feeds::CountMode;
use actor_search::app::{self, RunOptions};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "actor-search", about = "Actor Search — stream a TSV name list and filter it")]
struct Cli {
    /// Resource name, resolved as `<dir>/<name>.<extension>`.
    /// Defaults to `[source] default_resource` from the config file.
    resource: Option<String>,

    /// Directory resources are looked up in.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Delivery mode: consumer-driven (pull) or producer-driven (push).
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Only show names containing this text.
    #[arg(long, short, default_value = "")]
    filter: String,

    /// Match the filter case-insensitively.
    #[arg(long, short = 'i')]
    ignore_case: bool,

    /// Only count lines and report how long it took.
    #[arg(long)]
    count: bool,

    /// With --count, read line by line instead of loading the whole resource.
    #[arg(long, requires = "count")]
    lazy: bool,

    /// Write debug logs to /tmp/actor-search-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Pull,
    Push,
}

impl From<Mode> for DeliveryMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Pull => DeliveryMode::Pull,
            Mode::Push => DeliveryMode::Push,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|_| Config::defaults());

    init_tracing(cli.debug, &config.log.level)?;

    let mut options = RunOptions::from_config(&config);
    if let Some(resource) = cli.resource {
        options.resource = resource;
    }
    if let Some(dir) = cli.dir {
        options.dir = dir;
    }
    if let Some(mode) = cli.mode {
        options.mode = mode.into();
    }
    let case = if cli.ignore_case {
        CaseRule::Insensitive
    } else {
        options.filter.case()
    };
    options.filter = Filter::new(cli.filter, case);
    options.count = cli.count.then_some(if cli.lazy {
        CountMode::Lazy
    } else {
        CountMode::Eager
    });

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let cancel = CancellationToken::new();
        let ctrl_c = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("interrupted; cancelling stream");
                    cancel.cancel();
                }
            })
        };

        let report = app::run(&options, cancel).await;
        ctrl_c.abort();

        app::render(&report?, &mut std::io::stdout().lock())?;
        Ok::<(), anyhow::Error>(())
    })
}

fn init_tracing(debug: bool, level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/actor-search-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("actor-search debug log started — tail -f /tmp/actor-search-debug.log");
    } else {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
