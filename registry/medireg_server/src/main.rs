use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, LevelFilter};
use medireg_server::{
    config::{load_config, StoreScope},
    router, AppState,
};

#[derive(Debug, Parser)]
#[command(
    name = "medireg",
    version,
    about = "Hospital patient registration, lookup and update over a web form",
    long_about = "medireg serves a small web application for registering patients,\n\
        finding them by phone number or Hospital ID, and updating their details.\n\n\
        Records are kept in memory only and are lost when the process exits.\n\n\
        EXAMPLES:\n\
        \n  medireg                                 Serve on 127.0.0.1:8711\n\
        \n  medireg --bind 0.0.0.0:8080 -v          Serve on all interfaces, info logs\n\
        \n  medireg --config medireg.toml           Load settings from a file"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the configuration file)
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, takes precedence over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {err}");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref()).inspect_err(|err| error!("{err}"))?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if config.scope == StoreScope::Shared {
        info!("all sessions share one record store");
    }

    let app = router(AppState::new(&config));
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .inspect_err(|err| error!("cannot bind {}: {err}", config.bind))?;
    println!("medireg listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
