use burrow::core::config::{self, BurrowConfig, CliOverrides};
use burrow::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "burrow", about = "Terminal Gopher browser")]
struct Args {
    /// Server to start at (default: quux.org)
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Selector of the first menu
    #[arg(short, long)]
    selector: Option<String>,

    /// Print the first menu and exit
    #[arg(long)]
    once: bool,

    /// With --once, print the parsed records as JSON
    #[arg(long, requires = "once")]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to burrow.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("burrow.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Burrow starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        BurrowConfig::default()
    });
    let cli = CliOverrides {
        host: args.host,
        port: args.port,
        selector: args.selector,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!("Start page: {}", resolved.start_target());

    let result = if args.once {
        tui::run_once(&resolved, args.json).await
    } else {
        tui::run(resolved).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("burrow: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
