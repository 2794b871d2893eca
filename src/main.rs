use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use openlove::app::App;
use openlove::category::Category;
use openlove::config::load_config;
use openlove::reply::{FailureKind, ReplyClient};

/// How long to wait for a key before polling replies and redrawing
const TICK: Duration = Duration::from_millis(50);

/// Relationship advice chat in your terminal
#[derive(Parser, Debug)]
#[command(name = "openlove", version, about)]
struct Args {
    /// Config file (default: ~/.config/openlove/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Webhook URL, overrides the config file and OPENLOVE_WEBHOOK_URL
    #[arg(long, value_name = "URL")]
    webhook_url: Option<String>,

    /// Skip the welcome screen and start chatting in this category
    #[arg(long, value_name = "CATEGORY", value_parser = parse_category)]
    category: Option<Category>,

    /// Print the effective configuration with secrets masked, then exit
    #[arg(long)]
    print_config: bool,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse_id(s).ok_or_else(|| {
        format!("unknown category `{s}` (expected dating, breakup, romance, communication or none)")
    })
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();

    #[cfg(debug_assertions)]
    init_logging();

    let loaded = load_config(args.config.as_deref());
    let mut config = loaded.config;
    if let Some(url) = args.webhook_url {
        config.webhook.url = Some(url);
    }

    if args.print_config {
        if let Some(warning) = &loaded.warning {
            eprintln!("warning: {warning}");
        }
        print!("{}", config.redacted());
        return Ok(());
    }

    // Without a usable webhook the chat still works, every reply is a notice
    let service = ReplyClient::from_config(&config.webhook).map_err(|e| {
        log::warn!("Webhook client unavailable: {}", e);
        FailureKind::NotConfigured(e.to_string())
    });
    let offline_notice = service.as_ref().err().map(|failure| {
        let reason = failure.to_string();
        let first_line = reason.lines().next().unwrap_or_default().to_string();
        format!("Replies are offline. {first_line}")
    });

    let mut app = App::new(&config, service);
    app.set_notice(loaded.warning.or(offline_notice));
    if let Some(category) = args.category {
        app.on_select_category(category);
    }

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();

    let result = run(terminal, &mut app);

    // Restore terminal (automatic cleanup)
    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, app: &mut App<ReplyClient>) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events(TICK)?;
        app.poll_replies();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Debug builds log to a file so output does not corrupt the terminal UI
#[cfg(debug_assertions)]
fn init_logging() {
    let path = std::env::temp_dir().join("openlove-debug.log");
    if let Ok(file) = std::fs::File::create(&path) {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("openlove=debug"),
        )
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    }
}
