use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use sidenav::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "sidenav", about = "Collapsible sidebar navigation for the terminal")]
struct Args {
    /// Full name shown in the footer (first two words are used)
    #[arg(long)]
    name: Option<String>,

    /// Role shown under the name
    #[arg(long)]
    role: Option<String>,

    /// Start with the sidebar collapsed
    #[arg(long)]
    collapsed: bool,

    /// Skip the avatar request
    #[arg(long)]
    no_avatar: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to sidenav.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("sidenav.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::SidenavConfig::default()
    });
    let cli = CliOverrides {
        name: args.name,
        role: args.role,
        collapsed: args.collapsed,
        no_avatar: args.no_avatar,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Sidenav starting up (user: {:?}, expanded: {}, avatar: {})",
        resolved.user_name,
        resolved.start_expanded,
        resolved.avatar_enabled
    );

    sidenav::tui::run(resolved)
}
