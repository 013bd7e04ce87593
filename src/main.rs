use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use perch::app::App;
use perch::config::{Config, load_config, load_config_from_path};
use perch::event::{Event, EventHandler};
use perch::format::{format_gb_pair, format_gb_whole, format_percent};
use perch::system::sampler::Sampler;
use perch::ui;

#[derive(Parser)]
#[command(
    name = "perch",
    about = "Floating terminal resource monitor: CPU, memory, and disk at a glance"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Volume to report disk usage for
    #[arg(long)]
    disk_path: Option<PathBuf>,

    /// Print a single reading to stdout and exit (no TUI)
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Write tracing diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .init();
    }

    if cli.once {
        return run_once(&config).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(100));
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);

    app.refresh_data();
    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Tick => {
                    app.refresh_data();
                }
                Event::Resize => {}
            }
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

/// Samples twice across one interval so the CPU figure reflects real load
/// instead of the baseline-establishing zero, then prints the reading.
async fn run_once(config: &Config) -> Result<()> {
    let mut sampler = Sampler::new(PathBuf::from(&config.general.disk_path));
    sampler.sample();
    tokio::time::sleep(Duration::from_millis(config.general.refresh_rate_ms.max(100))).await;
    let reading = sampler.sample();

    println!("CPU:    {}", format_percent(reading.cpu_percent));
    println!(
        "Memory: {}",
        format_gb_pair(reading.memory_used_gb, reading.memory_total_gb)
    );
    println!(
        "Disk:   {} / {} ({} free)",
        format_gb_whole(reading.disk_used_gb),
        format_gb_whole(reading.disk_total_gb),
        format_gb_whole(reading.disk_free_gb),
    );
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(path) = &cli.disk_path {
        config.general.disk_path = path.display().to_string();
    }

    config
}
