use bahama_login::config::LoginConfig;
use bahama_login::error::{LoginError, Result};
use bahama_login::event::{Event, EventHandler};
use bahama_login::screen::{LoginScreen, ScreenAction};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bahama-login")]
#[command(author, version, about = "An animated login screen for the terminal")]
struct Args {
    /// Path to config file (default: ~/.config/bahama-login/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting bahama-login");
        }
    }

    // Bad config is reported before the terminal is taken over
    let config = match args.config {
        Some(ref path) => LoginConfig::load_from(path)?,
        None => LoginConfig::load()?,
    };

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    let result = run(&mut terminal, config).await;

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Application error: {}", e);
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| LoginError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| LoginError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| LoginError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| LoginError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .map_err(|e| LoginError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: LoginConfig,
) -> Result<()> {
    let tick_rate = Duration::from_millis(config.ui.frame_ms);
    let mut events = EventHandler::new(tick_rate);

    let size = terminal
        .size()
        .map_err(|e| LoginError::Terminal(e.to_string()))?;
    let area = Rect::new(0, 0, size.width, size.height);

    let mut screen = LoginScreen::new(config, area, events.sender(), Instant::now())?;
    screen.present(Instant::now());

    loop {
        let now = Instant::now();
        screen.tick(now);

        terminal
            .draw(|frame| bahama_login::ui::draw(frame, &screen, now))
            .map_err(|e| LoginError::Terminal(e.to_string()))?;

        if let Some(event) = events.next().await {
            let action = match event {
                Event::Key(key) => screen.handle_key(key),
                Event::Mouse(mouse) => screen.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    screen.resize(Rect::new(0, 0, width, height), Instant::now());
                    None
                }
                Event::CloudWrapped { index, generation } => {
                    screen.cloud_wrapped(index, generation, Instant::now());
                    None
                }
                Event::Tick => None,
            };

            match action {
                Some(ScreenAction::Login) => {
                    screen.login(Instant::now());
                }
                Some(ScreenAction::Quit) => {
                    screen.should_exit = true;
                }
                None => {}
            }
        }

        if screen.should_exit {
            break;
        }
    }

    screen.shutdown().await;
    Ok(())
}
