use clap::{Args, Parser, Subcommand};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;
use std::time::Duration;
use tracing::info;

mod dataset;
mod engine;
mod metrics;
mod model;
mod render;

use engine::{EngineProfile, FrameClock, ManualClock, ProfileName, SystemClock, TableAnimation};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "benchbars")]
#[command(about = "Animated latency/throughput benchmark table", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct Source {
    /// Dataset JSON; the built-in sample is used when omitted.
    #[arg(long)]
    data: Option<String>,

    #[arg(long, value_enum, default_value_t = ProfileName::Glow)]
    profile: ProfileName,

    /// Engine profile JSON; overrides --profile.
    #[arg(long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a self-contained animated HTML page.
    Report {
        #[command(flatten)]
        source: Source,

        #[arg(short = 'o', long)]
        out: String,

        /// Longest loop recorded per row, in seconds.
        #[arg(long, default_value_t = 30.0)]
        seconds: f64,

        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
    /// Print the table once, with bars where they would be at --at-ms
    /// (capped at ten minutes of simulated time).
    Table {
        #[command(flatten)]
        source: Source,

        #[arg(long, default_value_t = 0.0)]
        at_ms: f64,

        #[arg(long, default_value_t = 60)]
        width: usize,

        #[arg(long)]
        no_color: bool,
    },
    /// Animate the table in the terminal.
    Animate {
        #[command(flatten)]
        source: Source,

        #[arg(long, default_value_t = 10.0)]
        duration_secs: f64,

        #[arg(long, default_value_t = 60)]
        width: usize,

        #[arg(long)]
        no_color: bool,
    },
}

/// ~60 Hz host repaint interval.
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Report {
            source,
            out,
            seconds,
            fps,
        } => {
            let (profile, view) = load_view(&source)?;
            let fps = fps.clamp(1.0, 60.0);
            let max_frames = (seconds.max(0.0) * fps).ceil() as usize;
            let keyframes = engine::sample_keyframes(&view.params(), &profile, fps, max_frames);

            let html = render::render_html_report(&view, &keyframes)?;
            std::fs::write(&out, html)?;
            info!(rows = view.rows.len(), profile = %profile.name, "wrote report");
            println!("Wrote {}", out);
        }
        Commands::Table {
            source,
            at_ms,
            width,
            no_color,
        } => {
            let (profile, view) = load_view(&source)?;
            if no_color {
                colored::control::set_override(false);
            }

            // Step a virtual clock at the host repaint rate up to `at_ms`.
            let clock = ManualClock::new(0.0);
            let animation = TableAnimation::start(&view.params(), &profile, clock.now_ms());
            let reached = animation.advance_to(&clock, at_ms, FRAME_MS);
            info!(at_ms = reached, "table sampled");

            let opts = render::TextOptions {
                width,
                color: !no_color,
            };
            print!("{}", render::render_text_table(&view, &animation.frames(), &opts));
        }
        Commands::Animate {
            source,
            duration_secs,
            width,
            no_color,
        } => {
            let (profile, view) = load_view(&source)?;
            if no_color {
                colored::control::set_override(false);
            }
            let opts = render::TextOptions {
                width,
                color: !no_color,
            };

            let clock = SystemClock::new();
            let mut animation = TableAnimation::start(&view.params(), &profile, clock.now_ms());
            let until_ms = duration_secs.max(0.0) * 1000.0;
            let mut stdout = std::io::stdout().lock();
            execute!(stdout, Hide)?;

            loop {
                let now = clock.now_ms();
                if now >= until_ms {
                    break;
                }
                animation.frame(now);
                execute!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
                write!(
                    stdout,
                    "{}",
                    render::render_text_table(&view, &animation.frames(), &opts)
                )?;
                stdout.flush()?;
                std::thread::sleep(Duration::from_secs_f64(FRAME_MS / 1000.0));
            }
            execute!(stdout, Show)?;
            let leaked = animation.stop();
            info!(duration_secs, leaked, "animation finished");
        }
    }

    Ok(())
}

fn load_view(source: &Source) -> Result<(EngineProfile, model::TableView)> {
    let profile = match &source.config {
        Some(path) => engine::load_profile_file(path)?,
        None => EngineProfile::preset(source.profile),
    };
    let data = match &source.data {
        Some(path) => dataset::load_dataset_file(path)?,
        None => dataset::sample_dataset()?,
    };
    let view = model::build_table_view(&data, &profile);
    Ok((profile, view))
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
