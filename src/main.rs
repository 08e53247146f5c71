use std::{
    fs,
    io::{self, stdin, BufRead},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use gridlife::{
    config::{self, Configuration, Point},
    draw::{self, App},
    proc,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridlife")]
#[command(version)]
#[command(about = "Conway's Game of Life on a bounded grid")]
struct Cli {
    /// Grid width (number of printed lines)
    #[arg(short = 'W', long, default_value_t = config::DEFAULT_WIDTH)]
    width: usize,

    /// Grid height (cells per printed line)
    #[arg(short = 'H', long, default_value_t = config::DEFAULT_HEIGHT)]
    height: usize,

    /// Number of generations to show, 0 for unlimited
    #[arg(short, long, default_value_t = config::DEFAULT_MAX_TURNS)]
    turns: u64,

    /// Live seed cell as X,Y (repeatable)
    #[arg(short, long = "cell", value_name = "X,Y", allow_hyphen_values = true)]
    cells: Vec<Point>,

    /// Pattern plot to start from, `-` for stdin; sets width and height
    #[arg(short, long, value_name = "FILE")]
    pattern: Option<PathBuf>,

    /// Interactive terminal view
    #[arg(long)]
    watch: bool,

    /// Initial frame delay for --watch, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 450)]
    delay: u64,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn configuration(&self) -> anyhow::Result<Configuration> {
        let base = match &self.pattern {
            Some(path) => {
                let text = if path.as_os_str() == "-" {
                    readlines(stdin().lock())?
                } else {
                    fs::read_to_string(path)
                        .with_context(|| format!("reading pattern {}", path.display()))?
                };
                Configuration::from_plot(&text, self.turns)
                    .with_context(|| format!("parsing pattern {}", path.display()))?
            }
            None => Configuration::new(self.width, self.height, self.turns),
        };
        Ok(base.with_cells(self.cells.iter().copied()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let cfg = cli.configuration()?;
    let grid = cfg.seed().context("building the initial grid")?;
    let life = proc::run(&grid, cfg.max_turns)?;

    if cli.watch {
        draw::run(App::new(life, cli.delay))?;
    } else {
        draw::print_run(life, &mut io::stdout().lock())?;
    }
    Ok(())
}

/// Reads a plot up to the first empty line.
fn readlines<R: BufRead>(input: R) -> io::Result<String> {
    let mut s = String::new();
    for w in input.lines() {
        let w = w?;
        if w.is_empty() {
            break;
        }
        s.push_str(&w);
        s.push('\n');
    }
    Ok(s)
}
