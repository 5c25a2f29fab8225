use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use pathblink::{
    Config, LayoutOptions, Positioner, PositionerOptions, Scheduler, Stage, TextBox, TransitionStyle,
    geometry::Point,
    path::{Circle, Curve, Path, parse_svg_path, parse_svg_paths},
    render::TerminalRenderer,
};
use std::fs::{self, File};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Elements that blink at random and glide onto points sampled along paths.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The path to the configuration file.
    #[clap(short, long, env = "PATHBLINK_CONFIG")]
    config: Option<PathBuf>,

    /// A file with one SVG path per line.
    #[clap(short, long)]
    paths: Option<PathBuf>,

    /// The number of elements to create.
    #[clap(short = 'n', long)]
    elements: Option<usize>,

    /// The transition to play when moving onto a path.
    #[clap(short, long)]
    transition: Option<TransitionStyle>,

    /// Make a random element blink periodically.
    #[clap(short, long)]
    blink: bool,

    /// The factor applied to every point of a path.
    #[clap(short, long, default_value_t = 1.0)]
    scale: f64,

    /// Seed every random choice to get reproducible runs.
    #[clap(long)]
    seed: Option<u64>,

    /// Write logs to this file.
    #[clap(long, env = "PATHBLINK_LOG")]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    // The terminal belongs to the renderer so logs only go to a file.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pathblink=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(Mutex::new(file)).with_ansi(false).init();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config file {}", path.display()))?,
        None => Config::load_default().context("loading default config file")?,
    };
    let positioner = &mut config.positioner;
    if let Some(elements) = cli.elements {
        positioner.elements = elements;
    }
    if let Some(transition) = cli.transition {
        positioner.transition = transition;
    }
    if cli.blink {
        positioner.blink.enabled = true;
    }
    if cli.seed.is_some() {
        positioner.seed = cli.seed;
    }
    Ok(config)
}

fn load_paths(cli: &Cli, config: &Config, width: f64, height: f64) -> anyhow::Result<Vec<Box<dyn Path>>> {
    let mut paths: Vec<Box<dyn Path>> = Vec::new();
    for (index, data) in config.paths.iter().enumerate() {
        let path = parse_svg_path(data).with_context(|| format!("parsing path #{index} in config"))?;
        paths.push(Box::new(path));
    }
    if let Some(file) = &cli.paths {
        let contents = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
        let parsed = parse_svg_paths(&contents).with_context(|| format!("parsing {}", file.display()))?;
        paths.extend(parsed.into_iter().map(|path| Box::new(path) as Box<dyn Path>));
    }
    if paths.is_empty() {
        paths = default_paths(width, height);
    }
    Ok(paths)
}

/// A few shapes filling a `width` by `height` surface.
fn default_paths(width: f64, height: f64) -> Vec<Box<dyn Path>> {
    let center = Point::new(width / 2.0, height / 2.0);
    let radius = width.min(height) * 0.4;
    let wave = format!(
        "M{x0} {y} Q{q1} {top} {x1} {y} T{x2} {y} T{x3} {y} T{x4} {y}",
        x0 = width * 0.1,
        q1 = width * 0.2,
        x1 = width * 0.3,
        x2 = width * 0.5,
        x3 = width * 0.7,
        x4 = width * 0.9,
        y = center.y,
        top = height * 0.1,
    );
    let mut paths: Vec<Box<dyn Path>> = vec![
        Box::new(Curve::line(Point::new(width * 0.1, center.y), Point::new(width * 0.9, center.y))),
        Box::new(Circle::new(center, radius)),
    ];
    match parse_svg_path(&wave) {
        Ok(wave) => paths.push(Box::new(wave)),
        Err(e) => warn!("failed to build wave path: {e}"),
    }
    paths
}

struct App {
    positioner: Positioner<TextBox>,
    stage: Stage<TextBox>,
    scheduler: Scheduler,
    renderer: TerminalRenderer<Stdout>,
    frame: Duration,
    scale: f64,
    current_path: usize,
}

impl App {
    fn run(&mut self) -> anyhow::Result<()> {
        let start = Instant::now();
        loop {
            if event::poll(self.frame)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Right | KeyCode::Char(' ') => self.switch_path(1)?,
                        KeyCode::Left => self.switch_path(self.positioner.path_count() - 1)?,
                        KeyCode::Char('r') => {
                            let options = LayoutOptions::instant().scale(self.scale);
                            self.positioner.layout(self.current_path, options)?;
                        }
                        KeyCode::Char('b') => {
                            self.positioner.highlight_once();
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }

            let now = start.elapsed();
            self.scheduler.advance_to(now);
            self.stage.tick(now);

            let (columns, rows) = terminal::size()?;
            self.renderer.render(self.positioner.elements(), columns, rows)?;
            let status = format!(
                " path {}/{}  ←/→ switch  r reset  b blink  q quit",
                self.current_path + 1,
                self.positioner.path_count()
            );
            self.renderer.status(&status, columns, rows)?;
        }
        Ok(())
    }

    fn switch_path(&mut self, step: usize) -> anyhow::Result<()> {
        self.current_path = (self.current_path + step) % self.positioner.path_count();
        info!(path = self.current_path, "switching path");
        self.positioner.layout(self.current_path, LayoutOptions::default().scale(self.scale))?;
        Ok(())
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli)?;
    let config = load_config(&cli)?;

    let (columns, rows) = terminal::size().context("querying terminal size")?;
    let width = columns as f64 * config.render.cell_width;
    let height = rows.saturating_sub(1) as f64 * config.render.cell_height;
    let paths = load_paths(&cli, &config, width, height)?;
    info!(paths = paths.len(), "loaded paths");

    let scheduler = Scheduler::new();
    let mut stage = Stage::new();
    stage.add_container(&config.positioner.container);
    let options = PositionerOptions::from(&config.positioner);
    let mut positioner = Positioner::new(&mut stage, paths, options, &scheduler)?;
    if cli.scale != 1.0 {
        positioner.layout(0, LayoutOptions::instant().scale(cli.scale))?;
    }

    let mut app = App {
        positioner,
        stage,
        scheduler,
        renderer: TerminalRenderer::new(io::stdout(), config.render.clone()),
        frame: Duration::from_secs_f64(1.0 / config.render.fps as f64),
        scale: cli.scale,
        current_path: 0,
    };

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    let result = app.run();
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
