//! Headless replay of a scroll-synchronized page.
//!
//! Sweeps the page scroll offset (and optionally clicks buttons) against the
//! headless viewer and writes one JSON line per frame to stdout.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use scrollcam::{engine::FrameReport, options::Options, ScrollEngine, ScrollError};
use web_time::Duration;

#[derive(Debug, Parser)]
#[command(name = "scrollcam", version, about)]
struct Args {
    /// TOML options file; the landing-page defaults when absent.
    #[arg(short, long, conflicts_with = "preset")]
    options: Option<PathBuf>,

    /// Load `<PRESETS>/<NAME>.toml` instead of an explicit options file.
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Directory holding preset files.
    #[arg(long, default_value = "presets")]
    presets: PathBuf,

    /// Scroll offset the sweep starts at.
    #[arg(long, default_value_t = 0.0)]
    from: f32,

    /// Scroll offset the sweep ends at; the page bottom when absent.
    #[arg(long)]
    to: Option<f32>,

    /// Pixels scrolled per frame.
    #[arg(long, default_value_t = 50.0)]
    step: f32,

    /// Frame duration in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Click this button after the sweep (repeatable, in order).
    #[arg(long = "click", value_name = "SELECTOR")]
    clicks: Vec<String>,

    /// Extra frames rendered after each phase so smoothed steps settle.
    #[arg(long, default_value_t = 90)]
    settle: u32,

    /// Only report frames that synced the camera.
    #[arg(long)]
    synced_only: bool,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    schema: bool,

    /// Print the default options as TOML and exit.
    #[arg(long)]
    print_defaults: bool,

    /// Write the default options to this file and exit.
    #[arg(long, value_name = "PATH")]
    save_defaults: Option<PathBuf>,

    /// Print the preset names found in the presets directory and exit.
    #[arg(long)]
    list_presets: bool,
}

impl Args {
    fn options(&self) -> Result<Options, ScrollError> {
        if let Some(path) = &self.options {
            return Options::load(path);
        }
        let Some(name) = &self.preset else {
            return Ok(Options::default());
        };
        let available = Options::list_presets(&self.presets);
        if !available.contains(name) {
            return Err(ScrollError::Configuration(format!(
                "no preset '{name}' in {} (available: {})",
                self.presets.display(),
                available.join(", ")
            )));
        }
        Options::load(&self.presets.join(format!("{name}.toml")))
    }

    /// Rejects sweeps that would never terminate.
    fn check_sweep(&self) -> Result<(), ScrollError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ScrollError::Configuration(format!(
                "scroll step must be a positive number, got {}",
                self.step
            )));
        }
        for (name, value) in [("from", Some(self.from)), ("to", self.to)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ScrollError::Configuration(format!(
                    "--{name} must be a finite offset"
                )));
            }
        }
        Ok(())
    }
}

struct Replay<W: Write> {
    engine: ScrollEngine,
    out: W,
    dt: Duration,
    synced_only: bool,
}

impl<W: Write> Replay<W> {
    fn frame(&mut self) -> Result<FrameReport, ScrollError> {
        let report = self.engine.frame(self.dt);
        if !self.synced_only || report.camera_synced {
            serde_json::to_writer(&mut self.out, &report)
                .map_err(|e| ScrollError::Io(e.into()))?;
            writeln!(self.out)?;
        }
        Ok(report)
    }

    fn settle(&mut self, frames: u32) -> Result<(), ScrollError> {
        for _ in 0..frames {
            let report = self.frame()?;
            if !report.scrolling && !report.catching_up && !report.rendered {
                break;
            }
        }
        Ok(())
    }
}

fn run(args: &Args) -> Result<(), ScrollError> {
    if args.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| ScrollError::OptionsParse(e.to_string()))?;
        writeln!(io::stdout().lock(), "{schema}")?;
        return Ok(());
    }
    if args.print_defaults {
        write!(io::stdout().lock(), "{}", Options::default().to_toml()?)?;
        return Ok(());
    }
    if let Some(path) = &args.save_defaults {
        Options::default().save(path)?;
        log::info!("default options written to {}", path.display());
        return Ok(());
    }
    if args.list_presets {
        let mut out = io::stdout().lock();
        for name in Options::list_presets(&args.presets) {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    args.check_sweep()?;
    let options = args.options()?;

    let engine = ScrollEngine::new(&options)?;
    let to = args.to.unwrap_or_else(|| engine.layout().max_scroll());
    let mut replay = Replay {
        engine,
        out: BufWriter::new(io::stdout().lock()),
        dt: Duration::from_millis(args.frame_ms),
        synced_only: args.synced_only,
    };

    log::info!("sweeping {:.0} -> {to:.0} in {:.0}px steps", args.from, args.step);
    let direction = if to >= args.from { 1.0 } else { -1.0 };
    let mut y = args.from;
    loop {
        replay.engine.handle_scroll(y);
        let _ = replay.frame()?;
        if (to - y) * direction <= 0.0 {
            break;
        }
        y = if (to - y).abs() <= args.step {
            to
        } else {
            y + args.step * direction
        };
    }
    replay.settle(args.settle)?;

    for selector in &args.clicks {
        let destination = replay.engine.click(selector)?;
        log::info!("clicked {selector}, scrolling to {destination:.0}");
        while replay.frame()?.scrolling {}
        replay.settle(args.settle)?;
    }

    replay.out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
