use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`tracing-subscriber` `EnvFilter` syntax).
const LOG_ENV: &str = "DOCMARK_LOG";

#[derive(Parser, Debug)]
#[command(name = "docmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watermark a photo and export it as JPEG, PNG or PDF.
    Stamp(StampArgs),
    /// Render the live-preview composition as a PNG.
    Preview(PreviewArgs),
    /// Print the derived watermark parameters for a canvas size as JSON.
    Params(ParamsArgs),
    /// Print the density preset table as JSON.
    Presets,
}

#[derive(Parser, Debug)]
struct WatermarkArgs {
    /// JSON watermark config (`text`, `density`, `rotation`); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watermark text. Blank input falls back to the default text.
    #[arg(long)]
    text: Option<String>,

    /// Density preset: sparse, normal or dense.
    #[arg(long)]
    density: Option<docmark::Density>,

    /// Clockwise photo rotation in degrees: 0, 90, 180 or 270.
    #[arg(long = "rotate")]
    rotation: Option<docmark::QuarterTurn>,

    /// Font file used instead of the system sans-serif (overrides `DOCMARK_FONT`).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StampArgs {
    /// Input photo (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file, or a directory to receive `docmark_<millis>.<ext>`.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from `--out` when omitted, JPEG otherwise.
    #[arg(long)]
    format: Option<docmark::ExportFormat>,

    #[command(flatten)]
    watermark: WatermarkArgs,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input photo. Without it only the transparent overlay is rendered.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Viewport size as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_viewport, default_value = "1080x1920")]
    viewport: docmark::Canvas,

    #[command(flatten)]
    watermark: WatermarkArgs,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: f64,

    /// Canvas height in pixels.
    #[arg(long)]
    height: f64,

    /// Density preset.
    #[arg(long, default_value_t = docmark::Density::Normal)]
    density: docmark::Density,

    /// Also plan the tile grid for `--text` on a recording surface and print its size.
    #[arg(long)]
    dry_run: bool,

    /// Text used by `--dry-run`.
    #[arg(long, default_value = docmark::DEFAULT_TEXT)]
    text: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Stamp(args) => cmd_stamp(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Params(args) => cmd_params(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl WatermarkArgs {
    /// Defaults, then `--config`, then individual flags.
    fn resolve(&self) -> anyhow::Result<(docmark::WatermarkConfig, docmark::FontOptions)> {
        let mut config = match &self.config {
            Some(path) => docmark::WatermarkConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => docmark::WatermarkConfig::default(),
        };
        if let Some(text) = &self.text {
            config.text = docmark::WatermarkText::from_input(text);
        }
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(rotation) = self.rotation {
            config.rotation = rotation;
        }
        let fonts = docmark::FontOptions::with_override(self.font.clone());
        tracing::debug!(?config, ?fonts, "resolved watermark config");
        Ok((config, fonts))
    }
}

fn cmd_stamp(args: StampArgs) -> anyhow::Result<()> {
    let (config, fonts) = args.watermark.resolve()?;
    let photo = docmark::load_photo(&args.in_path)
        .with_context(|| format!("load photo '{}'", args.in_path.display()))?;

    let format = args
        .format
        .or_else(|| docmark::ExportFormat::from_path(&args.out))
        .unwrap_or_default();
    let out_path = docmark::export::resolve_output_path(&args.out, format, unix_millis());

    let frame = docmark::compose_export(&photo, &config, &fonts).context("compose export")?;
    docmark::write_frame(&frame, format, &out_path)
        .with_context(|| format!("write '{}'", out_path.display()))?;

    println!("{}", out_path.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let (config, fonts) = args.watermark.resolve()?;
    let frame = match &args.in_path {
        Some(path) => {
            let photo = docmark::load_photo(path)
                .with_context(|| format!("load photo '{}'", path.display()))?;
            docmark::compose_preview(&photo, args.viewport, &config, &fonts)
                .context("compose preview")?
        }
        None => docmark::compose_overlay(args.viewport, &config, &fonts)
            .context("compose overlay")?,
    };
    docmark::write_frame(&frame, docmark::ExportFormat::Png, &args.out)
        .with_context(|| format!("write '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> anyhow::Result<()> {
    let params = docmark::derive_params(args.width, args.height, args.density.preset());
    let out = if args.dry_run {
        let mut surface = docmark::RecordingSurface::new();
        docmark::paint(&mut surface, args.width, args.height, &args.text, &params, 0.0);
        serde_json::json!({
            "params": params,
            "fill_count": surface.fill_count(),
        })
    } else {
        serde_json::to_value(params)?
    };
    print_json(&out)
}

fn cmd_presets() -> anyhow::Result<()> {
    let mut table = serde_json::Map::new();
    for density in docmark::Density::ALL {
        table.insert(
            density.name().to_owned(),
            serde_json::to_value(density.preset())?,
        );
    }
    print_json(&serde_json::Value::Object(table))
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize JSON")?;
    println!("{s}");
    Ok(())
}

fn parse_viewport(s: &str) -> Result<docmark::Canvas, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got \"{s}\""))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    docmark::Canvas::new(w, h).map_err(|e| e.to_string())
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
