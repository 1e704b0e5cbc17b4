use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a project file to a PNG collage.
    Export(ExportArgs),
    /// Print the four grid cells for a canvas size as JSON.
    Layout(LayoutArgs),
    /// Print the cover crop for a source and destination size as JSON.
    Crop(CropArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file for sticker glyphs (overrides the project and PHOTOBOOTH_STICKER_FONT).
    #[arg(long)]
    sticker_font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Square canvas edge length in pixels.
    #[arg(long)]
    size: u32,
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Source size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_dims)]
    src: (u32, u32),

    /// Destination size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_dims)]
    dst: (u32, u32),
}

fn parse_dims(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Crop(args) => cmd_crop(args),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut config = photobooth::ProjectConfig::from_path(&args.in_path)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;
    let base_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    // Project paths resolve against the project directory, so pin the flag to the cwd first.
    if let Some(font) = args.sticker_font {
        let font = std::path::absolute(&font)
            .with_context(|| format!("resolve font path '{}'", font.display()))?;
        config.sticker_font = Some(font);
    }

    let opts = photobooth::EditorOpts::from_env();
    let mut editor = photobooth::CollageEditor::from_project(&config, base_dir, opts)
        .context("prepare collage")?;
    let frame = editor.export_frame().context("render collage")?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    photobooth::write_png(&frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let layout = photobooth::compute_layout(args.size);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let (sw, sh) = args.src;
    let (dw, dh) = args.dst;
    let crop = photobooth::compute_cover_crop(sw, sh, dw, dh);
    println!("{}", serde_json::to_string_pretty(&crop)?);
    Ok(())
}
