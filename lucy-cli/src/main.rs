use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lucy", version, about = "Draw outlines with Fourier epicycles")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the input and print its spectrum as JSON.
    Spectrum(SpectrumArgs),
    /// Render a single animation frame as a PNG.
    Frame(FrameArgs),
    /// Render a sequence of frames as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
struct InputArgs {
    /// SVG document; its first path is traced.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Inline path data (`M`, `L`, `C`, `Z`).
    #[arg(long = "path-data")]
    path_data: Option<String>,

    /// Raster image; the largest dark silhouette is traced. Used when vector inputs fail.
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PipelineArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Pipeline config JSON (missing fields take defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of kept components.
    #[arg(long)]
    components: Option<usize>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Render style JSON (missing fields take defaults).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Do not draw the nested epicycle circles.
    #[arg(long, default_value_t = false)]
    hide_epicycles: bool,

    /// Do not draw the clock ring.
    #[arg(long, default_value_t = false)]
    hide_clocks: bool,
}

#[derive(Parser, Debug)]
struct SpectrumArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Number of ticks to advance before drawing (0 draws the starting pose).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Number of frames to write.
    #[arg(long)]
    count: u64,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Spectrum(args) => cmd_spectrum(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &PipelineArgs) -> anyhow::Result<lucy::EpicycleConfig> {
    let mut cfg = match &args.config {
        Some(path) => lucy::EpicycleConfig::from_path(path)?,
        None => lucy::EpicycleConfig::default(),
    };
    if let Some(k) = args.components {
        cfg.components = k;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_style(args: &StyleArgs) -> anyhow::Result<lucy::RenderStyle> {
    let mut style = match &args.style {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read style '{}'", path.display()))?;
            serde_json::from_str::<lucy::RenderStyle>(&text)
                .with_context(|| format!("parse style json '{}'", path.display()))?
        }
        None => lucy::RenderStyle::default(),
    };
    style.show_epicycles &= !args.hide_epicycles;
    style.show_clocks &= !args.hide_clocks;
    Ok(style)
}

fn source_chain(input: &InputArgs) -> lucy::SourceChain {
    let mut chain = lucy::SourceChain::default();
    if let Some(d) = &input.path_data {
        chain.push(lucy::ContourInput::PathData(d.clone()));
    }
    if let Some(p) = &input.svg {
        chain.push(lucy::ContourInput::SvgFile(p.clone()));
    }
    if let Some(p) = &input.image {
        chain.push(lucy::ContourInput::ImageFile(p.clone()));
    }
    chain
}

fn open_session(args: &PipelineArgs) -> anyhow::Result<lucy::EpicycleSession> {
    let cfg = load_config(args)?;
    let chain = source_chain(&args.input);
    Ok(lucy::EpicycleSession::new(Arc::new(chain), cfg)?)
}

fn cmd_spectrum(args: SpectrumArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.pipeline)?;
    let spectrum = sess.ensure_spectrum()?;
    let json = serde_json::to_string_pretty(spectrum.as_ref()).context("serialize spectrum")?;

    match &args.out {
        Some(out) => {
            ensure_parent_dir(out)?;
            std::fs::write(out, json + "\n")
                .with_context(|| format!("write spectrum '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.pipeline)?;
    let style = load_style(&args.style)?;
    let mut canvas = lucy::CpuCanvas::new(sess.config().layout.canvas)?;

    sess.activate();
    for _ in 0..args.frame {
        sess.tick_frame();
    }
    sess.render(&mut canvas, &style)?;

    ensure_parent_dir(&args.out)?;
    save_png(&canvas.readback(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.pipeline)?;
    let style = load_style(&args.style)?;
    let mut canvas = lucy::CpuCanvas::new(sess.config().layout.canvas)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    sess.activate();
    for i in 0..args.count {
        sess.tick_frame();
        sess.render(&mut canvas, &style)?;
        let out = args.out_dir.join(format!("frame_{i:05}.png"));
        save_png(&canvas.readback(), &out)?;
    }
    eprintln!(
        "wrote {} frame(s) to {}",
        args.count,
        args.out_dir.display()
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn save_png(frame: &lucy::FrameRGBA, out: &Path) -> anyhow::Result<()> {
    let img = frame.to_rgba_image()?;
    image::save_buffer_with_format(
        out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
