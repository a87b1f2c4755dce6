use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use wavewalk::feeds::articles::{ArticleContainer, parse_articles, render_containers};
use wavewalk::feeds::html::MountSet;
use wavewalk::feeds::now::{NowOutcome, NowSection, render_now_or_fallback};

#[derive(Parser, Debug)]
#[command(name = "wavewalk", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one stage frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence of a stage.
    Render(RenderArgs),
    /// Render article cards as HTML.
    Articles(ArticlesArgs),
    /// Render the "now" sidebar sections as HTML.
    Now(NowArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input stage JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based). Choreography is simulated up to this frame.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Wave tuning as `name=value` (amp, amp2, wavelength, wavelength2, duration, strip, shape_k).
    #[arg(long = "tune")]
    tune: Vec<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input stage JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of frames to render.
    #[arg(long)]
    frames: u64,

    /// Output directory for `frame_00000.png`...
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long = "tune")]
    tune: Vec<String>,
}

#[derive(Parser, Debug)]
struct ArticlesArgs {
    /// Articles JSON array.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Container class list; `sidebar-article-grid` selects sidebar cards.
    #[arg(long, default_value = "")]
    class: String,

    /// Container `data-limit`.
    #[arg(long)]
    limit: Option<String>,

    /// Container `data-tags` (comma separated).
    #[arg(long)]
    tags: Option<String>,
}

#[derive(Parser, Debug)]
struct NowArgs {
    /// "Now" JSON payload.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Element ids present on the page; defaults to all three sections.
    #[arg(long = "mount")]
    mounts: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Articles(args) => cmd_articles(args),
        Command::Now(args) => cmd_now(args),
    }
}

fn prepare_stage(in_path: &Path, tune: &[String]) -> anyhow::Result<wavewalk::Stage> {
    let def = wavewalk::StageDef::from_path(in_path)?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut stage = wavewalk::Stage::prepare(&def, assets_root)
        .with_context(|| format!("prepare stage '{}'", in_path.display()))?;
    for pair in tune {
        stage
            .tuning()
            .apply_pair(pair)
            .with_context(|| format!("apply tuning '{pair}'"))?;
    }
    Ok(stage)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut stage = prepare_stage(&args.in_path, &args.tune)?;
    let fps = stage.fps();
    for i in 0..args.frame {
        stage.render_frame(fps.frame_time_ms(0.0, wavewalk::FrameIndex(i)));
    }
    let frame = stage.render_frame(fps.frame_time_ms(0.0, wavewalk::FrameIndex(args.frame)));

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    wavewalk::encode::sink::write_png(&args.out, frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut stage = prepare_stage(&args.in_path, &args.tune)?;
    let mut sink = wavewalk::PngSequenceSink::new(&args.out_dir);
    stage
        .render_range(0..args.frames, &mut sink)
        .with_context(|| format!("render into '{}'", args.out_dir.display()))?;

    eprintln!("wrote {} frames to {}", sink.written().len(), args.out_dir.display());
    Ok(())
}

fn cmd_articles(args: ArticlesArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read articles '{}'", args.in_path.display()))?;
    let mut articles = parse_articles(&text)?;
    let container =
        ArticleContainer::from_attrs(&args.class, args.limit.as_deref(), args.tags.as_deref());
    for html in render_containers(&mut articles, &[container]) {
        println!("{html}");
    }
    Ok(())
}

fn cmd_now(args: NowArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read now feed '{}'", args.in_path.display()))?;
    let mounts = if args.mounts.is_empty() {
        MountSet::new(NowSection::ALL.map(NowSection::mount_id))
    } else {
        MountSet::new(args.mounts)
    };
    match render_now_or_fallback(&text, &mounts) {
        NowOutcome::Rendered(sections) => {
            for s in sections {
                println!("<!-- #{} -->", s.section.mount_id());
                println!("{}", s.html);
            }
        }
        NowOutcome::Fallback(html) => println!("{html}"),
    }
    Ok(())
}
