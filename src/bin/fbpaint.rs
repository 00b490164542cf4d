use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fbpaint::SourceImage as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fbpaint", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bounce an image across the frame buffer.
    Bounce(BounceArgs),
    /// Turn an image file into Rust source for an embedded table image.
    Encode(EncodeArgs),
    /// Print the frame buffer's geometry and pixel format.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct BounceArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame buffer device.
    #[arg(long)]
    device: Option<PathBuf>,

    /// Pixel moves per second.
    #[arg(long)]
    pps: Option<u32>,

    /// Image to bounce instead of the built-in cursor.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Stop after this many moves.
    #[arg(long)]
    steps: Option<u64>,

    /// Leave the image on screen when done.
    #[arg(long)]
    keep: bool,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input image file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output Rust source path.
    #[arg(long)]
    out: PathBuf,

    /// Constant name (UPPER_SNAKE_CASE).
    #[arg(long)]
    name: String,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Frame buffer device.
    #[arg(long, default_value = "/dev/fb0")]
    device: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Bounce(args) => cmd_bounce(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn bounce_config(args: &BounceArgs) -> anyhow::Result<fbpaint::BounceConfig> {
    let mut cfg = match &args.config {
        Some(path) => fbpaint::BounceConfig::from_json_path(path)?,
        None => fbpaint::BounceConfig::default(),
    };
    if let Some(device) = &args.device {
        cfg.device = device.clone();
    }
    if let Some(pps) = args.pps {
        cfg.pixels_per_second = pps;
    }
    if let Some(image) = &args.image {
        cfg.image = Some(image.clone());
    }
    if let Some(steps) = args.steps {
        cfg.steps = Some(steps);
    }
    if args.keep {
        cfg.clear_on_exit = false;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_bounce(args: BounceArgs) -> anyhow::Result<()> {
    let cfg = bounce_config(&args)?;
    let image: Box<dyn fbpaint::SourceImage> = match &cfg.image {
        Some(path) => Box::new(fbpaint::DecodedImage::open(path)?),
        None => Box::new(fbpaint::CURSOR),
    };

    let mut fb = fbpaint::FrameBuffer::try_open(&cfg.device)?;
    let mut painter = fbpaint::ImagePainter::new(image);
    let stats = fbpaint::run_bounce(&mut painter, &mut fb, &cfg);
    eprintln!(
        "{} moves, {} pixels written, {} restored",
        stats.steps, stats.paint.written, stats.paint.restored
    );
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let image = fbpaint::DecodedImage::open(&args.in_path)?;
    let label = args
        .in_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.in_path.display().to_string());
    let src = fbpaint::encode_table_image(&args.name, &image, &label)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, src)
        .with_context(|| format!("write source '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let fb = fbpaint::FrameBuffer::try_open(&args.device)?;
    print_layout(fb.path(), &fb.layout());
    Ok(())
}

fn print_layout(path: &Path, layout: &fbpaint::PixelLayout) {
    println!("device:          {}", path.display());
    println!("resolution:      {}x{}", layout.width, layout.height);
    println!("bits per pixel:  {}", layout.bytes_per_pixel * 8);
    println!("line length:     {}", layout.line_length);
    println!("pan offset:      {},{}", layout.x_offset, layout.y_offset);
    for (name, ch) in [
        ("red", layout.red),
        ("green", layout.green),
        ("blue", layout.blue),
    ] {
        println!("{name:<6}           offset {:>2}, length {}", ch.offset, ch.length);
    }
}
