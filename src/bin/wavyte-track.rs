use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use wavyte_track::{
    BoxTrack, BoxValues as _, Fps, FrameIndex, FrameRange, JsonLinesCodec, TrackerCodec,
    TrackerFramesCodec,
};

#[derive(Parser, Debug)]
#[command(name = "wavyte-track", version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Tracker output to load samples from.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Format of `--data`.
    #[arg(long, value_enum, default_value_t = DataFormat::Jsonl, global = true)]
    format: DataFormat,

    /// Track metadata JSON (rates, visibility, curves) applied before `--fps`/`--time-scale`.
    #[arg(long, global = true)]
    meta: Option<PathBuf>,

    /// Rate the samples were recorded at, e.g. `30` or `30000/1001`.
    #[arg(long, global = true)]
    fps: Option<Fps>,

    /// Query time scale.
    #[arg(long, global = true)]
    time_scale: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DataFormat {
    /// One `{frame, cx, cy, width, height, angle}` object per line.
    Jsonl,
    /// `{"frames": [...]}` document with corner boxes.
    Frames,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the box and adjustment values at one frame.
    Box {
        #[arg(long)]
        frame: u64,
    },
    /// Print the property sheet at one frame.
    Props {
        #[arg(long)]
        frame: u64,
    },
    /// Print every box in `[start, end)`.
    Range {
        #[arg(long)]
        start: u64,
        #[arg(long)]
        end: u64,
        /// Evaluate frames on the rayon pool.
        #[arg(long)]
        parallel: bool,
    },
    /// Print the track metadata JSON.
    Meta,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let track = build_track(&cli.source)?;
    let out = match cli.cmd {
        Command::Box { frame } => {
            let frame = FrameIndex(frame);
            serde_json::json!({
                "frame": frame.0,
                "box": track.get_box(frame),
                "values": track.box_values(frame),
            })
        }
        Command::Props { frame } => track.properties_json(FrameIndex(frame))?,
        Command::Range {
            start,
            end,
            parallel,
        } => {
            let range = FrameRange::new(FrameIndex(start), FrameIndex(end))?;
            serde_json::to_value(track.boxes(range, parallel)).context("serialize boxes")?
        }
        Command::Meta => track.json_value(),
    };

    println!("{out:#}");
    Ok(())
}

fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if json {
        tracing::subscriber::set_global_default(builder.json().finish()).ok();
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).finish()).ok();
    }
}

fn build_track(args: &SourceArgs) -> anyhow::Result<BoxTrack> {
    let mut track = BoxTrack::new();

    if let Some(meta) = &args.meta {
        let text = std::fs::read_to_string(meta)
            .with_context(|| format!("read track metadata '{}'", meta.display()))?;
        track
            .set_json(&text)
            .with_context(|| format!("apply track metadata '{}'", meta.display()))?;
    }
    if let Some(fps) = args.fps {
        track.set_base_fps(fps)?;
    }
    if let Some(scale) = args.time_scale {
        track.set_time_scale(scale)?;
    }
    if let Some(data) = &args.data {
        load_data(&mut track, data, args.format)?;
    }
    Ok(track)
}

fn load_data(track: &mut BoxTrack, path: &Path, format: DataFormat) -> anyhow::Result<()> {
    let codec: &dyn TrackerCodec = match format {
        DataFormat::Jsonl => &JsonLinesCodec,
        DataFormat::Frames => &TrackerFramesCodec,
    };
    let loaded = track
        .try_load_box_data(path, codec)
        .with_context(|| format!("load tracker data '{}'", path.display()))?;
    tracing::info!(loaded, path = %path.display(), "tracker data loaded");
    Ok(())
}
