use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "respondiff", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the media-query CSS for a selection.
    Css(CssArgs),
    /// Feed a JSON array of events through a session and print one UI message per event.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Scene graph JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Config JSON (breakpoints and formatting policies).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write lengths as `<n>px` instead of `to_rem(<n>)`.
    #[arg(long)]
    px: bool,

    /// Override the media-query label.
    #[arg(long, value_enum)]
    media_label: Option<MediaLabelChoice>,

    /// Override how properties dropped at a wider tier are emitted.
    #[arg(long, value_enum)]
    removal: Option<RemovalChoice>,

    /// Override how non-pixel line heights are rendered.
    #[arg(long, value_enum)]
    line_height: Option<LineHeightChoice>,
}

#[derive(Parser, Debug)]
struct CssArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Node ids to select, in selection order.
    #[arg(long = "select", num_args = 1.., required = true)]
    select: Vec<String>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Events JSON (array of tagged events).
    #[arg(long)]
    events: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MediaLabelChoice {
    Width,
    Name,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RemovalChoice {
    Ignore,
    Unset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LineHeightChoice {
    PixelsOnly,
    Normal,
    Percent,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Css(args) => cmd_css(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn load_config(args: &CommonArgs) -> anyhow::Result<respondiff::Config> {
    let mut config = match &args.config {
        Some(path) => respondiff::Config::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => respondiff::Config::default(),
    };

    if args.px {
        config.length_mode = respondiff::LengthMode::Px;
    }
    if let Some(label) = args.media_label {
        config.media_label = match label {
            MediaLabelChoice::Width => respondiff::MediaLabel::Width,
            MediaLabelChoice::Name => respondiff::MediaLabel::Name,
        };
    }
    if let Some(removal) = args.removal {
        config.removal = match removal {
            RemovalChoice::Ignore => respondiff::RemovalPolicy::Ignore,
            RemovalChoice::Unset => respondiff::RemovalPolicy::Unset,
        };
    }
    if let Some(lh) = args.line_height {
        config.line_height = match lh {
            LineHeightChoice::PixelsOnly => respondiff::LineHeightPolicy::PixelsOnly,
            LineHeightChoice::Normal => respondiff::LineHeightPolicy::Normal,
            LineHeightChoice::Percent => respondiff::LineHeightPolicy::Percent,
        };
    }
    Ok(config)
}

fn load_scene(path: &Path) -> anyhow::Result<respondiff::Scene> {
    respondiff::Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_css(args: CssArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let scene = load_scene(&args.common.scene)?;

    let selection = args
        .select
        .iter()
        .map(|key| {
            scene
                .find(key)
                .with_context(|| format!("selected node '{key}' is not in the scene"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let out = respondiff::run(
        &scene,
        &selection,
        &config,
        &respondiff::AllowList::Unrestricted,
        respondiff::AllowMode::Filter,
    );
    for notice in &out.notices {
        eprintln!("notice: {notice}");
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(out.css.as_bytes())
        .context("write css to stdout")?;
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayLine<'a> {
    event: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a respondiff::UiMessage>,
    notices: Vec<String>,
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let scene = load_scene(&args.common.scene)?;

    let f = File::open(&args.events)
        .with_context(|| format!("open events '{}'", args.events.display()))?;
    let events: Vec<respondiff::EventDef> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse events JSON")?;

    let mut session = respondiff::Session::new(config);
    let mut stdout = std::io::stdout().lock();
    for (index, def) in events.into_iter().enumerate() {
        let event = def
            .resolve(&scene)
            .with_context(|| format!("resolve event #{index}"))?;
        let respondiff::Transition { session: next, outcome } = session.apply(&scene, event);
        session = next;

        let line = ReplayLine {
            event: index,
            select: outcome
                .select
                .as_ref()
                .map(|ids| ids.iter().filter_map(|&id| scene.key(id)).collect()),
            message: outcome.message.as_ref(),
            notices: outcome.notices.iter().map(ToString::to_string).collect(),
        };
        serde_json::to_writer(&mut stdout, &line).context("write replay line")?;
        writeln!(stdout).context("write replay line")?;
    }
    Ok(())
}
