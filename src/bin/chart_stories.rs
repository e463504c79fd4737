use std::fs;
use std::path::{Path, PathBuf};

use story_charts::api::ChartProps;
use story_charts::core::Point;
use story_charts::render::{RenderFrame, Renderer, SvgRenderer};
use story_charts::stories::{StoryCatalog, default_catalog};
use story_charts::telemetry::init_default_tracing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(format!("unsupported format `{other}` (expected svg or png)")),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Debug)]
struct RenderArgs {
    story_id: String,
    width: Option<f64>,
    height: Option<f64>,
    pointer: Option<Point>,
    props_path: Option<PathBuf>,
    format: OutputFormat,
    output: PathBuf,
}

#[derive(Debug)]
enum Command {
    List,
    Render(RenderArgs),
    RenderAll {
        output_dir: PathBuf,
        format: OutputFormat,
    },
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let command = parse_args()?;
    let catalog = default_catalog().map_err(|err| format!("failed to build catalog: {err}"))?;

    match command {
        Command::List => {
            list(&catalog);
            Ok(())
        }
        Command::Render(args) => render_one(&catalog, &args),
        Command::RenderAll { output_dir, format } => render_all(&catalog, &output_dir, format),
    }
}

fn list(catalog: &StoryCatalog) {
    for (root, stories) in catalog.groups() {
        println!("{root}");
        for story in stories {
            println!("  {}  ({} / {})", story.id(), story.title(), story.name());
        }
    }
}

fn render_one(catalog: &StoryCatalog, args: &RenderArgs) -> Result<(), String> {
    let story = catalog.get(&args.story_id).map_err(|err| err.to_string())?;

    let mut props = match &args.props_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read props `{}`: {err}", path.display()))?;
            ChartProps::from_json(&raw).map_err(|err| err.to_string())?
        }
        None => story.size().props(),
    };
    if let Some(width) = args.width {
        props.width = width;
    }
    if let Some(height) = args.height {
        props.height = height;
    }

    let frame = catalog
        .render(story.id(), Some(props), args.pointer)
        .map_err(|err| format!("story `{}` render failed: {err}", story.id()))?;
    match frame {
        Some(frame) => {
            write_frame(&frame, args.format, &args.output)?;
            println!("rendered {} -> {}", story.id(), args.output.display());
        }
        None => println!("story {} rendered nothing at width {}", story.id(), props.width),
    }
    Ok(())
}

fn render_all(catalog: &StoryCatalog, output_dir: &Path, format: OutputFormat) -> Result<(), String> {
    fs::create_dir_all(output_dir)
        .map_err(|err| format!("failed to create output dir `{}`: {err}", output_dir.display()))?;

    let mut rendered = 0usize;
    for story in catalog.sorted() {
        let Some(frame) = story
            .render_default()
            .map_err(|err| format!("story `{}` render failed: {err}", story.id()))?
        else {
            continue;
        };
        let output = output_dir.join(format!("{}.{}", story.id(), format.extension()));
        write_frame(&frame, format, &output)?;
        println!("rendered {} -> {}", story.id(), output.display());
        rendered += 1;
    }
    println!("done: rendered {rendered} story file(s)");
    Ok(())
}

fn write_frame(frame: &RenderFrame, format: OutputFormat, output: &Path) -> Result<(), String> {
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create output dir `{}`: {err}", parent.display()))?;
    }
    match format {
        OutputFormat::Svg => {
            let mut renderer = SvgRenderer::new();
            renderer.render(frame).map_err(|err| err.to_string())?;
            renderer.write_to(output).map_err(|err| err.to_string())
        }
        OutputFormat::Png => write_png(frame, output),
    }
}

#[cfg(feature = "cairo-backend")]
fn write_png(frame: &RenderFrame, output: &Path) -> Result<(), String> {
    use story_charts::render::CairoRenderer;

    let width = i32::try_from(frame.viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(frame.viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    renderer.render(frame).map_err(|err| err.to_string())?;
    renderer.write_png(output).map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_frame: &RenderFrame, _output: &Path) -> Result<(), String> {
    Err("png output requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<Command, String> {
    let mut args = std::env::args().skip(1);
    let Some(subcommand) = args.next() else {
        return Err(usage_message());
    };

    match subcommand.as_str() {
        "list" => Ok(Command::List),
        "render" => {
            let story_id = args
                .next()
                .ok_or_else(|| format!("missing story id\n\n{}", usage_message()))?;
            let mut parsed = RenderArgs {
                story_id,
                width: None,
                height: None,
                pointer: None,
                props_path: None,
                format: OutputFormat::Svg,
                output: PathBuf::new(),
            };
            let mut output = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--width" => parsed.width = Some(parse_number(&mut args, "--width")?),
                    "--height" => parsed.height = Some(parse_number(&mut args, "--height")?),
                    "--pointer" => {
                        let value = args
                            .next()
                            .ok_or_else(|| "missing value for --pointer".to_owned())?;
                        parsed.pointer = Some(parse_pointer(&value)?);
                    }
                    "--props" => {
                        let value = args
                            .next()
                            .ok_or_else(|| "missing value for --props".to_owned())?;
                        parsed.props_path = Some(PathBuf::from(value));
                    }
                    "--format" => {
                        let value = args
                            .next()
                            .ok_or_else(|| "missing value for --format".to_owned())?;
                        parsed.format = OutputFormat::parse(&value)?;
                    }
                    "--output" => {
                        let value = args
                            .next()
                            .ok_or_else(|| "missing value for --output".to_owned())?;
                        output = Some(PathBuf::from(value));
                    }
                    _ => return Err(format!("unknown argument `{arg}`\n\n{}", usage_message())),
                }
            }
            parsed.output = output.ok_or_else(|| "missing --output".to_owned())?;
            Ok(Command::Render(parsed))
        }
        "render-all" => {
            let mut output_dir = None;
            let mut format = OutputFormat::Svg;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--output-dir" => {
                        let value = args
                            .next()
                            .ok_or_else(|| "missing value for --output-dir".to_owned())?;
                        output_dir = Some(PathBuf::from(value));
                    }
                    "--format" => {
                        let value = args
                            .next()
                            .ok_or_else(|| "missing value for --format".to_owned())?;
                        format = OutputFormat::parse(&value)?;
                    }
                    _ => return Err(format!("unknown argument `{arg}`\n\n{}", usage_message())),
                }
            }
            let output_dir = output_dir.ok_or_else(|| "missing --output-dir".to_owned())?;
            Ok(Command::RenderAll { output_dir, format })
        }
        "--help" | "-h" => {
            println!("{}", usage_message());
            std::process::exit(0);
        }
        other => Err(format!("unknown command `{other}`\n\n{}", usage_message())),
    }
}

fn parse_number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64, String> {
    let value = args
        .next()
        .ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| format!("invalid number `{value}` for {flag}"))
}

fn parse_pointer(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("pointer `{raw}` must be X,Y"))?;
    let x = x.trim().parse::<f64>();
    let y = y.trim().parse::<f64>();
    match (x, y) {
        (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => Ok(Point::new(x, y)),
        _ => Err(format!("pointer `{raw}` must be two finite numbers")),
    }
}

fn usage_message() -> String {
    "Usage: chart-stories <command> [options]\n\nCommands:\n  list                               List stories grouped by root\n  render <story-id> --output <path>  Render one story\n      --width <px>                   Override container width\n      --height <px>                  Override container height\n      --pointer <x>,<y>              Replay a pointer move before rendering\n      --props <file>                 Load chart props from JSON\n      --format <svg|png>             Output format (default: svg; png needs cairo-backend)\n  render-all --output-dir <dir>      Render every story at its default size\n      --format <svg|png>\n  -h, --help                         Show this message"
        .to_owned()
}
