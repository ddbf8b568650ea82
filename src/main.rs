use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

use overlay_studio::config::{ConfigError, StudioConfig, check_merge_offset};
use overlay_studio::editor::EditorCore;
use overlay_studio::geom::{OutputFormat, Size};
use overlay_studio::merge::{OverlayMode, merge_overlays};
use overlay_studio::model::Overlay;
use overlay_studio::services::apply::{ApplyError, apply_template};
use overlay_studio::services::api::ApiError;
use overlay_studio::services::busy::BusyGate;
use overlay_studio::services::http::HttpClient;
use overlay_studio::services::render::export;
use overlay_studio::session::{BaseImage, DesignSession};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid overlay JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

#[derive(Parser, Debug)]
#[command(name = "overlay-studio", about = "Overlay layout, merge and render CLI")]
struct Cli {
    #[arg(long, env = "OVERLAY_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the preview placement of every layer.
    Layout {
        overlay: PathBuf,
        #[arg(long, value_parser = parse_size, default_value = "540x540")]
        preview: Size,
        #[arg(long, value_parser = parse_format, default_value = "square")]
        format: OutputFormat,
    },
    /// Print the layer stack, top-most first.
    Layers { overlay: PathBuf },
    /// Merge a template overlay onto a current one and print the result.
    Merge {
        current: PathBuf,
        template: PathBuf,
        #[arg(long, value_parser = parse_mode, default_value = "merge")]
        mode: OverlayMode,
        #[arg(long)]
        z_offset: Option<i64>,
    },
    /// Apply a remote preset onto an overlay and print the updated session.
    Apply {
        overlay: PathBuf,
        #[arg(long)]
        preset: String,
        #[arg(long)]
        design: Option<String>,
        #[arg(long, help = "Base image URL of the current design")]
        image: Option<String>,
    },
    /// Render an overlay remotely and print the image URL.
    Export {
        overlay: PathBuf,
        #[arg(long, value_parser = parse_format, default_value = "square")]
        format: OutputFormat,
        #[arg(long, help = "Base image URL to render under the overlay")]
        image: Option<String>,
    },
}

fn parse_size(raw: &str) -> Result<Size, String> {
    let Some((w, h)) = raw.split_once(['x', 'X']) else {
        return Err(format!("expected WIDTHxHEIGHT, got `{raw}`"));
    };
    let width: f64 = w.trim().parse().map_err(|_| format!("invalid width `{w}`"))?;
    let height: f64 = h.trim().parse().map_err(|_| format!("invalid height `{h}`"))?;
    Ok(Size::new(width, height))
}

fn parse_format(raw: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(&raw.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown format `{raw}` (square, portrait, story, landscape)"))
}

fn parse_mode(raw: &str) -> Result<OverlayMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "merge" => Ok(OverlayMode::Merge),
        "replace" => Ok(OverlayMode::Replace),
        _ => Err(format!("unknown mode `{raw}` (merge, replace)")),
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = StudioConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }

    match cli.command {
        Command::Layout { overlay, preview, format } => run_layout(&config, &overlay, preview, format),
        Command::Layers { overlay } => {
            let rows: Vec<Value> = read_overlay(&overlay)?.layers().iter().map(layer_json).collect();
            print_json(&rows)
        }
        Command::Merge { current, template, mode, z_offset } => {
            run_merge(&config, &current, &template, mode, z_offset)
        }
        Command::Apply { overlay, preset, design, image } => {
            run_apply(&config, &overlay, &preset, design, image).await
        }
        Command::Export { overlay, format, image } => run_export(&config, &overlay, format, image).await,
    }
}

fn read_overlay(path: &Path) -> Result<Overlay, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    Ok(Overlay::from_json(&raw)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn layer_json(entry: &overlay_studio::stack::LayerEntry) -> Value {
    json!({
        "kind": entry.key.kind,
        "id": entry.key.id,
        "label": entry.label,
        "z": entry.z,
        "visible": entry.visible,
        "bakeLayer": entry.bake_layer,
    })
}

fn image_for(url: Option<String>, format: OutputFormat) -> Option<BaseImage> {
    let size = format.design_size();
    url.map(|url| BaseImage { url, width: size.width, height: size.height })
}

fn run_layout(config: &StudioConfig, path: &Path, preview: Size, format: OutputFormat) -> Result<(), CliError> {
    let mut core = EditorCore::new(read_overlay(path)?, format).with_limits(config.limits, config.z_policy);
    core.set_viewport(preview);

    let rows: Vec<Value> = core
        .layers()
        .iter()
        .map(|entry| {
            let bounds = core.bounds(&entry.key).map(|b| json!({ "x": b.x, "y": b.y, "width": b.width, "height": b.height }));
            json!({
                "kind": entry.key.kind,
                "id": entry.key.id,
                "css": core.css(&entry.key),
                "bounds": bounds,
            })
        })
        .collect();
    print_json(&json!({
        "format": format,
        "scale": { "x": core.scale().x(), "y": core.scale().y() },
        "layers": rows,
    }))
}

fn run_merge(
    config: &StudioConfig,
    current: &Path,
    template: &Path,
    mode: OverlayMode,
    z_offset: Option<i64>,
) -> Result<(), CliError> {
    let mut policy = config.z_policy;
    if let Some(offset) = z_offset {
        policy.merge_offset = offset;
        check_merge_offset(&policy, &config.limits)?;
    }
    let outcome = merge_overlays(&read_overlay(current)?, &read_overlay(template)?, mode, &policy);
    for remap in &outcome.remapped {
        eprintln!("remapped {} {} -> {}", remap.kind.label(), remap.from, remap.to);
    }
    for id in &outcome.demoted_dish_slots {
        eprintln!("demoted dish slot {id}");
    }
    print_json(&outcome.overlay)
}

async fn run_apply(
    config: &StudioConfig,
    path: &Path,
    preset: &str,
    design: Option<String>,
    image: Option<String>,
) -> Result<(), CliError> {
    let client = HttpClient::new(&config.api_base_url, config.timeouts)?;
    let format = OutputFormat::default();
    let mut session = DesignSession {
        design_id: design,
        base_image: image_for(image, format),
        overlay: read_overlay(path)?,
        format,
    };
    let report = apply_template(&client, &BusyGate::new(), &mut session, preset, None, &config.z_policy).await?;
    if report.created_design {
        eprintln!("created design {}", session.design_id.as_deref().unwrap_or_default());
    }
    print_json(&session)
}

async fn run_export(
    config: &StudioConfig,
    path: &Path,
    format: OutputFormat,
    image: Option<String>,
) -> Result<(), CliError> {
    let client = HttpClient::new(&config.api_base_url, config.timeouts)?;
    let session = DesignSession { design_id: None, base_image: image_for(image, format), overlay: read_overlay(path)?, format };
    let url = export(&client, &session).await?;
    println!("{url}");
    Ok(())
}
