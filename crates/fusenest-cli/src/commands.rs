use std::path::{Path, PathBuf};

use fusenest_core::input::PartsFile;
use fusenest_svg::CodecConfig;
use serde::de::DeserializeOwned;

use crate::error::CliError;

#[derive(Debug, Default)]
pub struct Overrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub scale: Option<f64>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn read(path: &Path, what: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::input(format!("could not read {what} {}: {e}", path.display())))
}

/// `.json` files go through serde_json, everything else through serde_yaml.
fn load<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, CliError> {
    let raw = read(path, what)?;
    let parsed = if is_json(path) {
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&raw).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| CliError::input(format!("invalid {what} {}: {e}", path.display())))
}

pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<CodecConfig, CliError> {
    let mut config = match path {
        Some(path) => load::<CodecConfig>(path, "config")?,
        None => CodecConfig::default(),
    };
    if let Some(width) = overrides.width {
        config.sheet.width = width;
    }
    if let Some(height) = overrides.height {
        config.sheet.height = height;
    }
    if let Some(scale) = overrides.scale {
        config.scale_factor = scale;
    }
    config
        .validate()
        .map_err(|e| CliError::input(format!("invalid config: {e}")))?;
    tracing::debug!(?config, "codec config");
    Ok(config)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, text).map_err(|e| {
            CliError::processing(format!("could not write {}: {e}", path.display()))
        }),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

pub struct EncodeArgs {
    pub parts: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub request: bool,
}

pub fn run_encode(args: EncodeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref(), &args.overrides)?;
    let file: PartsFile = load(&args.parts, "parts file")?;
    let parts = file
        .into_parts()
        .map_err(|e| CliError::input(format!("invalid parts file {}: {e}", args.parts.display())))?;
    tracing::debug!(parts = parts.len(), "loaded parts");

    let text = if args.request {
        let request = fusenest_svg::encode_request(&parts, &config)?;
        request
            .to_json()
            .map_err(|e| CliError::processing(format!("could not serialize request: {e}")))?
    } else {
        fusenest_svg::encode(&parts, config.sheet, &config)?
    };
    write_output(args.output.as_deref(), &text)
}

pub struct DecodeArgs {
    pub document: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub scale: Option<f64>,
}

pub fn run_decode(args: DecodeArgs) -> Result<(), CliError> {
    let overrides = Overrides {
        scale: args.scale,
        ..Overrides::default()
    };
    let config = load_config(args.config.as_deref(), &overrides)?;
    let document = read(&args.document, "document")?;
    let placements = fusenest_svg::decode(&document, &config)?;
    let json = serde_json::to_string_pretty(&placements)
        .map_err(|e| CliError::processing(format!("could not serialize placements: {e}")))?;
    write_output(args.output.as_deref(), &json)
}
