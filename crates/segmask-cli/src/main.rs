//! segmask: CLI tool for working with segmentation mask payloads.
//!
//! Exercises the codec on files without a running service. Useful for:
//!
//! - Inspecting what a service payload decodes to (`render`)
//! - Producing upload form fields from an annotated image (`encode`)
//! - Reproducing tap-selection behavior at a given view size (`hit`)
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin segmask -- <COMMAND> [OPTIONS]
//! ```
//!
//! Diagnostics go to stderr; machine-readable output goes to stdout.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use image::Rgba;

use segmask_codec::hittest::detect_mask_tap;
use segmask_codec::types::{Dimensions, ViewPoint};
use segmask_wire::MaskUpload;

/// Decode, encode and hit-test segmentation mask payloads.
#[derive(Parser)]
#[command(name = "segmask", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode one mask payload and write its overlay bitmap as PNG.
    Render {
        /// Path to the payload JSON (any supported wire shape).
        payload_path: PathBuf,

        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build mask-upload form fields from an annotated image.
    Encode {
        /// Path to the annotated image (PNG, JPEG).
        image_path: PathBuf,

        /// Identity of the image the selection was drawn over.
        #[arg(long)]
        image_id: i64,

        /// Identity of the owning project.
        #[arg(long)]
        project_id: i64,

        /// Selection color as `r,g,b,a` (default: the overlay color).
        #[arg(long, value_parser = parse_color, default_value = "0,0,255,128")]
        color: Rgba<u8>,
    },

    /// Decode a payload array and report which mask a tap selects.
    Hit {
        /// Path to the payload-array JSON.
        payload_path: PathBuf,

        /// Tap position in view coordinates.
        #[arg(long)]
        x: f64,

        /// Tap position in view coordinates.
        #[arg(long)]
        y: f64,

        /// Width of the view the image was displayed at.
        #[arg(long)]
        view_width: u32,

        /// Height of the view the image was displayed at.
        #[arg(long)]
        view_height: u32,
    },
}

/// Parse an `r,g,b,a` color argument.
fn parse_color(text: &str) -> Result<Rgba<u8>, String> {
    let channels: Vec<&str> = text.split(',').collect();
    let [r, g, b, a] = channels[..] else {
        return Err(format!("expected r,g,b,a, got {text:?}"));
    };
    let parse = |token: &str| {
        token
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("invalid channel {token:?}: {e}"))
    };
    Ok(Rgba([parse(r)?, parse(g)?, parse(b)?, parse(a)?]))
}

fn run_render(payload_path: &Path, output: &Path) -> ExitCode {
    let json = match std::fs::read_to_string(payload_path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error reading {}: {e}", payload_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mask = match segmask_wire::parse_mask(&json) {
        Ok(mask) => mask,
        Err(e) => {
            eprintln!("Error decoding payload: {e}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Mask {} ({}x{}, {} foreground px)",
        mask.id,
        mask.size.width,
        mask.size.height,
        mask.bitmap().foreground_count(),
    );

    match mask.bitmap().as_image().save(output) {
        Ok(()) => {
            eprintln!("PNG written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {e}", output.display());
            ExitCode::FAILURE
        }
    }
}

fn run_encode(image_path: &Path, image_id: i64, project_id: i64, color: Rgba<u8>) -> ExitCode {
    let image = match image::open(image_path) {
        Ok(image) => image.into_rgba8(),
        Err(e) => {
            eprintln!("Error reading {}: {e}", image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let upload = match MaskUpload::from_selection(image_id, project_id, &image, color) {
        Ok(upload) => upload,
        Err(e) => {
            eprintln!("Error encoding selection: {e}");
            return ExitCode::FAILURE;
        }
    };

    let fields: Vec<serde_json::Value> = upload
        .form_fields()
        .into_iter()
        .map(|(name, body)| serde_json::json!({"name": name, "body": body}))
        .collect();
    match serde_json::to_string_pretty(&fields) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing form fields: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_hit(payload_path: &Path, tap: ViewPoint, view: Dimensions) -> ExitCode {
    let json = match std::fs::read_to_string(payload_path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error reading {}: {e}", payload_path.display());
            return ExitCode::FAILURE;
        }
    };

    let masks = match segmask_wire::parse_mask_list(&json) {
        Ok(masks) => masks,
        Err(e) => {
            eprintln!("Error decoding payload array: {e}");
            return ExitCode::FAILURE;
        }
    };
    eprintln!(
        "{} mask(s) decoded; tap ({}, {}) in a {}x{} view",
        masks.len(),
        tap.x,
        tap.y,
        view.width,
        view.height,
    );

    match detect_mask_tap(tap, &masks, view) {
        Some(mask) => println!("{}", serde_json::json!({"hit": mask.id})),
        None => println!("{}", serde_json::json!({"hit": null})),
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Render {
            payload_path,
            output,
        } => run_render(&payload_path, &output),
        Command::Encode {
            image_path,
            image_id,
            project_id,
            color,
        } => run_encode(&image_path, image_id, project_id, color),
        Command::Hit {
            payload_path,
            x,
            y,
            view_width,
            view_height,
        } => run_hit(
            &payload_path,
            ViewPoint::new(x, y),
            Dimensions::new(view_width, view_height),
        ),
    }
}
