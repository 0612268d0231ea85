use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use graymatch::io::load_gray_image;
use graymatch::{match_images_with, GrayMatchError, ImageRole, MatchConfig};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/request.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/request.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "GrayMatch CLI (image similarity via template matching)")]
struct Cli {
    /// Path to the template image (the pattern searched for).
    #[arg(value_name = "TEMPLATE")]
    template: Option<PathBuf>,
    /// Path to the scene image (searched within).
    #[arg(value_name = "SCENE")]
    scene: Option<PathBuf>,
    /// Read a JSON request document instead of positional paths.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["template", "scene"])]
    request: Option<PathBuf>,
    /// Write the JSON response to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Use the row-parallel scan.
    #[arg(long)]
    parallel: bool,
    /// Enable tracing output for diagnostics.
    #[arg(long)]
    trace: bool,
    /// Print an example request and exit.
    #[arg(long)]
    print_example: bool,
    /// Print the request schema and exit.
    #[arg(long)]
    print_schema: bool,
}

/// Supported operations, validated at the boundary; an unknown `op` tag is
/// rejected at deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    MatchImages { image1: PathBuf, image2: PathBuf },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Similarity { similarity: f64 },
    Failure { error: ErrorBody },
}

fn failure(code: &'static str, message: String) -> Response {
    Response::Failure {
        error: ErrorBody { code, message },
    }
}

fn error_code(err: &GrayMatchError) -> &'static str {
    match err {
        GrayMatchError::DecodeFailure { .. } => "decode_failure",
        GrayMatchError::SizeMismatch { .. } => "size_mismatch",
        _ => "invalid_input",
    }
}

fn resolve_request(cli: &Cli) -> Result<Request, Response> {
    if let Some(path) = &cli.request {
        let text = fs::read_to_string(path).map_err(|err| {
            failure(
                "bad_request",
                format!("failed to read {}: {err}", path.display()),
            )
        })?;
        return serde_json::from_str(&text)
            .map_err(|err| failure("bad_request", format!("invalid request: {err}")));
    }

    match (&cli.template, &cli.scene) {
        (Some(template), Some(scene)) => Ok(Request::MatchImages {
            image1: template.clone(),
            image2: scene.clone(),
        }),
        _ => Err(failure(
            "bad_request",
            "expected TEMPLATE and SCENE paths, or --request FILE".to_string(),
        )),
    }
}

fn run_match(image1: &Path, image2: &Path, parallel: bool) -> Result<f64, GrayMatchError> {
    let template = load_gray_image(ImageRole::Template, image1)?;
    let scene = load_gray_image(ImageRole::Scene, image2)?;
    match_images_with(template.view(), scene.view(), &MatchConfig { parallel })
}

fn execute(request: Request, parallel: bool) -> Response {
    match request {
        Request::MatchImages { image1, image2 } => match run_match(&image1, &image2, parallel) {
            Ok(similarity) => Response::Similarity { similarity },
            Err(err) => failure(error_code(&err), err.to_string()),
        },
    }
}

fn emit(cli: &Cli, response: &Response) -> ExitCode {
    let json = match serde_json::to_string_pretty(response) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("failed to encode response: {err}");
            return ExitCode::FAILURE;
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(err) = fs::write(path, json) {
                eprintln!("failed to write {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => println!("{json}"),
    }

    match response {
        Response::Similarity { .. } => ExitCode::SUCCESS,
        Response::Failure { .. } => ExitCode::FAILURE,
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("graymatch=info".parse()?))
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        if let Err(err) = init_tracing() {
            eprintln!("failed to initialize tracing: {err}");
            return ExitCode::FAILURE;
        }
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return ExitCode::SUCCESS;
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return ExitCode::SUCCESS;
    }

    let request = match resolve_request(&cli) {
        Ok(request) => request,
        Err(response) => return emit(&cli, &response),
    };
    let response = execute(request, cli.parallel);
    emit(&cli, &response)
}
