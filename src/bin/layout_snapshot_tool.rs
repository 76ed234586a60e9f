use radial_chart::api::{
    ChartEngine, DoughnutConfig, DoughnutDatum, GaugeInputs, PulseForecastConfig,
};
use radial_chart::core::Viewport;
use radial_chart::render::NullRenderer;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const USAGE: &str =
    "usage: layout_snapshot_tool <gauge|doughnut> --input <path> --output <path> [--log <filter>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Gauge,
    Doughnut,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    input: PathBuf,
    output: PathBuf,
    log_filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GaugeRequest {
    viewport: Viewport,
    inputs: GaugeInputs,
    #[serde(default)]
    config: PulseForecastConfig,
}

#[derive(Debug, Deserialize)]
struct DoughnutRequest {
    viewport: Viewport,
    data: Vec<DoughnutDatum>,
    #[serde(default)]
    config: DoughnutConfig,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    match args.log_filter.as_deref() {
        Some(directives) => {
            let _ = radial_chart::telemetry::init_tracing_with_filter(directives)
                .map_err(|err| err.to_string())?;
        }
        None => {
            let _ = radial_chart::telemetry::init_default_tracing();
        }
    }
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let engine = ChartEngine::new(NullRenderer::default());

    let payload = match args.command {
        CommandKind::Gauge => {
            let request: GaugeRequest =
                serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
            engine
                .build_pulse_forecast(request.viewport, request.inputs, &request.config)
                .and_then(|layout| layout.snapshot_json_pretty())
                .map_err(|err| err.to_string())?
        }
        CommandKind::Doughnut => {
            let request: DoughnutRequest =
                serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
            engine
                .build_doughnut(request.viewport, &request.data, &request.config)
                .and_then(|layout| layout.snapshot_json_pretty())
                .map_err(|err| err.to_string())?
        }
    };

    fs::write(&args.output, payload)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("gauge") => CommandKind::Gauge,
        Some("doughnut") => CommandKind::Doughnut,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut log_filter = None::<String>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--log" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --log".to_owned())?;
                log_filter = Some(value);
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| "missing --input".to_owned())?;
    let output = output.ok_or_else(|| "missing --output".to_owned())?;
    Ok(CliArgs {
        command,
        input,
        output,
        log_filter,
    })
}
