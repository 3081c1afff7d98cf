// pdash — render one chart spec from a snapshot (or synthetic data) and
// write it as JSON. Wires exit codes, typed error mapping, source
// selection, and output handling around pd_pipeline.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use args::{parse_and_validate, Args};
use pd_pipeline::{Dashboard, PipelineError};
use pd_store::{JsonFileSource, RecordSource, SyntheticSource};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad input content (snapshot shape, JSON parse).
    Validation(String),
    /// Read/write/path failures.
    Io(String),
    /// Spec serialization failures.
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) | MainError::Render(_) => exitcodes::IO,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    if e.is_validation() {
        MainError::Validation(e.to_string())
    } else {
        MainError::Io(e.to_string())
    }
}

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("pdash: error: {e}");
            return ExitCode::from(exitcodes::IO as u8);
        }
    };

    if !args.quiet {
        // Logs go to stderr; stdout stays clean for the spec JSON.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("pdash: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn run_once(args: &Args) -> Result<(), MainError> {
    // An explicit snapshot is authoritative: a malformed file must fail the
    // run, not fall through to synthetic data.
    let source: Box<dyn RecordSource> = match &args.input {
        Some(input) => Box::new(JsonFileSource::new(input)),
        None => Box::new(SyntheticSource::new(args.seed)),
    };

    let mut dashboard = Dashboard::new(source, args.policy.into());
    let request = args.to_request();

    let spec = dashboard.render(&request).map_err(map_pipeline_err)?;
    let json =
        serde_json::to_string_pretty(&spec).map_err(|e| MainError::Render(e.to_string()))?;

    match &args.out {
        Some(path) => std::fs::write(path, json + "\n")
            .map_err(|e| MainError::Io(format!("{}: {e}", path.display())))?,
        None => println!("{json}"),
    }

    if let Some(path) = &args.export_csv {
        dashboard.export_csv(path, &request).map_err(map_pipeline_err)?;
    }

    Ok(())
}
