//! `patfmt` CLI — render a format template against a pattern built from
//! `key=value[,value...]` assignments given on the command line.

use clap::Parser;
use patfmt::{format, Pattern, Value};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Render a pattern-format template against key=value assignments.
///
/// Each positional assignment after the template binds one key to one
/// or more comma-separated values, e.g. `size=10.0,12.0`. A value is
/// parsed as an integer or floating-point number when it looks like
/// one, as a boolean when it is exactly `true`/`false`, and as a string
/// otherwise.
#[derive(Parser, Debug)]
#[command(name = "patfmt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a pattern-format template", long_about = None)]
struct Cli {
    /// The format template to render.
    template: String,

    /// `key=value[,value...]` pattern assignments.
    #[arg(value_name = "KEY=VALUE[,VALUE...]")]
    assignments: Vec<String>,

    /// Enable debug-level tracing to stderr.
    #[arg(short, long, global = true, env = "PATFMT_VERBOSE")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pattern = match build_pattern(&cli.assignments) {
        Ok(pattern) => pattern,
        Err(bad) => {
            error!(assignment = %bad, "malformed assignment, expected KEY=VALUE[,VALUE...]");
            std::process::exit(2);
        }
    };

    debug!(template = %cli.template, keys = pattern.len(), "rendering template");

    match format(&pattern, &cli.template) {
        Ok(rendered) => print!("{rendered}"),
        Err(_) => {
            // format() has already reported the single diagnostic line to stderr.
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Parse `key=value[,value...]` assignments into a [`Pattern`].
///
/// Returns the first assignment that isn't of that shape, for the
/// caller to report.
fn build_pattern(assignments: &[String]) -> Result<Pattern, String> {
    let mut pattern = Pattern::new();
    for assignment in assignments {
        let (key, values) = assignment
            .split_once('=')
            .ok_or_else(|| assignment.clone())?;
        if key.is_empty() {
            return Err(assignment.clone());
        }
        for raw in values.split(',') {
            pattern.add(key, parse_value(raw));
        }
    }
    Ok(pattern)
}

/// Infer a [`Value`] variant from a raw CLI string: integer, then
/// float, then boolean, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Double(f);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
