//! # Expression Evaluation CLI
//!
//! Evaluates one expression and prints the result as JSON.
//!
//! ```text
//! dmn-eval <language> <expression> [name=value ...]
//! ```
//!
//! Values are parsed as JSON and fall back to plain strings. An expression
//! without text prints `null`.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG` - Log level (default: info)
//! - `DMN_EVAL_*` - see `dmn_eval::config`

use anyhow::{bail, Context as _, Result};
use dmn_eval::{EngineConfiguration, Expression, VariableContext};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn parse_variable(arg: &str) -> Result<(String, Value)> {
    let (name, raw) = arg
        .split_once('=')
        .with_context(|| format!("variable '{}' must look like name=value", arg))?;

    if name.trim().is_empty() {
        bail!("variable '{}' has an empty name", arg);
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.trim().to_string(), value))
}

fn run(args: &[String]) -> Result<Option<Value>> {
    let [language, text, variables @ ..] = args else {
        bail!("usage: dmn-eval <language> <expression> [name=value ...]");
    };

    let context = variables
        .iter()
        .map(|arg| parse_variable(arg))
        .collect::<Result<VariableContext>>()?;

    let configuration = EngineConfiguration::from_env();
    debug!("Configuration: {:?}", configuration);

    let handler = configuration.build_handler();
    let expression = Expression::new(text.as_str());

    handler
        .evaluate_expression(language, &expression, &context)
        .with_context(|| format!("evaluating '{}' as {}", text, language))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("dmn-eval v{}", dmn_eval::VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = run(&args)?;

    println!("{}", serde_json::to_string(&result.unwrap_or(Value::Null))?);
    Ok(())
}
