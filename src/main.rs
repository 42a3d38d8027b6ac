use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symptom_core::config::{EnvValues, from_env_values};
use symptom_core::{Catalog, SymptomChecker};
use symptom_types::{DEFAULT_MAX_INPUT_CHARS, IntakeText};

/// Interactive symptom intake session
///
/// Reads one symptom description per line from stdin and prints the response, until EOF or
/// `quit`/`exit`. Input shorter than three characters is rejected and the session continues;
/// longer input is truncated to the configured window before it reaches the core.
///
/// # Environment Variables
/// - `SYMPTOM_FACILITY_NAME`: facility named in reports (default: "Suwa Setha Hospital")
/// - `SYMPTOM_EMERGENCY_LOCATION`: location line of the emergency block
/// - `SYMPTOM_EMERGENCY_PHONE`: phone line of the emergency block
/// - `SYMPTOM_EMERGENCY_SERVICES`: number named in the "call emergency services" bullet (default: "1990 in Sri Lanka")
/// - `SYMPTOM_EXCERPT_CHARS`: characters of the top report embedded in differentials (default: 500)
/// - `SYMPTOM_MAX_INPUT_CHARS`: input truncation window (default: 500)
/// - `SYMPTOM_SESSION_EXPORT`: if set, the session log is written there as JSON on exit
///
/// # Returns
/// * `Ok(())` - If the session ends normally
/// * `Err(anyhow::Error)` - If configuration is invalid, stdin/stdout fail, or the export fails
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cfg = from_env_values(EnvValues {
        facility_name: std::env::var("SYMPTOM_FACILITY_NAME").ok(),
        emergency_location: std::env::var("SYMPTOM_EMERGENCY_LOCATION").ok(),
        emergency_phone: std::env::var("SYMPTOM_EMERGENCY_PHONE").ok(),
        emergency_services: std::env::var("SYMPTOM_EMERGENCY_SERVICES").ok(),
        excerpt_chars: std::env::var("SYMPTOM_EXCERPT_CHARS").ok(),
    })?;
    let max_input_chars = match std::env::var("SYMPTOM_MAX_INPUT_CHARS") {
        Ok(value) => value.trim().parse::<usize>().map_err(|_| {
            anyhow::anyhow!("SYMPTOM_MAX_INPUT_CHARS is not a number: '{}'", value)
        })?,
        Err(_) => DEFAULT_MAX_INPUT_CHARS,
    };
    let export_path = std::env::var("SYMPTOM_SESSION_EXPORT")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    tracing::info!("++ Starting symptom intake session for {}", cfg.facility_name());

    let checker = SymptomChecker::new(cfg, Arc::new(Catalog::standard()));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Describe your symptoms (type 'quit' to exit).")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        let text = match IntakeText::with_max_chars(trimmed, max_input_chars) {
            Ok(text) => text,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };
        if text.was_truncated() {
            tracing::info!("input truncated to {} characters", max_input_chars);
        }

        let response = checker.process_query(text.as_str())?;
        writeln!(stdout, "\n{}\n", response)?;
    }

    if let Some(path) = export_path {
        checker.session().export_json(&path)?;
    }

    tracing::info!("-- Session ended after {} logged queries", checker.session().len());
    Ok(())
}
