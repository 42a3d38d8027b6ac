use clap::{Parser, Subcommand};
use symptom_core::{ConditionId, CoreConfig, SymptomChecker};
use symptom_types::IntakeText;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "symptom")]
#[command(about = "Rule-based symptom checker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a symptom description and print the full response
    Check {
        /// Free-text symptom description
        text: String,
    },
    /// List emergency phrases found in a symptom description
    Emergencies {
        /// Free-text symptom description
        text: String,
    },
    /// Show ranked condition matches for a symptom description
    Matches {
        /// Free-text symptom description
        text: String,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all known conditions
    Conditions,
    /// Show the self-care report for one condition
    Show {
        /// Condition id (e.g. common_cold, migraine)
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let checker = SymptomChecker::with_standard_catalog(CoreConfig::default());

    match cli.command {
        Some(Commands::Check { text }) => match IntakeText::new(&text) {
            Ok(text) => match checker.process_query(text.as_str()) {
                Ok(response) => println!("{}", response),
                Err(e) => eprintln!("Error checking symptoms: {}", e),
            },
            Err(e) => {
                tracing::debug!("rejected symptom description: {:?}", e);
                eprintln!("Invalid symptom description: {}", e)
            }
        },
        Some(Commands::Emergencies { text }) => {
            let found = checker.emergencies(&text);
            if found.is_empty() {
                println!("No emergency phrases found.");
            } else {
                for phrase in found {
                    println!("{}", phrase);
                }
            }
        }
        Some(Commands::Matches { text, json }) => match checker.matches(&text) {
            Ok(matches) if json => println!("{}", serde_json::to_string_pretty(&matches)?),
            Ok(matches) if matches.is_empty() => println!("No confident match."),
            Ok(matches) => {
                for (i, candidate) in matches.iter().enumerate() {
                    println!(
                        "{}. {} ({}), score {}, matched: {}",
                        i + 1,
                        candidate.display_name,
                        candidate.condition_id,
                        candidate.score,
                        candidate.matched_keywords.join(", ")
                    );
                }
            }
            Err(e) => eprintln!("Error matching conditions: {}", e),
        },
        Some(Commands::Conditions) => {
            for record in checker.catalog().iter() {
                println!("{}: {}", record.id, record.display_name);
            }
        }
        Some(Commands::Show { id }) => match id.parse::<ConditionId>() {
            Ok(id) => match checker.condition_report(id) {
                Ok(report) => println!("{}", report),
                Err(e) => eprintln!("Error rendering report: {}", e),
            },
            Err(e) => {
                tracing::debug!("unparsable condition id '{}'", id);
                eprintln!("Error: {}", e)
            }
        },
        None => {
            println!("Use 'symptom --help' for commands");
        }
    }

    Ok(())
}
