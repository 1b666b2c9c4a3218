use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use tracing::{error, info};

use promptsmith::config::{schema_from_env, Overrides};
use promptsmith::{web_server, PromptAssembler, PromptRequest, QuestionSchema, ServerConfig};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service.
    Serve {
        #[arg(long, help = "Host name or address to bind to (overrides HOST).")]
        host: Option<String>,
        #[arg(long, help = "Port to listen on (overrides PORT).")]
        port: Option<u16>,
        #[arg(long, value_enum, help = "Question schema (overrides PROMPT_SCHEMA).")]
        schema: Option<QuestionSchema>,
    },
    /// Run a single request offline and print the JSON response.
    Render {
        #[arg(long, help = "The idea to build a prompt for.")]
        idea: String,
        #[arg(long, default_value = "start", help = "Either 'start' or 'complete'.")]
        mode: String,
        #[arg(long = "answer", value_name = "KEY=VALUE", value_parser = parse_answer, help = "An answer to a clarifying question; repeatable.")]
        answers: Vec<(String, String)>,
        #[arg(long, value_enum, help = "Question schema (overrides PROMPT_SCHEMA).")]
        schema: Option<QuestionSchema>,
    },
    /// Print the clarifying questions as JSON.
    Questions {
        #[arg(long, value_enum, help = "Question schema (overrides PROMPT_SCHEMA).")]
        schema: Option<QuestionSchema>,
    },
}

fn parse_answer(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (HOST, PORT, PROMPT_SCHEMA)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG (e.g. RUST_LOG=info,promptsmith=debug).
    // Logs go to stderr so `render` and `questions` output stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, schema } => {
            // Flags win; an environment value is only checked when its flag is absent.
            let config = ServerConfig::from_env(Overrides { host, port, schema })
                .context("Invalid environment configuration")?;

            info!("Starting PromptSmith on {}...", config.bind_display());
            let shutdown = async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => info!("Ctrl-C received, initiating shutdown..."),
                    Err(e) => {
                        error!("Failed to listen for Ctrl-C: {:?}", e);
                        std::future::pending::<()>().await;
                    }
                }
            };
            web_server::start_web_server(config, shutdown).await?;
            info!("Shutdown complete.");
        }
        Commands::Render {
            idea,
            mode,
            answers,
            schema,
        } => {
            let schema = schema_from_env(schema).context("Invalid environment configuration")?;
            let assembler = PromptAssembler::new(schema)?;
            let answers: Map<String, Value> = answers
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            let request = PromptRequest {
                mode: Some(mode),
                idea: Some(idea),
                answers: Some(answers),
            };
            let response = assembler.handle(&request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Questions { schema } => {
            let schema = schema_from_env(schema).context("Invalid environment configuration")?;
            println!("{}", serde_json::to_string_pretty(schema.questions())?);
        }
    }

    Ok(())
}
