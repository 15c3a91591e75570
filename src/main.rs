use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod binder;
mod config;
mod dispatch;
mod mcp;
mod registry;
mod server;
mod tools;

use config::ServerConfig;
use mcp::contracts::{TOOL_SAY_HELLO, TOOL_TIME_QUOTE};
use mcp::router::Router;
use registry::{ContentItem, ToolRegistry};

#[derive(Parser)]
#[command(name = "mcp-quotes")]
#[command(
    version,
    about = "Line-delimited JSON-RPC tool server with time-of-day quotes"
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (logs go to stderr)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ServerArgs {
    /// JSON configuration file
    #[arg(long, env = "MCP_QUOTES_CONFIG")]
    config: Option<PathBuf>,
    /// Seed for quote selection
    #[arg(long)]
    seed: Option<u64>,
    /// Exit on an unparsable request line
    #[arg(long)]
    strict_envelopes: bool,
    /// Answer unknown methods with a method-not-found error
    #[arg(long)]
    reject_unknown_methods: bool,
}

impl ServerArgs {
    fn resolve(&self) -> Result<ServerConfig> {
        let mut config =
            ServerConfig::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(seed) = self.seed {
            config.quote_seed = Some(seed);
        }
        config.strict_envelopes |= self.strict_envelopes;
        config.reject_unknown_methods |= self.reject_unknown_methods;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the tool server
    Serve {
        /// Serve over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Print the advertised tool list
    ListTools,
    /// Call a tool once and print its text output
    Call {
        /// Tool name
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long)]
        arguments: Option<String>,
        /// Print the content items as JSON
        #[arg(long)]
        json: bool,
        /// Seed for quote selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Greet someone
    SayHello {
        #[arg(long)]
        name: String,
    },
    /// Print a quote for an hour of the day
    Quote {
        #[arg(long, allow_negative_numbers = true)]
        hour: i64,
        /// Seed for quote selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Serve { stdio, server } => {
            if stdio {
                run_stdio_server(server.resolve()?)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::ListTools => run_list_tools(),
        Commands::Call {
            tool,
            arguments,
            json,
            seed,
        } => {
            let arguments: Value = match arguments {
                Some(raw) => serde_json::from_str(&raw).context("--arguments must be valid JSON")?,
                None => json!({}),
            };
            run_call(&tool, arguments, seed, json)
        }
        Commands::SayHello { name } => run_call(TOOL_SAY_HELLO, json!({ "name": name }), None, false),
        Commands::Quote { hour, seed } => run_call(TOOL_TIME_QUOTE, json!({ "hour": hour }), seed, false),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_registry(quote_seed: Option<u64>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    tools::register_all(&mut registry, quote_seed).context("failed to register tools")?;
    Ok(registry)
}

fn run_list_tools() -> Result<()> {
    let registry = build_registry(None)?;
    let tools = mcp::schema::synthesize(registry.list());
    let output = serde_json::to_string_pretty(&json!({ "tools": tools }))?;
    println!("{output}");
    Ok(())
}

fn run_call(tool: &str, arguments: Value, seed: Option<u64>, json_output: bool) -> Result<()> {
    let registry = build_registry(seed)?;

    let mut params = Map::new();
    params.insert("name".to_string(), json!(tool));
    params.insert("arguments".to_string(), arguments);

    match dispatch::invoke(&registry, Some(&params)) {
        Ok(content) => print_content(&content, json_output),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn print_content(content: &[ContentItem], json_output: bool) -> Result<()> {
    if json_output {
        let output = serde_json::to_string_pretty(content)?;
        println!("{output}");
        return Ok(());
    }

    let text = content.first().map(ContentItem::as_text).unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server(config: ServerConfig) -> Result<()> {
    let registry = build_registry(config.quote_seed)?;
    let router = Router::new(registry, config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    server::run(&router, stdin.lock(), io::BufWriter::new(stdout.lock()))
}
