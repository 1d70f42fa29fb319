//! Matrix service CLI
//!
//! # Commands
//!
//! ```bash
//! matrix-service serve                      # Start HTTP server (port 8080)
//! matrix-service run invert matrix.csv      # Run one operation on a local file
//! matrix-service operations                 # List operations and routes
//! ```
//!
//! Once the server is up:
//!
//! ```bash
//! curl -F 'file=@matrix.csv' localhost:8080/echo
//! ```

use clap::{Parser, Subcommand};
use matrix_service::{
    api::logs::log_error,
    operations_description, run_file,
    server::{start_server, ServerConfig},
    Operation, PipelineOptions,
};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "matrix-service")]
#[command(about = "Echo, invert, flatten, sum or multiply a square integer matrix", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "MATRIX_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "MATRIX_PORT", default_value = "8080")]
        port: u16,
    },

    /// Run one operation on a CSV file
    Run {
        /// echo, invert, flatten, sum, multiply or report
        operation: Operation,

        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show available operations
    Operations,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(ServerConfig { host, port }).await,

        Commands::Run {
            operation,
            input,
            delimiter,
            output,
        } => cmd_run(operation, &input, delimiter, output.as_deref()),

        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    start_server(config).await.inspect_err(|e| {
        log_error(format!("Server stopped: {}", e));
    })
}

fn cmd_run(
    operation: Operation,
    input: &Path,
    delimiter: char,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 {}: {}", operation, input.display());

    let options = PipelineOptions { delimiter };
    let result = run_file(input, operation, &options)?;

    write_output(&result, output)?;
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", operations_description());
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
