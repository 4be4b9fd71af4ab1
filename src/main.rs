//! Frontend Overlay Interceptor CLI
//!
//! Entry point for the `feo-intercept` command-line tool.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use feo_interceptor::{process_request, Endpoint, InterceptorConfig};
use feo_overlay::OverlayDocument;

#[derive(Parser)]
#[command(name = "feo-intercept")]
#[command(about = "Per-tenant overlay interceptor for console static assets", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the tenant overlay to a remote payload
    Intercept {
        /// Request URL used to classify the endpoint
        #[arg(long)]
        url: String,

        /// Path to the tenant overlay document (overrides config)
        #[arg(long)]
        crd: Option<PathBuf>,

        /// Path to the interceptor config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Remote payload file; stdin when omitted
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
    },

    /// Explain how a URL classifies, without merging
    Explain {
        url: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Verify that an overlay document loads and report its contents
    Verify {
        /// Path to the tenant overlay document
        #[arg(long)]
        crd: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Intercept {
            url,
            crd,
            config,
            input,
        } => run_intercept(&url, crd, config.as_deref(), input.as_deref()),
        Commands::Explain { url, json } => run_explain(&url, json),
        Commands::Verify { crd } => run_verify(&crd),
    }
}

fn run_intercept(url: &str, crd: Option<PathBuf>, config: Option<&Path>, input: Option<&Path>) {
    let config = match InterceptorConfig::resolve(config, crd, None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(2);
        }
    };

    let remote_body = match read_input(input) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Error reading remote payload: {}", e);
            process::exit(2);
        }
    };

    if !config.enabled {
        print!("{}", remote_body);
        return;
    }

    let merged = process_request(url, &remote_body, &config.crd_path.to_string_lossy());
    print!("{}", merged);
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn run_explain(url: &str, json: bool) {
    let endpoint = Endpoint::classify(url);
    if json {
        let value = serde_json::json!({
            "url": url,
            "endpoint": endpoint.map(|e| e.name()),
            "intercepted": endpoint.is_some(),
        });
        match serde_json::to_string_pretty(&value) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(2);
            }
        }
    } else {
        match endpoint {
            Some(endpoint) => println!("{} -> {}", url, endpoint.name()),
            None => println!("{} -> no interception (passthrough)", url),
        }
    }
}

fn run_verify(crd: &Path) {
    let doc = match OverlayDocument::load(crd) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error loading overlay document: {}", e);
            process::exit(1);
        }
    };

    match doc.frontend() {
        Some(frontend) => {
            let spec = &frontend.spec;
            println!("tenant: {}", frontend.metadata.name);
            println!("enabled: {}", doc.feature_enabled());
            println!("bundle segments: {}", spec.bundle_segments.len());
            println!("navigation segments: {}", spec.navigation_segments.len());
            println!("search entries: {}", spec.search_entries.len());
            println!("service tiles: {}", spec.service_tiles.len());
            println!("widget entries: {}", spec.widget_registry.len());
            println!(
                "module: {}",
                if spec.module.is_some() {
                    "declared"
                } else {
                    "none"
                }
            );
        }
        None => {
            eprintln!("Overlay document contains no objects.");
            process::exit(1);
        }
    }
}
