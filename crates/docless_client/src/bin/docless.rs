//! docless: one-shot DoclessAI query from the command line.
//! Reads config, sends the question (argument or first stdin line) with an
//! optional image, and prints the answer followed by any image/route/element.

use clap::Parser;
use docless_client::config;
use docless_client::{Attachment, DoclessClient};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "docless", version, about = "Ask the DoclessAI assistant a question")]
struct Cli {
    /// Config file (defaults to $DOCLESS_CONFIG, then ~/.docless/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// App key; overrides the config file
    #[arg(long)]
    app_key: Option<String>,

    /// API base URL; overrides the config file
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds; overrides the config file
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Image to attach to the question
    #[arg(long)]
    image: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Question to ask; read from stdin when omitted
    question: Option<String>,
}

fn init_tracing(verbose: u8) {
    let mut filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    if verbose > 0 {
        if let Ok(directive) = "docless_client=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_question(cli: &Cli) -> String {
    if let Some(q) = &cli.question {
        return q.trim().to_string();
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).unwrap_or(0);
    line.trim().to_string()
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut file = config::load_resolved(cli.config.as_deref())
        .unwrap_or_else(|e| fail(format_args!("failed to load config: {}", e)));
    if let Some(key) = &cli.app_key {
        file.app_key = Some(key.clone());
    }
    if let Some(url) = &cli.base_url {
        file.base_url = Some(url.clone());
    }
    if let Some(ms) = cli.timeout_ms {
        file.timeout_ms = Some(ms);
    }
    let cfg = file
        .into_config()
        .unwrap_or_else(|e| fail(format_args!("invalid configuration: {} (set --app-key or app_key)", e)));

    let question = read_question(&cli);
    if question.is_empty() {
        fail("no question provided");
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| fail(format_args!("failed to create runtime: {}", e)));

    rt.block_on(async {
        let attachment = match &cli.image {
            Some(path) => Some(Attachment::from_path(path).await.unwrap_or_else(|e| {
                fail(format_args!("failed to read {}: {}", path.display(), e))
            })),
            None => None,
        };

        let client = DoclessClient::new(cfg).unwrap_or_else(|e| fail(e));
        tracing::debug!(
            timeout_ms = client.config().timeout().as_millis() as u64,
            "client ready"
        );

        let reply = match client.ask(&question, attachment.as_ref()).await {
            Ok(r) => r,
            Err(e) => fail(e),
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "{}", reply.res);
        if let Some(image) = &reply.image {
            let _ = writeln!(out, "\nImage: {}", image);
        }
        if let Some(route) = &reply.route {
            let _ = writeln!(out, "Route: {}", route);
        }
        if let Some(element) = &reply.element_id {
            let _ = writeln!(out, "Element: {}", element);
        }
        let _ = out.flush();
    });
}
