//! docless-chat: interactive terminal host for the DoclessAI chat widget.
//! Mounts the widget on the terminal and drives it from stdin, one line per
//! action. Plain lines are sent as messages; commands start with `/`.

use clap::Parser;
use docless_client::{config, Attachment};
use docless_widget::{mount, ChatWidget, Container, Host, Toast, ToastKind};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

const HELP: &str = "commands: /open /close /attach <path> /detach /go <n> /zoom <n> /unzoom /quit";

#[derive(Debug, Parser)]
#[command(name = "docless-chat", version, about = "Chat with the DoclessAI assistant")]
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

    /// Assistant name shown in the header
    #[arg(long)]
    name: Option<String>,

    /// Print the widget view as one JSON object per line
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Writes toasts to stderr and navigation requests to stdout.
struct TerminalHost;

impl Host for TerminalHost {
    fn notify(&mut self, toast: Toast) {
        let tag = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        };
        eprintln!("[{}] {}", tag, toast.text);
    }

    fn navigate(&mut self, route: &str) {
        println!("navigate: {}", route);
    }
}

/// The terminal itself; holds at most one widget root.
#[derive(Default)]
struct Screen {
    root: Option<String>,
}

impl Container for Screen {
    fn attach_root(&mut self, id: &str) {
        self.root = Some(id.to_string());
    }

    fn detach_root(&mut self, id: &str) {
        if self.root.as_deref() == Some(id) {
            self.root = None;
        }
    }
}

fn init_tracing(verbose: u8) {
    let mut filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    if verbose > 0 {
        for target in ["docless_client=debug", "docless_widget=debug"] {
            if let Ok(directive) = target.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Prints what changed since the last call: everything in JSON mode, new
/// messages otherwise.
struct Printer {
    json: bool,
    shown: usize,
}

impl Printer {
    fn print<A, H>(&mut self, widget: &ChatWidget<A, H>, full: bool)
    where
        A: docless_client::Assistant,
        H: Host,
    {
        let view = widget.view();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if self.json {
            if let Ok(line) = serde_json::to_string(&view) {
                let _ = writeln!(out, "{}", line);
            }
        } else if full {
            let _ = write!(out, "{}", view);
        } else if let Some(panel) = view.panel() {
            for msg in panel.messages.iter().skip(self.shown) {
                let _ = write!(out, "{}", msg);
            }
        }
        let _ = out.flush();
        self.shown = widget.messages().len();
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.trim().parse().ok()
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

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| fail(format_args!("failed to create runtime: {}", e)));

    let mut handle = mount(Screen::default(), cfg, TerminalHost).unwrap_or_else(|e| fail(e));
    if let Some(name) = &cli.name {
        handle.widget_mut().set_name(name.clone());
    }

    let mut printer = Printer {
        json: cli.json,
        shown: 0,
    };
    handle.widget_mut().open();
    printer.print(handle.widget(), true);
    if !cli.json {
        eprintln!("{}", HELP);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let widget = handle.widget_mut();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
        let mut full = false;
        match cmd {
            "/quit" => break,
            "/open" => {
                widget.open();
                full = true;
            }
            "/close" => {
                widget.close();
                full = true;
            }
            "/attach" => match rt.block_on(Attachment::from_path(Path::new(arg.trim()))) {
                Ok(attachment) => widget.attach(attachment),
                Err(e) => widget
                    .host_mut()
                    .notify(Toast::error(format!("failed to read {}: {}", arg.trim(), e))),
            },
            "/detach" => widget.clear_attachment(),
            "/go" => {
                if !parse_index(arg).is_some_and(|i| widget.follow_route(i)) {
                    eprintln!("no route on message {}", arg.trim());
                }
            }
            "/zoom" => {
                full = parse_index(arg).is_some_and(|i| widget.zoom_image(i));
                if !full {
                    eprintln!("no image on message {}", arg.trim());
                }
            }
            "/unzoom" => {
                widget.dismiss_zoom();
                full = true;
            }
            _ if cmd.starts_with('/') => eprintln!("{}", HELP),
            _ => {
                widget.set_input(line);
                if !rt.block_on(widget.send_message()) && !widget.is_open() {
                    eprintln!("chat is closed (/open to continue)");
                }
            }
        }
        printer.print(handle.widget(), full);
    }

    let screen = handle.unmount();
    tracing::debug!(mounted = screen.root.is_some(), "screen released");
}
