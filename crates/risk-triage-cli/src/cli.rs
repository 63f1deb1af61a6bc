use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "predict-risk")]
#[command(
    version,
    about = "Classify one text from stdin into a risk severity and a bank action",
    long_about = "Reads stdin once, either a JSON object with a `text` field or raw text, \
                  and writes a single JSON result to stdout. The vectorizer and both \
                  classifiers are loaded from the executable's directory."
)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log events as JSON
    #[arg(long, env = "RISK_TRIAGE_LOG_JSON")]
    pub log_json: bool,
}

/// Initialize tracing on stderr
///
/// Stdout carries the result, so logs never go there. Without `--verbose`
/// or `RUST_LOG` nothing is logged.
pub fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if cli.verbose {
        EnvFilter::new("risk_triage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
