use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use price_machine::config::Config;
use price_machine::config::Settings;
use price_machine::console::QueryConsole;
use price_machine::report::html::HtmlReport;
use price_machine::report::xlsx::XlsxReport;
use price_machine::report::ReportSink;
use price_machine::Catalog;
use price_machine::Ingestor;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Consolidate supplier price lists and search them by product name.
#[derive(Parser, Debug)]
#[command(name = "price-machine", version, about)]
struct Args {
    /// Directory scanned recursively for price lists
    #[arg(short, long, env = "PRICE_MACHINE_DIR")]
    dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "PRICE_MACHINE_CONFIG")]
    config: Option<PathBuf>,

    /// File receiving the full catalog as HTML
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Search text answered before the interactive loop; may be repeated
    #[arg(short, long)]
    query: Vec<String>,

    /// Skip the interactive loop
    #[arg(long)]
    no_interactive: bool,

    /// Log every rejected row
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => Config::load(path).context("Failed to load configuration")?,
        None => Config::default(),
    };
    let mut settings = config.into_settings().context("Invalid configuration")?;
    if let Some(dir) = &args.dir {
        settings.directory = dir.to_owned();
    }
    if let Some(output) = &args.output {
        settings.output.html = output.to_owned();
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let settings = load_settings(&args)?;

    let mut catalog = Catalog::new();
    let mut ingestor = Ingestor::new(settings.criteria.clone()).context("Invalid ingestion settings")?;
    match ingestor.load(&settings.directory, &mut catalog) {
        Ok(summary) => println!("{}", summary.message()),
        // The run continues with an empty catalog
        Err(error) => {
            error!("{}", error);
            println!("{}", error);
        }
    }

    let all = catalog.all();
    let outcome = HtmlReport::catalog(&settings.output.html)
        .render(&all, None)
        .context("Failed to export catalog")?;
    println!("{}", outcome);
    info!(records = catalog.len(), "Catalog exported");

    let stdout = io::stdout();
    let mut console = QueryConsole::new(&catalog, &settings.exit_keyword, stdout.lock())
        .with_exporter(Box::new(HtmlReport::search(&settings.output.search_html_dir)))
        .with_exporter(Box::new(XlsxReport::search(&settings.output.search_xlsx_dir)));
    for query in &args.query {
        console.answer(query.trim())?;
    }
    if !args.no_interactive {
        console.run(io::stdin().lock())?;
    }
    Ok(())
}
