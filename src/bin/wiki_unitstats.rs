//! Command-line entry point.
//!
//! ```text
//! wiki-unitstats --config urls.json --out unit_csvs
//! wiki-unitstats --html saved/Militia.html --page militia --print
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use wiki_unitstats::config::UrlList;
use wiki_unitstats::encoding::decode_body;
use wiki_unitstats::fetch::HttpFetcher;
use wiki_unitstats::render::RendererSession;
use wiki_unitstats::runner::{write_extraction, PageReport, PageStatus, RunReport, Runner};
use wiki_unitstats::sink::{CsvDirSink, PrintSink, Sink};
use wiki_unitstats::{extract_with_options, Options, Result, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(name = "wiki-unitstats", version, about = "Extract unit stat tables from wiki pages")]
struct Cli {
    /// JSON file with a "urls" array
    #[arg(short, long, default_value = "urls.json")]
    config: PathBuf,

    /// Output directory for the extracted files
    #[arg(short, long, default_value = "unit_csvs")]
    out: PathBuf,

    /// Extract from a saved HTML file instead of fetching the URL list
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Page name used for artifacts in --html mode (defaults to the file stem)
    #[arg(long, requires = "html")]
    page: Option<String>,

    /// Do not start a browser; tab widgets are skipped
    #[arg(long)]
    no_browser: bool,

    /// Run the pattern scan even when tables or an infobox were found
    #[arg(long)]
    always_patterns: bool,

    /// Write tab-separated .tsv files instead of .csv
    #[arg(long)]
    tsv: bool,

    /// Print datasets to stdout instead of writing files
    #[arg(long)]
    print: bool,

    /// Write a JSON run report to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Milliseconds to wait after clicking a tab
    #[arg(long, default_value_t = 1500)]
    settle_ms: u64,

    /// Seconds allowed for each page request
    #[arg(long, default_value_t = 30)]
    fetch_timeout_secs: u64,

    /// User-Agent for page requests
    #[arg(long, env = "WIKI_UNITSTATS_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            user_agent: self.user_agent.clone(),
            always_scan_patterns: self.always_patterns,
            interactive: !self.no_browser,
            tab_settle: Duration::from_millis(self.settle_ms),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            delimiter: if self.tsv { '\t' } else { ',' },
            ..Options::default()
        }
    }

    fn sink(&self, options: &Options) -> Result<Box<dyn Sink>> {
        if self.print {
            Ok(Box::new(PrintSink::new(io::stdout())))
        } else {
            Ok(Box::new(CsvDirSink::create(&self.out, options.delimiter)?))
        }
    }
}

#[cfg(feature = "browser")]
fn start_renderer(options: &Options) -> Option<RendererSession> {
    use wiki_unitstats::render::{ChromeConfig, ChromeRenderer};

    let config = ChromeConfig {
        timeout: options.render_timeout,
        user_agent: Some(options.user_agent.clone()),
        ..ChromeConfig::default()
    };
    match ChromeRenderer::launch(&config) {
        Ok(renderer) => Some(RendererSession::new(Box::new(renderer))),
        Err(e) => {
            log::warn!("Continuing without tab support: {e}");
            None
        }
    }
}

#[cfg(not(feature = "browser"))]
fn start_renderer(_options: &Options) -> Option<RendererSession> {
    log::warn!("Built without the `browser` feature; tab widgets are skipped");
    None
}

fn run_urls(cli: &Cli, options: &Options, sink: &mut dyn Sink) -> Result<RunReport> {
    let urls = UrlList::load(&cli.config)?.urls;
    if urls.is_empty() {
        log::warn!("{} lists no URLs", cli.config.display());
    }

    let fetcher = HttpFetcher::new(options.fetch_timeout);
    let mut runner = Runner::new(options, &fetcher);
    if options.interactive {
        if let Some(session) = start_renderer(options) {
            runner = runner.with_renderer(session);
        }
    }

    Ok(runner.run(&urls, sink))
}

fn run_file(path: &Path, page: Option<&str>, options: &Options, sink: &mut dyn Sink) -> Result<RunReport> {
    let bytes = fs::read(path)?;
    let html = decode_body(&bytes, None);
    let page = page.map_or_else(
        || {
            path.file_stem()
                .map_or_else(|| "page".to_string(), |s| s.to_string_lossy().to_lowercase())
        },
        ToString::to_string,
    );

    let extraction = extract_with_options(&html, &page, options);
    let artifacts = write_extraction(&extraction, sink);

    Ok(RunReport {
        pages: vec![PageReport {
            url: path.display().to_string(),
            status: if extraction.success() {
                PageStatus::Extracted
            } else {
                PageStatus::RawFallback
            },
            page,
            artifacts,
            stages: extraction.stages,
            warnings: extraction.warnings,
        }],
    })
}

fn write_summary(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::from)?;
    fs::write(path, json)?;
    log::info!("Run report written to {}", path.display());
    Ok(())
}

fn run(cli: &Cli) -> Result<RunReport> {
    let options = cli.options();
    let mut sink = cli.sink(&options)?;

    let report = match &cli.html {
        Some(path) => run_file(path, cli.page.as_deref(), &options, sink.as_mut())?,
        None => run_urls(cli, &options, sink.as_mut())?,
    };

    if let Some(path) = &cli.summary {
        write_summary(path, &report)?;
    }
    Ok(report)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            log::info!(
                "Done: {} pages, {} artifacts, {} fetch failures",
                report.pages.len(),
                report.artifact_count(),
                report.failed_pages()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
