//! Run driver: fetch every URL in order, extract, and hand artifacts to a sink.
//!
//! Pages are processed strictly one after another. A failed fetch skips the
//! page, a failed write is logged, and neither stops the run.

use serde::Serialize;

use crate::extractor::pipeline::{extract_page, PageContext};
use crate::fetch::PageFetcher;
use crate::patterns::PATTERNS;
use crate::render::RendererSession;
use crate::sink::Sink;
use crate::text::page_name;
use crate::{Error, Options, PageExtraction, Stage, StageOutcome};

/// How processing of one URL ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum PageStatus {
    /// At least one structured dataset was written.
    Extracted,
    /// Nothing structured was found; only the raw dump was written.
    RawFallback,
    /// The page could not be fetched and was skipped.
    FetchFailed(String),
}

/// Outcome of one URL.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub url: String,
    pub page: String,
    #[serde(flatten)]
    pub status: PageStatus,
    /// Artifact names handed to the sink successfully.
    pub artifacts: Vec<String>,
    pub stages: Vec<(Stage, StageOutcome)>,
    pub warnings: Vec<String>,
}

/// Outcome of a whole run, in URL order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub pages: Vec<PageReport>,
}

impl RunReport {
    /// Number of artifacts written across all pages.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.pages.iter().map(|p| p.artifacts.len()).sum()
    }

    #[must_use]
    pub fn failed_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::FetchFailed(_)))
            .count()
    }
}

/// Drives the fetch → extract → write loop.
pub struct Runner<'a> {
    options: &'a Options,
    fetcher: &'a dyn PageFetcher,
    renderer: Option<RendererSession>,
}

impl<'a> Runner<'a> {
    #[must_use]
    pub fn new(options: &'a Options, fetcher: &'a dyn PageFetcher) -> Self {
        Self {
            options,
            fetcher,
            renderer: None,
        }
    }

    /// Use a browser session for pages with tab widgets.
    #[must_use]
    pub fn with_renderer(mut self, session: RendererSession) -> Self {
        self.renderer = Some(session);
        self
    }

    /// Process every URL in order. The renderer session is closed when the
    /// loop ends, and by `Drop` on any other exit path.
    pub fn run(mut self, urls: &[String], sink: &mut dyn Sink) -> RunReport {
        let mut report = RunReport::default();

        for (i, url) in urls.iter().enumerate() {
            log::info!("[{}/{}] {url}", i + 1, urls.len());
            report.pages.push(self.process_url(url, sink));
        }

        if let Some(session) = self.renderer.as_mut() {
            session.close();
        }
        report
    }

    fn process_url(&mut self, url: &str, sink: &mut dyn Sink) -> PageReport {
        let page = page_name(url);

        let fetched = self
            .fetcher
            .fetch(url, &self.options.user_agent)
            .and_then(|fetched| {
                if fetched.is_success() {
                    Ok(fetched)
                } else {
                    Err(Error::HttpStatus {
                        url: url.to_string(),
                        status: fetched.status,
                    })
                }
            });

        let html = match fetched {
            Ok(fetched) => fetched.body,
            Err(e) => {
                log::warn!("Skipping {url}: {e}");
                return PageReport {
                    url: url.to_string(),
                    page,
                    status: PageStatus::FetchFailed(e.to_string()),
                    artifacts: Vec::new(),
                    stages: Vec::new(),
                    warnings: Vec::new(),
                };
            }
        };

        let mut ctx = PageContext {
            options: self.options,
            patterns: &PATTERNS,
            url: Some(url),
            renderer: self.renderer.as_mut().map(RendererSession::renderer),
        };
        let extraction = extract_page(&page, &html, &mut ctx);

        let artifacts = write_extraction(&extraction, sink);
        PageReport {
            url: url.to_string(),
            status: if extraction.success() {
                PageStatus::Extracted
            } else {
                PageStatus::RawFallback
            },
            page,
            artifacts,
            stages: extraction.stages,
            warnings: extraction.warnings,
        }
    }
}

/// Hand every dataset (and the raw dump, if any) to the sink.
///
/// Returns the names that were written; failures are logged and skipped.
pub fn write_extraction(extraction: &PageExtraction, sink: &mut dyn Sink) -> Vec<String> {
    let mut written = Vec::new();

    for dataset in &extraction.datasets {
        match sink.write_dataset(dataset) {
            Ok(()) => written.push(dataset.name.clone()),
            Err(e) => log::error!("{}: {e}", extraction.page),
        }
    }

    if let Some(dump) = &extraction.raw_fallback {
        match sink.write_raw(&dump.name, &dump.content) {
            Ok(()) => written.push(dump.name.clone()),
            Err(e) => log::error!("{}: {e}", extraction.page),
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchedPage;
    use crate::sink::MemorySink;
    use crate::{Dataset, RawDump, Result};

    struct StaticFetcher;

    impl PageFetcher for StaticFetcher {
        fn fetch(&self, url: &str, _user_agent: &str) -> Result<FetchedPage> {
            match url {
                u if u.ends_with("/Militia") => Ok(FetchedPage {
                    status: 200,
                    body: "<table><tr><th>Lvl</th></tr><tr><td>1</td></tr></table>".to_string(),
                }),
                u if u.ends_with("/Missing") => Ok(FetchedPage {
                    status: 404,
                    body: "not found".to_string(),
                }),
                _ => Err(Error::Fetch {
                    url: url.to_string(),
                    reason: "connection reset".to_string(),
                }),
            }
        }
    }

    #[test]
    fn failed_fetches_are_skipped_and_loop_continues() {
        let options = Options::default();
        let urls: Vec<String> = ["https://w/wiki/Down", "https://w/wiki/Missing", "https://w/wiki/Militia"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut sink = MemorySink::new();

        let report = Runner::new(&options, &StaticFetcher).run(&urls, &mut sink);

        assert_eq!(report.pages.len(), 3);
        assert_eq!(report.failed_pages(), 2);
        assert!(matches!(report.pages[1].status, PageStatus::FetchFailed(ref r) if r.contains("404")));
        assert_eq!(report.pages[2].status, PageStatus::Extracted);
        assert_eq!(report.pages[2].artifacts, vec!["militia_table_1"]);
        assert_eq!(sink.artifact_count(), 1);
    }

    /// Memory sink that refuses one artifact name.
    struct FailingSink {
        inner: MemorySink,
        refuse: &'static str,
    }

    impl FailingSink {
        fn check(&self, name: &str) -> Result<()> {
            if name == self.refuse {
                return Err(Error::Sink {
                    name: name.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            Ok(())
        }
    }

    impl Sink for FailingSink {
        fn write_dataset(&mut self, dataset: &Dataset) -> Result<()> {
            self.check(&dataset.name)?;
            self.inner.write_dataset(dataset)
        }

        fn write_raw(&mut self, name: &str, content: &str) -> Result<()> {
            self.check(name)?;
            self.inner.write_raw(name, content)
        }
    }

    fn extraction_with(names: &[&str], raw: Option<&str>) -> PageExtraction {
        let datasets = names
            .iter()
            .map(|name| {
                let mut dataset = Dataset::new(*name);
                dataset.push_pair("Speed", "24");
                dataset
            })
            .collect();
        PageExtraction {
            page: "militia".to_string(),
            datasets,
            raw_fallback: raw.map(|name| RawDump {
                name: name.to_string(),
                content: "<p>raw</p>".to_string(),
            }),
            ..PageExtraction::default()
        }
    }

    #[test]
    fn one_failed_write_does_not_stop_the_others() {
        let extraction = extraction_with(
            &["militia_table_1", "militia_table_2", "militia_infobox"],
            Some("militia_debug"),
        );
        let mut sink = FailingSink {
            inner: MemorySink::new(),
            refuse: "militia_table_2",
        };

        let written = write_extraction(&extraction, &mut sink);

        assert_eq!(written, vec!["militia_table_1", "militia_infobox", "militia_debug"]);
        assert!(sink.inner.rows("militia_table_2").is_none());
        assert_eq!(sink.inner.artifact_count(), 3);
    }

    #[test]
    fn failed_raw_dump_is_left_out_of_the_written_names() {
        let extraction = extraction_with(&["militia_stats"], Some("militia_debug"));
        let mut sink = FailingSink {
            inner: MemorySink::new(),
            refuse: "militia_debug",
        };

        let written = write_extraction(&extraction, &mut sink);

        assert_eq!(written, vec!["militia_stats"]);
        assert!(sink.inner.raw.is_empty());
    }

    #[test]
    fn report_serializes_status_inline() {
        let report = PageReport {
            url: "https://w/wiki/Down".to_string(),
            page: "down".to_string(),
            status: PageStatus::FetchFailed("timeout".to_string()),
            artifacts: Vec::new(),
            stages: Vec::new(),
            warnings: Vec::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "fetch_failed");
        assert_eq!(json["reason"], "timeout");
    }
}
