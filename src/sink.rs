//! Dataset persistence.
//!
//! [`CsvDirSink`] writes one delimited file per dataset into an output
//! directory; [`MemorySink`] keeps everything in memory for callers that do
//! their own I/O; [`PrintSink`] echoes datasets to a writer.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::{Dataset, Row};

/// Receives the artifacts of every processed page.
pub trait Sink {
    /// Persist one dataset under its name.
    fn write_dataset(&mut self, dataset: &Dataset) -> Result<()>;

    /// Persist raw page content when structured extraction failed.
    fn write_raw(&mut self, name: &str, content: &str) -> Result<()>;
}

// ---------------- Delimited text ----------------

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer.
pub fn write_row<W: Write>(w: &mut W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Header (if any) followed by every row.
pub fn write_dataset_to<W: Write>(w: &mut W, dataset: &Dataset, sep: char) -> io::Result<()> {
    if let Some(header) = &dataset.header {
        write_row(w, header, sep)?;
    }
    for row in &dataset.rows {
        write_row(w, row, sep)?;
    }
    Ok(())
}

/// A dataset rendered as delimited text.
#[must_use]
pub fn to_delimited(dataset: &Dataset, sep: char) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_dataset_to(&mut buf, dataset, sep);
    String::from_utf8_lossy(&buf).into_owned()
}

// ---------------- Directory sink ----------------

/// Writes `{name}.csv` (or `.tsv`) and `{name}.html` files into a directory.
///
/// Existing files with the same name are overwritten, so re-running over the
/// same pages reproduces the same output tree.
#[derive(Debug, Clone)]
pub struct CsvDirSink {
    dir: PathBuf,
    delimiter: char,
    written: Vec<PathBuf>,
}

impl CsvDirSink {
    /// Create the output directory if needed.
    pub fn create(dir: impl Into<PathBuf>, delimiter: char) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::Sink {
            name: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            dir,
            delimiter,
            written: Vec::new(),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every file written so far, in write order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn extension(&self) -> &'static str {
        if self.delimiter == '\t' {
            "tsv"
        } else {
            "csv"
        }
    }

    fn write_file(&mut self, file_name: String, contents: &[u8]) -> Result<()> {
        let path = self.dir.join(&file_name);
        fs::write(&path, contents).map_err(|source| Error::Sink {
            name: file_name,
            source,
        })?;
        log::info!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

impl Sink for CsvDirSink {
    fn write_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        let contents = to_delimited(dataset, self.delimiter);
        let file_name = format!("{}.{}", dataset.name, self.extension());
        self.write_file(file_name, contents.as_bytes())
    }

    fn write_raw(&mut self, name: &str, content: &str) -> Result<()> {
        self.write_file(format!("{name}.html"), content.as_bytes())
    }
}

// ---------------- In-memory sink ----------------

/// Keeps artifacts keyed by name; a later write with the same name replaces
/// the earlier one, like files in a directory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub datasets: BTreeMap<String, Dataset>,
    pub raw: BTreeMap<String, String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of artifacts held.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.datasets.len() + self.raw.len()
    }

    /// Rows of a stored dataset.
    #[must_use]
    pub fn rows(&self, name: &str) -> Option<&[Row]> {
        self.datasets.get(name).map(|d| d.rows.as_slice())
    }
}

impl Sink for MemorySink {
    fn write_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        self.datasets.insert(dataset.name.clone(), dataset.clone());
        Ok(())
    }

    fn write_raw(&mut self, name: &str, content: &str) -> Result<()> {
        self.raw.insert(name.to_string(), content.to_string());
        Ok(())
    }
}

// ---------------- Print sink ----------------

/// Echoes each dataset as a titled, tab-separated block.
pub struct PrintSink<W: Write> {
    out: W,
}

impl<W: Write> PrintSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for PrintSink<W> {
    fn write_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        let sink_err = |source| Error::Sink {
            name: dataset.name.clone(),
            source,
        };
        writeln!(self.out, "\n--- {} ---\n", dataset.name).map_err(sink_err)?;
        write_dataset_to(&mut self.out, dataset, '\t').map_err(sink_err)
    }

    fn write_raw(&mut self, name: &str, content: &str) -> Result<()> {
        writeln!(self.out, "\n--- {name} ({} bytes of raw markup) ---", content.len()).map_err(|source| {
            Error::Sink {
                name: name.to_string(),
                source,
            }
        })
    }
}
