//! Multi-file analysis pipeline
//!
//! Files are parsed independently (in parallel), then their events are fed
//! into one [`CallCollector`] strictly in input order. The collector is the
//! only writer to the graph, so the result does not depend on how parsing
//! was scheduled.
//!
//! # Input order
//!
//! - [`Analyzer::parse_files`] keeps the order the files were given in
//! - [`Analyzer::parse_directory`] uses the sorted order from discovery
//!
//! That order is the tie-break for edges whose callers have equal degrees.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::collector::{CallCollector, ExtractionEvent};
use crate::config::Config;
use crate::discovery;
use crate::error::{Error, Result};
use crate::filter::IgnoreSet;
use crate::parser::{Language, Parser};
use crate::render::CallReport;

/// Builds one call graph from any number of source files
pub struct Analyzer {
    languages: Vec<Language>,
    collector: CallCollector,
    files_parsed: usize,
}

impl Analyzer {
    pub fn new(languages: &[Language]) -> Self {
        Self {
            languages: languages.to_vec(),
            collector: CallCollector::new(),
            files_parsed: 0,
        }
    }

    /// Parse an explicit list of files
    ///
    /// Every path must exist. Directories and files of a language that is
    /// not enabled are skipped. The first failing file aborts the whole
    /// call and nothing from this batch is recorded.
    pub fn parse_files(&mut self, paths: &[PathBuf]) -> Result<()> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let metadata = std::fs::symlink_metadata(path).map_err(|e| Error::io(path, e))?;
            if metadata.is_dir() {
                debug!(path = %path.display(), "skipping directory");
                continue;
            }
            match self.enabled_language(path) {
                Some(lang) => sources.push((path.clone(), lang)),
                None => debug!(path = %path.display(), "skipping unsupported file"),
            }
        }
        self.extract_and_record(&sources)
    }

    /// Discover and parse every enabled source file under `root`
    pub fn parse_directory(&mut self, root: &Path) -> Result<()> {
        let files = discovery::discover_language_files(root, &self.languages)?;
        debug!(root = %root.display(), files = files.len(), "discovered source files");

        let sources: Vec<(PathBuf, Language)> = files
            .into_iter()
            .filter_map(|path| self.enabled_language(&path).map(|lang| (path, lang)))
            .collect();
        self.extract_and_record(&sources)
    }

    /// Feed pre-extracted events, e.g. from a custom front end
    pub fn record_events(&mut self, events: impl IntoIterator<Item = ExtractionEvent>) {
        self.collector.record_all(events);
    }

    pub fn files_parsed(&self) -> usize {
        self.files_parsed
    }

    pub fn collector(&self) -> &CallCollector {
        &self.collector
    }

    /// Filter and order the collected calls
    pub fn finish(&self, ignore: &IgnoreSet) -> CallReport {
        self.collector.finish(ignore)
    }

    fn enabled_language(&self, path: &Path) -> Option<Language> {
        Language::from_path(path).filter(|lang| self.languages.contains(lang))
    }

    fn extract_and_record(&mut self, sources: &[(PathBuf, Language)]) -> Result<()> {
        let parser = Parser::new();
        let per_file: Vec<Vec<ExtractionEvent>> = sources
            .par_iter()
            .map(|(path, lang)| {
                let events = parser.parse_file(path, *lang)?;
                debug!(path = %path.display(), events = events.len(), "parsed file");
                Ok(events)
            })
            .collect::<Result<_>>()?;

        // single writer: events enter the collector in input order
        for events in per_file {
            self.collector.record_all(events);
            self.files_parsed += 1;
        }
        Ok(())
    }
}

/// Run the whole pipeline described by `config`
///
/// A directory takes precedence over an explicit file list.
pub fn analyze(config: &Config) -> Result<CallReport> {
    config.validate()?;

    let mut analyzer = Analyzer::new(&config.languages);
    match &config.dir {
        Some(dir) => analyzer.parse_directory(dir)?,
        None => analyzer.parse_files(&config.files)?,
    }
    debug!(files = analyzer.files_parsed(), "collection finished");

    Ok(analyzer.finish(&config.ignore_set()))
}
