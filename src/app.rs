//! Headless driver — wires a resource through the pipeline the way a display
//! layer would, then reports what it would show.
//!
//! ```text
//! FileProvider ──► LineSource ──► RecordStream ──(pull | push)──► CollectedSequence
//!                                                                        │
//!                                                    SequenceView::search(&Filter)
//! ```

use std::{io::Write, path::PathBuf, sync::Arc};

use actor_core::{
    config::{Config, DeliveryMode},
    CaseRule, CollectedSequence, Filter, Record, SourceError,
};
use actor_feeds::{
    Completion, CountMode, FileProvider, LineCount, LineSource, Publisher, RecordStream,
};
use tokio_util::sync::CancellationToken;

/// Everything one run needs, resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub resource: String,
    pub dir: PathBuf,
    pub extension: String,
    pub mode: DeliveryMode,
    pub filter: Filter,
    /// Only run a diagnostic line count, read the given way.
    pub count: Option<CountMode>,
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            resource: config.source.default_resource.clone(),
            dir: config.source.resource_dir.clone(),
            extension: config.source.extension.clone(),
            mode: config.stream.mode,
            filter: Filter::new("", CaseRule::from_case_sensitive(config.search.case_sensitive)),
            count: None,
        }
    }

    pub fn line_source(&self) -> LineSource {
        let provider = FileProvider::new(self.dir.clone(), self.extension.clone());
        LineSource::new(Arc::new(provider), self.resource.clone())
    }
}

/// What a run produced.
#[derive(Debug)]
pub enum Report {
    Count(LineCount),
    Matches {
        matches: Vec<Record>,
        total: usize,
        completion: Completion,
    },
}

/// Stream `source` into a fresh [`CollectedSequence`] using `mode`.
///
/// Only resolution failures are returned as errors; anything that goes wrong
/// mid-stream shows up in the [`Completion`] and a shorter sequence.
pub async fn collect(
    source: &LineSource,
    mode: DeliveryMode,
    cancel: CancellationToken,
) -> Result<(CollectedSequence, Completion), SourceError> {
    let stream = RecordStream::open(source).await?;
    let mut seq = CollectedSequence::new();

    let completion = match mode {
        DeliveryMode::Pull => stream.collect_into(&mut seq, &cancel).await,
        DeliveryMode::Push => {
            let mut publisher = Publisher::new(stream);
            let subscription = publisher.subscribe();
            let producer = publisher.start(cancel);
            let completion = subscription.collect_into(&mut seq).await;
            if let Err(err) = producer.await {
                tracing::warn!(%err, "producer task did not finish cleanly");
            }
            completion
        }
    };

    tracing::debug!(mode = %mode, collected = seq.len(), "collection finished");
    Ok((seq, completion))
}

/// Run once according to `options`.
pub async fn run(options: &RunOptions, cancel: CancellationToken) -> anyhow::Result<Report> {
    let source = options.line_source();

    if let Some(mode) = options.count {
        return Ok(Report::Count(source.count_with(mode).await?));
    }

    let (seq, completion) = collect(&source, options.mode, cancel).await?;
    let view = seq.view();
    let matches = view.search(&options.filter);
    tracing::info!(
        resource = %options.resource,
        total = view.len(),
        matches = matches.len(),
        filter = %options.filter.text(),
        "search complete"
    );

    Ok(Report::Matches {
        matches,
        total: view.len(),
        completion,
    })
}

/// Print `report` the way the list view would show it.
pub fn render(report: &Report, out: &mut impl Write) -> std::io::Result<()> {
    match report {
        Report::Count(count) => {
            writeln!(out, "{} lines", count.lines)?;
            writeln!(out, "Duration: {:.6}s", count.elapsed.as_secs_f64())?;
        }
        Report::Matches { matches, .. } if matches.is_empty() => {
            writeln!(out, "No items")?;
        }
        Report::Matches { matches, .. } => {
            for record in matches {
                writeln!(out, "{}", record.name())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn options(dir: &std::path::Path) -> RunOptions {
        RunOptions {
            resource: "names".into(),
            dir: dir.to_path_buf(),
            extension: "tsv".into(),
            mode: DeliveryMode::Pull,
            filter: Filter::default(),
            count: None,
        }
    }

    #[test]
    fn options_follow_config() {
        let opts = RunOptions::from_config(&Config::defaults());
        assert_eq!(opts.resource, "data-100");
        assert_eq!(opts.extension, "tsv");
        assert_eq!(opts.mode, DeliveryMode::Push);
        assert_eq!(opts.filter.case(), CaseRule::Sensitive);
    }

    #[tokio::test]
    async fn run_filters_collected_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("names.tsv"), "1\tAda\n2\tGrace\n3\tAdam\n").unwrap();
        let mut opts = options(dir.path());
        opts.filter = Filter::new("Ada", CaseRule::Sensitive);

        match run(&opts, CancellationToken::new()).await.unwrap() {
            Report::Matches { matches, total, completion } => {
                let names: Vec<&str> = matches.iter().map(Record::name).collect();
                assert_eq!(names, vec!["Ada", "Adam"]);
                assert_eq!(total, 3);
                assert!(completion.is_exhausted());
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_missing_resource_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&options(dir.path()), CancellationToken::new()).await.unwrap_err();
        let source = err.downcast_ref::<SourceError>().expect("source error");
        assert!(source.is_not_found());
    }

    #[tokio::test]
    async fn run_counts_eagerly_and_lazily() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("names.tsv"), "1\tAda\r2\tGrace\r\n\n").unwrap();
        let mut opts = options(dir.path());
        for mode in [CountMode::Eager, CountMode::Lazy] {
            opts.count = Some(mode);
            match run(&opts, CancellationToken::new()).await.unwrap() {
                Report::Count(count) => assert_eq!(count.lines, 3, "{mode}"),
                other => panic!("unexpected report {other:?}"),
            }
        }
    }

    #[test]
    fn render_no_items() {
        let report = Report::Matches {
            matches: Vec::new(),
            total: 4,
            completion: Completion { delivered: 4, outcome: actor_feeds::Outcome::Exhausted },
        };
        let mut out = Vec::new();
        render(&report, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No items\n");
    }

    #[test]
    fn render_count() {
        let report = Report::Count(LineCount { lines: 100, elapsed: Duration::from_millis(2) });
        let mut out = Vec::new();
        render(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("100 lines\nDuration: "));
    }
}
