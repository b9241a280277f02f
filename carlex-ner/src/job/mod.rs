// Preprocessing Job - Thread Files In, Annotated Thread Files Out
//
// For each *.json file in the input directory:
//   parse threads → (bounded concurrency, order kept) process sections →
//   write <output_dir>/<same name> via temp file + rename → log coverage

pub mod coverage;
pub mod threads;

use crate::error::{NerError, NerResult};
use crate::pipeline::Pipeline;
use crate::types::SectionOutput;
use carlex_common::config::{JobConfig, TaggerErrorPolicy};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use coverage::EntityCoverage;
pub use threads::{
    clean_raw_text, flatten_comments, ProcessedComment, ProcessedThread, RawComment, RawThread,
};

/// Totals for one job run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub files: usize,
    pub threads: usize,
    pub comments: usize,
    /// Sections omitted after tagger failures (`skip_section` only)
    pub skipped_sections: usize,
    pub coverage: EntityCoverage,
}

/// One processed thread plus its skip count
struct ThreadOutcome {
    thread: ProcessedThread,
    skipped_sections: usize,
}

/// Runs the pipeline over thread files
pub struct JobRunner {
    pipeline: Pipeline,
    policy: TaggerErrorPolicy,
    retries: u32,
    max_concurrent: usize,
}

impl JobRunner {
    pub fn new(pipeline: Pipeline, config: &JobConfig) -> Self {
        Self {
            pipeline,
            policy: config.on_tagger_error,
            retries: config.tagger_retries,
            max_concurrent: config.max_concurrent_documents.max(1),
        }
    }

    /// Process every `*.json` file directly inside `input_dir`
    ///
    /// Files are handled in name order. The output directory is created if
    /// needed.
    pub async fn run(&self, input_dir: &Path, output_dir: &Path) -> NerResult<JobSummary> {
        let files = list_input_files(input_dir)?;
        info!(
            "Preprocessing {} files from {} (tagger: {})",
            files.len(),
            input_dir.display(),
            self.pipeline.tagger_id()
        );
        tokio::fs::create_dir_all(output_dir).await?;

        let mut summary = JobSummary::default();
        for path in files {
            let file_name = match path.file_name() {
                Some(name) => name.to_owned(),
                None => continue,
            };
            let file_summary = self.process_file(&path, &output_dir.join(file_name)).await?;

            summary.files += 1;
            summary.threads += file_summary.threads;
            summary.comments += file_summary.comments;
            summary.skipped_sections += file_summary.skipped_sections;
            summary.coverage.merge(file_summary.coverage);
        }

        info!(
            "Preprocessing complete: {} files, {} threads, {} comments, {} sections skipped",
            summary.files, summary.threads, summary.comments, summary.skipped_sections
        );
        Ok(summary)
    }

    /// Process one thread file and write its output
    pub async fn process_file(&self, input: &Path, output: &Path) -> NerResult<JobSummary> {
        let content = tokio::fs::read_to_string(input).await?;
        let raw_threads: Vec<RawThread> = serde_json::from_str(&content)?;
        debug!("{}: {} threads", input.display(), raw_threads.len());

        let outcomes: Vec<ThreadOutcome> = stream::iter(raw_threads)
            .map(|thread| self.process_thread(thread))
            .buffered(self.max_concurrent)
            .try_collect()
            .await?;

        let mut summary = JobSummary {
            files: 1,
            ..JobSummary::default()
        };
        let mut processed = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            summary.threads += 1;
            summary.comments += outcome.thread.comments.len();
            summary.skipped_sections += outcome.skipped_sections;
            for section in outcome.thread.sections() {
                summary.coverage.observe(section);
            }
            processed.push(outcome.thread);
        }

        write_output(output, &processed).await?;

        info!(
            "{}: {} unique car brands, {} unique car models",
            input.display(),
            summary.coverage.brand_count(),
            summary.coverage.model_count()
        );
        Ok(summary)
    }

    /// Clean and process every section of one thread
    pub async fn process_thread_output(&self, raw: RawThread) -> NerResult<ProcessedThread> {
        Ok(self.process_thread(raw).await?.thread)
    }

    async fn process_thread(&self, raw: RawThread) -> NerResult<ThreadOutcome> {
        let title = clean_raw_text(raw.title.as_deref().unwrap_or_default());
        let selftext = clean_raw_text(raw.selftext.as_deref().unwrap_or_default());
        let mut skipped_sections = 0;

        let preprocessed_title = self.process_with_policy(&title, &raw.id, "title").await?;
        let preprocessed_selftext = self.process_with_policy(&selftext, &raw.id, "selftext").await?;
        skipped_sections += usize::from(preprocessed_title.is_none());
        skipped_sections += usize::from(preprocessed_selftext.is_none());

        let mut comments = Vec::new();
        for comment in flatten_comments(&raw.comments) {
            match self.process_with_policy(&comment.body, &raw.id, "comment").await? {
                Some(preprocessed_body) => comments.push(ProcessedComment {
                    id: comment.id,
                    body: comment.body,
                    author: comment.author,
                    score: comment.score,
                    created_utc: comment.created_utc,
                    preprocessed_body,
                }),
                None => skipped_sections += 1,
            }
        }

        Ok(ThreadOutcome {
            thread: ProcessedThread {
                id: raw.id,
                title,
                selftext,
                author: raw.author,
                score: raw.score,
                created_utc: raw.created_utc,
                comments,
                preprocessed_title,
                preprocessed_selftext,
            },
            skipped_sections,
        })
    }

    /// Process a section, applying the tagger error policy
    ///
    /// # Returns
    /// * `Ok(None)` - Tagger kept failing and the policy is `skip_section`
    async fn process_with_policy(
        &self,
        text: &str,
        thread_id: &str,
        section: &str,
    ) -> NerResult<Option<SectionOutput>> {
        let mut attempt = 0;
        loop {
            match self.pipeline.process_section(text).await {
                Ok(output) => return Ok(Some(output)),
                Err(err @ NerError::Tagger { .. }) => match self.policy {
                    TaggerErrorPolicy::Abort => return Err(err),
                    TaggerErrorPolicy::SkipSection if attempt < self.retries => {
                        attempt += 1;
                        warn!(
                            "Thread {} {}: {} (retry {}/{})",
                            thread_id, section, err, attempt, self.retries
                        );
                    }
                    TaggerErrorPolicy::SkipSection => {
                        warn!("Thread {} {}: {}, section skipped", thread_id, section, err);
                        return Ok(None);
                    }
                },
                Err(err) => return Err(err),
            }
        }
    }
}

/// `*.json` files directly inside `dir`, sorted by name
pub fn list_input_files(dir: &Path) -> NerResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            NerError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
            }))
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Write pretty JSON next to `path`, then rename into place
async fn write_output(path: &Path, threads: &[ProcessedThread]) -> NerResult<()> {
    let json = serde_json::to_vec_pretty(threads)?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    debug!("Wrote {}", path.display());
    Ok(())
}
