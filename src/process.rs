use std::path::PathBuf;

use chrono::Local;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};

use crate::identity::MatchIdentity;
use crate::manifest::{self, RenameReport};
use crate::normalize::normalize_table;
use crate::parse::parse_page;
use crate::persist::{match_dir, reset_root, write_table};
use crate::request::{Fetcher, Session};
use crate::{info_time, Config, Error, Result};

/// What one report page left behind in the output tree.
#[derive(Debug, Clone)]
pub struct MatchOutput {
    pub identity: MatchIdentity,
    pub dir: PathBuf,
    /// Ordinals of the tables written as `table_<n>.csv`.
    pub written: Vec<usize>,
    /// Ordinals of the tables that couldn't be read or cleaned.
    pub skipped: Vec<usize>,
    /// Filled in by the rename pass.
    pub renames: Option<RenameReport>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub matches: Vec<MatchOutput>,
    /// URLs whose page couldn't be fetched or read.
    pub failed_urls: Vec<String>,
}

/// Runs the whole pipeline with the default configuration.
pub async fn process_site() -> Result<RunSummary> {
    process_site_with_config(&Config::default()).await
}

/// Opens a fetch session, runs the pipeline with it and closes it again.
pub async fn process_site_with_config(config: &Config) -> Result<RunSummary> {
    let session = Session::open(config)?;
    let summary = process_site_with(&session, config).await;
    session.close();
    summary
}

/// Wipes the output root, downloads and cleans every page, then renames the tables.
/// Only a failure to reset the output root ends the run early.
pub async fn process_site_with<F: Fetcher>(fetcher: &F, config: &Config) -> Result<RunSummary> {
    let start_time = Local::now();
    reset_root(&config.output_root).await?;

    info_time!("Phase 1: downloading {} match reports", config.urls.len());
    let mut summary = RunSummary::default();
    for url in &config.urls {
        match process_document(fetcher, url, config).await {
            Ok(output) => summary.matches.push(output),
            Err(e) => {
                error!("Error processing {url}: {e}");
                summary.failed_urls.push(url.clone());
            }
        }
    }
    info_time!(start_time, "Finished downloading and cleaning.");

    let rename_time = Local::now();
    info_time!("Phase 2: renaming files");
    for output in &mut summary.matches {
        info!("--- Renaming files in: {} ---", output.dir.display());
        match manifest::rename_tables(&output.dir, &output.identity).await {
            Ok(report) => output.renames = Some(report),
            Err(e) => error!("Couldn't rename tables in {}: {e}", output.dir.display()),
        }
    }
    info_time!(rename_time, "Finished renaming.");
    info_time!(start_time, "Full pipeline time:");

    Ok(summary)
}

/// Fetches one page and writes each of its tables as `table_<n>.csv`.
/// A table that fails is logged with its ordinal and skipped.
async fn process_document<F: Fetcher>(fetcher: &F, url: &str, config: &Config) -> Result<MatchOutput> {
    let html = fetcher.fetch(url).await?;
    let page = spawn_blocking(move || parse_page(&html)).await??;

    let mut identity = match page.title.as_deref().ok_or(Error::MissingTitle) {
        Ok(title) => MatchIdentity::from_title(title, &config.locale),
        Err(e) => {
            warn!("{e} at {url}");
            MatchIdentity::fallback(&config.locale, chrono::Utc::now().timestamp())
        }
    };
    if let (MatchIdentity::Unknown { name }, Some(title)) = (&identity, &page.title) {
        warn!("Couldn't read two teams from title {title:?}, using {name}");
    }

    let dir = match_dir(&config.output_root, &mut identity).await?;
    info!("--- Downloading data into: {} ---", dir.display());

    let mut output = MatchOutput {
        identity,
        dir,
        written: Vec::new(),
        skipped: Vec::new(),
        renames: None,
    };
    for (i, raw) in page.tables.into_iter().enumerate() {
        let ordinal = i + 1;
        let file_name = manifest::file_name(&manifest::positional_name(ordinal));
        let path = output.dir.join(&file_name);

        let written = match raw.and_then(|raw| normalize_table(raw, &config.locale)) {
            Ok(clean) => write_table(&path, &clean, config.write_bom).await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => {
                info!("   - Downloaded and cleaned: {file_name}");
                output.written.push(ordinal);
            }
            Err(e) => {
                warn!("   - Error processing table no. {ordinal}: {e}");
                output.skipped.push(ordinal);
            }
        }
    }
    Ok(output)
}
