use crate::cli::Args;
use crate::config::Config;
use crate::errors::ExtractError;
use crate::extract::{self, page::RegistrationPage};
use crate::handoff::{self, STORAGE_KEY, SessionStore, process::ProcessViewer};
use crate::merge;
use crate::model::CourseSection;
use std::io::Read;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// One extraction pass: settle, read, extract, merge, then print or hand off.
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self, args: &Args) -> anyhow::Result<()> {
        // Heuristic wait for asynchronously populated captures, carried over
        // from the portal. Rows populated slower than this are still missed.
        if !args.no_wait && self.config.settle_delay_ms > 0 {
            debug!(
                delay_ms = self.config.settle_delay_ms,
                "waiting for page population to settle"
            );
            tokio::time::sleep(self.config.settle_delay()).await;
        }

        let document = read_input(&args.input)?;
        let merged = self.extract_merged(&document)?;

        match &self.config.viewer_command {
            None => {
                println!("{}", serde_json::to_string_pretty(&merged)?);
                Ok(())
            }
            Some(command) => self.hand_off(command, merged).await,
        }
    }

    /// Run both extraction paths and merge them. An empty merge is the
    /// terminal no-courses failure, raised before any handoff state exists —
    /// nothing is staged and no viewer context is opened.
    pub fn extract_merged(&self, document: &str) -> Result<Vec<CourseSection>, ExtractError> {
        let page = RegistrationPage::parse(document);
        let (primary, manual) = extract::extract_all(&page);
        info!(
            primary = primary.len(),
            manual = manual.len(),
            "extraction complete"
        );

        let merged = merge::merge(primary, manual);
        if merged.is_empty() {
            return Err(ExtractError::NoCourses);
        }
        Ok(merged)
    }

    async fn hand_off(&self, command: &str, courses: Vec<CourseSection>) -> anyhow::Result<()> {
        let origin = self.config.viewer_origin()?;
        let store = SessionStore::default();
        let mut viewer = stage_and_open(&store, command, &self.config.viewer_url, &origin, &courses)?;

        let cancel = CancellationToken::new();
        handoff::run_session(&store, &mut viewer, &cancel).await?;
        Ok(())
    }
}

/// Stage the course list in the store, then open the viewer context. A
/// blocked viewer clears the staged data immediately; there is no retry.
fn stage_and_open(
    store: &SessionStore,
    command: &str,
    viewer_url: &str,
    origin: &str,
    courses: &[CourseSection],
) -> anyhow::Result<ProcessViewer> {
    store.set(STORAGE_KEY, serde_json::to_string(courses)?);
    match ProcessViewer::spawn(command, viewer_url, origin) {
        Ok(viewer) => Ok(viewer),
        Err(err) => {
            store.remove(STORAGE_KEY);
            Err(err.into())
        }
    }
}


fn read_input(input: &str) -> Result<String, ExtractError> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| ExtractError::ReadPage {
                path: "stdin".to_owned(),
                source,
            })?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).map_err(|source| ExtractError::ReadPage {
            path: input.to_owned(),
            source,
        })
    }
}
