//! The wizard driven start to finish without a UI.
//!
//! Each step goes through [`Session`] exactly as the web app does, so a
//! retry here is the same `Failed -> InFlight` transition a user
//! triggers with the retry button.

use std::path::{Path, PathBuf};

use kisekae_core::{
    Asset, AssetError, CallSite, ClothingSettlement, GenerationError, GenerationGateway, Session,
    SessionError, Settlement, TryOnJob,
};
use tracing::{info, warn};

/// Everything that stops a command-line run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a usable image: {source}", path.display())]
    Image { path: PathBuf, source: AssetError },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Neither an explicit file nor a preset was given.
    #[error("no {0} image given")]
    MissingInput(&'static str),

    #[error("no API key configured; set API_KEY or pass --api-key")]
    MissingCredential,

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Localized failure message, as the web app would show it.
    #[error("{0}")]
    Generation(&'static str),

    #[error("the generated image could not be decoded: {0}")]
    Decode(#[from] AssetError),
}

/// Where the garment comes from.
#[derive(Debug)]
pub enum Garment {
    Image(Asset),
    /// Designed from a text description first.
    Design(String),
}

/// Read an image file into an [`Asset`].
///
/// Binary images are recognized by their signature. A text file holding
/// a `data:` URI is accepted too.
pub fn load_asset(path: &Path) -> Result<Asset, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    match Asset::from_bytes(&bytes) {
        Ok(asset) => Ok(asset),
        Err(AssetError::UnrecognizedFormat) => match std::str::from_utf8(&bytes) {
            Ok(text) if text.trim_start().starts_with("data:") => Ok(Asset::parse(text.trim())),
            _ => Err(CliError::Image {
                path: path.to_owned(),
                source: AssetError::UnrecognizedFormat,
            }),
        },
        Err(source) => Err(CliError::Image {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Load every path, failing on the first unreadable one.
pub fn load_all(paths: &[PathBuf]) -> Result<Vec<Asset>, CliError> {
    paths.iter().map(|path| load_asset(path)).collect()
}

/// Decode `result` and write it to `path`.
pub fn write_result(path: &Path, result: &Asset) -> Result<(), CliError> {
    let bytes = result.decode()?;
    std::fs::write(path, &bytes).map_err(|source| CliError::Write {
        path: path.to_owned(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), mime = result.mime_type(), "result written");
    Ok(())
}

/// Select `person`, obtain the garment and run the try-on.
///
/// Each generation is attempted once plus up to `retries` more times.
/// A missing credential is never retried.
pub async fn try_on<G>(
    session: &mut Session,
    gateway: &G,
    person: Asset,
    garment: Garment,
    retries: u32,
) -> Result<Asset, CliError>
where
    G: GenerationGateway + ?Sized,
{
    session.select_person(person);
    let job = match garment {
        Garment::Image(clothes) => session.select_clothes(clothes)?,
        Garment::Design(prompt) => design(session, gateway, prompt, retries).await?,
    };
    compose(session, gateway, job, retries).await
}

async fn design<G>(
    session: &mut Session,
    gateway: &G,
    prompt: String,
    retries: u32,
) -> Result<TryOnJob, CliError>
where
    G: GenerationGateway + ?Sized,
{
    session.set_prompt(prompt);
    let mut job = session.design_clothing()?;
    let mut attempt = 0;
    loop {
        let completion = job.dispatch(gateway).await;
        let fatal = is_configuration(completion.outcome());
        match session.finish_clothing(completion)? {
            ClothingSettlement::Selected(try_on) => return Ok(try_on),
            ClothingSettlement::Failed if attempt < retries && !fatal => {
                attempt += 1;
                warn!(attempt, retries, "retrying clothing design");
                job = session.retry_clothing()?;
            }
            ClothingSettlement::Failed | ClothingSettlement::Discarded => {
                let message = session
                    .clothing_message()
                    .unwrap_or_else(|| session.catalog().failure(CallSite::ClothingDesign));
                return Err(CliError::Generation(message));
            }
        }
    }
}

async fn compose<G>(
    session: &mut Session,
    gateway: &G,
    mut job: TryOnJob,
    retries: u32,
) -> Result<Asset, CliError>
where
    G: GenerationGateway + ?Sized,
{
    let mut attempt = 0;
    loop {
        let clothes = job.clothes().clone();
        let completion = job.dispatch(gateway).await;
        let fatal = is_configuration(completion.outcome());
        match session.finish_try_on(completion)? {
            Settlement::Completed => break,
            Settlement::Failed if attempt < retries && !fatal => {
                attempt += 1;
                warn!(attempt, retries, "retrying try-on");
                session.go_back();
                job = session.select_clothes(clothes)?;
            }
            Settlement::Failed | Settlement::Discarded => {
                let message = session
                    .try_on_message()
                    .unwrap_or_else(|| session.catalog().failure(CallSite::TryOn));
                return Err(CliError::Generation(message));
            }
        }
    }
    session
        .wizard()
        .result()
        .cloned()
        .ok_or_else(|| CliError::Generation(session.catalog().failure(CallSite::TryOn)))
}

fn is_configuration(outcome: &Result<Asset, GenerationError>) -> bool {
    outcome
        .as_ref()
        .err()
        .is_some_and(GenerationError::is_configuration)
}
