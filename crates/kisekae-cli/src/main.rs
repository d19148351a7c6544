//! kisekae-cli: run a virtual try-on from the command line.
//!
//! Drives the same wizard session as the web app against images on
//! disk and writes the generated result to a file.
//!
//! # Usage
//!
//! ```text
//! kisekae-cli --person me.jpg --clothes coat.png -o result.png
//! kisekae-cli --person me.jpg --prompt "red silk gown" -o result.png
//! ```
//!
//! The API key is read from `API_KEY` (or `GEMINI_API_KEY`), a `.env`
//! file in the working directory, or `--api-key`. Set `RUST_LOG=debug`
//! to see each request.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod flow;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kisekae_core::{Locale, PresetRegistry, Session};
use kisekae_gemini::{GatewayConfig, GeminiGateway};
use tracing::{debug, info};

use crate::flow::{CliError, Garment};

/// Dress a person photo in a garment photo, or in a garment designed
/// from a text description.
#[derive(Parser)]
#[command(name = "kisekae-cli", version)]
struct Cli {
    /// Person photo. Defaults to the first `--person-preset`.
    #[arg(long, value_name = "PATH")]
    person: Option<PathBuf>,

    /// Garment photo. Defaults to the first `--clothes-preset`.
    #[arg(long, value_name = "PATH", conflicts_with = "prompt")]
    clothes: Option<PathBuf>,

    /// Design the garment from this description instead of a photo.
    #[arg(long)]
    prompt: Option<String>,

    /// Person image offered as a preset. Repeatable.
    #[arg(long = "person-preset", value_name = "PATH")]
    person_presets: Vec<PathBuf>,

    /// Garment image offered as a preset. Repeatable.
    #[arg(long = "clothes-preset", value_name = "PATH")]
    clothes_presets: Vec<PathBuf>,

    /// Where to write the generated image.
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Language of failure messages (`zh-CN` or `en`).
    #[arg(long, default_value = "zh-CN", value_parser = parse_locale)]
    locale: Locale,

    /// Extra attempts for each failed generation.
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Gemini API key.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Image-capable model name.
    #[arg(long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// API host, for proxies and test servers.
    #[arg(long, env = "GEMINI_BASE_URL")]
    base_url: Option<String>,
}

fn parse_locale(tag: &str) -> Result<Locale, String> {
    Locale::from_tag(tag).ok_or_else(|| format!("unsupported locale '{tag}' (expected zh-CN or en)"))
}

impl Cli {
    fn gateway_config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::from_env();
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key.as_str());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.as_str());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        config
    }
}

async fn run(cli: Cli) -> Result<PathBuf, CliError> {
    let config = cli.gateway_config();
    if !config.has_credential() {
        return Err(CliError::MissingCredential);
    }
    info!(model = config.model(), "generation gateway configured");
    let gateway = GeminiGateway::new(config);

    let mut session = Session::new(
        PresetRegistry::new(flow::load_all(&cli.person_presets)?),
        PresetRegistry::new(flow::load_all(&cli.clothes_presets)?),
    )
    .with_locale(cli.locale);

    let person = match &cli.person {
        Some(path) => flow::load_asset(path)?,
        None => session
            .person_presets()
            .list()
            .first()
            .cloned()
            .ok_or(CliError::MissingInput("person"))?,
    };

    let garment = match (cli.prompt, &cli.clothes) {
        (Some(prompt), _) => Garment::Design(prompt),
        (None, Some(path)) => Garment::Image(flow::load_asset(path)?),
        (None, None) => session
            .clothes_presets()
            .list()
            .first()
            .cloned()
            .map(Garment::Image)
            .ok_or(CliError::MissingInput("clothes"))?,
    };

    let result = flow::try_on(&mut session, &gateway, person, garment, cli.retries).await?;
    flow::write_result(&cli.output, &result)?;
    Ok(cli.output)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let dotenv = dotenv::dotenv();
    env_logger::init();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) => debug!(error = %err, "no environment file loaded"),
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn locale_accepts_region_variants() {
        assert_eq!(parse_locale("en-US").unwrap(), Locale::English);
        assert_eq!(parse_locale("zh").unwrap(), Locale::SimplifiedChinese);
        assert!(parse_locale("fr").is_err());
    }

    #[test]
    fn clothes_and_prompt_are_exclusive() {
        let parsed = Cli::try_parse_from([
            "kisekae-cli",
            "--person",
            "me.png",
            "--clothes",
            "coat.png",
            "--prompt",
            "red silk gown",
            "-o",
            "out.png",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn presets_are_repeatable() {
        let cli = Cli::try_parse_from([
            "kisekae-cli",
            "--person-preset",
            "a.png",
            "--person-preset",
            "b.png",
            "--locale",
            "en",
            "-o",
            "out.png",
        ])
        .unwrap();
        assert_eq!(cli.person_presets.len(), 2);
        assert_eq!(cli.locale, Locale::English);
        assert_eq!(cli.retries, 0);
    }

    #[test]
    fn flags_override_the_model() {
        let cli = Cli::try_parse_from([
            "kisekae-cli",
            "--model",
            "models/custom-image",
            "--base-url",
            "http://localhost:8080/",
            "-o",
            "out.png",
        ])
        .unwrap();
        let config = cli.gateway_config();
        assert_eq!(config.model(), "models/custom-image");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/custom-image:generateContent"
        );
    }
}
