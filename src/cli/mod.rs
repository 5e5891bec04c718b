// Management CLI for the prompt2img gateway
//
// These subcommands replace an interactive menu: each one reads the config,
// applies a single change, and saves it back. Running with no subcommand
// starts the server.

use crate::cache::ImageCache;
use crate::config::{self, AppConfig};
use crate::error::{GatewayError, Result};
use crate::providers::{
    infer_profile, templatize_url, ProviderKind, ProviderProfile, ProviderRegistry, ResolutionMode,
};
use crate::utils::logging::mask_key;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// prompt2img - caching URL-to-image gateway for Chutes AI backends
#[derive(Parser, Debug)]
#[command(name = "prompt2img", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store the Chutes API key
    SetKey {
        /// Bearer credential (starts with cpk_ or sk_)
        key: String,
    },

    /// Select the model the gateway serves generations from
    SetModel {
        /// Model name as shown on the chute page
        model: String,

        /// Register a default profile of this kind when the model is unknown
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Register a provider profile for a model, inferred from a pasted
    /// example request
    Register {
        /// Model name to register the profile under
        model: String,

        /// File containing the example request; stdin when omitted
        #[arg(long)]
        example: Option<PathBuf>,

        /// Override the inferred endpoint URL template
        #[arg(long)]
        url: Option<String>,

        /// Override the inferred provider kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Override whether the backend accepts a negative prompt
        #[arg(long)]
        negative_prompt: Option<bool>,

        /// Override the inferred resolution mode
        #[arg(long, value_enum)]
        resolution_mode: Option<ResolutionArg>,
    },

    /// Show the current settings
    Show,

    /// Print the shareable link template for the active model
    Link,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    Unified,
    Native,
}

impl From<KindArg> for ProviderKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Unified => ProviderKind::Unified,
            KindArg::Native => ProviderKind::Native,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ResolutionArg {
    None,
    WidthHeight,
    ResolutionString,
}

impl From<ResolutionArg> for ResolutionMode {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::None => ResolutionMode::None,
            ResolutionArg::WidthHeight => ResolutionMode::WidthHeight,
            ResolutionArg::ResolutionString => ResolutionMode::ResolutionString,
        }
    }
}

/// Execute a management command against the loaded configuration.
pub fn run(command: Command, mut config: AppConfig) -> Result<()> {
    match command {
        Command::SetKey { key } => {
            if !config::is_valid_api_key(&key) {
                return Err(GatewayError::Config(
                    "invalid API key format: expected a cpk_/sk_ prefix and at least 20 characters"
                        .to_string(),
                ));
            }
            config.chutes.api_key = key;
            config.save()?;
            println!("API key saved ({})", mask_key(&config.chutes.api_key));
        }

        Command::SetModel { model, kind } => {
            if model.is_empty() {
                return Err(GatewayError::Config("model name cannot be empty".to_string()));
            }

            let registry = ProviderRegistry::new(config.profiles.clone());
            if registry.lookup(&model).is_none() {
                match kind {
                    Some(kind) => {
                        let profile = match ProviderKind::from(kind) {
                            ProviderKind::Unified => ProviderProfile::unified(),
                            ProviderKind::Native => ProviderProfile::native(),
                        };
                        println!("Unknown model, registering a default {kind:?} profile");
                        config.profiles.insert(model.clone(), profile);
                    }
                    None => {
                        return Err(GatewayError::NoProfile(format!(
                            "{model} (pass --kind unified|native, or use `register` with an example request)"
                        )));
                    }
                }
            }

            config.chutes.model = model;
            config.save()?;
            println!("Active model set to {}", config.chutes.model);
        }

        Command::Register {
            model,
            example,
            url,
            kind,
            negative_prompt,
            resolution_mode,
        } => {
            let text = match example {
                Some(path) => std::fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };

            // Inference is best-effort; the flags let the operator correct
            // any field before the profile is persisted.
            let mut profile = infer_profile(&text).into_profile();
            profile.url_template = templatize_url(&profile.url_template, &model);

            if let Some(url) = url {
                profile.url_template = url;
            }
            if let Some(kind) = kind {
                profile.kind = kind.into();
            }
            if let Some(negative) = negative_prompt {
                profile.supports_negative_prompt = negative;
            }
            if let Some(mode) = resolution_mode {
                profile.resolution_mode = mode.into();
            }

            config.profiles.insert(model.clone(), profile.clone());
            config.save()?;

            println!("Registered profile for {model}:");
            println!("  kind:             {:?}", profile.kind);
            println!("  url template:     {}", profile.url_template);
            println!("  negative prompt:  {}", profile.supports_negative_prompt);
            println!("  resolution mode:  {:?}", profile.resolution_mode);
        }

        Command::Show => {
            let registry = ProviderRegistry::new(config.profiles.clone());
            let cache = ImageCache::new(&config.cache.dir);

            println!("Current configuration:");
            println!("- API key: {}", mask_key(&config.chutes.api_key));

            if config.chutes.model.is_empty() {
                println!("- Model: not set");
            } else {
                match registry.lookup(&config.chutes.model) {
                    Some(profile) => {
                        println!("- Model: {} ({:?})", config.chutes.model, profile.kind)
                    }
                    None => println!("- Model: {} (no profile!)", config.chutes.model),
                }
            }

            println!(
                "- Cache: {} ({} images)",
                config.cache.dir,
                cache.entry_count()
            );
            println!(
                "- Built-in models: {}",
                ProviderRegistry::builtin_models().join(", ")
            );
            if !config.profiles.is_empty() {
                let mut names: Vec<_> = config.profiles.keys().cloned().collect();
                names.sort();
                println!("- Registered models: {}", names.join(", "));
            }
        }

        Command::Link => {
            let registry = ProviderRegistry::new(config.profiles.clone());
            let profile = registry
                .lookup(&config.chutes.model)
                .ok_or_else(|| GatewayError::NoProfile(config.chutes.model.clone()))?;

            let base = format!(
                "http://{}:{}/prompt",
                config.server.display_host, config.server.port
            );

            // Only the segments the active profile can act on are shown.
            let mut template = format!("{base}/[PROMPT]");
            let mut sample = format!("{base}/{}", urlencoding::encode("a red fox, watercolor"));
            if profile.supports_negative_prompt {
                template.push_str("/[NEGATIVE_PROMPT]");
                sample.push_str("/blurry");
            }
            if profile.resolution_mode != ResolutionMode::None {
                template.push_str("/[WIDTH]x[HEIGHT]");
                sample.push_str("/768x1024");
            }

            println!("Link template: {template}");
            println!("Example:       {sample}");
        }
    }

    Ok(())
}
