//! # Poster CLI
//!
//! Command-line driver for the poster core and its collaborators.
//!
//! ## Usage
//!
//! ```bash
//! poster highlight "For God so loved the world"
//! poster drag --layer text --handle scale --dx 200 --dy 0
//! poster translate --to Spanish "For God so loved the world"
//! poster verse "John 3:16" --version NIV
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Service endpoints plus the chosen command
//! - [`commands`] - One function per subcommand, each producing JSON

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use poster_core::{AspectRatio, Handle, LayerId, PosterMode, Template, TextEffect};
use poster_services::config::{DEFAULT_GENERATION_URL, DEFAULT_VERSE_URL, DEFAULT_VERSION};
use poster_services::ServiceConfig;

/// Command-line arguments for poster.
#[derive(Debug, Clone, Parser)]
#[command(name = "poster")]
#[command(about = "Compose verse and event posters from the command line")]
#[command(version)]
pub struct CliArgs {
    /// Text/image generation endpoint
    #[arg(long, env = "POSTER_GENERATION_URL", default_value = DEFAULT_GENERATION_URL)]
    pub generation_url: String,

    /// Bible verse API base URL
    #[arg(long, env = "POSTER_VERSE_URL", default_value = DEFAULT_VERSE_URL)]
    pub verse_url: String,

    /// Bearer token for the generation endpoint
    #[arg(long, env = "POSTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Bible version used when the requested one has no match
    #[arg(long, env = "POSTER_DEFAULT_VERSION", default_value = DEFAULT_VERSION)]
    pub default_version: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show which words of a headline are emphasized
    Highlight {
        /// Headline text
        text: String,
        /// Poster mode
        #[arg(long, value_enum, default_value_t = ModeArg::Verse)]
        mode: ModeArg,
    },
    /// Print the CSS for a template, effect and color
    Style {
        /// Overlay template
        #[arg(long, default_value = "classic")]
        template: Template,
        /// Text effect
        #[arg(long, default_value = "none")]
        effect: TextEffect,
        /// Solid color or CSS gradient
        #[arg(long, default_value = "#ffffff")]
        color: String,
    },
    /// Replay a drag gesture on a fresh poster and print the layout
    Drag(DragArgs),
    /// Look a verse up
    Verse {
        /// Reference, e.g. "John 3:16"
        reference: String,
        /// Bible version
        #[arg(long, default_value = "")]
        version: String,
    },
    /// Translate text (or a verse reference)
    Translate {
        /// Text to translate
        text: String,
        /// Target language
        #[arg(long)]
        to: String,
        /// Treat the text as a verse reference
        #[arg(long)]
        reference: bool,
    },
    /// Phonetic rendering of a word
    Transliterate {
        /// Word to transliterate
        word: String,
    },
    /// Suggest fonts for a mood
    Fonts {
        /// Mood description
        mood: String,
        /// Allowed font values
        #[arg(long, value_delimiter = ';')]
        catalog: Vec<String>,
    },
}

/// Arguments of the `drag` subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct DragArgs {
    /// Layer to drag
    #[arg(long, value_enum, default_value_t = LayerArg::Text)]
    pub layer: LayerArg,
    /// Handle pressed
    #[arg(long, value_enum, default_value_t = HandleArg::Move)]
    pub handle: HandleArg,
    /// Canvas shape
    #[arg(long, default_value = "portrait")]
    pub aspect: AspectRatio,
    /// On-screen zoom of the canvas
    #[arg(long, default_value = "1.0")]
    pub display_scale: f32,
    /// Total horizontal screen displacement
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub dx: f32,
    /// Total vertical screen displacement
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub dy: f32,
    /// Number of move events the gesture is split into
    #[arg(long, default_value = "1")]
    pub steps: u32,
}

/// Poster mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Verse poster
    Verse,
    /// Event poster
    Event,
}

impl From<ModeArg> for PosterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Verse => Self::Verse,
            ModeArg::Event => Self::Event,
        }
    }
}

/// Layer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayerArg {
    /// Text block
    Text,
    /// Logo image
    Logo,
    /// Photo image
    Photo,
}

impl From<LayerArg> for LayerId {
    fn from(layer: LayerArg) -> Self {
        match layer {
            LayerArg::Text => Self::Text,
            LayerArg::Logo => Self::Logo,
            LayerArg::Photo => Self::Photo,
        }
    }
}

/// Handle argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HandleArg {
    /// Layer body
    Move,
    /// Side handle
    Resize,
    /// Corner handle
    Scale,
}

impl From<HandleArg> for Handle {
    fn from(handle: HandleArg) -> Self {
        match handle {
            HandleArg::Move => Self::Move,
            HandleArg::Resize => Self::Resize,
            HandleArg::Scale => Self::Scale,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Collaborator endpoints.
    pub services: ServiceConfig,
    /// Command to run.
    pub command: Command,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let services = ServiceConfig::new()
            .with_generation_url(args.generation_url)
            .with_verse_url(args.verse_url)
            .with_api_key(args.api_key)
            .with_default_version(args.default_version)
            .with_timeout(std::time::Duration::from_secs(args.timeout_secs.max(1)));
        Self {
            services,
            command: args.command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_into_config() {
        let args = CliArgs::try_parse_from(["poster", "highlight", "For God so loved"])
            .expect("parse");
        let config = CliConfig::from(args);
        assert_eq!(config.services.default_version, DEFAULT_VERSION);
        assert!(config.services.api_key.is_none());
        assert!(matches!(
            config.command,
            Command::Highlight {
                mode: ModeArg::Verse,
                ..
            }
        ));
    }

    #[test]
    fn test_drag_arguments() {
        let args = CliArgs::try_parse_from([
            "poster", "drag", "--layer", "photo", "--handle", "scale", "--aspect", "square",
            "--dx", "-40", "--steps", "4",
        ])
        .expect("parse");
        let Command::Drag(drag) = args.command else {
            panic!("expected drag");
        };
        assert_eq!(drag.layer, LayerArg::Photo);
        assert_eq!(drag.handle, HandleArg::Scale);
        assert_eq!(drag.aspect, AspectRatio::Square);
        assert!((drag.dx + 40.0).abs() < f32::EPSILON);
        assert_eq!(drag.steps, 4);
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        assert!(CliArgs::try_parse_from(["poster", "style", "--template", "gothic"]).is_err());
    }
}
