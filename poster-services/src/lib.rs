//! # Poster Services
//!
//! Async collaborators for the poster editor.
//!
//! ## Collaborators
//!
//! - [`TextGenerator`] - translation, transliteration, font suggestions
//! - [`ImageGenerator`] - background images
//! - [`VerseSource`] - Bible verse lookup
//!
//! [`ContentService`] and [`VerseLookup`] wrap them so that a failing
//! provider never breaks editing: inputs come back unchanged and the
//! failure is logged.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod provider;
pub mod verse;

pub use config::ServiceConfig;
pub use content::{BackgroundKind, ContentService, FontRecommendation};
pub use error::{ServiceError, ServiceResult};
pub use http::{HttpGenerationClient, HttpVerseSource};
pub use provider::{ImageGenerator, TextGenerator, Verse, VerseSource};
pub use verse::VerseLookup;
