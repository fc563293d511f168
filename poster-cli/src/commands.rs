//! Subcommand implementations.
//!
//! Every command returns a JSON value; `main` prints it.

use std::sync::Arc;

use anyhow::Context;
use poster_core::{
    accent_style, segment_text, text_style, HandleTarget, HighlightCache, PointerEvent,
    PosterDocument, PosterEditor, PosterMode, Template, TextColor, TextEffect,
};
use poster_services::{
    ContentService, HttpGenerationClient, HttpVerseSource, ServiceConfig, VerseLookup,
};
use serde_json::{json, Value};

use crate::{Command, DragArgs};

/// Run `command`.
///
/// # Errors
///
/// Returns an error if a service client cannot be built or a verse is not
/// found. Generation failures are not errors: the input comes back.
pub async fn run(command: Command, services: &ServiceConfig) -> anyhow::Result<Value> {
    match command {
        Command::Highlight { text, mode } => Ok(highlight(&text, mode.into())),
        Command::Style {
            template,
            effect,
            color,
        } => Ok(style(template, effect, &color)),
        Command::Drag(args) => Ok(drag(&args)),
        Command::Verse { reference, version } => verse(services, &reference, &version).await,
        Command::Translate {
            text,
            to,
            reference,
        } => {
            let content = content_service(services)?;
            let translated = if reference {
                content.translate_reference(&text, &to).await
            } else {
                content.translate(&text, &to).await
            };
            Ok(json!({ "language": to, "text": translated }))
        }
        Command::Transliterate { word } => {
            let content = content_service(services)?;
            Ok(json!({ "word": word, "transliteration": content.transliterate(&word).await }))
        }
        Command::Fonts { mood, catalog } => {
            let content = content_service(services)?;
            let recommendation = content.recommend_fonts(&mood, &catalog).await;
            Ok(serde_json::to_value(recommendation)?)
        }
    }
}

/// Emphasized words and rendered runs of `text`.
#[must_use]
pub fn highlight(text: &str, mode: PosterMode) -> Value {
    let mut cache = HighlightCache::new();
    let set = cache.get(mode, text);
    json!({
        "words": set.words(),
        "segments": segment_text(text, &set),
    })
}

/// CSS for the headline and accent line.
#[must_use]
pub fn style(template: Template, effect: TextEffect, color: &str) -> Value {
    let color = TextColor::parse(color);
    let template_style = template.style();
    json!({
        "template": template_style,
        "headline": text_style(effect, &color).to_css(),
        "accent": accent_style(effect, &color).to_css(),
    })
}

/// Replay a drag on a fresh document and report the resulting layout.
#[must_use]
pub fn drag(args: &DragArgs) -> Value {
    let mut document = PosterDocument::default();
    document.aspect = args.aspect;
    let mut editor = PosterEditor::new(document);
    editor.set_display_scale(args.display_scale);

    let target = HandleTarget::new(args.layer.into(), args.handle.into());
    let steps = args.steps.max(1);
    editor.process_event(&PointerEvent::down(target, 0.0, 0.0));
    for step in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let t = step as f32 / steps as f32;
        editor.process_event(&PointerEvent::moved(args.dx * t, args.dy * t));
    }
    editor.process_event(&PointerEvent::up(args.dx, args.dy));

    let document = editor.into_document();
    json!({
        "aspect": document.aspect,
        "canvas": poster_core::aspect_to_pixel_size(document.aspect),
        "layers": document.layers(),
    })
}

async fn verse(services: &ServiceConfig, reference: &str, version: &str) -> anyhow::Result<Value> {
    let source = HttpVerseSource::new(services).context("building verse client")?;
    let lookup = VerseLookup::new(Arc::new(source), services.default_version.clone());
    let verse = lookup.lookup(reference, version).await?;
    Ok(serde_json::to_value(verse)?)
}

fn content_service(services: &ServiceConfig) -> anyhow::Result<ContentService> {
    let client = Arc::new(HttpGenerationClient::new(services).context("building generation client")?);
    Ok(ContentService::new(client.clone()).with_image_generator(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandleArg, LayerArg};
    use poster_core::AspectRatio;

    fn drag_args(layer: LayerArg, handle: HandleArg, dx: f32, steps: u32) -> DragArgs {
        DragArgs {
            layer,
            handle,
            aspect: AspectRatio::Square,
            display_scale: 1.0,
            dx,
            dy: 0.0,
            steps,
        }
    }

    #[test]
    fn test_highlight_verse() {
        let out = highlight("For God so loved the world", PosterMode::Verse);
        let words: Vec<&str> = out["words"]
            .as_array()
            .expect("array")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(words.contains(&"god"));
        assert!(!words.contains(&"for"));
    }

    #[test]
    fn test_highlight_event_is_empty() {
        let out = highlight("Harvest Festival of Grace", PosterMode::Event);
        assert_eq!(out["words"], json!([]));
    }

    #[test]
    fn test_style_gradient_headline() {
        let out = style(Template::Modern, TextEffect::None, "linear-gradient(red, blue)");
        let headline = out["headline"].as_str().expect("css");
        assert!(headline.contains("background-clip: text"));
        assert!(out["accent"].as_str().expect("css").contains("#ffffff"));
    }

    #[test]
    fn test_drag_move_splits_into_steps() {
        // 108 screen px on a 1080 px canvas at scale 1 is 10%.
        let out = drag(&drag_args(LayerArg::Logo, HandleArg::Move, 108.0, 4));
        let x = out["layers"]["logo"]["position"]["x"].as_f64().expect("x");
        assert!((x - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_drag_scale_clamps() {
        let out = drag(&drag_args(LayerArg::Text, HandleArg::Scale, 5000.0, 1));
        let scale = out["layers"]["text"]["scale"].as_f64().expect("scale");
        assert!((scale - 3.0).abs() < 1e-6);
    }
}
