//! Floatfield Demo - scripted email entry
//!
//! Drives a themed email field through focus, typing, blur and validation
//! for each input given on the command line, ticking a transition scheduler
//! between steps the way a host's frame loop would. After every step the
//! resolved state and presented layers are logged, or printed as JSON lines
//! with `--json`.

mod theme;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use floatfield_animation::{AnimationPort, TransitionScheduler};
use floatfield_core::Rect;
use floatfield_widgets::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Headless floating-label text field demo
#[derive(Parser, Debug)]
#[command(name = "floatfield-demo")]
#[command(about = "Scripted email entry on a floating-label text field")]
#[command(version)]
struct Args {
    /// Texts to type, one edit session each
    #[arg(default_values_t = ["not-an-email".to_string(), "user@example.com".to_string()])]
    inputs: Vec<String>,

    /// Style file overriding the built-in theme
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Print the effective style as TOML and exit
    #[arg(long)]
    dump_style: bool,

    /// Reveal the success indicator at edit end
    #[arg(long)]
    immediate: bool,

    /// Field width
    #[arg(long, default_value = "400")]
    width: f32,

    /// Field height
    #[arg(long, default_value = "60")]
    height: f32,

    /// Frame interval in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Print snapshots as JSON lines
    #[arg(long)]
    json: bool,
}

type DemoField = FloatingTextField<TransitionScheduler<FieldLayer>>;

/// Upper bound on frames spent settling one step
const MAX_SETTLE_FRAMES: usize = 600;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.style {
        Some(path) => {
            tracing::info!("Loading style: {}", path.display());
            FieldConfig::from_toml_file(path)
                .with_context(|| format!("failed to load style {}", path.display()))?
        }
        None => theme::travel_theme(),
    };

    if args.dump_style {
        print!("{}", config.to_toml_string().context("failed to serialize style")?);
        return Ok(());
    }

    let rules = RuleSet::try_new([ValidationRule::new(theme::EMAIL_PATTERN, "Email not valid")])
        .context("invalid email rule")?;

    let mut field = floating_text_field()
        .config(config)
        .bounds(Rect::new(0.0, 0.0, args.width, args.height))
        .title("Email")
        .selected_title("Email")
        .placeholder("Email")
        .rules(rules)
        .immediate_validation(args.immediate)
        .build_with_port(TransitionScheduler::new());

    let size = field.intrinsic_content_size();
    tracing::info!(width = size.width, height = size.height, "intrinsic size");

    let dt = args.frame_ms as f32 / 1000.0;
    let recorder = Recorder { json: args.json };

    recorder.snapshot(&field, "initial");
    for input in &args.inputs {
        field.become_first_responder();
        settle(&mut field, dt);
        recorder.snapshot(&field, "focus");

        for (end, _) in input.char_indices().skip(1).chain([(input.len(), ' ')]) {
            field.on_text_input(&input[..end]);
            field.port_mut().tick(dt);
        }
        settle(&mut field, dt);
        recorder.snapshot(&field, "typed");

        field.resign_first_responder();
        settle(&mut field, dt);
        recorder.snapshot(&field, "blur");

        let passed = field.validate();
        settle(&mut field, dt);
        tracing::info!(input = %input, passed, "validated");
        recorder.snapshot(&field, "validate");
    }

    Ok(())
}

/// Tick until every layer reached its target
fn settle(field: &mut DemoField, dt: f32) {
    let mut frames = 0;
    while field.port().has_active_transitions() && frames < MAX_SETTLE_FRAMES {
        field.port_mut().tick(dt);
        frames += 1;
    }
    tracing::trace!(frames, "settled");
}

struct Recorder {
    json: bool,
}

impl Recorder {
    fn snapshot(&self, field: &DemoField, step: &str) {
        let plan = field.render_plan();
        let alpha = |layer: FieldLayer| {
            field
                .port()
                .presentation(layer)
                .map_or(0.0, |presented| presented.alpha)
        };
        let title_alpha = alpha(FieldLayer::Title);
        let error_alpha = alpha(FieldLayer::ErrorLabel);
        let success_alpha = alpha(FieldLayer::SuccessIndicator);

        if self.json {
            let line = serde_json::json!({
                "step": step,
                "text": field.text(),
                "placeholder": field.placeholder(),
                "editing": field.is_editing(),
                "title": plan.title.text,
                "title_visible": field.is_title_visible(),
                "title_alpha": title_alpha,
                "error": plan.error.text,
                "error_alpha": error_alpha,
                "success_alpha": success_alpha,
                "underline": {
                    "y": plan.underline.frame.y,
                    "height": plan.underline.frame.height,
                    "color": plan.underline.color.to_hex_string(),
                },
                "border": {
                    "stroke": plan.border.stroke.to_hex_string(),
                    "fill": plan.border.fill.to_hex_string(),
                },
            });
            println!("{line}");
        } else {
            tracing::info!(
                step,
                text = field.text().unwrap_or_default(),
                title = plan.title.text.as_deref().unwrap_or_default(),
                title_alpha,
                error = plan.error.text.as_deref().unwrap_or_default(),
                error_alpha,
                success_alpha,
                underline = %plan.underline.color.to_hex_string(),
                "snapshot"
            );
        }
    }
}
