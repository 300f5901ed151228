use interest_rs::api::{EngineConfig, TaskEngine, TaskSpec};
use interest_rs::render::SvgRenderer;
use std::fs;
use std::path::PathBuf;

const FRAME_STEP_MS: f64 = 16.0;

/// Types example values into each builtin task, ticks the engine frame by
/// frame until the bars and readout settle, and writes one SVG per task.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("interest-rs-gallery"));
    fs::create_dir_all(&output_dir)?;

    let gallery = [
        (
            TaskSpec::simple_interest(),
            [("capital", "1000"), ("interest", "5"), ("period_count", "3")],
            "simple_interest",
        ),
        (
            TaskSpec::capitalized_interest(),
            [("capital", "1000"), ("interest", "5"), ("profit", "1000")],
            "capitalized_interest",
        ),
        (
            TaskSpec::loan(),
            [("loan_amount", "1200"), ("interest", "12"), ("loan_duration", "1")],
            "loan",
        ),
    ];

    for (spec, edits, stem) in gallery {
        let mut engine = TaskEngine::new(spec, EngineConfig::default(), SvgRenderer::new())?;
        for (key, text) in edits {
            engine.set_field_text(key, text, 0.0)?;
        }

        // Drive the engine the way a host would: advance the clock one
        // frame at a time and repaint until nothing moves anymore.
        let mut now_ms = 0.0;
        loop {
            now_ms += FRAME_STEP_MS;
            let outcome = engine.tick(now_ms)?;
            engine.render(now_ms)?;
            if engine.draw_count() > 0 && !outcome.animating {
                break;
            }
        }

        let path = output_dir.join(format!("{stem}.svg"));
        fs::write(&path, engine.renderer().document())?;

        let frame = engine.render_frame(now_ms)?;
        println!(
            "{}: bars={} readout=\"{}\" -> {}",
            engine.spec().name,
            frame.rects.len(),
            engine.current_readout(now_ms).display_text(),
            path.display()
        );
    }

    Ok(())
}
