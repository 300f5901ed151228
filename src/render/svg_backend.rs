use crate::error::EngineResult;
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

/// Text backend emitting one standalone SVG document per frame.
///
/// No system dependencies and byte-deterministic output, which makes it
/// the backend for demos and golden render tests.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the most recent `render`.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Renders a frame without keeping renderer state.
    pub fn render_to_string(frame: &RenderFrame) -> EngineResult<String> {
        frame.validate()?;

        let mut out = String::with_capacity(1024);
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {:.2} {:.2}\">\n",
            frame.viewport.width, frame.viewport.height
        ));

        for rect in &frame.rects {
            let (fill, opacity) = css_fill(rect.fill);
            out.push_str(&format!(
                "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{fill}\"{opacity}/>\n",
                rect.x, rect.y, rect.width, rect.height
            ));
        }
        for line in &frame.lines {
            let (stroke, opacity) = css_stroke(line.color);
            out.push_str(&format!(
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{stroke}\" stroke-width=\"{:.2}\"{opacity}/>\n",
                line.x1, line.y1, line.x2, line.y2, line.stroke_width
            ));
        }
        for text in &frame.texts {
            let (fill, opacity) = css_fill(text.color);
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            out.push_str(&format!(
                "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.2}\" fill=\"{fill}\"{opacity} text-anchor=\"{anchor}\">{}</text>\n",
                text.x,
                text.y,
                text.font_size_px,
                escape_text(&text.text)
            ));
        }

        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> EngineResult<()> {
        self.document = Self::render_to_string(frame)?;
        Ok(())
    }
}

fn css_fill(color: Color) -> (String, String) {
    css_paint(color, " fill-opacity")
}

fn css_stroke(color: Color) -> (String, String) {
    css_paint(color, " stroke-opacity")
}

fn css_paint(color: Color, opacity_attr: &str) -> (String, String) {
    let (r, g, b) = color.to_rgb8();
    let paint = format!("#{r:02x}{g:02x}{b:02x}");
    let opacity = if color.alpha < 1.0 {
        format!("{opacity_attr}=\"{:.3}\"", color.alpha)
    } else {
        String::new()
    };
    (paint, opacity)
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::SvgRenderer;
    use crate::core::Viewport;
    use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

    fn frame() -> RenderFrame {
        RenderFrame::new(Viewport::new(900.0, 556.24))
            .with_rect(RectPrimitive::new(
                20.0,
                100.0,
                80.0,
                400.0,
                Color::from_hex(0x29B6F6),
            ))
            .with_text(TextPrimitive::new(
                "1150.00 (+150.00$)",
                450.0,
                16.0,
                14.0,
                Color::BLACK,
                TextHAlign::Center,
            ))
    }

    #[test]
    fn document_carries_viewbox_fills_and_anchors() {
        let svg = SvgRenderer::render_to_string(&frame()).expect("render");
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("viewBox=\"0 0 900.00 556.24\""));
        assert!(svg.contains("fill=\"#29b6f6\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn markup_characters_in_labels_are_escaped() {
        let frame = RenderFrame::new(Viewport::new(100.0, 100.0)).with_text(TextPrimitive::new(
            "a<b & \"c\"",
            10.0,
            10.0,
            12.0,
            Color::BLACK,
            TextHAlign::Left,
        ));
        let svg = SvgRenderer::render_to_string(&frame).expect("render");
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
    }

    #[test]
    fn renderer_keeps_the_last_document() {
        let mut renderer = SvgRenderer::new();
        renderer.render(&frame()).expect("render");
        assert!(renderer.document().contains("<rect "));
    }

    #[test]
    fn invalid_frames_are_refused() {
        let mut bad = frame();
        bad.rects[0].width = f64::NAN;
        assert!(SvgRenderer::render_to_string(&bad).is_err());
    }
}
