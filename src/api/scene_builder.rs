use crate::api::readout::Readout;
use crate::core::band_scale::BandScale;
use crate::core::layout::ChartLayout;
use crate::core::linear_scale::LinearScale;
use crate::core::projection::BarGeometry;
use crate::error::EngineResult;
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

const AXIS_STROKE_PX: f64 = 1.0;
const AXIS_TICK_LEN_PX: f64 = 6.0;
const AXIS_FONT_PX: f64 = 10.0;
const AXIS_LABEL_GAP_PX: f64 = 3.0;
const READOUT_FONT_PX: f64 = 14.0;
const Y_AXIS_TICK_TARGET: usize = 10;

/// Composes one frame: bars, then both axes, then the readout line.
///
/// Bars arrive in plot coordinates and may include mid-shrink exit bars
/// beyond the band count; the axes always describe the current data. The
/// margins shift everything into box space.
pub fn build_frame(
    layout: ChartLayout,
    band: BandScale,
    y_axis: LinearScale,
    bars: &[BarGeometry],
    accent: Color,
    readout: Option<&Readout>,
) -> EngineResult<RenderFrame> {
    layout.validate()?;
    let left = layout.margins.left;
    let top = layout.margins.top;
    let plot_width = layout.plot_width();
    let plot_height = layout.plot_height();
    let baseline = top + plot_height;

    let mut frame = RenderFrame::new(layout.viewport());

    for bar in bars {
        frame.push_rect(RectPrimitive::new(
            left + bar.x,
            top + bar.y,
            bar.width,
            bar.height,
            accent,
        ));
    }

    // X axis along the baseline, one 0-based period label per band.
    frame.push_line(LinePrimitive::new(
        left,
        baseline,
        left + plot_width,
        baseline,
        AXIS_STROKE_PX,
        Color::AXIS,
    ));
    for index in 0..band.count() {
        let center_x = left + band.center(index)?;
        frame.push_line(LinePrimitive::new(
            center_x,
            baseline,
            center_x,
            baseline + AXIS_TICK_LEN_PX,
            AXIS_STROKE_PX,
            Color::AXIS,
        ));
        frame.push_text(TextPrimitive::new(
            index.to_string(),
            center_x,
            baseline + AXIS_TICK_LEN_PX + AXIS_FONT_PX,
            AXIS_FONT_PX,
            Color::AXIS,
            TextHAlign::Center,
        ));
    }

    // Y axis on the right edge with round-valued ticks.
    let axis_x = left + plot_width;
    frame.push_line(LinePrimitive::new(
        axis_x,
        top,
        axis_x,
        baseline,
        AXIS_STROKE_PX,
        Color::AXIS,
    ));
    let ticks = y_axis.ticks(Y_AXIS_TICK_TARGET);
    let decimals = tick_decimals(&ticks);
    for tick in ticks {
        let tick_y = top + y_axis.map(tick)?;
        frame.push_line(LinePrimitive::new(
            axis_x,
            tick_y,
            axis_x + AXIS_TICK_LEN_PX,
            tick_y,
            AXIS_STROKE_PX,
            Color::AXIS,
        ));
        frame.push_text(TextPrimitive::new(
            format!("{:.*}", decimals, tick),
            axis_x + AXIS_TICK_LEN_PX + AXIS_LABEL_GAP_PX,
            tick_y + AXIS_FONT_PX / 2.0 - 1.0,
            AXIS_FONT_PX,
            Color::AXIS,
            TextHAlign::Left,
        ));
    }

    if let Some(readout) = readout {
        frame.push_text(TextPrimitive::new(
            readout.display_text(),
            left + plot_width,
            READOUT_FONT_PX,
            READOUT_FONT_PX,
            Color::BLACK,
            TextHAlign::Right,
        ));
    }

    Ok(frame)
}

/// Label precision from the tick step, capped so labels stay short.
fn tick_decimals(ticks: &[f64]) -> usize {
    let step = match ticks {
        [first, second, ..] => second - first,
        _ => return 0,
    };
    if step >= 1.0 || step <= 0.0 {
        return 0;
    }
    let decimals = -step.log10().floor();
    (decimals as usize).min(6)
}

#[cfg(test)]
mod tests {
    use super::{build_frame, tick_decimals};
    use crate::api::readout::Readout;
    use crate::core::band_scale::BandScale;
    use crate::core::layout::ChartLayout;
    use crate::core::linear_scale::LinearScale;
    use crate::core::projection::project_bars;
    use crate::render::Color;

    #[test]
    fn frame_carries_bars_axes_and_readout() {
        let layout = ChartLayout::default();
        let band = BandScale::new(4, (0.0, layout.plot_width()))
            .expect("band")
            .with_padding(0.1)
            .expect("padding");
        let y_bars = LinearScale::new((900.0, 1150.0), (layout.plot_height(), 0.0))
            .expect("bar scale");
        let values = [1000.0, 1050.0, 1100.0, 1150.0];
        let bars = project_bars(&values, &band, &y_bars, layout.plot_height()).expect("bars");

        let readout = Readout {
            value: 1150.0,
            annotation: 150.0,
            annotation_visible: true,
        };
        let frame = build_frame(
            layout,
            band,
            y_bars,
            &bars,
            Color::from_hex(0x29B6F6),
            Some(&readout),
        )
        .expect("frame");

        frame.validate().expect("valid frame");
        assert_eq!(frame.rects.len(), 4);
        // Two axis lines plus one tick line per label.
        assert!(frame.lines.len() > 2);
        assert!(frame.texts.iter().any(|t| t.text == "0"));
        assert!(frame.texts.iter().any(|t| t.text == "3"));
        assert!(
            frame
                .texts
                .iter()
                .any(|t| t.text == "1150.00 (+150.00$)")
        );
    }

    #[test]
    fn fractional_tick_steps_get_matching_decimals() {
        assert_eq!(tick_decimals(&[0.0, 0.5, 1.0]), 1);
        assert_eq!(tick_decimals(&[0.0, 100.0]), 0);
        assert_eq!(tick_decimals(&[42.0]), 0);
    }
}
