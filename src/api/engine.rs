use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::readout::Readout;
use crate::api::scene_builder::build_frame;
use crate::api::surface::ChartSurface;
use crate::api::task::TaskSpec;
use crate::core::band_scale::BandScale;
use crate::core::layout::ChartLayout;
use crate::core::linear_scale::LinearScale;
use crate::core::projection::project_bars;
use crate::error::{EngineError, EngineResult};
use crate::input::debounce::{DEFAULT_DEBOUNCE_MS, DebounceTimer};
use crate::input::form::FormState;
use crate::motion::counter::{CounterAnimation, CounterStart};
use crate::motion::transition::TransitionTiming;
use crate::render::{Color, RenderFrame, Renderer};

/// d3 scaleBand `.padding(0.1)` equivalent.
const BAND_PADDING: f64 = 0.1;

/// Whether a task runs interactively or as a static menu preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineMode {
    #[default]
    Interactive,
    /// Menu preview: placeholder text in every field, bars animate on
    /// construction, the readout counter never runs.
    ChartOnly,
}

impl EngineMode {
    const PREVIEW_FIELD_TEXT: &'static str = "5";

    #[must_use]
    fn default_field_text(self) -> &'static str {
        match self {
            Self::Interactive => "",
            Self::ChartOnly => Self::PREVIEW_FIELD_TEXT,
        }
    }
}

/// Engine bootstrap configuration.
///
/// Serializable so hosts can persist setup without inventing their own
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default)]
    pub timing: TransitionTiming,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: f64,
    #[serde(default)]
    pub mode: EngineMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::default(),
            timing: TransitionTiming::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            mode: EngineMode::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: f64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EngineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.layout.validate()?;
        self.timing.validate()?;
        if !self.debounce_ms.is_finite() || self.debounce_ms < 0.0 {
            return Err(EngineError::InvalidData(format!(
                "debounce delay {} must be finite and >= 0",
                self.debounce_ms
            )));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> EngineResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| EngineError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> EngineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| EngineError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_debounce_ms() -> f64 {
    DEFAULT_DEBOUNCE_MS
}

/// What one `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// A debounced draw fired on this tick.
    pub drew: bool,
    /// This tick produced the engine's very first chart, for hosts that
    /// run a one-time affordance (the original scrolled the chart into
    /// view here).
    pub first_draw: bool,
    /// Something is still moving; the host should repaint.
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct ActiveScales {
    pub(super) band: BandScale,
    pub(super) y_axis: LinearScale,
    pub(super) sequence: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ActiveCounter {
    counter: CounterAnimation,
    started_at_ms: f64,
}

/// One task's interactive chart: form, debounce, bar surface, counter.
///
/// The engine never reads a wall clock; hosts pass `now_ms` into every
/// time-dependent call, which keeps the whole animation pipeline
/// deterministic and testable.
pub struct TaskEngine<R: Renderer> {
    spec: TaskSpec,
    config: EngineConfig,
    form: FormState,
    debounce: DebounceTimer,
    surface: ChartSurface,
    scales: Option<ActiveScales>,
    counter: Option<ActiveCounter>,
    initial_draw_pending: bool,
    draw_count: u64,
    renderer: R,
}

impl<R: Renderer> TaskEngine<R> {
    pub fn new(spec: TaskSpec, config: EngineConfig, renderer: R) -> EngineResult<Self> {
        spec.validate()?;
        config.validate()?;
        let form = FormState::new(&spec.fields, config.mode.default_field_text());
        let debounce = DebounceTimer::new(config.debounce_ms)?;
        debug!(task = %spec.name, mode = ?config.mode, "task engine created");
        Ok(Self {
            spec,
            config,
            form,
            debounce,
            surface: ChartSurface::new(),
            scales: None,
            counter: None,
            initial_draw_pending: config.mode == EngineMode::ChartOnly,
            draw_count: 0,
            renderer,
        })
    }

    /// Applies one field edit. Accepted edits re-arm the redraw debounce;
    /// rejected edits change nothing and return `Ok(false)`.
    pub fn set_field_text(&mut self, key: &str, text: &str, now_ms: f64) -> EngineResult<bool> {
        let accepted = self.form.set_text(key, text)?;
        if accepted {
            trace!(task = %self.spec.name, field = key, "field edit accepted");
            self.debounce.arm(now_ms);
        } else {
            debug!(task = %self.spec.name, field = key, "field edit rejected");
        }
        Ok(accepted)
    }

    /// Advances the engine clock: fires a due debounce (drawing if the
    /// form parses) and reports whether anything still needs repainting.
    pub fn tick(&mut self, now_ms: f64) -> EngineResult<TickOutcome> {
        if self.initial_draw_pending {
            self.initial_draw_pending = false;
            self.debounce.arm(now_ms);
        }

        let mut drew = false;
        if self.debounce.fire(now_ms) {
            drew = self.draw(now_ms)?;
        }

        Ok(TickOutcome {
            drew,
            first_draw: drew && self.draw_count == 1,
            animating: self.is_animating(now_ms),
        })
    }

    /// Recomputes the sequence and replaces the bar plan and counter.
    ///
    /// Invalid or incomplete input never surfaces to the caller: the draw
    /// is suppressed, the previous chart state stays, and the reason goes
    /// to the debug log.
    fn draw(&mut self, now_ms: f64) -> EngineResult<bool> {
        if !self.form.is_complete() {
            debug!(task = %self.spec.name, "draw suppressed: form incomplete");
            return Ok(false);
        }
        let values = match self.form.parse_all() {
            Ok(values) => values,
            Err(err) => {
                debug!(task = %self.spec.name, error = %err, "draw suppressed: unparseable field");
                return Ok(false);
            }
        };
        let sequence = match self.spec.model.sequence(&values) {
            Ok(sequence) => sequence,
            Err(err) => {
                debug!(task = %self.spec.name, error = %err, "draw suppressed: degenerate parameters");
                return Ok(false);
            }
        };

        let initial = sequence[0];
        let last = sequence[sequence.len() - 1];
        let plot_width = self.config.layout.plot_width();
        let plot_height = self.config.layout.plot_height();

        let band = BandScale::new(sequence.len(), (0.0, plot_width))?.with_padding(BAND_PADDING)?;
        let y_axis = LinearScale::new(self.spec.model.y_domain(initial, last), (plot_height, 0.0))?;
        let targets = project_bars(&sequence, &band, &y_axis, plot_height)?;

        // Sample the readout before the new plan replaces the old clock.
        let seed = self.current_readout(now_ms);
        let plan = self
            .surface
            .begin(now_ms, &targets, plot_height, self.config.timing)?;
        let (hold_ms, total_ms) = (plan.value_hold_ms(), plan.value_total_ms());

        self.counter = match self.config.mode {
            EngineMode::Interactive => {
                let answer = self.spec.model.answer(&sequence)?;
                Some(ActiveCounter {
                    counter: CounterAnimation::new(
                        CounterStart {
                            value: seed.value,
                            annotation: seed.annotation,
                        },
                        answer,
                        last - initial,
                        hold_ms,
                        total_ms,
                    )?,
                    started_at_ms: now_ms,
                })
            }
            EngineMode::ChartOnly => None,
        };

        self.scales = Some(ActiveScales {
            band,
            y_axis,
            sequence,
        });
        self.draw_count += 1;
        debug!(
            task = %self.spec.name,
            bars = targets.len(),
            draw = self.draw_count,
            "chart redraw"
        );
        Ok(true)
    }

    /// Builds the scene for `now_ms`: empty until the first draw, then
    /// sampled bars plus axes plus (in interactive mode) the readout.
    pub fn render_frame(&self, now_ms: f64) -> EngineResult<RenderFrame> {
        let Some(scales) = &self.scales else {
            return Ok(RenderFrame::new(self.config.layout.viewport()));
        };

        let bars = self.surface.rendered_bars(now_ms);
        let readout = match self.config.mode {
            EngineMode::Interactive => Some(self.current_readout(now_ms)),
            EngineMode::ChartOnly => None,
        };
        build_frame(
            self.config.layout,
            scales.band,
            scales.y_axis,
            &bars,
            Color::from_hex(self.spec.color),
            readout.as_ref(),
        )
    }

    /// Renders the current scene through the engine's backend.
    pub fn render(&mut self, now_ms: f64) -> EngineResult<()> {
        let frame = self.render_frame(now_ms)?;
        self.renderer.render(&frame)
    }

    /// Readout numbers at `now_ms` (initial zeros before the first draw).
    #[must_use]
    pub fn current_readout(&self, now_ms: f64) -> Readout {
        match &self.counter {
            Some(active) => Readout::from(active.counter.sample(now_ms - active.started_at_ms)),
            None => Readout::initial(),
        }
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        let counter_running = match &self.counter {
            Some(active) => !active.counter.is_complete(now_ms - active.started_at_ms),
            None => false,
        };
        self.surface.is_animating(now_ms) || counter_running
    }

    #[must_use]
    pub fn spec(&self) -> &TaskSpec {
        &self.spec
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> EngineMode {
        self.config.mode
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }

    /// Successful draws so far.
    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub(super) fn scales(&self) -> Option<&ActiveScales> {
        self.scales.as_ref()
    }
}
