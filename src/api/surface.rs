use serde::{Deserialize, Serialize};

use crate::core::projection::BarGeometry;
use crate::error::EngineResult;
use crate::motion::transition::{TransitionPlan, TransitionTiming};

/// Persistent bar surface for one task.
///
/// Holds at most one active transition plan and the wall-clock time it
/// started. A new draw samples whatever is currently on screen, exits
/// still mid-shrink included, and uses that as the next plan's start, so
/// interrupted animations hand over without a visual jump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSurface {
    active: Option<ActivePlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ActivePlan {
    plan: TransitionPlan,
    started_at_ms: f64,
}

impl ChartSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any draw has happened yet (the surface stays hidden until
    /// the first one).
    #[must_use]
    pub fn has_drawn(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a transition to `targets`, interrupting the current plan by
    /// sampling it at `now_ms` for the start geometry.
    pub fn begin(
        &mut self,
        now_ms: f64,
        targets: &[BarGeometry],
        plot_height: f64,
        timing: TransitionTiming,
    ) -> EngineResult<&TransitionPlan> {
        let previous = self.rendered_bars(now_ms);
        let plan = TransitionPlan::between(&previous, targets, plot_height, timing)?;
        let active = self.active.insert(ActivePlan {
            plan,
            started_at_ms: now_ms,
        });
        Ok(&active.plan)
    }

    /// Bars visible at `now_ms` (empty before the first draw).
    #[must_use]
    pub fn rendered_bars(&self, now_ms: f64) -> Vec<BarGeometry> {
        match &self.active {
            Some(active) => active.plan.sample(now_ms - active.started_at_ms),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        match &self.active {
            Some(active) => !active.plan.is_complete(now_ms - active.started_at_ms),
            None => false,
        }
    }

    #[must_use]
    pub fn plan(&self) -> Option<&TransitionPlan> {
        self.active.as_ref().map(|active| &active.plan)
    }

    /// Start time of the active plan, shared with the readout counter.
    #[must_use]
    pub fn started_at_ms(&self) -> Option<f64> {
        self.active.as_ref().map(|active| active.started_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartSurface;
    use crate::core::projection::BarGeometry;
    use crate::motion::transition::TransitionTiming;

    const PLOT_HEIGHT: f64 = 500.0;

    fn bar(index: usize, height: f64) -> BarGeometry {
        BarGeometry {
            index,
            x: 100.0 * index as f64,
            y: PLOT_HEIGHT - height,
            width: 80.0,
            height,
        }
    }

    #[test]
    fn surface_is_empty_until_the_first_draw() {
        let surface = ChartSurface::new();
        assert!(!surface.has_drawn());
        assert!(surface.rendered_bars(1234.0).is_empty());
        assert!(!surface.is_animating(1234.0));
    }

    #[test]
    fn interrupting_draw_starts_from_sampled_geometry() {
        let mut surface = ChartSurface::new();
        let first = [bar(0, 100.0), bar(1, 200.0)];
        surface
            .begin(1000.0, &first, PLOT_HEIGHT, TransitionTiming::default())
            .expect("first draw");

        // Halfway through, redraw toward taller bars.
        let carried = surface.rendered_bars(1400.0);
        let second = [bar(0, 300.0), bar(1, 400.0)];
        surface
            .begin(1400.0, &second, PLOT_HEIGHT, TransitionTiming::default())
            .expect("second draw");

        // At its own t=0 the new plan shows exactly the carried geometry.
        assert_eq!(surface.rendered_bars(1400.0), carried);
        assert!(surface.is_animating(1400.0));
    }

    #[test]
    fn animation_settles_on_the_targets() {
        let mut surface = ChartSurface::new();
        let targets = [bar(0, 100.0), bar(1, 200.0)];
        surface
            .begin(0.0, &targets, PLOT_HEIGHT, TransitionTiming::default())
            .expect("draw");

        let total = surface.plan().expect("plan").total_duration_ms();
        assert_eq!(surface.rendered_bars(total), targets.to_vec());
        assert!(!surface.is_animating(total));
    }
}
