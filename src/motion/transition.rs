use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::projection::BarGeometry;
use crate::error::{EngineError, EngineResult};
use crate::motion::easing::{cubic_in_out, lerp};
use crate::motion::stagger::stagger_delay_ms;

/// Duration of one enter or update tween.
pub const DEFAULT_ANIMATION_MS: f64 = 750.0;

/// Duration of an exit tween, half an animation.
pub const DEFAULT_REMOVE_MS: f64 = DEFAULT_ANIMATION_MS / 2.0;

/// Durations shared by every plan an engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionTiming {
    pub animation_ms: f64,
    pub remove_ms: f64,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            animation_ms: DEFAULT_ANIMATION_MS,
            remove_ms: DEFAULT_REMOVE_MS,
        }
    }
}

impl TransitionTiming {
    pub fn validate(&self) -> EngineResult<()> {
        let valid = self.animation_ms.is_finite()
            && self.animation_ms > 0.0
            && self.remove_ms.is_finite()
            && self.remove_ms > 0.0;
        if !valid {
            return Err(EngineError::InvalidData(format!(
                "transition durations must be finite and > 0, got animation={} remove={}",
                self.animation_ms, self.remove_ms
            )));
        }
        Ok(())
    }
}

/// Which join phase a tween belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenKind {
    Enter,
    Update,
    Exit,
}

/// One bar's scheduled movement between two rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarTween {
    pub kind: TweenKind,
    pub from: BarGeometry,
    pub to: BarGeometry,
    pub delay_ms: f64,
    pub duration_ms: f64,
}

impl BarTween {
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    /// Normalized progress in `[0, 1]`, still un-eased.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= self.delay_ms { 1.0 } else { 0.0 };
        }
        ((elapsed_ms - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.end_ms()
    }

    /// Eased geometry at `elapsed_ms`.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> BarGeometry {
        let t = cubic_in_out(self.progress(elapsed_ms));
        BarGeometry {
            index: self.to.index,
            x: lerp(self.from.x, self.to.x, t),
            y: lerp(self.from.y, self.to.y, t),
            width: lerp(self.from.width, self.to.width, t),
            height: lerp(self.from.height, self.to.height, t),
        }
    }
}

/// Immutable schedule for one redraw.
///
/// Built by diffing the bars currently on screen against the next targets,
/// keyed by period index. Exits shrink in place first, surviving bars slide
/// after the exits clear, and new bars grow after the surviving bars settle.
/// A fresh draw replaces the whole plan; mid-flight geometry is carried in
/// through `previous`, never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionPlan {
    tweens: Vec<BarTween>,
    bar_count: usize,
    value_hold_ms: f64,
    value_total_ms: f64,
}

impl TransitionPlan {
    /// Plans the move from `previous` (sampled, possibly mid-flight) to
    /// `next` (projected targets, indexed `0..next.len()`).
    pub fn between(
        previous: &[BarGeometry],
        next: &[BarGeometry],
        plot_height: f64,
        timing: TransitionTiming,
    ) -> EngineResult<Self> {
        timing.validate()?;
        if !plot_height.is_finite() || plot_height <= 0.0 {
            return Err(EngineError::InvalidData(format!(
                "plot height {plot_height} must be finite and > 0"
            )));
        }
        if next.iter().enumerate().any(|(i, bar)| bar.index != i) {
            return Err(EngineError::InvalidData(
                "target bars must be indexed by their position".to_owned(),
            ));
        }

        let prev: BTreeMap<usize, BarGeometry> =
            previous.iter().map(|bar| (bar.index, *bar)).collect();

        let exits: Vec<BarGeometry> = prev
            .range(next.len()..)
            .map(|(_, bar)| *bar)
            .collect();
        let has_updates = (0..next.len()).any(|i| prev.contains_key(&i));
        let has_enters = (0..next.len()).any(|i| !prev.contains_key(&i));

        let update_base = if exits.is_empty() { 0.0 } else { timing.remove_ms };
        let enter_base = update_base + if has_updates { timing.animation_ms } else { 0.0 };

        let mut tweens = Vec::with_capacity(exits.len() + next.len());
        for bar in exits {
            tweens.push(BarTween {
                kind: TweenKind::Exit,
                from: bar,
                to: bar.collapsed(plot_height),
                delay_ms: 0.0,
                duration_ms: timing.remove_ms,
            });
        }
        for (i, &target) in next.iter().enumerate() {
            let tween = match prev.get(&i) {
                Some(&from) => BarTween {
                    kind: TweenKind::Update,
                    from,
                    to: target,
                    delay_ms: stagger_delay_ms(update_base, i),
                    duration_ms: timing.animation_ms,
                },
                None => BarTween {
                    kind: TweenKind::Enter,
                    from: target.collapsed(plot_height),
                    to: target,
                    delay_ms: stagger_delay_ms(enter_base, i),
                    duration_ms: timing.animation_ms,
                },
            };
            tweens.push(tween);
        }

        // The readout holds until the last phase starts, then ramps until
        // the final bar of the new data settles.
        let value_hold_ms = if has_enters { enter_base } else { update_base };
        let value_total_ms = if next.is_empty() {
            max_end_ms(&tweens)
        } else {
            stagger_delay_ms(value_hold_ms, next.len() - 1) + timing.animation_ms
        };

        Ok(Self {
            tweens,
            bar_count: next.len(),
            value_hold_ms,
            value_total_ms,
        })
    }

    #[must_use]
    pub fn tweens(&self) -> &[BarTween] {
        &self.tweens
    }

    /// Number of bars the plan settles on once all exits are gone.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Delay before the readout ramp starts moving.
    #[must_use]
    pub fn value_hold_ms(&self) -> f64 {
        self.value_hold_ms
    }

    /// Time at which the readout ramp reaches its target.
    #[must_use]
    pub fn value_total_ms(&self) -> f64 {
        self.value_total_ms
    }

    /// Time at which the last tween settles.
    #[must_use]
    pub fn total_duration_ms(&self) -> f64 {
        max_end_ms(&self.tweens)
    }

    #[must_use]
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.total_duration_ms()
    }

    /// Bars visible at `elapsed_ms`, in period order. Exits stay in the
    /// scene while they shrink and drop out once spent.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> Vec<BarGeometry> {
        let mut bars: Vec<BarGeometry> = self
            .tweens
            .iter()
            .filter(|tween| tween.kind != TweenKind::Exit || !tween.is_complete(elapsed_ms))
            .map(|tween| tween.sample(elapsed_ms))
            .collect();
        bars.sort_by_key(|bar| bar.index);
        bars
    }
}

fn max_end_ms(tweens: &[BarTween]) -> f64 {
    tweens
        .iter()
        .map(|tween| OrderedFloat(tween.end_ms()))
        .max()
        .map_or(0.0, |end| end.0)
}

#[cfg(test)]
mod tests {
    use super::{TransitionPlan, TransitionTiming, TweenKind};
    use crate::core::projection::BarGeometry;

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
    fn first_draw_grows_every_bar_from_the_baseline() {
        let next = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0)];
        let plan = TransitionPlan::between(&[], &next, PLOT_HEIGHT, TransitionTiming::default())
            .expect("plan");

        assert!(plan.tweens().iter().all(|t| t.kind == TweenKind::Enter));
        assert_eq!(plan.tweens()[0].delay_ms, 0.0);
        assert_eq!(plan.value_hold_ms(), 0.0);

        let start = plan.sample(0.0);
        assert!(start.iter().all(|b| b.height == 0.0 && b.y == PLOT_HEIGHT));

        let done = plan.sample(plan.total_duration_ms());
        assert_eq!(done, next.to_vec());
    }

    #[test]
    fn shrinking_data_schedules_exits_before_updates() {
        let previous = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0)];
        let next = [bar(0, 150.0), bar(1, 250.0)];
        let plan =
            TransitionPlan::between(&previous, &next, PLOT_HEIGHT, TransitionTiming::default())
                .expect("plan");

        let exit = plan
            .tweens()
            .iter()
            .find(|t| t.kind == TweenKind::Exit)
            .expect("one exit");
        assert_eq!(exit.delay_ms, 0.0);
        assert_eq!(exit.duration_ms, 375.0);

        let update = plan
            .tweens()
            .iter()
            .find(|t| t.kind == TweenKind::Update)
            .expect("updates");
        assert_eq!(update.delay_ms, 375.0);

        // Mid-exit the doomed bar is still visible and shrinking.
        let mid = plan.sample(187.5);
        assert_eq!(mid.len(), 3);
        assert!(mid[2].height < 300.0 && mid[2].height > 0.0);

        // Once spent it leaves the scene.
        let after = plan.sample(375.0);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn growing_data_delays_enters_behind_updates() {
        let previous = [bar(0, 100.0)];
        let next = [bar(0, 120.0), bar(1, 240.0)];
        let plan =
            TransitionPlan::between(&previous, &next, PLOT_HEIGHT, TransitionTiming::default())
                .expect("plan");

        let enter = plan
            .tweens()
            .iter()
            .find(|t| t.kind == TweenKind::Enter)
            .expect("one enter");
        // No exits, so updates start at 0 and enters one animation later,
        // staggered by their period index.
        assert!((enter.delay_ms - (750.0 + 2f64.ln() / 1.5f64.ln() * 100.0)).abs() <= 1e-9);
        assert_eq!(plan.value_hold_ms(), 750.0);
    }

    #[test]
    fn interrupted_plan_feeds_its_sampled_state_into_the_next() {
        let next_a = [bar(0, 100.0), bar(1, 200.0)];
        let plan_a = TransitionPlan::between(&[], &next_a, PLOT_HEIGHT, TransitionTiming::default())
            .expect("plan a");

        let mid = plan_a.sample(400.0);
        let next_b = [bar(0, 50.0), bar(1, 75.0)];
        let plan_b =
            TransitionPlan::between(&mid, &next_b, PLOT_HEIGHT, TransitionTiming::default())
                .expect("plan b");

        // Both bars already exist, so they update from wherever they were.
        for tween in plan_b.tweens() {
            assert_eq!(tween.kind, TweenKind::Update);
            let carried = mid.iter().find(|b| b.index == tween.to.index).expect("bar");
            assert_eq!(tween.from, *carried);
        }
    }

    #[test]
    fn misindexed_targets_are_rejected() {
        let next = [bar(1, 100.0)];
        assert!(
            TransitionPlan::between(&[], &next, PLOT_HEIGHT, TransitionTiming::default()).is_err()
        );
    }
}
