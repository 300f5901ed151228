use interest_rs::core::BarGeometry;
use interest_rs::motion::{
    DEFAULT_ANIMATION_MS, DEFAULT_REMOVE_MS, TransitionPlan, TransitionTiming, TweenKind,
    stagger_delay_ms,
};

const PLOT_HEIGHT: f64 = 516.0;

fn bar(index: usize, height: f64) -> BarGeometry {
    BarGeometry {
        index,
        x: 50.0 + 210.0 * index as f64,
        y: PLOT_HEIGHT - height,
        width: 184.0,
        height,
    }
}

fn plan(previous: &[BarGeometry], next: &[BarGeometry]) -> TransitionPlan {
    TransitionPlan::between(previous, next, PLOT_HEIGHT, TransitionTiming::default())
        .expect("plan")
}

#[test]
fn stagger_grows_logarithmically_from_the_base() {
    assert_eq!(stagger_delay_ms(375.0, 0), 375.0);

    let expected = |i: usize| ((i + 1) as f64).ln() / 1.5f64.ln() * 100.0;
    for index in 1..8 {
        let delay = stagger_delay_ms(0.0, index);
        assert!((delay - expected(index)).abs() <= 1e-9);
        // Later bars start later, but the gaps tighten.
        let gap = delay - stagger_delay_ms(0.0, index - 1);
        assert!(gap > 0.0);
        if index > 1 {
            let previous_gap =
                stagger_delay_ms(0.0, index - 1) - stagger_delay_ms(0.0, index - 2);
            assert!(gap < previous_gap);
        }
    }
}

#[test]
fn first_draw_staggers_enters_by_period_index() {
    let next = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0), bar(3, 400.0)];
    let plan = plan(&[], &next);

    for tween in plan.tweens() {
        assert_eq!(tween.kind, TweenKind::Enter);
        assert_eq!(tween.duration_ms, DEFAULT_ANIMATION_MS);
        let expected = stagger_delay_ms(0.0, tween.to.index);
        assert!((tween.delay_ms - expected).abs() <= 1e-9);
    }

    assert_eq!(plan.value_hold_ms(), 0.0);
    let expected_total = stagger_delay_ms(0.0, 3) + DEFAULT_ANIMATION_MS;
    assert!((plan.value_total_ms() - expected_total).abs() <= 1e-9);
    assert!((plan.total_duration_ms() - expected_total).abs() <= 1e-9);
}

#[test]
fn exits_shrink_in_place_without_stagger() {
    let previous = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0), bar(3, 400.0)];
    let next = [bar(0, 150.0), bar(1, 250.0)];
    let plan = plan(&previous, &next);

    let exits: Vec<_> = plan
        .tweens()
        .iter()
        .filter(|t| t.kind == TweenKind::Exit)
        .collect();
    assert_eq!(exits.len(), 2);
    for exit in exits {
        assert_eq!(exit.delay_ms, 0.0);
        assert_eq!(exit.duration_ms, DEFAULT_REMOVE_MS);
        // Exit bars collapse onto the baseline but keep their column.
        assert_eq!(exit.to.x, exit.from.x);
        assert_eq!(exit.to.width, exit.from.width);
        assert_eq!(exit.to.height, 0.0);
        assert_eq!(exit.to.y, PLOT_HEIGHT);
    }
}

#[test]
fn updates_wait_for_exits_and_enters_wait_for_updates() {
    // 2 bars -> 4 bars: no exits, two updates, two enters.
    let previous = [bar(0, 100.0), bar(1, 200.0)];
    let next = [bar(0, 120.0), bar(1, 240.0), bar(2, 360.0), bar(3, 480.0)];
    let growing = plan(&previous, &next);

    for tween in growing.tweens() {
        let index = tween.to.index;
        match tween.kind {
            TweenKind::Update => {
                let expected = stagger_delay_ms(0.0, index);
                assert!((tween.delay_ms - expected).abs() <= 1e-9);
            }
            TweenKind::Enter => {
                let expected = stagger_delay_ms(DEFAULT_ANIMATION_MS, index);
                assert!((tween.delay_ms - expected).abs() <= 1e-9);
            }
            TweenKind::Exit => panic!("growing data plans no exits"),
        }
    }
    assert_eq!(growing.value_hold_ms(), DEFAULT_ANIMATION_MS);

    // 4 bars -> 2 bars: exits push the update base out by a removal.
    let shrinking = plan(&next, &previous);
    for tween in shrinking.tweens() {
        if tween.kind == TweenKind::Update {
            let expected = stagger_delay_ms(DEFAULT_REMOVE_MS, tween.to.index);
            assert!((tween.delay_ms - expected).abs() <= 1e-9);
        }
    }
    assert_eq!(shrinking.value_hold_ms(), DEFAULT_REMOVE_MS);
}

#[test]
fn sample_keeps_period_order_while_exits_drain() {
    let previous = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0)];
    let next = [bar(0, 150.0), bar(1, 250.0)];
    let plan = plan(&previous, &next);

    let mid = plan.sample(DEFAULT_REMOVE_MS / 2.0);
    assert_eq!(mid.len(), 3);
    let indices: Vec<usize> = mid.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    let drained = plan.sample(DEFAULT_REMOVE_MS);
    assert_eq!(drained.len(), 2);
}

#[test]
fn settled_plan_reproduces_its_targets_exactly() {
    let previous = [bar(0, 75.0), bar(1, 150.0)];
    let next = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0)];
    let plan = plan(&previous, &next);

    let settled = plan.sample(plan.total_duration_ms());
    assert_eq!(settled, next.to_vec());
    assert!(plan.is_complete(plan.total_duration_ms()));
    assert!(!plan.is_complete(plan.total_duration_ms() - 1.0));
}

#[test]
fn interrupting_mid_flight_never_jumps_the_geometry() {
    let first = plan(&[], &[bar(0, 200.0), bar(1, 400.0)]);
    let carried = first.sample(300.0);

    let second = TransitionPlan::between(
        &carried,
        &[bar(0, 80.0), bar(1, 160.0)],
        PLOT_HEIGHT,
        TransitionTiming::default(),
    )
    .expect("second plan");

    // At the instant of replacement the new plan shows the carried bars.
    let replay = second.sample(0.0);
    assert_eq!(replay, carried);
}

#[test]
fn custom_timing_flows_through_the_schedule() {
    let timing = TransitionTiming {
        animation_ms: 100.0,
        remove_ms: 40.0,
    };
    let previous = [bar(0, 100.0), bar(1, 200.0), bar(2, 300.0)];
    let next = [bar(0, 50.0)];
    let plan = TransitionPlan::between(&previous, &next, PLOT_HEIGHT, timing).expect("plan");

    let exit = plan
        .tweens()
        .iter()
        .find(|t| t.kind == TweenKind::Exit)
        .expect("exit");
    assert_eq!(exit.duration_ms, 40.0);

    let update = plan
        .tweens()
        .iter()
        .find(|t| t.kind == TweenKind::Update)
        .expect("update");
    assert_eq!(update.delay_ms, 40.0);
    assert_eq!(update.duration_ms, 100.0);
}

#[test]
fn invalid_timing_is_rejected() {
    let timing = TransitionTiming {
        animation_ms: 0.0,
        remove_ms: 375.0,
    };
    let result = TransitionPlan::between(&[], &[bar(0, 10.0)], PLOT_HEIGHT, timing);
    assert!(result.is_err());
}
