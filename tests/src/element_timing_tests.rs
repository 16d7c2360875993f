//! Single-paddle element timing against the scripted-tick harness

use keyer_core::test_utils::{PaddleScript, TickHarness};
use keyer_core::types::{Element, KeyerMode};
use rstest::rstest;

use crate::scenario_config;

const UNIT: u32 = 40;

#[rstest]
#[case(KeyerMode::Iambic)]
#[case(KeyerMode::LastPressed)]
fn held_dot_is_a_unit_square_wave(#[case] mode: KeyerMode) {
    let harness = TickHarness::new(scenario_config(mode, false, UNIT));
    let script = PaddleScript::new().press(Element::Dot, 0);

    let wave = harness.run(&script, 1000);
    assert_eq!(wave.first_mark_start(), Some(0));

    let marks = wave.mark_runs();
    assert!(marks.len() >= 10);
    assert!(marks.iter().all(|&len| len == UNIT));

    // one unit of trailing space plus the one-tick re-arm latency
    let gaps = wave.gap_runs();
    assert!(!gaps.is_empty());
    assert!(gaps.iter().all(|&len| len == UNIT + 1));
}

#[rstest]
#[case(KeyerMode::Iambic)]
#[case(KeyerMode::LastPressed)]
fn held_dash_is_three_units_on(#[case] mode: KeyerMode) {
    let harness = TickHarness::new(scenario_config(mode, false, UNIT));
    let script = PaddleScript::new().press(Element::Dash, 0);

    let wave = harness.run(&script, 1000);
    assert_eq!(wave.first_mark_start(), Some(0));

    let marks = wave.mark_runs();
    assert!(marks.len() >= 5);
    assert!(marks.iter().all(|&len| len == 3 * UNIT));

    let gaps = wave.gap_runs();
    assert!(gaps.iter().all(|&len| len == UNIT + 1));
}

#[test]
fn brief_tap_still_sends_a_complete_element() {
    let harness = TickHarness::new(scenario_config(KeyerMode::Iambic, false, UNIT));
    let script = PaddleScript::new().hold(Element::Dash, 0, 1);

    let wave = harness.run(&script, 300);
    assert_eq!(wave.mark_runs().as_slice(), &[3 * UNIT]);
}

#[test]
fn element_length_follows_the_speed_pot() {
    use keyer_core::controller::KeyerController;
    use keyer_core::hal::mock::{MockKeyOutput, MockPaddle, MockSpeedPot};

    let dot = MockPaddle::new();
    let dash = MockPaddle::new();
    let key = MockKeyOutput::new();
    let speed = MockSpeedPot::new(0); // 30-tick unit
    let mut controller = KeyerController::new(
        &dot,
        &dash,
        &key,
        &speed,
        scenario_config(KeyerMode::Iambic, false, 30),
    );

    // first dot at the 30-tick unit
    dot.set_pressed(true);
    let mut down = 0;
    for _ in 0..30 {
        assert!(controller.run_tick().unwrap());
        down += 1;
    }
    assert!(!controller.run_tick().unwrap());
    assert_eq!(down, 30);

    // crank the pot during the trailing space; the next sample stretches
    // the following element to the 200-tick unit
    speed.set_raw(1023);
    for _ in 0..400 {
        if controller.run_tick().unwrap() {
            break;
        }
    }
    let mut second = 1;
    while controller.run_tick().unwrap() {
        second += 1;
    }
    assert_eq!(second, 200);
}
