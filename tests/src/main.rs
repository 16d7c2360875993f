// Scripted keyer scenarios with a printed report

use keyer_core::test_utils::{PaddleScript, TickHarness};
use keyer_core::types::{Element, KeyerConfig, KeyerMode};

const UNIT: u32 = 40;

fn main() {
    println!("🧪 Paddle keyer scenario report ({UNIT}-tick unit)");
    println!();

    report_single_paddle();
    report_iambic_squeeze();
    report_last_pressed_handover();
    report_autospace();

    println!();
    println!("✅ All scenarios behaved as expected");
}

fn config(mode: KeyerMode, autospace: bool) -> KeyerConfig {
    KeyerConfig::new(mode, autospace, 0, UNIT).expect("valid scenario config")
}

fn morse(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|e| match e {
            Element::Dot => '.',
            Element::Dash => '-',
        })
        .collect()
}

fn report_single_paddle() {
    println!("📡 Single paddle timing");

    let harness = TickHarness::new(config(KeyerMode::Iambic, false));
    let dots = harness.run(&PaddleScript::new().press(Element::Dot, 0), 500);
    let marks = dots.mark_runs();
    assert!(marks.iter().all(|&len| len == UNIT));
    println!(
        "  dot paddle held: {} marks of {} ticks -> {}",
        marks.len(),
        UNIT,
        morse(&dots.elements(UNIT))
    );

    let harness = TickHarness::new(config(KeyerMode::Iambic, false));
    let dashes = harness.run(&PaddleScript::new().press(Element::Dash, 0), 700);
    let marks = dashes.mark_runs();
    assert!(marks.iter().all(|&len| len == 3 * UNIT));
    println!(
        "  dash paddle held: {} marks of {} ticks -> {}",
        marks.len(),
        3 * UNIT,
        morse(&dashes.elements(UNIT))
    );
}

fn report_iambic_squeeze() {
    println!("🤏 Iambic squeeze");

    let harness = TickHarness::new(config(KeyerMode::Iambic, false));
    let wave = harness.run(&PaddleScript::new().squeeze(0, 1200), 1200);
    let elements = wave.elements(UNIT);
    for pair in elements.windows(2) {
        assert_ne!(pair[0], pair[1], "squeeze repeated an element");
    }
    println!("  both paddles held -> {}", morse(&elements));
}

fn report_last_pressed_handover() {
    println!("🔄 Last-pressed handover");

    let harness = TickHarness::new(config(KeyerMode::LastPressed, false));
    let script = PaddleScript::new()
        .press(Element::Dot, 0)
        .hold(Element::Dash, 10, 100);
    let wave = harness.run(&script, 600);
    let elements = wave.elements(UNIT);
    assert_eq!(&elements[..3], &[Element::Dot, Element::Dash, Element::Dot]);
    println!(
        "  dash joins then releases mid-element -> {}",
        morse(&elements)
    );
}

fn report_autospace() {
    println!("⏱️ Autospacing");

    // power-on press waits one silence window (mark at tick 40); a press
    // in the letter-gap window defers to three silence windows (tick 201)
    let harness = TickHarness::new(config(KeyerMode::Iambic, true));
    let script = PaddleScript::new()
        .hold(Element::Dot, 0, 45)
        .hold(Element::Dot, 135, 160);
    let wave = harness.run(&script, 260);
    let starts: Vec<u32> = wave
        .transitions()
        .iter()
        .filter(|&&(_, level)| level)
        .map(|&(tick, _)| tick)
        .collect();
    assert_eq!(starts, vec![40, 201]);
    println!("  deferred dispatches landed at ticks {starts:?}");
}
