//! Pin adapter tests against embedded-hal mock pins

use embedded_hal_mock::eh1::pin::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use keyer_core::hal::{EmbeddedHalKeyOutput, EmbeddedHalPaddle, InputPaddle, OutputKey};

#[test]
fn paddle_adapter_reads_active_low() {
    let expectations = [
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::High),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut paddle = EmbeddedHalPaddle::new(pin.clone());
    assert!(paddle.is_pressed().unwrap());
    assert!(!paddle.is_pressed().unwrap());

    pin.done();
}

#[test]
fn key_output_adapter_drives_logic_high() {
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut key = EmbeddedHalKeyOutput::new(pin.clone(), false);
    key.set_state(true).unwrap();
    assert!(key.get_state().unwrap());
    key.set_state(false).unwrap();
    assert!(!key.get_state().unwrap());

    pin.done();
}

#[test]
fn key_output_adapter_honors_inversion() {
    let expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut key = EmbeddedHalKeyOutput::new(pin.clone(), true);
    key.set_state(true).unwrap();
    // logical state is reported, not the inverted pin level
    assert!(key.get_state().unwrap());
    key.set_state(false).unwrap();

    pin.done();
}
