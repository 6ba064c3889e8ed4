#![no_main]
use libfuzzer_sys::fuzz_target;
use ratewatch::parser::amount::parse_amount;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Some(amount) = parse_amount(raw) {
            assert!(amount.is_finite() && amount > 0.0);
        }
    }
});
