#![no_main]
use libfuzzer_sys::fuzz_target;
use ratewatch::domain::content::RawContent;
use ratewatch::domain::strategy::StrategyKind;
use ratewatch::parser::amount::Bounds;
use ratewatch::parser::extract::extract_candidates;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let content = RawContent::markdown(StrategyKind::AiSearch, text);
        let _ = extract_candidates(&content, Bounds::new(50.0, 50_000.0));
    }
});
