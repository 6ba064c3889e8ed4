#![no_main]
use libfuzzer_sys::fuzz_target;
use ratewatch::domain::content::RawContent;
use ratewatch::domain::strategy::StrategyKind;
use ratewatch::parser::amount::Bounds;
use ratewatch::parser::extract::extract_candidates;

fuzz_target!(|data: &[u8]| {
    if let Ok(html) = std::str::from_utf8(data) {
        let content = RawContent::markup(StrategyKind::DirectFetch, html);
        let candidates = extract_candidates(&content, Bounds::new(50.0, 50_000.0));
        for c in candidates {
            assert!(c.amount >= 50.0 && c.amount <= 50_000.0);
        }
    }
});
