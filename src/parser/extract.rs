use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::candidate::PriceCandidate;
use crate::domain::content::{Payload, RawContent, RoomRecord};
use crate::domain::strategy::StrategyKind;
use crate::parser::amount::{Bounds, parse_amount};

/// Grouped (`1,234.50`) or ungrouped (`4500`) amount. The grouped
/// alternative comes first so a comma-separated number is consumed whole
/// rather than stopping at the first group.
const AMOUNT_PATTERN: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?";

/// Currency symbol or code before the amount: `₪450`, `$ 1,234.50`.
static PRICE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?:₪|\$|€|£|ILS|USD|EUR|NIS)\s*({AMOUNT_PATTERN})"))
        .expect("invalid prefix price regex")
});

/// Amount before the currency: `450 ₪`, `1,234 ILS`.
static PRICE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({AMOUNT_PATTERN})\s*(?:₪|€|£|ILS|NIS|USD|EUR)"))
        .expect("invalid suffix price regex")
});

/// Bare amount, only trusted inside a dedicated price element.
static BARE_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("({AMOUNT_PATTERN})")).expect("invalid bare amount regex")
});

/// Inline data blobs the marketplace embeds in its pages.
static EMBEDDED_PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:price|min_price|total_price|grossPrice)"\s*:\s*\{?\s*(?:"value"\s*:\s*)?(\d+(?:\.\d+)?)"#)
        .expect("invalid embedded price regex")
});

static EMBEDDED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:room_name|roomType|room_type|name)"\s*:\s*"([^"]+)""#)
        .expect("invalid embedded name regex")
});

static ROOM_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z\- ]*(?:Room|Suite|Studio|Apartment))")
        .expect("invalid room label regex")
});

static CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-testid="property-card"], tr[data-block-id], .hprt-table-row"#)
        .expect("invalid container selector")
});

static PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"[data-testid="price-and-discounted-price"], .bui-price-display__value, .prco-valign-middle-helper"#,
    )
    .expect("invalid price selector")
});

static LABEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"[data-testid="title"], [data-testid="room-name"], .hprt-roomtype-link, .room_link"#,
    )
    .expect("invalid label selector")
});

const BREAKFAST_KEYWORDS: &[&str] = &[
    "breakfast",
    "ארוחת בוקר",
    "כולל ארוחה",
    "frühstück",
    "petit déjeuner",
    "desayuno",
];

const UNAVAILABLE_KEYWORDS: &[&str] = &["sold out", "no availability", "not available"];

/// Extract every plausible price observation from one piece of raw content.
///
/// Layered: structured records map directly; markup goes through
/// container-scoped extraction plus embedded data blobs, with brute-force
/// text scanning as the last resort when the structured layers find
/// nothing. Each hit is bounds-validated before it becomes a candidate.
/// Exact (label, amount) duplicates are dropped here; near-duplicate
/// amounts are merged later by the canonicalizer's tolerance dedup.
pub fn extract_candidates(content: &RawContent, bounds: Bounds) -> Vec<PriceCandidate> {
    let strategy = content.strategy;
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    match &content.payload {
        Payload::StructuredRecords(records) => {
            collect_records(records, strategy, bounds, &mut seen, &mut out);
        }
        Payload::Markup(body) => {
            collect_containers(body, strategy, bounds, &mut seen, &mut out);
            collect_embedded(body, strategy, bounds, &mut seen, &mut out);
            if out.is_empty() {
                collect_text(body, strategy, bounds, &mut seen, &mut out);
            }
        }
        Payload::Markdown(body) => {
            collect_embedded(body, strategy, bounds, &mut seen, &mut out);
            if out.is_empty() {
                collect_text(body, strategy, bounds, &mut seen, &mut out);
            }
        }
    }

    out
}

type SeenKey = (String, i64);

fn key(label: &str, amount: f64) -> SeenKey {
    (label.to_lowercase(), (amount * 100.0).round() as i64)
}

fn detect_currency(text: &str) -> &'static str {
    if text.contains('₪') || text.contains("ILS") || text.contains("NIS") {
        "ILS"
    } else if text.contains('€') || text.contains("EUR") {
        "EUR"
    } else if text.contains('$') || text.contains("USD") {
        "USD"
    } else if text.contains('£') || text.contains("GBP") {
        "GBP"
    } else {
        "ILS"
    }
}

fn has_breakfast(text: &str) -> bool {
    let lower = text.to_lowercase();
    BREAKFAST_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn is_unavailable(text: &str) -> bool {
    let lower = text.to_lowercase();
    UNAVAILABLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Layer 1: typed records from a structured-search collaborator. The most
/// trustworthy path; no pattern matching, just field mapping.
fn collect_records(
    records: &[RoomRecord],
    strategy: StrategyKind,
    bounds: Bounds,
    seen: &mut HashSet<SeenKey>,
    out: &mut Vec<PriceCandidate>,
) {
    for (i, record) in records.iter().enumerate() {
        let Some(amount) = record.price else { continue };
        if !bounds.contains(amount) {
            continue;
        }
        let label = record
            .name
            .clone()
            .unwrap_or_else(|| format!("Room {}", i + 1));
        if !seen.insert(key(&label, amount)) {
            continue;
        }
        let mut candidate = PriceCandidate::new(
            amount,
            record.currency.as_deref().unwrap_or("ILS"),
            &label,
            strategy,
        );
        candidate.available = record.available.unwrap_or(true);
        candidate.rooms_left = record.rooms_left;
        candidate.original_amount = record.original_price;
        out.push(candidate);
    }
}

/// Layer 2: repeating listing/room containers. Searching for the price and
/// the label inside the same container keeps each price paired with its own
/// room rather than the globally nearest label.
fn collect_containers(
    html: &str,
    strategy: StrategyKind,
    bounds: Bounds,
    seen: &mut HashSet<SeenKey>,
    out: &mut Vec<PriceCandidate>,
) {
    let document = Html::parse_document(html);

    for container in document.select(&CONTAINER_SELECTOR) {
        let text = container.text().collect::<Vec<_>>().join(" ");

        let amount = container
            .select(&PRICE_SELECTOR)
            .find_map(|el| {
                let price_text = el.text().collect::<Vec<_>>().join(" ");
                first_price(&price_text)
                    .or_else(|| BARE_AMOUNT_RE.captures(&price_text).and_then(|c| parse_amount(&c[1])))
            })
            .or_else(|| container.value().attr("data-price").and_then(parse_amount))
            .or_else(|| first_price(&text));

        let Some(amount) = amount else { continue };
        if !bounds.contains(amount) {
            continue;
        }

        let label = container
            .select(&LABEL_SELECTOR)
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .find(|label| label.len() > 2)
            .or_else(|| {
                ROOM_LABEL_RE
                    .captures(&text)
                    .map(|c| c[1].trim().to_string())
            })
            .unwrap_or_else(|| "Standard Room".to_string());

        if !seen.insert(key(&label, amount)) {
            continue;
        }

        let mut candidate = PriceCandidate::new(amount, detect_currency(&text), &label, strategy)
            .with_breakfast(has_breakfast(&text));
        candidate.available = !is_unavailable(&text);
        out.push(candidate);
    }
}

/// Layer 3: inline structured data blobs (`"price": 450`). Price and name
/// matches are paired positionally since the blob preserves listing order.
fn collect_embedded(
    body: &str,
    strategy: StrategyKind,
    bounds: Bounds,
    seen: &mut HashSet<SeenKey>,
    out: &mut Vec<PriceCandidate>,
) {
    let amounts: Vec<f64> = EMBEDDED_PRICE_RE
        .captures_iter(body)
        .filter_map(|c| parse_amount(&c[1]))
        .collect();
    if amounts.is_empty() {
        return;
    }
    let names: Vec<String> = EMBEDDED_NAME_RE
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect();
    let currency = detect_currency(body);

    for (i, amount) in amounts.into_iter().enumerate() {
        if !bounds.contains(amount) {
            continue;
        }
        let label = names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("Room {}", i + 1));
        if !seen.insert(key(&label, amount)) {
            continue;
        }
        out.push(PriceCandidate::new(amount, currency, &label, strategy));
    }
}

/// Layer 4: brute-force scan of visible text for currency-adorned numbers.
/// No room association is possible, so labels are generic.
fn collect_text(
    body: &str,
    strategy: StrategyKind,
    bounds: Bounds,
    seen: &mut HashSet<SeenKey>,
    out: &mut Vec<PriceCandidate>,
) {
    let mut amounts: Vec<f64> = Vec::new();
    for re in [&*PRICE_PREFIX_RE, &*PRICE_SUFFIX_RE] {
        for cap in re.captures_iter(body) {
            if let Some(amount) = parse_amount(&cap[1])
                && bounds.contains(amount)
                && !amounts.iter().any(|a| (a - amount).abs() < f64::EPSILON)
            {
                amounts.push(amount);
            }
        }
    }
    amounts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let currency = detect_currency(body);
    let breakfast = has_breakfast(body);

    for (i, amount) in amounts.into_iter().take(10).enumerate() {
        let label = match i {
            0 => "Economy Room".to_string(),
            1 => "Standard Room".to_string(),
            _ => format!("Room Type {}", i + 1),
        };
        if !seen.insert(key(&label, amount)) {
            continue;
        }
        out.push(
            PriceCandidate::new(amount, currency, &label, strategy).with_breakfast(breakfast),
        );
    }
}

fn first_price(text: &str) -> Option<f64> {
    if let Some(cap) = PRICE_PREFIX_RE.captures(text) {
        return parse_amount(&cap[1]);
    }
    if let Some(cap) = PRICE_SUFFIX_RE.captures(text) {
        return parse_amount(&cap[1]);
    }
    None
}
