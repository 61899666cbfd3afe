//! Pattern catalog: for every extractable metric type, an ordered list of
//! matchers and the processor that turns a match into a typed value.
//!
//! All matchers run against normalized text (see `normalize_text`).
//! Processor bounds are plausibility bounds, far wider than clinical
//! reference ranges; they exist to reject misreads such as dates, phone
//! numbers or page numbers captured next to a keyword.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::normalize::parse_number;
use crate::models::{MetricType, MetricValue};

// ═══════════════════════════════════════════
// Regex building blocks
// ═══════════════════════════════════════════

/// Separator between a keyword and its value, including dot leaders
/// ("Hemoglobin ....... 13.2").
const SEP: &str = r"[\s:=.\-]*";
/// Optional short parenthetical after a keyword: "(serum)", "(mg/dl)".
const QUAL: &str = r"(?:\s*\([^)]{0,30}\))?";
/// Decimal with up to three integer digits, not followed by another digit.
const NUM: &str = r"(\d{1,3}(?:\.\d+)?)(?:\D|$)";
/// Decimal with up to four integer digits.
const NUM4: &str = r"(\d{1,4}(?:\.\d+)?)(?:\D|$)";
/// Cell count, with optional thousands grouping ("7,500", "2,50,000").
const COUNT: &str = r"(\d{1,3}(?:,\d{2,3})+|\d{1,7}(?:\.\d+)?)(?:\D|$)";
/// Number directly preceding a unit.
const UNIT_NUM: &str = r"\b(\d{1,3}(?:\.\d+)?)";
/// Two- or three-digit pressure reading.
const MMHG: &str = r"(\d{2,3})";
/// Short non-numeric gap between systolic and diastolic labels.
const GAP: &str = r"\D{0,40}?";

const SYSTOLIC_BOUNDS: (f64, f64) = (70.0, 250.0);
const DIASTOLIC_BOUNDS: (f64, f64) = (40.0, 150.0);
const TEMPERATURE_C_BOUNDS: (f64, f64) = (30.0, 45.0);

/// Readings above this are taken to be Fahrenheit.
const FAHRENHEIT_THRESHOLD: f64 = 50.0;

/// Bytes searched on each side of a lipid-panel anchor.
const LIPID_WINDOW: usize = 240;

// ═══════════════════════════════════════════
// Matcher
// ═══════════════════════════════════════════

/// A compiled pattern plus words that must not immediately precede a match.
///
/// The regex crate has no look-behind, so "t4 but not free t4" is expressed
/// as the `t4` pattern excluding the prefix `free`.
pub struct Matcher {
    regex: Regex,
    excluded_prefixes: &'static [&'static str],
}

impl Matcher {
    fn new(pattern: &str) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            excluded_prefixes: &[],
        }
    }

    fn excluding(mut self, prefixes: &'static [&'static str]) -> Self {
        self.excluded_prefixes = prefixes;
        self
    }

    /// First non-excluded match starting inside `range`. The text before the
    /// range still counts for word boundaries and excluded prefixes.
    pub fn find_in<'t>(&self, text: &'t str, range: Range<usize>) -> Option<Captures<'t>> {
        let haystack = &text[..range.end];
        self.regex.captures_iter(haystack).find(|caps| {
            let start = match_start(caps);
            start >= range.start && !self.is_excluded(&text[..start])
        })
    }

    fn is_excluded(&self, preceding: &str) -> bool {
        if self.excluded_prefixes.is_empty() {
            return false;
        }
        let tail = preceding.trim_end_matches(|c: char| !c.is_alphanumeric());
        self.excluded_prefixes.iter().any(|p| tail.ends_with(p))
    }
}

fn match_start(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(0, |m| m.start())
}

// ═══════════════════════════════════════════
// Processor
// ═══════════════════════════════════════════

/// Turns a match into a typed value, or rejects it as implausible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Processor {
    Scalar { min: f64, max: f64 },
    /// Cell counts. Values below `thousands_below` were written in
    /// thousands (10^3/μL) and are scaled up before the bounds check.
    Count { min: f64, max: f64, thousands_below: f64 },
    /// Celsius, converted from Fahrenheit when above 50.
    Temperature,
    BloodPressure,
    /// Assembles total/HDL/LDL found around the anchor match.
    LipidPanel,
}

impl Processor {
    pub fn process(&self, caps: &Captures<'_>, text: &str) -> Option<MetricValue> {
        match *self {
            Self::Scalar { min, max } => {
                let value = capture_number(caps, 1)?;
                within(value, min, max).then(|| MetricValue::scalar(value))
            }
            Self::Count {
                min,
                max,
                thousands_below,
            } => {
                let mut value = capture_number(caps, 1)?;
                if value < thousands_below {
                    value *= 1000.0;
                }
                within(value, min, max).then(|| MetricValue::scalar(value.round()))
            }
            Self::Temperature => {
                let mut value = capture_number(caps, 1)?;
                if value > FAHRENHEIT_THRESHOLD {
                    value = (value - 32.0) * 5.0 / 9.0;
                }
                let value = (value * 10.0).round() / 10.0;
                let (min, max) = TEMPERATURE_C_BOUNDS;
                within(value, min, max).then(|| MetricValue::scalar(value))
            }
            Self::BloodPressure => {
                let systolic = capture_number(caps, 1)?;
                let diastolic = capture_number(caps, 2)?;
                let plausible = within(systolic, SYSTOLIC_BOUNDS.0, SYSTOLIC_BOUNDS.1)
                    && within(diastolic, DIASTOLIC_BOUNDS.0, DIASTOLIC_BOUNDS.1)
                    && systolic > diastolic;
                plausible.then(|| MetricValue::blood_pressure(systolic, diastolic))
            }
            Self::LipidPanel => lipid_panel(text, match_start(caps)),
        }
    }
}

fn capture_number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group).and_then(|m| parse_number(m.as_str()))
}

fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Look for the individual lipid analytes near `anchor` and combine them.
fn lipid_panel(text: &str, anchor: usize) -> Option<MetricValue> {
    let window = surrounding_window(text, anchor, LIPID_WINDOW);
    let part = |t: MetricType| {
        pattern_for(t)
            .and_then(|p| p.apply_in(text, window.clone()))
            .and_then(|v| v.as_scalar())
    };

    let total = part(MetricType::TotalCholesterol);
    let hdl = part(MetricType::HdlCholesterol);
    let ldl = part(MetricType::LdlCholesterol);

    if total.is_none() && hdl.is_none() && ldl.is_none() {
        return None;
    }
    Some(MetricValue::LipidPanel { total, hdl, ldl })
}

/// Byte range of `radius` on each side of `anchor`, widened to char
/// boundaries and, at the end, to the next space so numbers are not cut.
fn surrounding_window(text: &str, anchor: usize, radius: usize) -> Range<usize> {
    let mut start = anchor.saturating_sub(radius);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = anchor.saturating_add(radius).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    let end = text[end..].find(' ').map_or(text.len(), |i| end + i);
    start..end
}

// ═══════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════

/// Ordered recognition rules for one metric type. The first matcher whose
/// match survives the processor wins; later matchers are not tried.
pub struct ExtractionPattern {
    pub metric_type: MetricType,
    pub matchers: Vec<Matcher>,
    pub processor: Processor,
}

impl ExtractionPattern {
    pub fn apply(&self, text: &str) -> Option<MetricValue> {
        self.apply_in(text, 0..text.len())
    }

    pub fn apply_in(&self, text: &str, range: Range<usize>) -> Option<MetricValue> {
        for (index, matcher) in self.matchers.iter().enumerate() {
            let Some(caps) = matcher.find_in(text, range.clone()) else {
                continue;
            };
            match self.processor.process(&caps, text) {
                Some(value) => return Some(value),
                None => tracing::debug!(
                    metric_type = %self.metric_type,
                    pattern = index,
                    "Matched value failed plausibility check"
                ),
            }
        }
        None
    }
}

fn entry(metric_type: MetricType, processor: Processor, matchers: Vec<Matcher>) -> ExtractionPattern {
    ExtractionPattern {
        metric_type,
        matchers,
        processor,
    }
}

const fn scalar(min: f64, max: f64) -> Processor {
    Processor::Scalar { min, max }
}

static CATALOG: LazyLock<Vec<ExtractionPattern>> = LazyLock::new(|| {
    use MetricType::*;

    vec![
        entry(BloodPressure, Processor::BloodPressure, vec![
            Matcher::new(&format!(r"\b(?:blood\s*pressure|bp)\b{QUAL}{SEP}{MMHG}\s*[/\-]\s*{MMHG}(?:\D|$)")),
            Matcher::new(&format!(r"{MMHG}\s*/\s*{MMHG}\s*mm\s*hg")),
            Matcher::new(&format!(r"\bsystolic{QUAL}{SEP}{MMHG}{GAP}\bdiastolic{QUAL}{SEP}{MMHG}(?:\D|$)")),
        ]),
        entry(FastingGlucose, scalar(30.0, 500.0), vec![
            Matcher::new(&format!(r"\b(?:fasting\s*(?:blood\s*|plasma\s*)?(?:glucose|sugar)|(?:blood\s*|plasma\s*)?(?:glucose|sugar)\s*,\s*fasting|fbs|fbg|fpg)\b{QUAL}{SEP}{NUM}")),
            Matcher::new(&format!(r"\b(?:blood\s*|plasma\s*)?(?:glucose|sugar)\s*\(\s*fasting\s*\){SEP}{NUM}")),
        ]),
        entry(RandomGlucose, scalar(30.0, 500.0), vec![
            Matcher::new(&format!(r"\b(?:random\s*(?:blood\s*|plasma\s*)?(?:glucose|sugar)|(?:blood\s*|plasma\s*)?(?:glucose|sugar)\s*,\s*random|rbs|rbg)\b{QUAL}{SEP}{NUM}")),
            Matcher::new(&format!(r"\b(?:blood\s*|plasma\s*)?(?:glucose|sugar)\s*\(\s*random\s*\){SEP}{NUM}")),
        ]),
        entry(Glucose, scalar(30.0, 500.0), vec![
            Matcher::new(&format!(r"\b(?:blood\s*sugar|(?:blood\s*|plasma\s*|serum\s*)?glucose)\b{SEP}{NUM}"))
                .excluding(&["fasting", "random", "prandial", "pp", "urine"]),
        ]),
        entry(Hba1c, scalar(3.0, 20.0), vec![
            Matcher::new(&format!(r"\b(?:hba1c|hb\s*a1c|a1c|glycated\s*ha?emoglobin|glycosylated\s*ha?emoglobin)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(TotalCholesterol, scalar(50.0, 500.0), vec![
            Matcher::new(&format!(r"\b(?:total\s*cholesterol|cholesterol\s*,?\s*total|serum\s*cholesterol|cholesterol)\b{QUAL}{SEP}{NUM}"))
                .excluding(&["hdl", "ldl"]),
        ]),
        entry(HdlCholesterol, scalar(10.0, 150.0), vec![
            Matcher::new(&format!(r"\b(?:hdl(?:\s*-?\s*(?:cholesterol|c))?|high\s*density\s*lipoprotein(?:\s*cholesterol)?)\b{QUAL}{SEP}{NUM}"))
                .excluding(&["non"]),
        ]),
        entry(LdlCholesterol, scalar(10.0, 400.0), vec![
            Matcher::new(&format!(r"\b(?:ldl(?:\s*-?\s*(?:cholesterol|c))?|low\s*density\s*lipoprotein(?:\s*cholesterol)?)\b{QUAL}{SEP}{NUM}"))
                .excluding(&["very"]),
        ]),
        entry(VldlCholesterol, scalar(2.0, 100.0), vec![
            Matcher::new(&format!(r"\b(?:vldl(?:\s*-?\s*(?:cholesterol|c))?|very\s*low\s*density\s*lipoprotein(?:\s*cholesterol)?)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(Triglycerides, scalar(20.0, 2000.0), vec![
            Matcher::new(&format!(r"\b(?:triglycerides?|trigs?|tg)\b{QUAL}{SEP}{NUM4}")),
        ]),
        entry(Tsh, scalar(0.01, 100.0), vec![
            Matcher::new(&format!(r"\b(?:tsh|thyroid\s*stimulating\s*hormone)\b{QUAL}{SEP}{NUM}")),
        ]),
        // Free hormones before totals; the total matchers also exclude "free".
        entry(FreeT3, scalar(0.5, 30.0), vec![
            Matcher::new(&format!(r"\b(?:free\s*t3|ft3|free\s*triiodothyronine)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(T3, scalar(0.1, 10.0), vec![
            Matcher::new(&format!(r"\b(?:total\s*)?(?:t3|triiodothyronine)\b{QUAL}{SEP}{NUM}"))
                .excluding(&["free", "reverse"]),
        ]),
        entry(FreeT4, scalar(0.1, 10.0), vec![
            Matcher::new(&format!(r"\b(?:free\s*t4|ft4|free\s*thyroxine)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(T4, scalar(1.0, 30.0), vec![
            Matcher::new(&format!(r"\b(?:total\s*)?(?:t4|thyroxine)\b{QUAL}{SEP}{NUM}"))
                .excluding(&["free"]),
        ]),
        entry(VitaminD, scalar(3.0, 200.0), vec![
            Matcher::new(&format!(r"\b(?:25\s*-?\s*(?:\(\s*oh\s*\)|oh|hydroxy)[\s\-]*(?:vitamin\s*)?d[23]?|vitamin\s*d[23]?\s*,\s*25\s*-?\s*(?:oh|hydroxy)|vitamin\s*d[23]?|vit\.?\s*d[23]?)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(VitaminB12, scalar(50.0, 3000.0), vec![
            Matcher::new(&format!(r"\b(?:vitamin\s*b\s*-?\s*12|vit\.?\s*b\s*-?\s*12|b12|cyanocobalamin|cobalamin)\b{QUAL}{SEP}{COUNT}")),
        ]),
        entry(Hemoglobin, scalar(3.0, 25.0), vec![
            Matcher::new(&format!(r"\b(?:ha?emoglobin|hgb|hb)\b{QUAL}{SEP}{NUM}"))
                .excluding(&["glycated", "glycosylated", "corpuscular"]),
        ]),
        entry(Wbc, Processor::Count { min: 1000.0, max: 50_000.0, thousands_below: 100.0 }, vec![
            Matcher::new(&format!(r"\b(?:total\s*)?(?:white\s*blood\s*cells?|white\s*cells?|wbcs?|leu[ck]ocytes?|tlc)(?:\s*count)?\b{QUAL}{SEP}{COUNT}")),
        ]),
        entry(Platelets, Processor::Count { min: 10_000.0, max: 1_000_000.0, thousands_below: 1000.0 }, vec![
            Matcher::new(&format!(r"\b(?:platelets?|plts?|thrombocytes?)(?:\s*count)?\b{QUAL}{SEP}{COUNT}")),
        ]),
        entry(Creatinine, scalar(0.1, 20.0), vec![
            Matcher::new(&format!(r"\b(?:serum\s*)?creat(?:inine)?\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(Urea, scalar(2.0, 300.0), vec![
            Matcher::new(&format!(r"\b(?:(?:blood\s*|serum\s*)?urea(?:\s*nitrogen)?|bun)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(Weight, scalar(20.0, 300.0), vec![
            Matcher::new(&format!(r"\b(?:body\s*weight|weight|wt)\b{QUAL}{SEP}{NUM}")),
            // "kg" but not "kg/m²" (BMI).
            Matcher::new(&format!(r"{UNIT_NUM}\s*(?:kgs?|kilograms?)(?:[^/\w]|$)")),
        ]),
        entry(Height, scalar(100.0, 250.0), vec![
            Matcher::new(&format!(r"\b(?:height|ht)\b{QUAL}{SEP}{NUM}")),
            Matcher::new(&format!(r"{UNIT_NUM}\s*(?:cms?|centimet(?:er|re)s?)\b")),
        ]),
        entry(HeartRate, scalar(30.0, 220.0), vec![
            Matcher::new(&format!(r"\b(?:heart\s*rate|pulse(?:\s*rate)?|hr)\b{QUAL}{SEP}{NUM}")),
            Matcher::new(&format!(r"{UNIT_NUM}\s*(?:bpm|beats\s*per\s*min(?:ute)?)\b")),
        ]),
        entry(Temperature, Processor::Temperature, vec![
            Matcher::new(&format!(r"\b(?:body\s*temp(?:erature)?|temperature|temp)\b{QUAL}{SEP}{NUM}")),
            Matcher::new(&format!(r"{UNIT_NUM}\s*(?:°\s*[cf]|deg(?:rees?)?\s*[cf]|celsius|fahrenheit)\b")),
        ]),
        entry(Bmi, scalar(10.0, 60.0), vec![
            Matcher::new(&format!(r"\b(?:bmi|body\s*mass\s*index)\b{QUAL}{SEP}{NUM}")),
        ]),
    ]
});

/// Legacy aggregate types. Only scanned when explicitly enabled: they
/// overlap the per-analyte entries above.
static LEGACY_CATALOG: LazyLock<Vec<ExtractionPattern>> = LazyLock::new(|| {
    use MetricType::*;

    vec![
        entry(BloodSugar, scalar(30.0, 500.0), vec![
            Matcher::new(&format!(r"\b(?:blood\s*sugar|blood\s*glucose|glucose)\b{QUAL}{SEP}{NUM}")),
        ]),
        entry(Cholesterol, Processor::LipidPanel, vec![
            Matcher::new(&format!(r"\b(?:total\s*)?cholesterol\b{QUAL}{SEP}{NUM}"))
                .excluding(&["hdl", "ldl"]),
            Matcher::new(r"\bhdl\b"),
            Matcher::new(r"\bldl\b"),
        ]),
    ]
});

/// Per-analyte catalog in declaration order.
pub fn catalog() -> &'static [ExtractionPattern] {
    &CATALOG
}

pub fn legacy_catalog() -> &'static [ExtractionPattern] {
    &LEGACY_CATALOG
}

pub fn pattern_for(metric_type: MetricType) -> Option<&'static ExtractionPattern> {
    catalog()
        .iter()
        .chain(legacy_catalog())
        .find(|p| p.metric_type == metric_type)
}
