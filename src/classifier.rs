//! Xactimate-style trade code classifier (C2).
//!
//! Assigns each line item to a trade category and a set of boolean
//! attribute tags by matching named, case-insensitive regexes against
//! `code + " " + description`. Also publishes the static double-dip group
//! table the General Repair validator (GEN-001) consumes.
//!
//! Grounded on `examples/original_source/src/claim_engine/core/xactimate_parser.py`
//! for pattern shapes, and `spec.md` §4.1 for the authoritative category
//! list and double-dip group table.

use std::cell::RefCell;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trade category, chosen by the first `^CAT[_-]?` prefix match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeCategory {
    Wtr,
    Dry,
    Fcc,
    Fnc,
    Pnt,
    Cln,
    Dem,
    Cnt,
    Gen,
    Unknown,
}

impl TradeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeCategory::Wtr => "WTR",
            TradeCategory::Dry => "DRY",
            TradeCategory::Fcc => "FCC",
            TradeCategory::Fnc => "FNC",
            TradeCategory::Pnt => "PNT",
            TradeCategory::Cln => "CLN",
            TradeCategory::Dem => "DEM",
            TradeCategory::Cnt => "CNT",
            TradeCategory::Gen => "GEN",
            TradeCategory::Unknown => "UNKNOWN",
        }
    }
}

struct CategoryPattern {
    category: TradeCategory,
    regex: Regex,
}

static CATEGORY_PATTERNS: Lazy<Vec<CategoryPattern>> = Lazy::new(|| {
    [
        ("WTR", TradeCategory::Wtr),
        ("DRY", TradeCategory::Dry),
        ("FCC", TradeCategory::Fcc),
        ("FNC", TradeCategory::Fnc),
        ("PNT", TradeCategory::Pnt),
        ("CLN", TradeCategory::Cln),
        ("DEM", TradeCategory::Dem),
        ("CNT", TradeCategory::Cnt),
        ("GEN", TradeCategory::Gen),
    ]
    .into_iter()
    .map(|(prefix, category)| CategoryPattern {
        category,
        regex: Regex::new(&format!(r"(?i)^{prefix}[_-]?")).unwrap(),
    })
    .collect()
});

/// Named attribute probes. Each is a single compiled regex matched
/// against the combined `code + " " + description` text.
macro_rules! attr_patterns {
    ($($name:ident => $re:expr),+ $(,)?) => {
        $(
            static $name: Lazy<Regex> = Lazy::new(|| Regex::new($re).unwrap());
        )+
    };
}

attr_patterns! {
    AIR_MOVER => r"(?i)(AIR\s*MOVER|AIRF|FAN)",
    DEHUMIDIFIER => r"(?i)(DEHUM|DEHU|DH\d*)",
    AIR_SCRUBBER => r"(?i)(AIR\s*SCRUB|HEPA)",
    MOISTURE_METER => r"(?i)(MOIST|METER|READ)",
    TEAR_OUT => r"(?i)(TEAR\s*OUT|REMOVE|REM|DEMO)",
    INSTALL => r"(?i)(INSTALL|INST|LAY|REPLACE)",
    LEVELING => r"(?i)(LEVEL|PREP|SUBFLOOR|SELF-LEVEL|FLOAT)",
    WASTE => r"(?i)(WASTE|CUTOFF|OVERAGE)",
    CARPET => r"(?i)(CARPET|CPT|CRPT)",
    PAD => r"(?i)\b(PAD|UNDERLAYMENT|UNDERLAY)\b",
    HARDWOOD => r"(?i)(HARDWOOD|HWD|WOOD\s*FLOOR)",
    TILE => r"(?i)(TILE|CERAMIC|PORCELAIN)",
    LAMINATE => r"(?i)(LAMINATE|LAM)",
    VINYL => r"(?i)(VINYL|VNL|LVP|LVT)",
    LABOR => r"(?i)(LABOR|\bLBR\b|TECH|MONITOR|SUPERVISE|INSPECT)",
    MATERIAL => r"(?i)(MATERIAL|\bMAT\b|SUPPLY)",
    PPE_HAZMAT => r"(?i)(PPE|TYVEK|RESPIRATOR|GLOVE|GOGG|HAZMAT|HAZ\s*MAT|BIOHAZ)",
    ANTIMICROBIAL => r"(?i)(ANTIMICROBIAL|DISINFECT|SANITIZE|BIOCIDE)",
    DAILY_MONITOR => r"(?i)(DAILY\s*MONITOR|MONITOR.*DAILY|MOISTURE\s*READ)",
    CAT1 => r"(?i)(CAT\s*1|CATEGORY\s*1|CLEAN\s*WATER)",
    CAT2 => r"(?i)(CAT\s*2|CATEGORY\s*2|GRAY\s*WATER|GREY\s*WATER)",
    CAT3 => r"(?i)(CAT\s*3|CATEGORY\s*3|BLACK\s*WATER|SEWAGE|CONTAM)",
    TRANSITION => r"(?i)(TRANSITION|T-MOLD|REDUCER|THRESHOLD)",
    CONTENT_MANIPULATION => r"(?i)(CONTENT\s*MANIPULATION|MOVE\s*CONTENTS|PACK\s*OUT|FURNITURE\s*MOVE|MOVE\s*OUT)",
    BLOCKING_PADDING => r"(?i)(BLOCK|PAD|PROTECT|COVER|MASK).*?(CONTENT|FURNITURE|APPLIANCE)",
    SERVICE_CALL => r"(?i)(SERVICE\s*CALL|TRIP\s*CHARGE|CALL\s*OUT)",
    PRE_HUNG_DOOR => r"(?i)(PRE[-\s]?HUNG\s*DOOR|PREHUNG\s*DOOR)",
    HINGE => r"(?i)(HINGE)",
    WALLBOARD_DRYWALL => r"(?i)(WALLBOARD|DRYWALL)",
    WALLPAPER => r"(?i)(WALLPAPER)",
    REMOVE_DEMO_TEAR => r"(?i)(REMOVE|DEMO|TEAR)",
    STRIP => r"(?i)(STRIP)",
    PAINT => r"(?i)(PAINT)",
    PRIMER => r"(?i)(PRIMER)",
    DEMO_DEMOLITION => r"(?i)(DEMOLITION|\bDEMO\b)",
    HAUL_DISPOSAL => r"(?i)(HAUL[-\s]?OFF|DISPOSAL|DUMP|DEBRIS\s*REMOVAL)",
    BASE_MOLDING => r"(?i)(BASE\s*MOLDING|BASEBOARD)",
    CAP_MOLDING => r"(?i)(CAP\s*MOLDING)",
}

/// Named double-dip group, per `spec.md` §4.1. `overlap` names the
/// pattern considered the redundant line when all of `patterns` match;
/// `None` means the group is informational only (no billed overlap). Each
/// pattern is a predicate rather than a bare regex so a group member can
/// require more than one attribute to hold at once (e.g. "wallboard *and*
/// a removal action", not just "wallboard").
pub struct DoubleDipGroup {
    pub name: &'static str,
    pub patterns: Vec<(&'static str, fn(&str) -> bool)>,
    pub overlap: Option<&'static str>,
}

fn wallboard_removal(text: &str) -> bool {
    WALLBOARD_DRYWALL.is_match(text) && REMOVE_DEMO_TEAR.is_match(text)
}

fn wallpaper_removal(text: &str) -> bool {
    WALLPAPER.is_match(text) && (REMOVE_DEMO_TEAR.is_match(text) || STRIP.is_match(text))
}

/// A paint line item whose description already covers priming, i.e. paint
/// and primer mentioned together on one line.
fn paint_includes_primer(text: &str) -> bool {
    PAINT.is_match(text) && PRIMER.is_match(text)
}

/// A primer line item billed on its own, with no paint mention on the same
/// line — the redundant half when a combined paint-and-primer line is also
/// present.
fn primer_without_paint(text: &str) -> bool {
    PRIMER.is_match(text) && !PAINT.is_match(text)
}

pub fn double_dip_groups() -> Vec<DoubleDipGroup> {
    vec![
        DoubleDipGroup {
            name: "pre_hung_door_hardware",
            patterns: vec![("pre_hung_door", |t| PRE_HUNG_DOOR.is_match(t)), ("hinge", |t| HINGE.is_match(t))],
            overlap: Some("hinge"),
        },
        DoubleDipGroup {
            name: "wallboard_wallpaper_removal",
            patterns: vec![("wallboard_removal", wallboard_removal), ("wallpaper_removal", wallpaper_removal)],
            overlap: Some("wallpaper_removal"),
        },
        DoubleDipGroup {
            name: "paint_primer",
            patterns: vec![
                ("paint_includes_primer", paint_includes_primer),
                ("primer_without_paint", primer_without_paint),
            ],
            overlap: Some("primer_without_paint"),
        },
        DoubleDipGroup {
            name: "demo_disposal",
            patterns: vec![("demo", |t| DEMO_DEMOLITION.is_match(t)), ("disposal", |t| HAUL_DISPOSAL.is_match(t))],
            overlap: Some("disposal"),
        },
        DoubleDipGroup {
            name: "base_cap_molding",
            patterns: vec![("base_molding", |t| BASE_MOLDING.is_match(t)), ("cap_molding", |t| CAP_MOLDING.is_match(t))],
            overlap: None,
        },
    ]
}

/// Parsed attributes for one line item's combined text.
#[derive(Debug, Clone, Default)]
pub struct ParsedCode {
    pub category: TradeCategoryOpt,
    pub is_air_mover: bool,
    pub is_dehumidifier: bool,
    pub is_air_scrubber: bool,
    pub is_moisture_meter: bool,
    pub is_tear_out: bool,
    pub is_install: bool,
    pub is_leveling: bool,
    pub is_waste: bool,
    pub is_carpet: bool,
    pub is_pad: bool,
    pub is_hardwood: bool,
    pub is_tile: bool,
    pub is_laminate: bool,
    pub is_vinyl: bool,
    pub is_labor: bool,
    pub is_material: bool,
    pub is_ppe_hazmat: bool,
    pub is_antimicrobial: bool,
    pub is_daily_monitor: bool,
    pub is_transition: bool,
    pub is_content_manipulation: bool,
    pub is_blocking_padding: bool,
    pub is_service_call: bool,
}

/// `TradeCategory` wrapped so `ParsedCode` can `#[derive(Default)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeCategoryOpt(pub TradeCategory);

impl Default for TradeCategoryOpt {
    fn default() -> Self {
        TradeCategoryOpt(TradeCategory::Unknown)
    }
}

/// Classifies line-item text into a trade category and attribute tags,
/// caching parses keyed by `code|description` for the engine's lifetime.
#[derive(Default)]
pub struct Classifier {
    cache: RefCell<HashMap<String, ParsedCode>>,
}

impl Classifier {
    pub fn new() -> Self {
        Classifier::default()
    }

    pub fn parse(&self, code: &str, description: &str) -> ParsedCode {
        let key = format!("{code}|{description}");
        if let Some(cached) = self.cache.borrow().get(&key) {
            return cached.clone();
        }

        let text = format!("{code} {description}");
        let category = CATEGORY_PATTERNS
            .iter()
            .find(|p| p.regex.is_match(code))
            .map(|p| p.category)
            .unwrap_or(TradeCategory::Unknown);

        let parsed = ParsedCode {
            category: TradeCategoryOpt(category),
            is_air_mover: AIR_MOVER.is_match(&text),
            is_dehumidifier: DEHUMIDIFIER.is_match(&text),
            is_air_scrubber: AIR_SCRUBBER.is_match(&text),
            is_moisture_meter: MOISTURE_METER.is_match(&text),
            is_tear_out: TEAR_OUT.is_match(&text),
            is_install: INSTALL.is_match(&text),
            is_leveling: LEVELING.is_match(&text),
            is_waste: WASTE.is_match(&text),
            is_carpet: CARPET.is_match(&text),
            is_pad: PAD.is_match(&text),
            is_hardwood: HARDWOOD.is_match(&text),
            is_tile: TILE.is_match(&text),
            is_laminate: LAMINATE.is_match(&text),
            is_vinyl: VINYL.is_match(&text),
            is_labor: LABOR.is_match(&text),
            is_material: MATERIAL.is_match(&text),
            is_ppe_hazmat: PPE_HAZMAT.is_match(&text),
            is_antimicrobial: ANTIMICROBIAL.is_match(&text),
            is_daily_monitor: DAILY_MONITOR.is_match(&text),
            is_transition: TRANSITION.is_match(&text),
            is_content_manipulation: CONTENT_MANIPULATION.is_match(&text),
            is_blocking_padding: BLOCKING_PADDING.is_match(&text),
            is_service_call: SERVICE_CALL.is_match(&text),
        };

        self.cache.borrow_mut().insert(key, parsed.clone());
        parsed
    }

    pub fn water_category_hint(&self, text: &str) -> Option<u8> {
        if CAT3.is_match(text) {
            Some(3)
        } else if CAT2.is_match(text) {
            Some(2)
        } else if CAT1.is_match(text) {
            Some(1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_category_by_prefix() {
        let classifier = Classifier::new();
        let parsed = classifier.parse("WTR_AIRF", "Air Mover Rental");
        assert_eq!(parsed.category.0, TradeCategory::Wtr);
        assert!(parsed.is_air_mover);
    }

    #[test]
    fn pad_matches_whole_word_only() {
        let classifier = Classifier::new();
        let pad_item = classifier.parse("FCC_PAD", "Carpet Pad Removal");
        assert!(pad_item.is_pad);

        let not_pad = classifier.parse("GEN_SPADE", "Spade bit rental");
        assert!(!not_pad.is_pad);
    }

    #[test]
    fn caches_parses_by_code_and_description() {
        let classifier = Classifier::new();
        let _ = classifier.parse("WTR_AIRF", "Air Mover");
        assert_eq!(classifier.cache.borrow().len(), 1);
        let _ = classifier.parse("WTR_AIRF", "Air Mover");
        assert_eq!(classifier.cache.borrow().len(), 1);
    }

    #[test]
    fn double_dip_groups_match_spec_table() {
        let groups = double_dip_groups();
        assert_eq!(groups.len(), 5);
        let base_cap = groups.iter().find(|g| g.name == "base_cap_molding").unwrap();
        assert!(base_cap.overlap.is_none());
    }
}
