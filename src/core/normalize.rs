//! Field-level cleanup for disbursement records.
//!
//! Every operation here is pure: a record's output depends only on that
//! record and the active [`NormalizationRules`].

use crate::domain::model::{Amount, InputRecord, OutputRecord};
use crate::utils::error::{NormalizeError, Result};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// ASCII digits only: `f64::from_str` cannot read other Unicode digits anyway.
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("valid amount regex"));

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// A literal, case-sensitive substring rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationRules {
    pub category_canonical: String,
    pub category_misspellings: Vec<String>,
    /// Applied in order; later entries see the output of earlier ones.
    pub sub_category: Vec<Replacement>,
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self {
            category_canonical: "Bursaries".to_string(),
            category_misspellings: vec!["busaries".to_string(), "burseries".to_string()],
            sub_category: vec![
                Replacement::new("secondary boarding", "Secondary Boarding School"),
                Replacement::new("skills development", "Skills Development"),
                Replacement::new("secondary school", "Secondary School"),
                Replacement::new("development", "Development"),
                Replacement::new("n/a", "N/A"),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: NormalizationRules,
    misspellings: Option<Regex>,
}

impl Normalizer {
    pub fn new(rules: NormalizationRules) -> Result<Self> {
        if let Some(index) = rules.sub_category.iter().position(|r| r.from.is_empty()) {
            return Err(NormalizeError::ConfigValidationError {
                field: format!("rules.sub_category[{}].from", index),
                message: "replacement source cannot be empty".to_string(),
            });
        }

        let alternatives: Vec<String> = rules
            .category_misspellings
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| regex::escape(m))
            .collect();

        let misspellings = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!("(?i){}", alternatives.join("|"));
            let re = Regex::new(&pattern).map_err(|e| NormalizeError::ConfigValidationError {
                field: "rules.category_misspellings".to_string(),
                message: e.to_string(),
            })?;
            Some(re)
        };

        Ok(Self {
            rules,
            misspellings,
        })
    }

    /// Trim, capitalize the first letter (lower-casing the rest) and fold
    /// known misspellings onto the canonical spelling.
    pub fn category(&self, raw: &str) -> String {
        let capitalized = capitalize(raw.trim());
        match &self.misspellings {
            Some(re) => re
                .replace_all(&capitalized, NoExpand(&self.rules.category_canonical))
                .into_owned(),
            None => capitalized,
        }
    }

    pub fn sub_category(&self, raw: &str) -> String {
        self.rules
            .sub_category
            .iter()
            .fold(raw.trim().to_string(), |acc, r| acc.replace(&r.from, &r.to))
    }

    pub fn record(&self, record: &InputRecord) -> Result<OutputRecord> {
        Ok(OutputRecord {
            constituency: record.constituency.trim().to_string(),
            category: self.category(&record.category),
            sub_category: self.sub_category(&record.sub_category),
            amount: parse_amount(&record.amount)?,
        })
    }

    /// Normalize every record in order. The first bad amount aborts the batch.
    pub fn records(&self, records: &[InputRecord]) -> Result<Vec<OutputRecord>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.record(record).inspect_err(|e| {
                    tracing::error!(index, constituency = %record.constituency, "{}", e);
                })
            })
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizationRules::default()).expect("default rules are valid")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn normalize_category(raw: &str) -> String {
    DEFAULT_NORMALIZER.category(raw)
}

pub fn normalize_sub_category(raw: &str) -> String {
    DEFAULT_NORMALIZER.sub_category(raw)
}

pub fn normalize_record(record: &InputRecord) -> Result<OutputRecord> {
    DEFAULT_NORMALIZER.record(record)
}

/// Parse a free-form amount such as `"R 1,234.50"`.
///
/// Empty, whitespace-only and `"0"` cells are [`Amount::Blank`]. Anything
/// else keeps only ASCII digits and `.` and must then parse as a finite float.
pub fn parse_amount(raw: &str) -> Result<Amount> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return Ok(Amount::Blank);
    }

    let stripped = NON_NUMERIC.replace_all(trimmed, "");
    let value = stripped
        .parse::<f64>()
        .map_err(|source| NormalizeError::AmountParseError {
            raw: raw.to_string(),
            stripped: stripped.to_string(),
            source,
        })?;

    // JSON has no infinity; serde_json would write it as null
    if !value.is_finite() {
        return Err(NormalizeError::AmountOutOfRangeError {
            raw: raw.to_string(),
            stripped: stripped.into_owned(),
        });
    }

    Ok(Amount::Parsed(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(constituency: &str, category: &str, sub: &str, amount: &str) -> InputRecord {
        InputRecord {
            constituency: constituency.to_string(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_category_capitalizes_first_letter_only() {
        assert_eq!(normalize_category("  PROJECTS "), "Projects");
        assert_eq!(normalize_category("community projects"), "Community projects");
        assert_eq!(normalize_category("empowerment"), "Empowerment");
        assert_eq!(normalize_category(""), "");
    }

    #[test]
    fn test_category_fixes_misspellings_in_any_case() {
        for raw in ["busaries", " Busaries", "BUSARIES  ", "burseries", " burseries", "Burseries"] {
            assert_eq!(normalize_category(raw), "Bursaries", "input {:?}", raw);
        }
    }

    #[test]
    fn test_category_is_idempotent() {
        for raw in ["Bursaries", "Projects", "Community projects", "0", "busaries", "x"] {
            let once = normalize_category(raw);
            assert_eq!(normalize_category(&once), once);
        }
    }

    #[test]
    fn test_sub_category_replacements() {
        assert_eq!(normalize_sub_category("N/A"), "N/A");
        assert_eq!(normalize_sub_category("n/a"), "N/A");
        assert_eq!(normalize_sub_category("skills development"), "Skills Development");
        assert_eq!(normalize_sub_category("  secondary school "), "Secondary School");
        assert_eq!(
            normalize_sub_category("secondary boarding"),
            "Secondary Boarding School"
        );
        assert_eq!(normalize_sub_category("development"), "Development");
        assert_eq!(normalize_sub_category("Grants"), "Grants");
    }

    #[test]
    fn test_sub_category_replacements_apply_in_order() {
        // "community development" only matches the generic rule
        assert_eq!(
            normalize_sub_category("community development"),
            "community Development"
        );
        // the earlier rule consumes the lowercase text, so the generic one never fires
        assert_eq!(
            normalize_sub_category("skills development skills development"),
            "Skills Development Skills Development"
        );
    }

    #[test]
    fn test_parse_amount_blank_values() {
        assert_eq!(parse_amount("").unwrap(), Amount::Blank);
        assert_eq!(parse_amount("   ").unwrap(), Amount::Blank);
        assert_eq!(parse_amount("0").unwrap(), Amount::Blank);
        assert_eq!(parse_amount(" 0 ").unwrap(), Amount::Blank);
    }

    #[test]
    fn test_parse_amount_strips_symbols() {
        assert_eq!(parse_amount("R 1,234.50").unwrap(), Amount::Parsed(1234.5));
        assert_eq!(parse_amount("R0").unwrap(), Amount::Parsed(0.0));
        assert_eq!(parse_amount("R0").unwrap().value(), 0.0);
        assert_eq!(parse_amount("K13,875,699.29").unwrap(), Amount::Parsed(13875699.29));
        assert_eq!(parse_amount("-500").unwrap(), Amount::Parsed(500.0));
    }

    #[test]
    fn test_parse_amount_rejects_bad_numbers() {
        let err = parse_amount("1.2.3").unwrap_err();
        match err {
            NormalizeError::AmountParseError { raw, stripped, .. } => {
                assert_eq!(raw, "1.2.3");
                assert_eq!(stripped, "1.2.3");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(parse_amount("N/A").is_err());
        assert!(parse_amount(".").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_overflow() {
        let raw = format!("R{}", "9".repeat(400));
        match parse_amount(&raw).unwrap_err() {
            NormalizeError::AmountOutOfRangeError { raw: r, stripped } => {
                assert_eq!(r, raw);
                assert_eq!(stripped.len(), 400);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // the largest finite values still parse
        assert!(parse_amount(&"9".repeat(308)).unwrap().value().is_finite());
    }

    #[test]
    fn test_parse_amount_ignores_non_ascii_digits() {
        // Arabic-Indic digits are dropped with the other symbols
        assert!(parse_amount("R \u{0661}\u{0662}").is_err());
        assert_eq!(parse_amount("R 1\u{0662}5").unwrap(), Amount::Parsed(15.0));
    }

    #[test]
    fn test_normalize_record() {
        let out = normalize_record(&input(" Soweto ", " burseries", "n/a", "R500.00")).unwrap();
        assert_eq!(out.constituency, "Soweto");
        assert_eq!(out.category, "Bursaries");
        assert_eq!(out.sub_category, "N/A");
        assert_eq!(out.amount, Amount::Parsed(500.0));
    }

    #[test]
    fn test_records_preserve_length_and_order() {
        let inputs = vec![
            input("Katuba", "busaries", "secondary boarding", "126000"),
            input("Keembe", "projects", "Community Projects", ""),
            input("Kabwe Central", "empowerment", "Grants", "490,000.00"),
        ];

        let outputs = Normalizer::default().records(&inputs).unwrap();

        assert_eq!(outputs.len(), inputs.len());
        let names: Vec<&str> = outputs.iter().map(|r| r.constituency.as_str()).collect();
        assert_eq!(names, ["Katuba", "Keembe", "Kabwe Central"]);
        assert_eq!(outputs[1].amount, Amount::Blank);
        assert_eq!(outputs[2].amount.value(), 490000.0);
    }

    #[test]
    fn test_records_abort_on_first_bad_amount() {
        let inputs = vec![
            input("A", "projects", "Grants", "100"),
            input("B", "projects", "Grants", "1.2.3"),
        ];
        assert!(Normalizer::default().records(&inputs).is_err());
    }

    #[test]
    fn test_custom_rules() {
        let rules = NormalizationRules {
            category_canonical: "Grants".to_string(),
            category_misspellings: vec!["grnts".to_string()],
            sub_category: vec![Replacement::new("ngo", "NGO")],
        };
        let normalizer = Normalizer::new(rules).unwrap();

        assert_eq!(normalizer.category("GRNTS"), "Grants");
        assert_eq!(normalizer.category("busaries"), "Busaries");
        assert_eq!(normalizer.sub_category(" local ngo "), "local NGO");
    }

    #[test]
    fn test_empty_replacement_source_is_rejected() {
        let rules = NormalizationRules {
            sub_category: vec![Replacement::new("", "x")],
            ..NormalizationRules::default()
        };
        assert!(matches!(
            Normalizer::new(rules),
            Err(NormalizeError::ConfigValidationError { .. })
        ));
    }
}
