//! Lexicon and regex rule tagger.

use async_trait::async_trait;
use figment::{
    Figment,
    providers::{Format, Json, Toml, Yaml},
};
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::{PatternRule, RuleTaggerConfig, Tagger};
use crate::extraction::Span;
use crate::{ClinexError, Result};

const CLINICAL_TERMS: &[(&str, &[&str])] = &[
    (
        "DRUG",
        &[
            "aspirin",
            "metformin",
            "lisinopril",
            "atorvastatin",
            "simvastatin",
            "amoxicillin",
            "ibuprofen",
            "paracetamol",
            "acetaminophen",
            "insulin",
            "warfarin",
            "omeprazole",
            "amlodipine",
            "prednisone",
            "albuterol",
            "levothyroxine",
            "losartan",
            "gabapentin",
            "hydrochlorothiazide",
            "clopidogrel",
        ],
    ),
    (
        "ROUTE",
        &[
            "orally",
            "by mouth",
            "po",
            "intravenously",
            "iv",
            "intramuscularly",
            "im",
            "subcutaneously",
            "topically",
            "inhaled",
            "sublingually",
        ],
    ),
    (
        "FREQUENCY",
        &[
            "once daily",
            "twice daily",
            "three times daily",
            "four times daily",
            "once a day",
            "twice a day",
            "every morning",
            "at bedtime",
            "daily",
            "bid",
            "tid",
            "qid",
            "prn",
            "as needed",
            "every 4 hours",
            "every 6 hours",
            "every 8 hours",
            "every 12 hours",
        ],
    ),
    (
        "FORM",
        &[
            "tablet",
            "tablets",
            "capsule",
            "capsules",
            "injection",
            "inhaler",
            "syrup",
            "cream",
            "ointment",
            "patch",
            "drops",
            "solution",
            "suspension",
        ],
    ),
    (
        "DIAGNOSIS",
        &[
            "hypertension",
            "type 2 diabetes",
            "diabetes mellitus",
            "pneumonia",
            "asthma",
            "copd",
            "atrial fibrillation",
            "heart failure",
            "hypothyroidism",
            "hyperlipidemia",
            "migraine",
        ],
    ),
    (
        "CONDITION",
        &[
            "fever",
            "cough",
            "chest pain",
            "headache",
            "nausea",
            "shortness of breath",
            "fatigue",
            "dizziness",
            "back pain",
        ],
    ),
];

impl RuleTaggerConfig {
    /// Built-in clinical rules: a small medication lexicon plus strength,
    /// dosage and duration patterns.
    pub fn clinical() -> Self {
        let terms = CLINICAL_TERMS
            .iter()
            .map(|(label, terms)| {
                (
                    label.to_string(),
                    terms.iter().map(|term| term.to_string()).collect(),
                )
            })
            .collect();

        Self {
            lexicon_path: None,
            terms,
            patterns: vec![
                PatternRule::new(
                    "STRENGTH",
                    r"(?i)\b\d+(?:\.\d+)?\s?(?:mg|mcg|g|ml|units?|iu)\b",
                ),
                PatternRule::new(
                    "DOSAGE",
                    r"(?i)\b\d+\s+(?:tablets?|capsules?|puffs?|drops?)\b",
                ),
                PatternRule::new(
                    "DURATION",
                    r"(?i)\bfor\s+\d+\s+(?:days?|weeks?|months?)\b",
                ),
            ],
        }
    }

    /// Built-in general rules: titled names such as "Dr. Smith", labeled `PERSON`.
    pub fn general() -> Self {
        Self {
            lexicon_path: None,
            terms: BTreeMap::new(),
            patterns: vec![
                PatternRule::new(
                    "PERSON",
                    r"\b(?:Dr|Mr|Mrs|Ms|Miss|Prof)\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
                )
                .with_group(1),
            ],
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    label: String,
    regex: Regex,
    group: usize,
}

/// Tagger driven by a term lexicon and regex rules.
///
/// Terms match case-insensitively; where several hits overlap, the leftmost
/// one wins and ties go to the longer hit. Offsets are byte offsets.
#[derive(Debug)]
pub struct RuleTagger {
    name: String,
    lexicon: Option<Regex>,
    term_labels: HashMap<String, String>,
    rules: Vec<CompiledRule>,
}

impl RuleTagger {
    /// Build a tagger from configuration, loading the lexicon file if one is set.
    pub fn from_config(name: &str, config: &RuleTaggerConfig) -> Result<Self> {
        let mut terms = config.terms.clone();
        if let Some(path) = &config.lexicon_path {
            for (label, file_terms) in load_lexicon_file(path)? {
                terms.entry(label).or_default().extend(file_terms);
            }
        }

        let mut term_labels = HashMap::new();
        for (label, entries) in &terms {
            for term in entries {
                let term = term.trim();
                if !term.is_empty() {
                    term_labels.insert(term.to_lowercase(), label.clone());
                }
            }
        }

        let lexicon = build_lexicon_regex(&term_labels)?;

        let rules = config
            .patterns
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern).map_err(|e| {
                    ClinexError::Configuration(format!(
                        "Invalid pattern for label {}: {}",
                        rule.label, e
                    ))
                })?;
                Ok(CompiledRule {
                    label: rule.label.clone(),
                    regex,
                    group: rule.group.unwrap_or(0),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            lexicon,
            term_labels,
            rules,
        })
    }

    /// Number of distinct lexicon terms.
    pub fn term_count(&self) -> usize {
        self.term_labels.len()
    }

    fn lexicon_spans(&self, text: &str) -> Vec<Span> {
        let Some(lexicon) = &self.lexicon else {
            return Vec::new();
        };

        lexicon
            .find_iter(text)
            .filter_map(|m| {
                self.term_labels
                    .get(&m.as_str().to_lowercase())
                    .map(|label| Span::new(label.clone(), m.as_str(), m.start(), m.end()))
            })
            .collect()
    }

    fn rule_spans(&self, text: &str) -> Vec<Span> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.regex.captures_iter(text).filter_map(|caps| {
                    caps.get(rule.group)
                        .filter(|m| m.start() < m.end())
                        .map(|m| Span::new(rule.label.clone(), m.as_str(), m.start(), m.end()))
                })
            })
            .collect()
    }
}

#[async_trait]
impl Tagger for RuleTagger {
    async fn tag(&self, text: &str) -> Result<Vec<Span>> {
        let mut spans = self.lexicon_spans(text);
        spans.extend(self.rule_spans(text));
        Ok(remove_overlaps(spans))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn provider(&self) -> &str {
        "rules"
    }
}

/// Keep the leftmost, then longest, of any overlapping spans.
///
/// Among spans sharing a start, the one ending last is the longest.
fn remove_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut result: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match result.last() {
            Some(last) if last.overlaps(&span) => {}
            _ => result.push(span),
        }
    }
    result
}

fn build_lexicon_regex(term_labels: &HashMap<String, String>) -> Result<Option<Regex>> {
    if term_labels.is_empty() {
        return Ok(None);
    }

    // Longest first so the alternation prefers "once daily" over "daily".
    let mut terms: Vec<&String> = term_labels.keys().collect();
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let alternatives: Vec<String> = terms.iter().map(|term| word_bounded(term)).collect();

    RegexBuilder::new(&alternatives.join("|"))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| ClinexError::Configuration(format!("Invalid lexicon: {}", e)))
}

fn word_bounded(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if term.starts_with(is_word) { r"\b" } else { "" };
    let trailing = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", leading, regex::escape(term), trailing)
}

fn load_lexicon_file(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    if !path.exists() {
        return Err(ClinexError::Configuration(format!(
            "Lexicon file not found: {}",
            path.display()
        )));
    }

    let figment = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Figment::from(Toml::file(path)),
        Some("yaml") | Some("yml") => Figment::from(Yaml::file(path)),
        Some("json") => Figment::from(Json::file(path)),
        _ => {
            return Err(ClinexError::Configuration(format!(
                "Unsupported lexicon format: {}",
                path.display()
            )));
        }
    };

    figment.extract().map_err(|e| {
        ClinexError::Configuration(format!(
            "Failed to parse lexicon {}: {}",
            path.display(),
            e
        ))
    })
}
