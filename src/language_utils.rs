/*!
 * Language utilities for the tags carried by `lang` spans.
 *
 * The editor offers tags such as `fr-FR` or `de-DE`: a primary ISO 639-1
 * or ISO 639-2 subtag, optionally followed by a region subtag of two
 * letters or three digits. The speech engine only cares about the
 * language, so matching ignores regions.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Kind of primary subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Bibliographic codes that differ from their terminology counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a primary subtag to its language and code kind
fn resolve_primary(code: &str) -> Option<(Language, LanguageCodeType)> {
    let code = code.trim().to_lowercase();
    match code.len() {
        2 => Language::from_639_1(&code).map(|language| (language, LanguageCodeType::Part1)),
        3 => Language::from_639_3(&code)
            .map(|language| (language, LanguageCodeType::Part2T))
            .or_else(|| {
                BIBLIOGRAPHIC_CODES
                    .iter()
                    .find(|(bibliographic, _)| *bibliographic == code)
                    .and_then(|(_, terminology)| Language::from_639_3(terminology))
                    .map(|language| (language, LanguageCodeType::Part2B))
            }),
        _ => None,
    }
}

fn is_region(region: &str) -> bool {
    (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
        || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()))
}

/// A validated language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageTag<'a> {
    /// The language of the primary subtag
    pub language: Language,
    /// Kind of the primary subtag
    pub code_type: LanguageCodeType,
    /// Region subtag, if any
    pub region: Option<&'a str>,
}

impl<'a> LanguageTag<'a> {
    /// Parse and validate a tag (`fr-FR`, `de_DE`, `en`, `es-419`)
    pub fn parse(tag: &'a str) -> Result<Self> {
        let (primary, region) = split_language_tag(tag);
        let (language, code_type) =
            resolve_primary(primary).ok_or_else(|| anyhow!("Invalid language tag: {}", tag))?;

        if let Some(region) = region {
            if !is_region(region) {
                return Err(anyhow!("Invalid region in language tag: {}", tag));
            }
        }

        Ok(Self { language, code_type, region })
    }

    /// ISO 639-3 code of the language (equal to ISO 639-2/T for the codes the editor uses)
    pub fn part2t(&self) -> &'static str {
        self.language.to_639_3()
    }
}

/// Validate a primary subtag as an ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    resolve_primary(code)
        .map(|(_, code_type)| code_type)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Split a language tag into primary and region subtags
pub fn split_language_tag(tag: &str) -> (&str, Option<&str>) {
    let tag = tag.trim();
    match tag.split_once(['-', '_']) {
        Some((primary, region)) => (primary, Some(region)),
        None => (tag, None),
    }
}

/// Validate a language tag as used in `xml:lang` attributes
pub fn validate_language_tag(tag: &str) -> Result<LanguageCodeType> {
    Ok(LanguageTag::parse(tag)?.code_type)
}

/// ISO 639-2/T code of a primary subtag
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    resolve_primary(code)
        .map(|(language, _)| language.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Whether two tags name the same language, whatever their regions
pub fn language_codes_match(tag1: &str, tag2: &str) -> bool {
    match (LanguageTag::parse(tag1), LanguageTag::parse(tag2)) {
        (Ok(first), Ok(second)) => first.language == second.language,
        _ => false,
    }
}

/// English name of the language of a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    Ok(LanguageTag::parse(tag)?.language.to_name().to_string())
}
