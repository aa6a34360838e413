/*!
 * Validation of SSML fragments before they are spoken.
 *
 * The validator checks tag nesting, the supported tag set, required
 * attributes and text escaping. Problems the speech engine tolerates are
 * reported as warnings, problems that make it reject the fragment as errors.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::language_utils::validate_language_tag;

/// Regex for matching opening, closing and self-closing tags
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][\w:.-]*)([^<>]*?)(/?)>").expect("Invalid tag regex")
});

/// Regex for matching tag attributes
static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w:.-]+)\s*=\s*(?:'([^']*)'|"([^"]*)")"#).expect("Invalid attribute regex")
});

/// Regex for matching well-formed character references
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:amp|lt|gt|apos|quot|#\d+|#x[0-9a-fA-F]+);").expect("Invalid entity regex")
});

/// Regex for break durations
static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:\.\d+)?(?:s|ms)$").expect("Invalid duration regex")
});

/// Tags the speech engine accepts inside a fragment
const SUPPORTED_TAGS: &[&str] = &[
    "break", "emphasis", "lang", "voice", "phoneme", "audio", "p", "s", "say-as",
    "prosody", "sub", "w", "amazon:effect", "amazon:domain",
];

const BREAK_STRENGTHS: &[&str] = &["none", "x-weak", "weak", "medium", "strong", "x-strong"];

const EMPHASIS_LEVELS: &[&str] = &["strong", "moderate", "reduced"];

const PHONEME_ALPHABETS: &[&str] = &["ipa", "x-sampa"];

/// Result of validating a fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Problems the engine tolerates
    pub warnings: Vec<String>,
    /// Problems that make the engine reject the fragment
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Whether at least one error was found
    pub fn contains_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether neither errors nor warnings were found
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
    }
}

/// A parsed tag occurrence
struct Tag<'a> {
    name: &'a str,
    closing: bool,
    self_closing: bool,
    attributes: Vec<(&'a str, &'a str)>,
    offset: usize,
}

impl<'a> Tag<'a> {
    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// Validator for SSML fragments
#[derive(Debug, Clone)]
pub struct SsmlValidator {
    known_voices: BTreeSet<String>,
}

impl SsmlValidator {
    /// Create a validator that knows the given voice names
    pub fn new<I, S>(known_voices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_voices: known_voices.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate a fragment (the content of a `<speak>` element)
    pub fn validate_fragment(&self, fragment: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        if fragment.trim().is_empty() {
            report.warn("Fragment is empty".to_string());
            return report;
        }

        let mut open_tags: Vec<(&str, usize)> = Vec::new();
        let mut text_start = 0;

        for captures in TAG_REGEX.captures_iter(fragment) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            self.check_text(&fragment[text_start..whole.start()], text_start, &mut report);
            text_start = whole.end();

            let tag = Tag {
                name: captures.get(2).map_or("", |m| m.as_str()),
                closing: captures.get(1).is_some_and(|m| !m.as_str().is_empty()),
                self_closing: captures.get(4).is_some_and(|m| !m.as_str().is_empty()),
                attributes: captures
                    .get(3)
                    .map(|m| parse_attributes(m.as_str()))
                    .unwrap_or_default(),
                offset: whole.start(),
            };

            if !SUPPORTED_TAGS.contains(&tag.name) {
                report.error(format!("Unsupported tag <{}> at offset {}", tag.name, tag.offset));
            }

            if tag.closing {
                match open_tags.pop() {
                    Some((open, _)) if open == tag.name => {}
                    Some((open, open_offset)) => report.error(format!(
                        "Closing tag </{}> at offset {} does not match <{}> opened at offset {}",
                        tag.name, tag.offset, open, open_offset
                    )),
                    None => report.error(format!(
                        "Closing tag </{}> at offset {} has no opening tag",
                        tag.name, tag.offset
                    )),
                }
                continue;
            }

            self.check_attributes(&tag, &mut report);
            if !tag.self_closing {
                open_tags.push((tag.name, tag.offset));
            }
        }
        self.check_text(&fragment[text_start..], text_start, &mut report);

        for (name, offset) in open_tags {
            report.error(format!("Tag <{}> opened at offset {} is never closed", name, offset));
        }

        debug!(
            "Validated fragment of {} bytes: {} errors, {} warnings",
            fragment.len(),
            report.errors.len(),
            report.warnings.len()
        );
        report
    }

    fn check_text(&self, text: &str, offset: usize, report: &mut ValidationReport) {
        for (i, c) in text.char_indices() {
            match c {
                '<' => report.error(format!("Unescaped '<' at offset {}", offset + i)),
                '&' if !ENTITY_REGEX.is_match(&text[i..]) => {
                    report.error(format!("Unescaped '&' at offset {}", offset + i))
                }
                _ => {}
            }
        }
    }

    fn check_attributes(&self, tag: &Tag<'_>, report: &mut ValidationReport) {
        match tag.name {
            "break" => {
                if let Some(time) = tag.attribute("time") {
                    if !DURATION_REGEX.is_match(time) {
                        report.warn(format!("Break duration '{}' is not of the form 1s or 500ms", time));
                    }
                }
                if let Some(strength) = tag.attribute("strength") {
                    if !BREAK_STRENGTHS.contains(&strength) {
                        report.warn(format!("Unknown break strength '{}'", strength));
                    }
                }
            }
            "emphasis" => {
                if let Some(level) = tag.attribute("level") {
                    if !EMPHASIS_LEVELS.contains(&level) {
                        report.warn(format!("Unknown emphasis level '{}'", level));
                    }
                }
            }
            "lang" => match tag.attribute("xml:lang") {
                Some(code) => {
                    if validate_language_tag(code).is_err() {
                        report.warn(format!("Unknown language '{}'", code));
                    }
                }
                None => report.error(format!("<lang> at offset {} lacks xml:lang", tag.offset)),
            },
            "voice" => match tag.attribute("name") {
                Some(name) => {
                    if !self.known_voices.contains(name) {
                        report.warn(format!("Unknown voice '{}'", name));
                    }
                }
                None => report.error(format!("<voice> at offset {} lacks name", tag.offset)),
            },
            "phoneme" => {
                if tag.attribute("ph").is_none() {
                    report.error(format!("<phoneme> at offset {} lacks ph", tag.offset));
                }
                match tag.attribute("alphabet") {
                    Some(alphabet) if !PHONEME_ALPHABETS.contains(&alphabet) => {
                        report.error(format!("Unknown phonetic alphabet '{}'", alphabet))
                    }
                    _ => {}
                }
            }
            "audio" => match tag.attribute("src") {
                Some(src) => {
                    if !src.starts_with("https://") && !src.starts_with("soundbank://") {
                        report.warn(format!("Audio source '{}' is neither https nor soundbank", src));
                    }
                }
                None => report.error(format!("<audio> at offset {} lacks src", tag.offset)),
            },
            _ => {}
        }
    }
}

impl Default for SsmlValidator {
    fn default() -> Self {
        Self::new(crate::ssml::voice::VoiceMap::default().known_names())
    }
}

fn parse_attributes(text: &str) -> Vec<(&str, &str)> {
    ATTRIBUTE_REGEX
        .captures_iter(text)
        .filter_map(|cap| {
            let name = cap.get(1)?.as_str();
            let value = cap.get(2).or_else(|| cap.get(3))?.as_str();
            Some((name, value))
        })
        .collect()
}
