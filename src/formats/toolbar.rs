/*!
 * Editor toolbar: layout, icons and button handlers.
 */

use log::{debug, info};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{FormatKind, attribute_value};
use crate::app_config::EditorConfig;
use crate::document::{Delta, Embed, Range};
use crate::errors::{DocumentError, RelayError};
use crate::relay::{ReadAloudSession, RelayTransport};
use crate::ssml::{AudioRewriter, SsmlWriter};

/// A toolbar control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarItem {
    /// Toggle button for a format or action
    Button(String),
    /// Header level button
    Header {
        /// Header level
        header: u8,
    },
    /// Picker offering fixed values; `None` clears the format
    Picker {
        /// Format name
        name: String,
        /// Offered values
        options: Vec<Option<String>>,
    },
}

// Serialized the way the editor expects: `"bold"`, `{"header": 1}`,
// `{"lang": [false, "fr-FR"]}`
impl Serialize for ToolbarItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Button(name) => serializer.serialize_str(name),
            Self::Header { header } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("header", header)?;
                map.end()
            }
            Self::Picker { name, options } => {
                let values: Vec<serde_json::Value> = options
                    .iter()
                    .map(|option| match option {
                        Some(value) => serde_json::Value::String(value.clone()),
                        None => serde_json::Value::Bool(false),
                    })
                    .collect();
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, &values)?;
                map.end()
            }
        }
    }
}

/// Toolbar layout and icons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolbar {
    /// Groups of controls
    pub container: Vec<Vec<ToolbarItem>>,
    /// Icon markup for the custom buttons, keyed by button name
    pub icons: BTreeMap<String, String>,
}

impl Toolbar {
    /// Build the toolbar for the configured languages and voices
    pub fn new(config: &EditorConfig) -> Self {
        let picker = |name: &str, values: &[String]| ToolbarItem::Picker {
            name: name.to_string(),
            options: std::iter::once(None)
                .chain(values.iter().cloned().map(Some))
                .collect(),
        };

        let container = vec![
            vec![ToolbarItem::Header { header: 1 }, ToolbarItem::Header { header: 2 }],
            vec![
                ToolbarItem::Button("bold".to_string()),
                ToolbarItem::Button("italic".to_string()),
                ToolbarItem::Button(FormatKind::Phoneme.name().to_string()),
                picker(FormatKind::Lang.name(), &config.languages),
                picker(FormatKind::Voice.name(), &config.voices),
                ToolbarItem::Button("clean".to_string()),
            ],
            vec![ToolbarItem::Button(FormatKind::Audio.name().to_string())],
            vec![ToolbarItem::Button("read".to_string())],
        ];

        let icons = [
            (
                "audio".to_string(),
                "<i class='fa fa-volume-up' title='Insert an audio clip by its URL'></i>".to_string(),
            ),
            (
                "phoneme".to_string(),
                "<i class='fab fa-creative-commons-sampling' title='Provide the pronunciation for the selected text in IPA format'></i>".to_string(),
            ),
            (
                "read".to_string(),
                "<i class='far fa-comment-dots' title='Read the whole text or the selection'></i>".to_string(),
            ),
        ]
        .into_iter()
        .collect();

        Self { container, icons }
    }

    /// Icon markup for a button
    pub fn icon(&self, name: &str) -> Option<&str> {
        self.icons.get(name).map(String::as_str)
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

/// Insert an audio clip typed by the user at the cursor
///
/// Sound library references are turned into their public URL so the editor
/// can play them.
pub fn insert_audio(
    delta: &mut Delta,
    cursor: Range,
    input: &str,
    rewriter: &AudioRewriter,
) -> Result<(), DocumentError> {
    let url = rewriter.to_public(input.trim());
    debug!("Inserting audio clip {} at {}", url, cursor.index);
    delta.insert_embed(cursor.index, Embed::Audio(url))
}

/// Question asked before applying a pronunciation
pub fn phoneme_prompt(delta: &Delta, selection: Option<Range>) -> Result<String, DocumentError> {
    let range = require_selection(selection)?;
    Ok(format!(
        "Enter the IPA description for '{}'",
        delta.slice(range.index, range.end()).text()
    ))
}

/// Apply a pronunciation to the selected text
pub fn apply_phoneme(
    delta: &mut Delta,
    selection: Option<Range>,
    pronunciation: &str,
) -> Result<(), DocumentError> {
    let range = require_selection(selection)?;
    delta.format_range(
        range.index,
        range.length,
        FormatKind::Phoneme.name(),
        attribute_value(Some(pronunciation.trim())),
    )
}

/// Read the selection (or the whole document) aloud
///
/// # Returns
/// * The SSML fragment handed to the session
pub async fn read_selection<T: RelayTransport>(
    session: &ReadAloudSession<T>,
    writer: &SsmlWriter,
    delta: &Delta,
    selection: Option<Range>,
) -> Result<String, RelayError> {
    let selected = delta.select(selection);
    let ssml = writer.render(&selected);
    info!("Reading {} characters aloud", selected.length());
    session.read(ssml.clone()).await?;
    Ok(ssml)
}

fn require_selection(selection: Option<Range>) -> Result<Range, DocumentError> {
    match selection {
        Some(range) if !range.is_collapsed() => Ok(range),
        _ => Err(DocumentError::EmptySelection(
            "You must first select the text for which you want to specify the pronunciation".to_string(),
        )),
    }
}
