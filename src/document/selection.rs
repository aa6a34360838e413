/*!
 * Selections and range edits over a document.
 *
 * Offsets are measured in editor units: one per character of text and one
 * per embed.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{Delta, Embed, Insert, Op};
use crate::errors::DocumentError;

/// A selected range of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start offset
    pub index: usize,
    /// Number of units selected
    pub length: usize,
}

impl Range {
    /// Create a new range.
    pub fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// End offset (exclusive), clamped to `usize::MAX`.
    pub fn end(&self) -> usize {
        self.index.saturating_add(self.length)
    }

    /// Whether the range selects nothing (a caret).
    pub fn is_collapsed(&self) -> bool {
        self.length == 0
    }
}

impl Delta {
    /// Contents of a selection.
    ///
    /// Without a range, or with a collapsed one, the whole document is
    /// returned. Otherwise the runs covering the range are returned, text
    /// runs cut at the range boundaries with their attributes kept.
    pub fn select(&self, range: Option<Range>) -> Delta {
        match range {
            Some(range) if !range.is_collapsed() => self.slice(range.index, range.end()),
            _ => self.clone(),
        }
    }

    /// Runs covering `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Delta {
        let mut ops = Vec::new();
        let mut position = 0;

        for op in &self.ops {
            let op_length = op.length();
            let op_start = position;
            let op_end = position + op_length;
            position = op_end;

            if op_end <= start || op_start >= end {
                continue;
            }

            match &op.insert {
                Insert::Text(text) => {
                    let from = start.saturating_sub(op_start);
                    let to = end.min(op_end) - op_start;
                    ops.push(Op {
                        insert: Insert::Text(char_slice(text, from, to)),
                        attributes: op.attributes.clone(),
                    });
                }
                Insert::Embed(_) => ops.push(op.clone()),
            }
        }

        Delta::new(ops)
    }

    /// Insert an embed at an offset.
    pub fn insert_embed(&mut self, index: usize, embed: Embed) -> Result<(), DocumentError> {
        self.check_range(index, 0)?;
        let at = self.split_at(index);
        self.ops.insert(at, Op::embed(embed));
        debug!("Inserted embed at {}", index);
        Ok(())
    }

    /// Apply (or with a falsy value, remove) a format over a range.
    pub fn format_range(
        &mut self,
        index: usize,
        length: usize,
        name: &str,
        value: Value,
    ) -> Result<(), DocumentError> {
        self.check_range(index, length)?;
        if length == 0 {
            return Ok(());
        }

        let first = self.split_at(index);
        let last = self.split_at(index + length);
        for op in &mut self.ops[first..last] {
            op.attributes.set(name, value.clone());
        }

        debug!("Formatted {}+{} with '{}'", index, length, name);
        self.compact();
        Ok(())
    }

    /// Merge neighbouring text runs that carry the same attributes.
    pub fn compact(&mut self) {
        let mut merged: Vec<Op> = Vec::with_capacity(self.ops.len());
        for op in self.ops.drain(..) {
            if let (Some(previous), Insert::Text(text)) = (merged.last_mut(), &op.insert) {
                if previous.attributes == op.attributes {
                    if let Insert::Text(previous_text) = &mut previous.insert {
                        previous_text.push_str(text);
                        continue;
                    }
                }
            }
            if matches!(&op.insert, Insert::Text(text) if text.is_empty()) {
                continue;
            }
            merged.push(op);
        }
        self.ops = merged;
    }

    /// Ensure a run boundary at `offset` and return the index of the first
    /// run starting at or after it.
    fn split_at(&mut self, offset: usize) -> usize {
        let mut position = 0;
        for i in 0..self.ops.len() {
            let op_length = self.ops[i].length();
            if offset == position {
                return i;
            }
            if offset < position + op_length {
                if let Insert::Text(text) = &self.ops[i].insert {
                    let cut = offset - position;
                    let head = char_slice(text, 0, cut);
                    let tail = char_slice(text, cut, op_length);
                    let attributes = self.ops[i].attributes.clone();
                    self.ops[i].insert = Insert::Text(head);
                    self.ops.insert(i + 1, Op { insert: Insert::Text(tail), attributes });
                }
                return i + 1;
            }
            position += op_length;
        }
        self.ops.len()
    }

    fn check_range(&self, index: usize, length: usize) -> Result<(), DocumentError> {
        let document_length = self.length();
        match index.checked_add(length) {
            Some(end) if end <= document_length => Ok(()),
            _ => Err(DocumentError::OutOfBounds {
                index,
                length,
                document_length,
            }),
        }
    }
}

/// Substring by character offsets.
fn char_slice(text: &str, from: usize, to: usize) -> String {
    text.chars().skip(from).take(to.saturating_sub(from)).collect()
}
