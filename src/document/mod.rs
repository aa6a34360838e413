/*!
 * Rich-text document handling.
 *
 * This module provides the document model consumed by the markup writer:
 * - `model`: runs, embeds and attributes in the editor's delta format
 * - `selection`: selections and the range edits used by toolbar handlers
 */

pub mod model;
pub mod selection;

// Re-export types used by other modules
pub use model::{Attributes, Delta, Embed, Insert, Op};
pub use selection::Range;
