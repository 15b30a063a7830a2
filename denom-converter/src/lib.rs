//! Denom Converter - headless converter form
//!
//! The state behind a converter screen: one text field per unit of a
//! domain, re-derived on every edit, with the error shown next to the
//! offending field. Clipboard and handoff storage are host capabilities
//! passed in as traits.

mod bridge;
mod converter;

pub use bridge::{Clipboard, HandoffStore, MemoryClipboard, MemoryHandoff};
pub use converter::{ApplyOutcome, Converter, FieldError, PendingUpdate, Revision};
