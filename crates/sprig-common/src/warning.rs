//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so a malformed document that repeats the same
//! mistake does not flood stderr. Used by the tokenizer and the tree builder
//! to report parse errors to whoever is watching the terminal.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `key` in the global set. Returns true the first time a key is seen.
fn first_sighting(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Print a warning for `component` (prints once per unique message)
///
/// # Example
/// ```
/// use sprig_common::warning::warn_once;
///
/// warn_once("HTML Tokenizer", "unexpected character '1'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    if first_sighting(key) {
        eprintln!("{}", format!("[sprig {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if `message` has already been reported for `component`.
#[cfg(test)]
fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before parsing a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
