//! Deduplicate and render structured key/value lists.
//!
//! A key/value list alternates keys and values: `key, value, key, value, ...`.
//! Loggers typically hold several such lists (persistent context values plus
//! the values passed at a call site). This crate provides:
//! - [`trim_duplicates`]: drop duplicate keys across layered lists, later
//!   layers winning.
//! - [`kv_list_format`]: render a list as ` key="value" key=5 ...`.
//! - [`event::collect_event`]: turn a `tracing` event into a list so it can
//!   be rendered the same way.

mod dedup;
pub mod event;
mod format;
mod value;

pub use dedup::trim_duplicates;
pub use format::{MISSING_VALUE, kv_list_format, quote, quote_ascii_bytes};
pub use value::Value;

/// Build a `Vec<Value>` from items convertible into [`Value`].
///
/// ```
/// let list = kvfmt::kvs!["pod", "nginx", "restarts", 3];
/// assert_eq!(list.len(), 4);
/// ```
#[macro_export]
macro_rules! kvs {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($item)),+]
    };
}
