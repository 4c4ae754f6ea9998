//! Blocked-term sanitization for free-text form fields.
//!
//! `compiler` turns the merged term set into a reusable matcher, `input`
//! applies it to user text (with the exception allow-list and whitespace
//! normalization), and `sql` strips SQL-injection keywords on its own,
//! independent of any compiled matcher.

pub mod compiler;
pub mod input;
pub mod sql;
