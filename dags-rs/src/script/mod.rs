//! DAGS scripting language.
//!
//! Scripts are plain strings stored in the [`Dictionary`](crate::store::Dictionary).
//! A value beginning with `@` is a script; anything else is literal text.
//! This module implements the interpreter for those scripts:
//!
//! - Tokenizing (`@name(` call tokens, bare `@keywords`, quoted literals)
//! - Integer/boolean coercion of string values
//! - Control flow: `@if` … `@elseif` … `@else` … `@endif`, `@for`,
//!   `@foreachkey`, `@foreachlist`, `@label`/`@golabel`, `@return`
//! - ~80 builtins (arithmetic, comparison, strings, lists, arrays, bits)
//! - User-defined functions stored under keys such as `@name(x,y)`
//! - Static validation of single scripts and whole dictionaries
//!
//! # Quick start
//!
//! ```rust
//! use dags::script::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! let mut out = String::new();
//! interp.run_script("@set(x,6) @write(@mul(@get(x),7))", &mut out);
//! assert_eq!(out, "42");
//! ```

pub mod builtins;
pub mod control;
pub mod error;
pub mod interp;
pub mod keyword;
pub mod list;
pub mod token;
pub mod validate;
pub mod value;

// Re-exports for convenience.
pub use error::ScriptError;
pub use interp::Interpreter;
pub use token::tokenize;
pub use validate::validate_syntax;
