//! DAGS: a string-keyed dictionary store and the `@`-prefixed script
//! language that runs over it.
//!
//! - [`store`]: the layered [`Dictionary`] (base + overlay, soft-delete, undo)
//! - [`script`]: tokenizer, coercion, builtins, [`Interpreter`] and validator
//! - [`config`] and [`cli`]: the batch host's `.dagsrc` and argv handling

pub mod cli;
pub mod config;
pub mod script;
pub mod store;

pub use script::{Interpreter, ScriptError};
pub use store::{Dictionary, StoreError, Which};
