//! Static script checks.
//!
//! Validation never runs anything.  It walks the token vector once for
//! structure (if-chains, parentheses, loop pairs) and once for names (every
//! `@token` must be a keyword or resolve to a dictionary entry).  Problems
//! are appended to the caller's buffer one per line, each prefixed with the
//! key being checked.

use tracing::debug;

use super::keyword::*;
use super::token::tokenize;
use super::Interpreter;
use crate::store::Which;

/// Where an open `@if` is in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IfState {
    /// After `@if`/`@elseif`, waiting for `@then`.
    Cond,
    /// Inside a `@then` branch.
    Body,
    /// Inside the `@else` branch.
    Else,
}

fn report(key: &str, message: &str, out: &mut String) {
    if !key.is_empty() {
        out.push_str(key);
        out.push_str(": ");
    }
    out.push_str(message);
    out.push('\n');
}

/// Check the structure of `script`.  Plain text is always valid.
pub fn validate_syntax(key: &str, script: &str, out: &mut String) -> bool {
    if !script.trim_start().starts_with('@') {
        return true;
    }
    let tokens = tokenize(script);
    let mut ok = true;
    let mut fail = |message: String, out: &mut String| {
        ok = false;
        report(key, &message, out);
    };

    let mut ifs: Vec<IfState> = Vec::new();
    let (mut if_count, mut elseif_count, mut then_count, mut endif_count) = (0, 0, 0, 0);
    let mut parens = 0i32;
    let mut bad_parens = false;
    let mut loops = [(FOR, ENDFOR, 0i32), (FOREACHKEY, ENDFOREACHKEY, 0), (FOREACHLIST, ENDFOREACHLIST, 0)];
    let mut bad_loops = [false; 3];

    for (i, tok) in tokens.iter().enumerate() {
        let tok = tok.as_str();
        if tok.starts_with('@') && tok.ends_with('(') {
            parens += 1;
        } else if tok == ")" {
            parens -= 1;
            if parens < 0 {
                bad_parens = true;
                parens = 0;
            }
        }

        for (n, (open, close, level)) in loops.iter_mut().enumerate() {
            if tok == *open {
                *level += 1;
            } else if tok == *close {
                *level -= 1;
                if *level < 0 {
                    bad_loops[n] = true;
                    *level = 0;
                }
            }
        }

        let top = ifs.last().copied();
        let valid = match tok {
            IF => {
                if_count += 1;
                ifs.push(IfState::Cond);
                true
            }
            THEN => {
                then_count += 1;
                top == Some(IfState::Cond)
            }
            ELSEIF => {
                elseif_count += 1;
                top == Some(IfState::Body)
            }
            ELSE => top == Some(IfState::Body),
            ENDIF => {
                endif_count += 1;
                matches!(top, Some(IfState::Body | IfState::Else))
            }
            _ => true,
        };
        if !valid {
            fail(format!("{tok} at {i} is invalid."), out);
            continue;
        }
        if let Some(state) = ifs.last_mut() {
            match tok {
                THEN => *state = IfState::Body,
                ELSEIF => *state = IfState::Cond,
                ELSE => *state = IfState::Else,
                ENDIF => {
                    ifs.pop();
                }
                _ => {}
            }
        }
    }

    if bad_parens || parens != 0 {
        fail("Mismatched parenthesis".to_owned(), out);
    }
    if if_count != endif_count {
        fail(format!("Mismatched {IF}/{ENDIF} counts"), out);
    }
    if if_count + elseif_count != then_count {
        fail(format!("Mismatched {IF}/{ELSEIF} vs {THEN} counts"), out);
    }
    for ((open, close, level), bad) in loops.iter().zip(bad_loops) {
        if bad || *level != 0 {
            fail(format!("Mismatched {}/{close}", open.trim_end_matches('(')), out);
        }
    }
    ok
}

impl Interpreter {
    /// Validate `script` stored under `key`: structure first, then every
    /// `@token` must be a keyword or name an existing dictionary entry.
    pub fn validate_script(&self, key: &str, script: &str, out: &mut String) -> bool {
        if !validate_syntax(key, script, out) {
            return false;
        }
        if !script.trim_start().starts_with('@') {
            return true;
        }

        let mut ok = true;
        for tok in tokenize(script).iter().filter(|t| t.starts_with('@')) {
            if is_keyword(tok) {
                continue;
            }
            let found = if tok.ends_with('(') {
                !self.data().keys_with_prefix(tok).is_empty()
            } else {
                self.data().get(tok).map(|v| !v.is_empty()).unwrap_or(false)
            };
            if !found {
                ok = false;
                report(key, &format!("Function not found: {tok}"), out);
            }
        }
        ok
    }

    /// Validate every script-valued entry.  All failures are reported.
    pub fn validate_dictionary(&self, out: &mut String) -> bool {
        let mut ok = true;
        let mut checked = 0usize;
        for key in self.data().keys(Which::Both) {
            let Ok(value) = self.data().get(&key) else {
                continue;
            };
            if value.trim_start().starts_with('@') {
                checked += 1;
                ok &= self.validate_script(&key, &value, out);
            }
        }
        debug!(checked, ok, "validate_dictionary");
        ok
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
