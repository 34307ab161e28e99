//! Cursor routines for control flow.
//!
//! All functions take the token vector and a cursor position and return the
//! new position without executing anything.  Nesting is tracked by counting
//! open/close keyword pairs so an inner block's terminator never ends an
//! outer skip early.

use super::error::ScriptError;
use super::keyword::{ELSE, ELSEIF, ENDIF, IF, LABEL, THEN};
use super::token::literal_value;

/// Token at `index`, or [`ScriptError::UnexpectedEnd`].
pub fn token_at(tokens: &[String], index: usize) -> Result<&str, ScriptError> {
    tokens
        .get(index)
        .map(String::as_str)
        .ok_or(ScriptError::UnexpectedEnd)
}

/// Advance to the next sibling `@else`, `@elseif` or `@endif` of the current
/// `@if`.  Returns the position of that token.
pub fn skip_to_else(tokens: &[String], mut index: usize) -> Result<usize, ScriptError> {
    let mut level = 0usize;
    loop {
        match token_at(tokens, index)? {
            IF => level += 1,
            ENDIF if level > 0 => level -= 1,
            ELSE | ELSEIF | ENDIF if level == 0 => return Ok(index),
            _ => {}
        }
        index += 1;
    }
}

/// Advance past the `@endif` matching the current `@if`.
pub fn skip_past_endif(tokens: &[String], mut index: usize) -> Result<usize, ScriptError> {
    let mut level = 0usize;
    loop {
        match token_at(tokens, index)? {
            IF => level += 1,
            ENDIF if level == 0 => return Ok(index + 1),
            ENDIF => level -= 1,
            _ => {}
        }
        index += 1;
    }
}

/// Position of the next `@then`.  Used to skip the rest of a condition chain
/// once its outcome is known.
pub fn skip_to_then(tokens: &[String], mut index: usize) -> Result<usize, ScriptError> {
    while token_at(tokens, index)? != THEN {
        index += 1;
    }
    Ok(index)
}

/// Position just past one parameter expression starting at `index`: a
/// single token, or an `@name(` call through its matching `)`.
pub fn skip_expression(tokens: &[String], mut index: usize) -> Result<usize, ScriptError> {
    let mut level = 0usize;
    loop {
        let tok = token_at(tokens, index)?;
        index += 1;
        if tok.starts_with('@') && tok.ends_with('(') {
            level += 1;
        } else if tok == ")" && level > 0 {
            level -= 1;
        }
        if level == 0 {
            return Ok(index);
        }
    }
}

/// Capture a loop body starting at `index` up to the `close` keyword that
/// matches the enclosing `open`.  Returns the body re-joined with spaces and
/// the position just past `close`.
pub fn capture_body(
    tokens: &[String],
    mut index: usize,
    open: &str,
    close: &str,
) -> Result<(String, usize), ScriptError> {
    let mut level = 0usize;
    let mut body: Vec<&str> = Vec::new();
    loop {
        let Some(tok) = tokens.get(index) else {
            return Err(ScriptError::Structural(format!(
                "Missing {close} for {}",
                open.trim_end_matches('(')
            )));
        };
        index += 1;
        if tok == open {
            level += 1;
        } else if tok == close {
            if level == 0 {
                return Ok((body.join(" "), index));
            }
            level -= 1;
        }
        body.push(tok);
    }
}

/// Position just past the first `@label(name)` in the token vector.
pub fn find_label(tokens: &[String], name: &str) -> Option<usize> {
    tokens.windows(3).position(|w| {
        w[0] == LABEL && w[2] == ")" && literal_value(&w[1]) == name
    })
    .map(|i| i + 3)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::keyword::{ENDFOR, FOR};
    use crate::script::token::tokenize;

    #[test]
    fn skip_to_else_ignores_nested_blocks() {
        let t = tokenize("a @if b @then c @else d @endif @else e @endif");
        let i = skip_to_else(&t, 0).unwrap();
        assert_eq!(t[i], ELSE);
        assert_eq!(t[i + 1], "e");
    }

    #[test]
    fn skip_to_else_stops_at_elseif() {
        let t = tokenize("a @elseif b @then c @endif");
        assert_eq!(skip_to_else(&t, 0).unwrap(), 1);
    }

    #[test]
    fn skip_past_matching_endif() {
        let t = tokenize("x @if y @then z @endif w @endif tail");
        let i = skip_past_endif(&t, 0).unwrap();
        assert_eq!(t[i], "tail");
    }

    #[test]
    fn skip_expression_covers_nested_calls() {
        let t = tokenize("@div(@add(1,2),0) @then a");
        let i = skip_expression(&t, 0).unwrap();
        assert_eq!(t[i], THEN);
        let t = tokenize("@nosuch @then");
        assert_eq!(skip_expression(&t, 0).unwrap(), 1);
        let t = tokenize("@div(1,");
        assert!(matches!(skip_expression(&t, 0), Err(ScriptError::UnexpectedEnd)));
    }

    #[test]
    fn skip_runs_off_end() {
        let t = tokenize("x @if y @endif");
        assert!(matches!(skip_past_endif(&t, 0), Err(ScriptError::UnexpectedEnd)));
    }

    #[test]
    fn then_search() {
        let t = tokenize("@and @set(s,1) @then x");
        assert_eq!(t[skip_to_then(&t, 0).unwrap()], THEN);
    }

    #[test]
    fn capture_nested_loop_body() {
        let t = tokenize("@for(j,1,2) @write($i$j) @endfor @endfor rest");
        let (body, next) = capture_body(&t, 0, FOR, ENDFOR).unwrap();
        assert_eq!(body, "@for( j , 1 , 2 ) @write( $i$j ) @endfor");
        assert_eq!(t[next], "rest");
    }

    #[test]
    fn capture_missing_close() {
        let t = tokenize("@write(x)");
        let e = capture_body(&t, 0, FOR, ENDFOR).unwrap_err();
        assert_eq!(e.to_string(), "Missing @endfor for @for");
    }

    #[test]
    fn label_lookup() {
        let t = tokenize("@write(abc) @golabel(1) @write(def) @label(1) @write(xyz)");
        let i = find_label(&t, "1").unwrap();
        assert_eq!(t[i], "@write(");
        assert_eq!(t[i + 1], "xyz");
        assert_eq!(find_label(&t, "2"), None);
    }
}
