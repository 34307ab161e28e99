//! Built-in operations that need nothing but their arguments.
//!
//! Each function receives the already-evaluated parameters and returns the
//! text it produces.  Builtins that touch the dictionary, the channels or the
//! token cursor live in the interpreter.

use std::cmp::Ordering;
use std::sync::LazyLock;

use aho_corasick::AhoCorasickBuilder;
use regex::{Captures, Regex};

use super::error::{check_at_least, check_count, ScriptError};
use super::keyword::*;
use super::value::{bool_str, narrow, parse_int, to_bool, to_bool_lenient, to_int};
use crate::store::NULL_VALUE;

/// Dispatch a pure built-in.
///
/// Returns `None` if `token` is not one (the interpreter then tries its own
/// builtins and user-defined functions).
pub fn call_builtin(token: &str, p: &[String]) -> Option<Result<String, ScriptError>> {
    // Inner function returns Result<Option<String>, ScriptError>:
    //   Ok(None)    → not a pure builtin
    //   Ok(Some(s)) → success
    //   Err(e)      → builtin call failed
    fn inner(token: &str, p: &[String]) -> Result<Option<String>, ScriptError> {
        Ok(Some(match token {
            // ── Arithmetic ───────────────────────────────────────────────────
            ABS => {
                check_count(token, p, 1)?;
                let a = to_int(&p[0])?;
                a.checked_abs()
                    .ok_or_else(|| overflow(token, &[a]))?
                    .to_string()
            }
            ADD | SUB | MUL | DIV | MOD => {
                check_count(token, p, 2)?;
                arith(token, to_int(&p[0])?, to_int(&p[1])?)?.to_string()
            }
            NEG => {
                check_count(token, p, 1)?;
                negate(token, to_int(&p[0])?)?.to_string()
            }

            // ── Comparison ───────────────────────────────────────────────────
            EQ | NE | LT | LE | GT | GE => {
                check_count(token, p, 2)?;
                let ord = compare(&p[0], &p[1]);
                bool_str(match token {
                    EQ => ord == Ordering::Equal,
                    NE => ord != Ordering::Equal,
                    LT => ord == Ordering::Less,
                    LE => ord != Ordering::Greater,
                    GT => ord == Ordering::Greater,
                    _ => ord != Ordering::Less,
                })
                .to_owned()
            }

            // ── Predicates ───────────────────────────────────────────────────
            TRUE => {
                check_count(token, p, 1)?;
                bool_str(to_bool_lenient(&p[0])?).to_owned()
            }
            FALSE => {
                check_count(token, p, 1)?;
                bool_str(to_bool(&p[0]).map(|b| !b).unwrap_or(false)).to_owned()
            }
            ISBOOL => {
                check_count(token, p, 1)?;
                bool_str(to_bool(&p[0]).is_ok()).to_owned()
            }
            ISNUMBER => {
                check_count(token, p, 1)?;
                bool_str(!p[0].is_empty() && parse_int(&p[0]).is_some()).to_owned()
            }
            NULL => {
                check_count(token, p, 1)?;
                bool_str(p[0].is_empty() || p[0].eq_ignore_ascii_case(NULL_VALUE)).to_owned()
            }

            // ── Strings ──────────────────────────────────────────────────────
            CONCAT => p.concat(),
            FORMAT => {
                check_at_least(token, p, 1)?;
                format_positional(&p[0], &p[1..])
            }
            REPLACE => {
                check_count(token, p, 3)?;
                replace_ignore_case(&p[0], &p[1], &p[2])?
            }
            SUBSTRING => {
                check_at_least(token, p, 2)?;
                let len = match p.get(2) {
                    Some(n) => Some(to_int(n)?),
                    None => None,
                };
                substring(&p[0], to_int(&p[1])?, len)?
            }
            TRIM => {
                check_count(token, p, 1)?;
                p[0].replace(NL_VALUE, "").trim().to_owned()
            }
            UPPER => {
                check_count(token, p, 1)?;
                p[0].to_uppercase()
            }
            LOWER => {
                check_count(token, p, 1)?;
                p[0].to_lowercase()
            }

            // ── Markers ──────────────────────────────────────────────────────
            COMMENT | LABEL => {
                check_count(token, p, 1)?;
                String::new()
            }

            // ── Bits ─────────────────────────────────────────────────────────
            GETBIT | SETBIT | CLEARBIT => {
                check_count(token, p, 2)?;
                let v = to_int(&p[0])?;
                let mask = 1i32 << bit_position(&p[1])?;
                match token {
                    GETBIT => i32::from(v & mask != 0),
                    SETBIT => v | mask,
                    _ => v & !mask,
                }
                .to_string()
            }
            BITWISEAND | BITWISEOR | BITWISEXOR => {
                check_count(token, p, 2)?;
                let (a, b) = (to_int(&p[0])?, to_int(&p[1])?);
                match token {
                    BITWISEAND => a & b,
                    BITWISEOR => a | b,
                    _ => a ^ b,
                }
                .to_string()
            }
            TOBINARY => {
                check_count(token, p, 1)?;
                format!("{:b}", to_int(&p[0])?)
            }
            TOINTEGER => {
                check_count(token, p, 1)?;
                let bits = p[0].trim();
                let n = u32::from_str_radix(bits, 2)
                    .map_err(|_| ScriptError::Coercion(format!("Value is not binary: {bits}")))?;
                // 32-digit inputs are two's complement, as produced by @tobinary.
                (n as i32).to_string()
            }

            _ => return Ok(None),
        }))
    }
    inner(token, p).transpose()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn overflow(token: &str, operands: &[i32]) -> ScriptError {
    let args: Vec<String> = operands.iter().map(i32::to_string).collect();
    ScriptError::Arithmetic(format!("{token}{}): Numeric overflow", args.join(",")))
}

/// Two-operand arithmetic in a 64-bit intermediate, narrowed to 32 bits.
pub fn arith(token: &str, a: i32, b: i32) -> Result<i32, ScriptError> {
    let (wa, wb) = (i64::from(a), i64::from(b));
    let wide = match token {
        ADD | ADDTO => wa + wb,
        SUB | SUBTO => wa - wb,
        MUL | MULTO => wa * wb,
        DIV | DIVTO => {
            if b == 0 {
                return Err(ScriptError::Arithmetic(format!("{token}{a},{b}): Division by zero!")));
            }
            wa / wb
        }
        MOD | MODTO => {
            if b == 0 {
                return Err(ScriptError::Arithmetic(format!("{token}{a},{b}): Mod by zero!")));
            }
            wa % wb
        }
        _ => return Err(ScriptError::Resolution(format!("Unknown script token: {token}"))),
    };
    narrow(wide, || overflow(token, &[a, b]).to_string())
}

pub fn negate(token: &str, a: i32) -> Result<i32, ScriptError> {
    narrow(-i64::from(a), || overflow(token, &[a]).to_string())
}

/// Numeric when both sides parse as integers, otherwise case-insensitive text
/// with `null` read as empty.
pub fn compare(a: &str, b: &str) -> Ordering {
    if let (Some(x), Some(y)) = (parse_int(a), parse_int(b)) {
        return x.cmp(&y);
    }
    let norm = |s: &str| {
        if s.eq_ignore_ascii_case(NULL_VALUE) {
            String::new()
        } else {
            s.to_lowercase()
        }
    };
    norm(a).cmp(&norm(b))
}

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

/// Replace `{i}` with `args[i]`.  Placeholders without an argument stay.
pub fn format_positional(template: &str, args: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

/// ASCII case-insensitive replace-all.
pub fn replace_ignore_case(haystack: &str, needle: &str, with: &str) -> Result<String, ScriptError> {
    if needle.is_empty() {
        return Err(ScriptError::Range("Replace value cannot be empty".to_owned()));
    }
    let ac = AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build([needle]);
    Ok(ac.replace_all(haystack, &[with]))
}

/// Characters from `start`, at most `len` of them.  A start outside the text
/// yields `""`; the length is clamped.
pub fn substring(text: &str, start: i32, len: Option<i32>) -> Result<String, ScriptError> {
    let chars: Vec<char> = text.chars().collect();
    let Ok(start) = usize::try_from(start) else { return Ok(String::new()) };
    if start >= chars.len() {
        return Ok(String::new());
    }
    let rest = &chars[start..];
    let take = match len {
        None => rest.len(),
        Some(n) => usize::try_from(n)
            .map_err(|_| ScriptError::Range(format!("Invalid substring length: {n}")))?
            .min(rest.len()),
    };
    Ok(rest[..take].iter().collect())
}

fn bit_position(s: &str) -> Result<u32, ScriptError> {
    match to_int(s)? {
        b @ 0..=30 => Ok(b as u32),
        b => Err(ScriptError::Range(format!("Invalid bit position: {b}"))),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn call(token: &str, args: &[&str]) -> Result<String, ScriptError> {
        let p: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        call_builtin(token, &p).expect("not a builtin")
    }

    fn ok(token: &str, args: &[&str]) -> String {
        call(token, args).unwrap()
    }

    #[test]
    fn unknown_returns_none() {
        assert!(call_builtin("@nosuch(", &[]).is_none());
        assert!(call_builtin(SET, &[]).is_none());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(ok(ADD, &["1", "3"]), "4");
        assert_eq!(ok(SUB, &["1", "3"]), "-2");
        assert_eq!(ok(MUL, &["3", "4"]), "12");
        assert_eq!(ok(DIV, &["42", "6"]), "7");
        assert_eq!(ok(MOD, &["13", "4"]), "1");
        assert_eq!(ok(NEG, &["3"]), "-3");
        assert_eq!(ok(ABS, &["-1"]), "1");
        assert_eq!(ok(ADD, &["true", ""]), "1");
    }

    #[test]
    fn arithmetic_errors() {
        assert_eq!(
            call(DIV, &["1", "0"]).unwrap_err().to_string(),
            "@div(1,0): Division by zero!"
        );
        assert!(call(MOD, &["1", "0"]).is_err());
        assert_eq!(
            call(ADD, &["2147483647", "1"]).unwrap_err().to_string(),
            "@add(2147483647,1): Numeric overflow"
        );
        assert!(call(NEG, &["-2147483648"]).is_err());
        assert!(call(ABS, &["-2147483648"]).is_err());
        assert!(call(DIV, &["-2147483648", "-1"]).is_err());
        assert_eq!(ok(MOD, &["-2147483648", "-1"]), "0");
        assert!(call(ADD, &["x", "1"]).unwrap_err().is_coercion());
    }

    #[test]
    fn comparison_numeric_and_text() {
        assert_eq!(ok(EQ, &["42", "42"]), "true");
        assert_eq!(ok(GT, &["42", "6"]), "true");
        assert_eq!(ok(LT, &["6", "42"]), "true");
        // "42" < "6" as text, but numeric wins
        assert_eq!(ok(LT, &["42", "6"]), "false");
        assert_eq!(ok(EQ, &["ABC", "abc"]), "true");
        assert_eq!(ok(EQ, &["null", ""]), "true");
        assert_eq!(ok(GE, &["b", "a"]), "true");
        assert_eq!(ok(LE, &["a", "a"]), "true");
        assert_eq!(ok(NE, &["a", "b"]), "true");
    }

    #[test]
    fn predicates_never_fail_on_bad_values() {
        assert_eq!(ok(TRUE, &["1"]), "true");
        assert_eq!(ok(TRUE, &["abc"]), "false");
        assert_eq!(ok(FALSE, &[""]), "true");
        assert_eq!(ok(FALSE, &["abc"]), "false");
        assert_eq!(ok(ISBOOL, &["0"]), "true");
        assert_eq!(ok(ISBOOL, &["notboolean"]), "false");
        assert_eq!(ok(ISNUMBER, &["123"]), "true");
        assert_eq!(ok(ISNUMBER, &["abc"]), "false");
        assert_eq!(ok(ISNUMBER, &[""]), "false");
        assert_eq!(ok(NULL, &["NULL"]), "true");
        assert_eq!(ok(NULL, &["abc"]), "false");
    }

    #[test]
    fn predicates_check_arity() {
        assert!(matches!(call(ISNUMBER, &[]), Err(ScriptError::Arity { .. })));
    }

    #[test]
    fn strings() {
        assert_eq!(ok(CONCAT, &["abc", "def", "123"]), "abcdef123");
        assert_eq!(ok(UPPER, &["abc"]), "ABC");
        assert_eq!(ok(LOWER, &["ABC"]), "abc");
        assert_eq!(ok(TRIM, &["  abc\\n "]), "abc");
        assert_eq!(ok(REPLACE, &["abcdef", "D", "x"]), "abcxef");
        assert!(call(REPLACE, &["abc", "", "x"]).is_err());
    }

    #[test]
    fn format_placeholders() {
        assert_eq!(ok(FORMAT, &["{0}-{1}-{2}", "1", "2", "3"]), "1-2-3");
        assert_eq!(ok(FORMAT, &["{2}-{1}-{0}", "1", "2", "3"]), "3-2-1");
        assert_eq!(ok(FORMAT, &["{0}-{1}-{2}", "1", "2"]), "1-2-{2}");
        assert_eq!(ok(FORMAT, &["{0}", "{1}", "x"]), "{1}");
    }

    #[test]
    fn format_is_infallible_across_calls() {
        for i in 0..3 {
            let args = [i.to_string(), "b".to_owned()];
            assert_eq!(format_positional("{0}{1}{9}", &args), format!("{i}b{{9}}"));
        }
        assert_eq!(format_positional("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn substring_clamps() {
        assert_eq!(ok(SUBSTRING, &["abcdef", "1", "4"]), "bcde");
        assert_eq!(ok(SUBSTRING, &["abcdef", "4", "10"]), "ef");
        assert_eq!(ok(SUBSTRING, &["abcdef", "2"]), "cdef");
        assert_eq!(ok(SUBSTRING, &["abcdef", "6"]), "");
        assert_eq!(ok(SUBSTRING, &["abcdef", "-1", "2"]), "");
        assert!(call(SUBSTRING, &["abcdef", "1", "-2"]).is_err());
    }

    #[test]
    fn bits() {
        assert_eq!(ok(GETBIT, &["4", "2"]), "1");
        assert_eq!(ok(GETBIT, &["8", "2"]), "0");
        assert_eq!(ok(GETBIT, &["1073741824", "30"]), "1");
        assert_eq!(ok(SETBIT, &["0", "30"]), "1073741824");
        assert_eq!(ok(CLEARBIT, &["7", "0"]), "6");
        assert_eq!(ok(BITWISEAND, &["7", "2"]), "2");
        assert_eq!(ok(BITWISEOR, &["8", "2"]), "10");
        assert_eq!(ok(BITWISEXOR, &["8", "7"]), "15");
        assert_eq!(ok(TOBINARY, &["7"]), "111");
        assert_eq!(ok(TOINTEGER, &["111"]), "7");
        assert!(call(SETBIT, &["0", "31"]).is_err());
        assert!(call(TOINTEGER, &["12"]).unwrap_err().is_coercion());
    }

    #[test]
    fn markers_produce_nothing() {
        assert_eq!(ok(COMMENT, &["this is a comment"]), "");
        assert_eq!(ok(LABEL, &["1"]), "");
    }
}
