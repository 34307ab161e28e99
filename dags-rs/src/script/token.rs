//! Script tokenizer.
//!
//! Splits script text into a flat token vector.  Tokens are classified by
//! their shape rather than a tag:
//!
//! | Shape | Example |
//! |-------|---------|
//! | call-style builtin or function | `@add(` |
//! | bare keyword or reference | `@if`, `@boo` |
//! | structural | `,` `)` |
//! | quoted literal | `"a b"` |
//! | bare literal | `abc` |
//!
//! Quoted tokens keep their surrounding quotes and any backslash escapes so
//! that a token span can be re-joined and re-tokenized without loss (loop
//! bodies rely on this).  [`literal_value`] resolves a token to the text it
//! denotes.

/// Split `script` into tokens.  Never fails; unbalanced quotes degrade into a
/// best-effort trailing token.
pub fn tokenize(script: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quote = false;
    let mut last_slash = false;

    fn flush(tokens: &mut Vec<String>, cur: &mut String) {
        if cur.is_empty() {
            return;
        }
        let tok = std::mem::take(cur);
        if tok.starts_with('@') {
            tokens.push(tok.to_lowercase());
        } else {
            tokens.push(tok);
        }
    }

    for c in script.chars() {
        if in_quote {
            if last_slash {
                cur.push('\\');
                cur.push(c);
                last_slash = false;
                continue;
            }
            match c {
                '\\' => last_slash = true,
                '"' => {
                    cur.push('"');
                    flush(&mut tokens, &mut cur);
                    in_quote = false;
                }
                c => cur.push(c),
            }
            continue;
        }

        match c {
            ',' | ')' => {
                flush(&mut tokens, &mut cur);
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() => flush(&mut tokens, &mut cur),
            '"' if cur.is_empty() => {
                in_quote = true;
                cur.push('"');
            }
            '@' if !cur.is_empty() => {
                flush(&mut tokens, &mut cur);
                cur.push('@');
            }
            '(' if !cur.is_empty() => {
                cur.push('(');
                flush(&mut tokens, &mut cur);
            }
            c => cur.push(c),
        }
    }

    if last_slash {
        cur.push('\\');
    }
    flush(&mut tokens, &mut cur);
    tokens
}

/// Returns `true` for a complete quoted token (`"..."`).
pub fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// The text a literal token denotes: quotes stripped and `\"` resolved for
/// quoted tokens, the token itself otherwise.
pub fn literal_value(token: &str) -> String {
    if is_quoted(token) {
        token[1..token.len() - 1].replace("\\\"", "\"")
    } else {
        token.to_owned()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn call_with_params() {
        assert_eq!(toks("@add(1,2)"), vec!["@add(", "1", ",", "2", ")"]);
    }

    #[test]
    fn function_names_lowercased() {
        assert_eq!(toks("@WRITE(Abc)"), vec!["@write(", "Abc", ")"]);
        assert_eq!(toks("@IF"), vec!["@if"]);
    }

    #[test]
    fn at_starts_new_token() {
        assert_eq!(
            toks("@if@eq(1,1)@then"),
            vec!["@if", "@eq(", "1", ",", "1", ")", "@then"]
        );
    }

    #[test]
    fn whitespace_separates() {
        assert_eq!(
            toks("  @write( a b )\t\n"),
            vec!["@write(", "a", "b", ")"]
        );
    }

    #[test]
    fn quoted_token_keeps_spaces_and_case() {
        assert_eq!(
            toks("@write(\"Hello, World\")"),
            vec!["@write(", "\"Hello, World\"", ")"]
        );
    }

    #[test]
    fn quoted_escape_kept_in_token() {
        let t = toks(r#"@set(k,"say \"hi\"")"#);
        assert_eq!(t[3], r#""say \"hi\"""#);
        assert_eq!(literal_value(&t[3]), r#"say "hi""#);
    }

    #[test]
    fn quote_mid_token_is_ordinary() {
        assert_eq!(toks("ab\"c"), vec!["ab\"c"]);
    }

    #[test]
    fn paren_on_plain_token_closes_it() {
        assert_eq!(toks("abc(d"), vec!["abc(", "d"]);
        assert_eq!(toks("(abc"), vec!["(abc"]);
    }

    #[test]
    fn unterminated_quote_degrades() {
        assert_eq!(toks("@write(\"abc"), vec!["@write(", "\"abc"]);
        assert_eq!(literal_value("\"abc"), "\"abc");
    }

    #[test]
    fn empty_params() {
        assert_eq!(toks("@f(,)"), vec!["@f(", ",", ")"]);
    }

    #[test]
    fn retokenizing_joined_tokens_is_stable() {
        let src = r#"@write("a \"b\" c",$x) @if @eq($x,1) @then @nl @endif"#;
        let first = tokenize(src);
        let again = tokenize(&first.join(" "));
        assert_eq!(first, again);
    }
}
