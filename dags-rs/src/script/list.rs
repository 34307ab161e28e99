//! List and array string encodings.
//!
//! A list is the value of a single key holding its items joined by `,` with
//! no escaping.  An array is a family of keys `name:row`, each holding one row
//! as a list.  Index operations pad with empty items as needed.
//!
//! [`legacy`] reads and writes the older bracketed, quote-escaped form
//! (`[a,"b c"]`).  The interpreter never produces it.

/// Separator between list items.
pub const LIST_SEP: char = ',';

/// Separator between an array name and its row number.
pub const ROW_SEP: char = ':';

/// Split an encoded list into items.  The empty string is the empty list.
pub fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(LIST_SEP).map(str::to_owned).collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(",")
}

/// Item at `index`, or `""` when out of range.
pub fn list_item(value: &str, index: usize) -> String {
    split_list(value).into_iter().nth(index).unwrap_or_default()
}

/// Append an item.
pub fn push_item(value: &str, item: &str) -> String {
    let mut items = split_list(value);
    items.push(item.to_owned());
    join_list(&items)
}

/// Overwrite the item at `index`, padding with empty items first.
pub fn set_item(value: &str, index: usize, item: &str) -> String {
    let mut items = split_list(value);
    if items.len() <= index {
        items.resize(index + 1, String::new());
    }
    items[index] = item.to_owned();
    join_list(&items)
}

/// Insert before `index`, padding with empty items when `index` is past the end.
pub fn insert_item(value: &str, index: usize, item: &str) -> String {
    let mut items = split_list(value);
    if items.len() < index {
        items.resize(index, String::new());
    }
    items.insert(index, item.to_owned());
    join_list(&items)
}

/// Remove the item at `index`.  `None` when out of range.
pub fn remove_item(value: &str, index: usize) -> Option<String> {
    let mut items = split_list(value);
    if index >= items.len() {
        return None;
    }
    items.remove(index);
    Some(join_list(&items))
}

pub fn list_len(value: &str) -> usize {
    split_list(value).len()
}

/// Key holding row `row` of array `name`.
pub fn row_key(name: &str, row: usize) -> String {
    format!("{name}{ROW_SEP}{row}")
}

/// Prefix shared by every row key of array `name`.
pub fn row_prefix(name: &str) -> String {
    format!("{name}{ROW_SEP}")
}

// ── Legacy bracket codec ──────────────────────────────────────────────────────

pub mod legacy {
    //! Bracketed list encoding: `[a,"b, c",d]`, arrays as `[[..],[..]]`.
    //!
    //! Items containing a delimiter, quote, whitespace, backslash or bracket
    //! are double-quoted with `\\` and `\"` escapes.  The item `null` is
    //! written as an empty item.

    use crate::script::error::ScriptError;
    use crate::store::NULL_VALUE;

    fn needs_quote(item: &str) -> bool {
        item.chars()
            .any(|c| matches!(c, ',' | '"' | ' ' | '\t' | '\n' | '\r' | '\\' | '[' | ']'))
    }

    fn unexpected(c: char) -> ScriptError {
        ScriptError::Range(format!("Unexpected character within list: {c}"))
    }

    /// Encode items as a bracketed list.
    pub fn collapse_list(items: &[String]) -> String {
        let mut out = String::from("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if needs_quote(item) {
                out.push('"');
                out.push_str(&item.replace('\\', "\\\\").replace('"', "\\\""));
                out.push('"');
            } else if item != NULL_VALUE {
                out.push_str(item);
            }
        }
        out.push(']');
        out
    }

    /// Decode a bracketed list.  Outer brackets are optional.
    pub fn expand_list(value: &str) -> Result<Vec<String>, ScriptError> {
        let mut body = value.trim();
        body = body.strip_prefix('[').unwrap_or(body);
        body = body.strip_suffix(']').unwrap_or(body);
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        let mut cur = String::new();
        let mut in_quote = false;
        let mut last_slash = false;

        for c in body.chars() {
            if in_quote {
                if last_slash {
                    cur.push(match c {
                        't' => '\t',
                        'n' => '\n',
                        'r' => '\r',
                        c => c,
                    });
                    last_slash = false;
                    continue;
                }
                match c {
                    '\\' => last_slash = true,
                    '"' => in_quote = false,
                    c => cur.push(c),
                }
                continue;
            }
            match c {
                '[' | ']' => return Err(unexpected(c)),
                '"' if cur.is_empty() => in_quote = true,
                ',' => items.push(std::mem::take(&mut cur)),
                c => cur.push(c),
            }
        }
        items.push(cur);
        Ok(items)
    }

    /// Encode rows as a bracketed array of bracketed lists.
    pub fn collapse_array(rows: &[Vec<String>]) -> String {
        let inner: Vec<String> = rows.iter().map(|r| collapse_list(r)).collect();
        format!("[{}]", inner.join(","))
    }

    /// Decode a bracketed array.  Brackets inside quoted items are ignored.
    pub fn expand_array(value: &str) -> Result<Vec<Vec<String>>, ScriptError> {
        let mut body = value.trim();
        body = body.strip_prefix('[').unwrap_or(body);
        body = body.strip_suffix(']').unwrap_or(body);

        let mut rows = Vec::new();
        let mut row = String::new();
        let mut in_row = false;
        let mut in_quote = false;
        let mut last_slash = false;

        for c in body.chars() {
            if in_row {
                row.push(c);
                if in_quote {
                    if last_slash {
                        last_slash = false;
                    } else if c == '\\' {
                        last_slash = true;
                    } else if c == '"' {
                        in_quote = false;
                    }
                    continue;
                }
                match c {
                    '"' => in_quote = true,
                    ']' => {
                        rows.push(expand_list(&row)?);
                        row.clear();
                        in_row = false;
                    }
                    _ => {}
                }
                continue;
            }
            match c {
                '[' => {
                    row.push('[');
                    in_row = true;
                }
                ',' => {}
                c if c.is_whitespace() => {}
                c => return Err(unexpected(c)),
            }
        }
        if in_row {
            return Err(ScriptError::Range("Unterminated array row".to_owned()));
        }
        Ok(rows)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
