//! Token names of the built-in operations and control keywords.
//!
//! Call-style builtins are spelled with their opening paren (`@add(`) since
//! that is how the tokenizer emits them.  Bare keywords have no paren.

/// Two-character newline marker (backslash, `n`) written by `@nl`, `@msg`,
/// `@writeline` and `@debug`.  Hosts convert it when displaying output.
pub const NL_VALUE: &str = "\\n";

pub const TRUE_VALUE: &str = "true";
pub const FALSE_VALUE: &str = "false";

/// Dictionary key consulted by `@debug`.
pub const DEBUG_MODE: &str = "system.debug";

// ── Bare keywords ─────────────────────────────────────────────────────────────

pub const AND: &str = "@and";
pub const ELSE: &str = "@else";
pub const ELSEIF: &str = "@elseif";
pub const ENDFOR: &str = "@endfor";
pub const ENDFOREACHKEY: &str = "@endforeachkey";
pub const ENDFOREACHLIST: &str = "@endforeachlist";
pub const ENDIF: &str = "@endif";
pub const GETINCHANNEL: &str = "@getinchannel";
pub const IF: &str = "@if";
pub const NL: &str = "@nl";
pub const NOT: &str = "@not";
pub const OR: &str = "@or";
pub const RETURN: &str = "@return";
pub const THEN: &str = "@then";

// ── Call-style builtins ───────────────────────────────────────────────────────

pub const ABS: &str = "@abs(";
pub const ADD: &str = "@add(";
pub const ADDLIST: &str = "@addlist(";
pub const ADDTO: &str = "@addto(";
pub const BITWISEAND: &str = "@bitwiseand(";
pub const BITWISEOR: &str = "@bitwiseor(";
pub const BITWISEXOR: &str = "@bitwisexor(";
pub const CLEARARRAY: &str = "@cleararray(";
pub const CLEARBIT: &str = "@clearbit(";
pub const CLEARLIST: &str = "@clearlist(";
pub const COMMENT: &str = "@comment(";
pub const CONCAT: &str = "@concat(";
pub const DEBUG: &str = "@debug(";
pub const DIV: &str = "@div(";
pub const DIVTO: &str = "@divto(";
pub const EQ: &str = "@eq(";
pub const EXEC: &str = "@exec(";
pub const EXISTS: &str = "@exists(";
pub const FALSE: &str = "@false(";
pub const FOR: &str = "@for(";
pub const FOREACHKEY: &str = "@foreachkey(";
pub const FOREACHLIST: &str = "@foreachlist(";
pub const FORMAT: &str = "@format(";
pub const GE: &str = "@ge(";
pub const GET: &str = "@get(";
pub const GETARRAY: &str = "@getarray(";
pub const GETBIT: &str = "@getbit(";
pub const GETLIST: &str = "@getlist(";
pub const GETVALUE: &str = "@getvalue(";
pub const GOLABEL: &str = "@golabel(";
pub const GT: &str = "@gt(";
pub const INSERTATLIST: &str = "@insertatlist(";
pub const ISBOOL: &str = "@isbool(";
pub const ISNUMBER: &str = "@isnumber(";
pub const ISSCRIPT: &str = "@isscript(";
pub const LABEL: &str = "@label(";
pub const LE: &str = "@le(";
pub const LISTLENGTH: &str = "@listlength(";
pub const LOWER: &str = "@lower(";
pub const LT: &str = "@lt(";
pub const MOD: &str = "@mod(";
pub const MODTO: &str = "@modto(";
pub const MSG: &str = "@msg(";
pub const MUL: &str = "@mul(";
pub const MULTO: &str = "@multo(";
pub const NE: &str = "@ne(";
pub const NEG: &str = "@neg(";
pub const NEGTO: &str = "@negto(";
pub const NULL: &str = "@null(";
pub const RAND: &str = "@rand(";
pub const REMOVEATLIST: &str = "@removeatlist(";
pub const REPLACE: &str = "@replace(";
pub const RND: &str = "@rnd(";
pub const SCRIPT: &str = "@script(";
pub const SET: &str = "@set(";
pub const SETARRAY: &str = "@setarray(";
pub const SETBIT: &str = "@setbit(";
pub const SETLIST: &str = "@setlist(";
pub const SETOUTCHANNEL: &str = "@setoutchannel(";
pub const SUB: &str = "@sub(";
pub const SUBSTRING: &str = "@substring(";
pub const SUBTO: &str = "@subto(";
pub const SWAP: &str = "@swap(";
pub const TOBINARY: &str = "@tobinary(";
pub const TOINTEGER: &str = "@tointeger(";
pub const TRIM: &str = "@trim(";
pub const TRUE: &str = "@true(";
pub const UPPER: &str = "@upper(";
pub const WRITE: &str = "@write(";
pub const WRITELINE: &str = "@writeline(";

/// Every token the interpreter recognises without a dictionary lookup.
pub const KEYWORDS: &[&str] = &[
    AND, ELSE, ELSEIF, ENDFOR, ENDFOREACHKEY, ENDFOREACHLIST, ENDIF, GETINCHANNEL, IF, NL,
    NOT, OR, RETURN, THEN, ABS, ADD, ADDLIST, ADDTO, BITWISEAND, BITWISEOR, BITWISEXOR,
    CLEARARRAY, CLEARBIT, CLEARLIST, COMMENT, CONCAT, DEBUG, DIV, DIVTO, EQ, EXEC, EXISTS,
    FALSE, FOR, FOREACHKEY, FOREACHLIST, FORMAT, GE, GET, GETARRAY, GETBIT, GETLIST,
    GETVALUE, GOLABEL, GT, INSERTATLIST, ISBOOL, ISNUMBER, ISSCRIPT, LABEL, LE, LISTLENGTH,
    LOWER, LT, MOD, MODTO, MSG, MUL, MULTO, NE, NEG, NEGTO, NULL, RAND, REMOVEATLIST,
    REPLACE, RND, SCRIPT, SET, SETARRAY, SETBIT, SETLIST, SETOUTCHANNEL, SUB, SUBSTRING,
    SUBTO, SWAP, TOBINARY, TOINTEGER, TRIM, TRUE, UPPER, WRITE, WRITELINE,
];

/// Returns `true` if `token` is a builtin or control keyword.
pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(token))
}

/// Quick reference of the language, grouped by family.
pub fn help() -> String {
    let sections: &[(&str, &[&str])] = &[
        (
            "Control flow",
            &[
                "@if <cond> [@and|@or <cond>]... @then ... [@elseif <cond> @then ...] [@else ...] @endif",
                "@not <cond>",
                "@for(var,start,end) ...$var... @endfor",
                "@foreachkey(var,prefix[,suffix]) ...$var... @endforeachkey",
                "@foreachlist(var,listname) ...$var... @endforeachlist",
                "@label(name)  @golabel(name)  @return",
            ],
        ),
        (
            "Values",
            &[
                "@get(key)  @set(key,value)  @swap(key1,key2)",
                "@getvalue(key)  @script(key)  @exec(value...)",
                "@exists(key)  @isscript(key)  @null(value)",
                "@true(value)  @false(value)  @isbool(value)  @isnumber(value)",
            ],
        ),
        (
            "Output",
            &[
                "@write(value...)  @writeline(value...)  @msg(key)  @nl",
                "@comment(text)  @debug(value)",
                "@getinchannel  @setoutchannel(value)",
            ],
        ),
        (
            "Arithmetic",
            &[
                "@abs(x)  @add(x,y)  @sub(x,y)  @mul(x,y)  @div(x,y)  @mod(x,y)  @neg(x)",
                "@addto(key,y)  @subto(key,y)  @multo(key,y)  @divto(key,y)  @modto(key,y)  @negto(key)",
                "@rand(percent)  @rnd(n)",
            ],
        ),
        (
            "Comparison",
            &["@eq(x,y)  @ne(x,y)  @lt(x,y)  @le(x,y)  @gt(x,y)  @ge(x,y)"],
        ),
        (
            "Strings",
            &[
                "@concat(value...)  @format(text,arg0...)  @replace(text,old,new)",
                "@substring(text,start[,len])  @trim(text)  @upper(text)  @lower(text)",
            ],
        ),
        (
            "Lists and arrays",
            &[
                "@addlist(name,value)  @getlist(name,x)  @setlist(name,x,value)",
                "@insertatlist(name,x,value)  @removeatlist(name,x)  @clearlist(name)  @listlength(name)",
                "@getarray(name,y,x)  @setarray(name,y,x,value)  @cleararray(name)",
            ],
        ),
        (
            "Bits",
            &[
                "@getbit(v,b)  @setbit(v,b)  @clearbit(v,b)",
                "@bitwiseand(x,y)  @bitwiseor(x,y)  @bitwisexor(x,y)  @tobinary(v)  @tointeger(bits)",
            ],
        ),
        (
            "User functions",
            &[
                "@name  runs the script stored at key @name",
                "@name(a,b)  runs the script stored at key @name(x,y) with $x, $y replaced",
            ],
        ),
    ];

    let mut out = String::new();
    for (title, lines) in sections {
        out.push_str(title);
        out.push_str(":\n");
        for line in *lines {
            out.push_str("   ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_ignores_case() {
        assert!(is_keyword("@ADD("));
        assert!(is_keyword("@endif"));
        assert!(!is_keyword("@add"));
        assert!(!is_keyword("@boo("));
    }

    #[test]
    fn call_style_keywords_end_with_paren() {
        for k in KEYWORDS {
            assert!(k.starts_with('@'));
            assert!(!k.contains(char::is_whitespace));
        }
        assert!(KEYWORDS.iter().filter(|k| k.ends_with('(')).count() > 60);
    }

    #[test]
    fn help_mentions_every_family() {
        let h = help();
        for family in ["Control flow", "Arithmetic", "Lists and arrays", "Bits"] {
            assert!(h.contains(family), "missing {family}");
        }
        assert!(h.contains("@foreachlist("));
    }
}
