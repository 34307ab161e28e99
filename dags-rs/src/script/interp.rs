//! DAGS script interpreter.
//!
//! The [`Interpreter`] owns the [`Dictionary`] and the two host channels and
//! executes scripts straight off the token vector.  There is no AST: each
//! handler reads its own parameters and moves the cursor itself, recursing
//! into [`Interpreter::run_nested`] for sub-scripts, loop bodies and user
//! functions.
//!
//! Errors propagate as [`ScriptError`] through every nested run.  Only the
//! public [`Interpreter::run_script`] turns them into output text.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use super::builtins::{arith, call_builtin, negate};
use super::control::{
    capture_body, find_label, skip_expression, skip_past_endif, skip_to_else, skip_to_then,
    token_at,
};
use super::error::{check_at_least, check_count, ScriptError};
use super::keyword::*;
use super::list::{
    insert_item, list_item, list_len, push_item, remove_item, row_key, row_prefix, set_item,
    split_list,
};
use super::token::{literal_value, tokenize};
use super::value::{bool_str, parse_int, to_bool_lenient, to_int};
use crate::store::{Dictionary, NULL_VALUE};

/// Default bound on nested script runs and nested parameter expressions.
/// Fits a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 40;

/// Default bound on `@golabel` jumps within one script.
pub const DEFAULT_MAX_JUMPS: usize = 100_000;

// ── Cursor ────────────────────────────────────────────────────────────────────

/// Position within one script's token vector.
struct Cursor<'a> {
    tokens: &'a [String],
    pos: usize,
    /// `@golabel` jumps taken so far.
    jumps: usize,
    /// Set by `@golabel` so enclosing `@if` handlers unwind instead of
    /// skipping to their `@endif`.
    jumped: bool,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [String]) -> Self {
        Cursor { tokens, pos: 0, jumps: 0, jumped: false }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Result<&'a str, ScriptError> {
        token_at(self.tokens, self.pos)
    }

    fn next(&mut self) -> Result<&'a str, ScriptError> {
        let tok = token_at(self.tokens, self.pos)?;
        self.pos += 1;
        Ok(tok)
    }
}

// ── Interpreter ───────────────────────────────────────────────────────────────

/// The DAGS script interpreter.
pub struct Interpreter {
    /// All script-visible state.
    data: Dictionary,
    /// Values supplied by the host, read with `@getinchannel`.
    pub in_channel: VecDeque<String>,
    /// Values for the host, written with `@setoutchannel(...)`.
    pub out_channel: VecDeque<String>,
    rng: StdRng,
    max_depth: usize,
    max_jumps: usize,
    /// Current nesting of [`Interpreter::run_nested`].
    depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_dictionary(Dictionary::new())
    }

    /// Create an interpreter over an existing dictionary.
    pub fn with_dictionary(data: Dictionary) -> Self {
        Interpreter {
            data,
            in_channel: VecDeque::new(),
            out_channel: VecDeque::new(),
            rng: StdRng::from_entropy(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_jumps: DEFAULT_MAX_JUMPS,
            depth: 0,
        }
    }

    pub fn data(&self) -> &Dictionary {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Dictionary {
        &mut self.data
    }

    /// Reseed `@rand`/`@rnd` for reproducible runs.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Set the recursion and `@golabel` bounds.
    pub fn set_limits(&mut self, max_depth: usize, max_jumps: usize) {
        self.max_depth = max_depth;
        self.max_jumps = max_jumps;
    }

    pub fn limits(&self) -> (usize, usize) {
        (self.max_depth, self.max_jumps)
    }

    /// Quick-reference text for the language.
    pub fn help() -> String {
        super::keyword::help()
    }

    // ── Entry points ──────────────────────────────────────────────────────────

    /// Run `script`, appending its output to `out`.
    ///
    /// Errors never escape: output produced before the failure is kept and
    /// the message plus the script text are appended after it.
    pub fn run_script(&mut self, script: &str, out: &mut String) {
        if let Err(e) = self.try_run_script(script, out) {
            warn!(error = %e, "script failed");
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("ERROR: ");
            out.push_str(&e.to_string());
            out.push('\n');
            out.push_str(script);
            out.push('\n');
        }
    }

    /// Entry point for host-scheduled scripts.  Same semantics as
    /// [`Interpreter::run_script`].
    pub fn run_script_background(&mut self, script: &str, out: &mut String) {
        self.run_script(script, out);
    }

    /// Run `script` and return the first error instead of rendering it.
    pub fn try_run_script(&mut self, script: &str, out: &mut String) -> Result<(), ScriptError> {
        debug!(script, "run_script");
        self.depth = 0;
        self.run_nested(script, out)
    }

    /// Run a script value from inside another script.
    fn run_nested(&mut self, script: &str, out: &mut String) -> Result<(), ScriptError> {
        if script.trim().is_empty() || script.trim().eq_ignore_ascii_case(NULL_VALUE) {
            return Ok(());
        }
        if !script.trim_start().starts_with('@') {
            out.push_str(script);
            return Ok(());
        }
        let tokens = tokenize(script);
        let mut cur = Cursor::new(&tokens);
        self.nested(|interp| interp.run_cursor(&mut cur, out))
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is reached.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        if self.depth >= self.max_depth {
            return Err(ScriptError::LimitExceeded(format!(
                "Script nesting deeper than {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn run_cursor(&mut self, cur: &mut Cursor<'_>, out: &mut String) -> Result<(), ScriptError> {
        while !cur.at_end() {
            self.run_one(cur, out)?;
            cur.jumped = false;
        }
        Ok(())
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// Execute the token at the cursor, consuming its parameters.
    fn run_one(&mut self, cur: &mut Cursor<'_>, out: &mut String) -> Result<(), ScriptError> {
        let token = cur.next()?;
        trace!(token, pos = cur.pos - 1, "dispatch");

        // static value
        if !token.starts_with('@') {
            out.push_str(&literal_value(token));
            return Ok(());
        }

        if !token.ends_with('(') {
            return self.run_bare(token, cur, out);
        }

        let params = self.get_parameters(cur)?;
        match token {
            FOR => self.handle_for(token, &params, cur, out),
            FOREACHKEY => self.handle_foreachkey(token, &params, cur, out),
            FOREACHLIST => self.handle_foreachlist(token, &params, cur, out),
            GOLABEL => self.handle_golabel(token, &params, cur),
            _ if !is_keyword(token) => self.call_user_function(token, &params, out),
            _ => self.call(token, &params, out),
        }
    }

    /// Keywords without parameters, or a reference to a stored script.
    fn run_bare(&mut self, token: &str, cur: &mut Cursor<'_>, out: &mut String) -> Result<(), ScriptError> {
        match token {
            IF => self.handle_if(cur, out),
            GETINCHANNEL => {
                if let Some(value) = self.in_channel.pop_front() {
                    if value.starts_with('@') {
                        return Err(ScriptError::InvalidInput(value));
                    }
                    out.push_str(&value);
                }
                Ok(())
            }
            NL => {
                out.push_str(NL_VALUE);
                Ok(())
            }
            RETURN => {
                cur.pos = cur.tokens.len();
                Ok(())
            }
            _ => {
                let value = self.data.get(token)?;
                if value.is_empty() {
                    return Err(ScriptError::Resolution(format!("Function not found: {token}")));
                }
                self.run_nested(&value, out)
            }
        }
    }

    /// Read a parenthesised parameter list.  The cursor is just past the
    /// call-style token on entry and just past `)` on return.
    fn get_parameters(&mut self, cur: &mut Cursor<'_>) -> Result<Vec<String>, ScriptError> {
        let mut params = Vec::new();
        while cur.peek()? != ")" {
            params.push(self.get_one_value(cur)?);
            if cur.peek()? == "," {
                cur.pos += 1;
                if cur.peek()? == ")" {
                    params.push(String::new());
                }
            }
        }
        cur.pos += 1;
        Ok(params)
    }

    /// One parameter value: a nested expression (evaluated now), a quoted
    /// literal or a bare literal.  An empty slot before `,` is `""`.
    fn get_one_value(&mut self, cur: &mut Cursor<'_>) -> Result<String, ScriptError> {
        let tok = cur.peek()?;
        if tok.starts_with('@') {
            let mut buf = String::new();
            self.nested(|interp| interp.run_one(cur, &mut buf))?;
            return Ok(buf);
        }
        if tok == "," {
            return Ok(String::new());
        }
        cur.pos += 1;
        Ok(literal_value(tok))
    }

    // ── Conditionals ──────────────────────────────────────────────────────────

    fn handle_if(&mut self, cur: &mut Cursor<'_>, out: &mut String) -> Result<(), ScriptError> {
        loop {
            if self.check_conditions(cur)? {
                self.run_branch(cur, out)?;
                break;
            }
            cur.pos = skip_to_else(cur.tokens, cur.pos)?;
            match cur.peek()? {
                ELSEIF => cur.pos += 1,
                ELSE => {
                    cur.pos += 1;
                    self.run_branch(cur, out)?;
                    break;
                }
                _ => break,
            }
        }
        if cur.at_end() || cur.jumped {
            // @return or @golabel inside the branch
            return Ok(());
        }
        cur.pos = skip_past_endif(cur.tokens, cur.pos)?;
        Ok(())
    }

    /// Run statements until the branch's `@else`, `@elseif` or `@endif`.
    fn run_branch(&mut self, cur: &mut Cursor<'_>, out: &mut String) -> Result<(), ScriptError> {
        while !cur.at_end() && !cur.jumped && !matches!(cur.peek()?, ELSE | ELSEIF | ENDIF) {
            self.run_one(cur, out)?;
        }
        Ok(())
    }

    /// Evaluate `cond [@and|@or cond]... @then` left to right with no
    /// precedence.  Once the outcome is fixed the rest of the chain is
    /// skipped unevaluated.
    fn check_conditions(&mut self, cur: &mut Cursor<'_>) -> Result<bool, ScriptError> {
        let mut answer = self.check_one_condition(cur)?;
        loop {
            let tok = cur.next()?;
            match tok {
                THEN => return Ok(answer),
                AND | OR => {
                    let decided = if tok == AND { !answer } else { answer };
                    if decided {
                        cur.pos = skip_to_then(cur.tokens, cur.pos)? + 1;
                        return Ok(answer);
                    }
                    answer = self.check_one_condition(cur)?;
                }
                other => {
                    return Err(ScriptError::Structural(format!(
                        "Expected {AND} or {OR} but found: {other}"
                    )))
                }
            }
        }
    }

    /// One predicate, optionally preceded by `@not`.  A failure while
    /// evaluating it makes the predicate false and moves the cursor past the
    /// whole expression.  Exhausted limits still propagate.
    fn check_one_condition(&mut self, cur: &mut Cursor<'_>) -> Result<bool, ScriptError> {
        let negated = cur.peek()? == NOT;
        if negated {
            cur.pos += 1;
        }
        let start = cur.pos;
        let answer = match self.get_one_value(cur).and_then(|v| to_bool_lenient(&v)) {
            Ok(b) => b,
            Err(e @ ScriptError::LimitExceeded(_)) => return Err(e),
            Err(e) => {
                debug!(error = %e, "condition failed, treating as false");
                cur.pos = skip_expression(cur.tokens, start)?;
                false
            }
        };
        Ok(answer != negated)
    }

    // ── Loops and jumps ───────────────────────────────────────────────────────

    fn handle_for(
        &mut self,
        token: &str,
        p: &[String],
        cur: &mut Cursor<'_>,
        out: &mut String,
    ) -> Result<(), ScriptError> {
        check_count(token, p, 3)?;
        let (body, next) = capture_body(cur.tokens, cur.pos, FOR, ENDFOR)?;
        cur.pos = next;
        let (start, end) = (to_int(&p[1])?, to_int(&p[2])?);
        let var = format!("${}", p[0]);
        debug!(var = %p[0], start, end, "for");
        for i in start..=end {
            self.run_nested(&body.replace(&var, &i.to_string()), out)?;
        }
        Ok(())
    }

    fn handle_foreachkey(
        &mut self,
        token: &str,
        p: &[String],
        cur: &mut Cursor<'_>,
        out: &mut String,
    ) -> Result<(), ScriptError> {
        check_at_least(token, p, 2)?;
        if p.len() > 3 {
            check_count(token, p, 3)?;
        }
        let (body, next) = capture_body(cur.tokens, cur.pos, FOREACHKEY, ENDFOREACHKEY)?;
        cur.pos = next;
        let var = format!("${}", p[0]);
        let prefix = p[1].trim().to_lowercase();
        let suffix = p.get(2).map(|s| s.trim().to_lowercase());

        // snapshot before running anything
        let keys = self.data.keys_with_prefix(&prefix);
        debug!(prefix = %prefix, matches = keys.len(), "foreachkey");
        for key in keys {
            let mut value = &key[prefix.len()..];
            if let Some(suffix) = &suffix {
                match value.strip_suffix(suffix.as_str()) {
                    Some(stripped) => value = stripped,
                    None => continue,
                }
            }
            self.run_nested(&body.replace(&var, value), out)?;
        }
        Ok(())
    }

    fn handle_foreachlist(
        &mut self,
        token: &str,
        p: &[String],
        cur: &mut Cursor<'_>,
        out: &mut String,
    ) -> Result<(), ScriptError> {
        check_count(token, p, 2)?;
        let (body, next) = capture_body(cur.tokens, cur.pos, FOREACHLIST, ENDFOREACHLIST)?;
        cur.pos = next;
        let var = format!("${}", p[0]);
        let items = split_list(&self.data.get(&p[1])?);
        debug!(list = %p[1], items = items.len(), "foreachlist");
        for item in items.iter().filter(|s| !s.is_empty()) {
            self.run_nested(&body.replace(&var, item), out)?;
        }
        Ok(())
    }

    fn handle_golabel(&mut self, token: &str, p: &[String], cur: &mut Cursor<'_>) -> Result<(), ScriptError> {
        check_count(token, p, 1)?;
        let Some(pos) = find_label(cur.tokens, &p[0]) else {
            debug!(label = %p[0], "golabel target not found");
            return Ok(());
        };
        cur.jumps += 1;
        if cur.jumps > self.max_jumps {
            return Err(ScriptError::LimitExceeded(format!(
                "More than {} {GOLABEL}) jumps",
                self.max_jumps
            )));
        }
        cur.pos = pos;
        cur.jumped = true;
        Ok(())
    }

    // ── Builtins with side effects ────────────────────────────────────────────

    fn call(&mut self, token: &str, p: &[String], out: &mut String) -> Result<(), ScriptError> {
        if let Some(result) = call_builtin(token, p) {
            out.push_str(&result?);
            return Ok(());
        }

        match token {
            // ── Values ───────────────────────────────────────────────────────
            GET => {
                check_count(token, p, 1)?;
                out.push_str(&self.data.get(&p[0])?);
            }
            SET => {
                check_count(token, p, 2)?;
                // a leading space defers evaluation of a script value
                let value = if p[1].starts_with(' ') && p[1].trim_start().starts_with('@') {
                    p[1].trim_start()
                } else {
                    p[1].as_str()
                };
                self.data.set(&p[0], value)?;
            }
            SWAP => {
                check_count(token, p, 2)?;
                let first = self.data.get(&p[0])?;
                let second = self.data.get(&p[1])?;
                self.data.set(&p[0], &second)?;
                self.data.set(&p[1], &first)?;
            }
            EXISTS => {
                check_count(token, p, 1)?;
                let v = self.data.get(&p[0])?;
                out.push_str(bool_str(!v.is_empty() && !v.eq_ignore_ascii_case(NULL_VALUE)));
            }
            ISSCRIPT => {
                check_count(token, p, 1)?;
                out.push_str(bool_str(self.data.get(&p[0])?.trim_start().starts_with('@')));
            }

            // ── Script control and output ────────────────────────────────────
            SCRIPT => {
                check_count(token, p, 1)?;
                let script = self.data.get(&p[0])?;
                self.run_nested(&script, out)?;
            }
            EXEC | WRITE | WRITELINE => {
                for s in p {
                    let resolved = self.resolve(s)?;
                    out.push_str(&resolved);
                }
                if token == WRITELINE {
                    out.push_str(NL_VALUE);
                }
            }
            GETVALUE => {
                check_count(token, p, 1)?;
                let value = self.data.get(&p[0])?;
                out.push_str(&self.resolve(&value)?);
            }
            MSG => {
                check_count(token, p, 1)?;
                let value = self.data.get(&p[0])?;
                if !value.is_empty() {
                    out.push_str(&self.resolve(&value)?);
                    out.push_str(NL_VALUE);
                }
            }
            DEBUG => {
                check_count(token, p, 1)?;
                if to_bool_lenient(&self.data.get(DEBUG_MODE)?)? {
                    out.push_str("### ");
                    out.push_str(&p[0]);
                    out.push_str(NL_VALUE);
                }
            }
            SETOUTCHANNEL => {
                check_count(token, p, 1)?;
                self.out_channel.push_back(p[0].clone());
            }

            // ── In-place arithmetic ──────────────────────────────────────────
            ADDTO | SUBTO | MULTO | DIVTO | MODTO => {
                check_count(token, p, 2)?;
                let current = self.get_int(&p[0])?;
                let result = arith(token, current, to_int(&p[1])?)?;
                self.data.set(&p[0], &result.to_string())?;
            }
            NEGTO => {
                check_count(token, p, 1)?;
                let result = negate(token, self.get_int(&p[0])?)?;
                self.data.set(&p[0], &result.to_string())?;
            }

            // ── Random ───────────────────────────────────────────────────────
            RAND => {
                check_count(token, p, 1)?;
                let percent = to_int(&p[0])?;
                let roll: i32 = self.rng.gen_range(0..100);
                out.push_str(bool_str(roll < percent));
            }
            RND => {
                check_count(token, p, 1)?;
                let n = match to_int(&p[0])? {
                    n if n < 0 => {
                        return Err(ScriptError::Range(format!("Invalid range for {token}{n})")))
                    }
                    0 => 0,
                    n => self.rng.gen_range(0..n),
                };
                out.push_str(&n.to_string());
            }

            // ── Lists ────────────────────────────────────────────────────────
            ADDLIST => {
                check_count(token, p, 2)?;
                let name = list_name(&p[0])?;
                let list = self.data.get(name)?;
                self.data.set(name, &push_item(&list, &p[1]))?;
            }
            GETLIST => {
                check_count(token, p, 2)?;
                let name = list_name(&p[0])?;
                let x = list_index(&p[1])?;
                out.push_str(&list_item(&self.data.get(name)?, x));
            }
            SETLIST => {
                check_count(token, p, 3)?;
                let name = list_name(&p[0])?;
                let x = list_index(&p[1])?;
                let list = self.data.get(name)?;
                self.data.set(name, &set_item(&list, x, &p[2]))?;
            }
            INSERTATLIST => {
                check_count(token, p, 3)?;
                let name = list_name(&p[0])?;
                let x = list_index(&p[1])?;
                let list = self.data.get(name)?;
                self.data.set(name, &insert_item(&list, x, &p[2]))?;
            }
            REMOVEATLIST => {
                check_count(token, p, 2)?;
                let name = list_name(&p[0])?;
                let x = list_index(&p[1])?;
                if let Some(list) = remove_item(&self.data.get(name)?, x) {
                    self.data.set(name, &list)?;
                }
            }
            CLEARLIST => {
                check_count(token, p, 1)?;
                self.data.set(list_name(&p[0])?, "")?;
            }
            LISTLENGTH => {
                check_count(token, p, 1)?;
                let name = list_name(&p[0])?;
                out.push_str(&list_len(&self.data.get(name)?).to_string());
            }

            // ── Arrays ───────────────────────────────────────────────────────
            GETARRAY => {
                check_count(token, p, 3)?;
                let name = array_name(&p[0])?;
                let (y, x) = array_index(&p[1], &p[2])?;
                out.push_str(&list_item(&self.data.get(&row_key(name, y))?, x));
            }
            SETARRAY => {
                check_count(token, p, 4)?;
                let name = array_name(&p[0])?;
                let (y, x) = array_index(&p[1], &p[2])?;
                let key = row_key(name, y);
                let row = self.data.get(&key)?;
                self.data.set(&key, &set_item(&row, x, &p[3]))?;
            }
            CLEARARRAY => {
                check_count(token, p, 1)?;
                let prefix = row_prefix(&array_name(&p[0])?.to_lowercase());
                for key in self.data.keys_with_prefix(&prefix) {
                    self.data.delete(&key)?;
                }
            }

            _ => self.call_user_function(token, p, out)?,
        }
        Ok(())
    }

    /// Run a call-style token that is not a builtin as a stored function.
    ///
    /// The function lives under a key `token + params + ")"`, e.g. `@boo(x,y)`.
    /// Each `$param` in its body is replaced by the matching argument.
    fn call_user_function(&mut self, token: &str, p: &[String], out: &mut String) -> Result<(), ScriptError> {
        let matches = self.data.keys_with_prefix(token);
        let key = match matches.as_slice() {
            [] => return Err(ScriptError::Resolution(format!("Function not found: {token}"))),
            [key] => key,
            _ => {
                return Err(ScriptError::Resolution(format!(
                    "Duplicate functions found: {token}"
                )))
            }
        };

        let declared = &key[token.len()..];
        let declared = declared.strip_suffix(')').unwrap_or(declared);
        let names: Vec<&str> = if declared.trim().is_empty() {
            Vec::new()
        } else {
            declared.split(',').map(str::trim).collect()
        };
        if names.len() != p.len() {
            return Err(ScriptError::Arity {
                token: token.to_owned(),
                expected: names.len().to_string(),
                found: p.len(),
            });
        }

        let mut body = self.data.get(key)?;
        for (name, arg) in names.iter().zip(p) {
            body = body.replace(&format!("${name}"), arg);
        }
        debug!(function = %key, "call");
        self.run_nested(&body, out)
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Re-run a value while it still looks like a script.
    fn resolve(&mut self, value: &str) -> Result<String, ScriptError> {
        let mut value = value.to_owned();
        let mut rounds = 0;
        while value.starts_with('@') {
            rounds += 1;
            if rounds > self.max_depth {
                return Err(ScriptError::LimitExceeded(format!(
                    "Value still a script after {} evaluations",
                    self.max_depth
                )));
            }
            let mut buf = String::new();
            self.run_nested(&value, &mut buf)?;
            value = buf;
        }
        Ok(value)
    }

    /// Integer value stored at `key`.
    fn get_int(&self, key: &str) -> Result<i32, ScriptError> {
        let value = self.data.get(key)?;
        to_int(&value).map_err(|_| ScriptError::Coercion(format!("Value is not numeric: [{key}] {value}")))
    }
}

fn list_name(name: &str) -> Result<&str, ScriptError> {
    if name.trim().is_empty() {
        return Err(ScriptError::Range("List name cannot be blank".to_owned()));
    }
    Ok(name)
}

fn array_name(name: &str) -> Result<&str, ScriptError> {
    if name.trim().is_empty() {
        return Err(ScriptError::Range("Array name cannot be blank".to_owned()));
    }
    Ok(name.trim())
}

fn list_index(x: &str) -> Result<usize, ScriptError> {
    parse_int(x)
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| ScriptError::Range(format!("Invalid (x) for list: {x}")))
}

fn array_index(y: &str, x: &str) -> Result<(usize, usize), ScriptError> {
    let idx = |s: &str| parse_int(s).and_then(|i| usize::try_from(i).ok());
    match (idx(y), idx(x)) {
        (Some(y), Some(x)) => Ok((y, x)),
        _ => Err(ScriptError::Range(format!("Invalid (y,x) for array: ({y},{x})"))),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
