//! The ordered conversion rules: structural line shapes first, then
//! token-level substitutions applied to whatever the structural match did
//! not consume. Token substitutions never fire inside string literals.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mappings::MappingSet;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("conversion rule pattern is valid")
}

static IF_RE: Lazy<Regex> = Lazy::new(|| re(r"^if\s+(.+):$"));
static ELIF_RE: Lazy<Regex> = Lazy::new(|| re(r"^elif\s+(.+):$"));
static ELSE_RE: Lazy<Regex> = Lazy::new(|| re(r"^else\s*:$"));
static FOR_RANGE_RE: Lazy<Regex> = Lazy::new(|| re(r"^for\s+(\w+)\s+in\s+range\(([^)]*)\)\s*:$"));
static FOR_IN_RE: Lazy<Regex> = Lazy::new(|| re(r"^for\s+(.+?)\s+in\s+(.+):$"));
static WHILE_RE: Lazy<Regex> = Lazy::new(|| re(r"^while\s+(.+):$"));
static DEF_RE: Lazy<Regex> =
    Lazy::new(|| re(r"^(async\s+)?def\s+(\w+)\s*\((.*)\)\s*(?:->\s*[^:]+)?\s*:$"));
static CLASS_RE: Lazy<Regex> = Lazy::new(|| re(r"^class\s+(\w+)\s*(?:\(\s*([\w.]*)\s*\))?\s*:$"));
static TRY_RE: Lazy<Regex> = Lazy::new(|| re(r"^try\s*:$"));
static EXCEPT_RE: Lazy<Regex> = Lazy::new(|| re(r"^except\b\s*([^:]*):$"));
static FINALLY_RE: Lazy<Regex> = Lazy::new(|| re(r"^finally\s*:$"));

static TRUE_RE: Lazy<Regex> = Lazy::new(|| re(r"\bTrue\b"));
static FALSE_RE: Lazy<Regex> = Lazy::new(|| re(r"\bFalse\b"));
static NONE_RE: Lazy<Regex> = Lazy::new(|| re(r"\bNone\b"));
static IS_NOT_RE: Lazy<Regex> = Lazy::new(|| re(r"\bis\s+not\b"));
static IS_RE: Lazy<Regex> = Lazy::new(|| re(r"\bis\b"));
static AND_RE: Lazy<Regex> = Lazy::new(|| re(r"\band\b"));
static OR_RE: Lazy<Regex> = Lazy::new(|| re(r"\bor\b"));
static NOT_RE: Lazy<Regex> = Lazy::new(|| re(r"\bnot\s+"));
static SELF_ATTR_RE: Lazy<Regex> = Lazy::new(|| re(r"\bself\."));
static PRINT_RE: Lazy<Regex> = Lazy::new(|| re(r"\bprint\s*\("));
static LEN_RE: Lazy<Regex> = Lazy::new(|| re(r"\blen\(([^()]*)\)"));
static APPEND_RE: Lazy<Regex> = Lazy::new(|| re(r"\.append\("));
static STRIP_RE: Lazy<Regex> = Lazy::new(|| re(r"\.strip\(\)"));
static LOWER_RE: Lazy<Regex> = Lazy::new(|| re(r"\.lower\(\)"));
static UPPER_RE: Lazy<Regex> = Lazy::new(|| re(r"\.upper\(\)"));

static NAME_CALL_RE: Lazy<Regex> = Lazy::new(|| re(r"(^|[^.\w])([A-Za-z_]\w*)\s*\("));
static LIB_CALL_RE: Lazy<Regex> = Lazy::new(|| re(r"\b([A-Za-z_][\w.]*?)\.([A-Za-z_]\w*)\s*\("));
static FSTRING_EXPR_RE: Lazy<Regex> = Lazy::new(|| re(r"\{([^{}]*)\}"));

/// Outcome of the library-call rule for one call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibCall {
    Mapped { from: String, to: String },
    Unmapped { name: String },
}

/// A fully token-rewritten expression or statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub text: String,
    pub changed: bool,
    pub calls: Vec<LibCall>,
}

/// A structural (line-shape) match: the rewritten opener text plus its
/// effect on block nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub text: String,
    /// Pushes one indentation level with a pending close brace.
    pub opens: bool,
    /// Continues the block at the same level (`else`, `except`, ...).
    pub continues: bool,
    pub calls: Vec<LibCall>,
}

impl BlockOutcome {
    fn open(text: String, calls: Vec<LibCall>) -> Self {
        Self {
            text,
            opens: true,
            continues: false,
            calls,
        }
    }

    fn cont(text: String, calls: Vec<LibCall>) -> Self {
        Self {
            text,
            opens: false,
            continues: true,
            calls,
        }
    }
}

/// Try the block-opening rules against a stripped line. First match wins.
pub fn match_block_construct(
    stripped: &str,
    mappings: &MappingSet,
    awaited: bool,
) -> Option<BlockOutcome> {
    if TRY_RE.is_match(stripped) {
        return Some(BlockOutcome::open("try {".to_string(), Vec::new()));
    }

    if FINALLY_RE.is_match(stripped) {
        return Some(BlockOutcome::cont("} finally {".to_string(), Vec::new()));
    }

    if let Some(caps) = EXCEPT_RE.captures(stripped) {
        let handler = caps.get(1).map_or("", |m| m.as_str().trim());
        let name = handler
            .rsplit_once(" as ")
            .map_or("error", |(_, name)| name.trim());
        return Some(BlockOutcome::cont(
            format!("}} catch ({name}) {{"),
            Vec::new(),
        ));
    }

    if ELSE_RE.is_match(stripped) {
        return Some(BlockOutcome::cont("} else {".to_string(), Vec::new()));
    }

    if let Some(caps) = ELIF_RE.captures(stripped) {
        let cond = rewrite_expression(&caps[1], mappings, awaited);
        return Some(BlockOutcome::cont(
            format!("}} else if ({}) {{", cond.text),
            cond.calls,
        ));
    }

    if let Some(caps) = IF_RE.captures(stripped) {
        let cond = rewrite_expression(&caps[1], mappings, awaited);
        return Some(BlockOutcome::open(
            format!("if ({}) {{", cond.text),
            cond.calls,
        ));
    }

    if let Some(caps) = FOR_RANGE_RE.captures(stripped) {
        let var = &caps[1];
        let args: Vec<&str> = caps[2].split(',').map(str::trim).collect();
        let text = match args.as_slice() {
            [end] => format!("for (let {var} = 0; {var} < {end}; {var}++) {{"),
            [start, end] => format!("for (let {var} = {start}; {var} < {end}; {var}++) {{"),
            [start, end, step] => {
                format!("for (let {var} = {start}; {var} < {end}; {var} += {step}) {{")
            }
            _ => return None,
        };
        return Some(BlockOutcome::open(text, Vec::new()));
    }

    if let Some(caps) = FOR_IN_RE.captures(stripped) {
        let pattern = caps[1].trim().to_string();
        let iterable = rewrite_expression(caps[2].trim(), mappings, awaited);
        let pattern = if pattern.contains(',') {
            format!("[{pattern}]")
        } else {
            pattern
        };
        return Some(BlockOutcome::open(
            format!("for (const {pattern} of {}) {{", iterable.text),
            iterable.calls,
        ));
    }

    if let Some(caps) = WHILE_RE.captures(stripped) {
        let cond = rewrite_expression(&caps[1], mappings, awaited);
        return Some(BlockOutcome::open(
            format!("while ({}) {{", cond.text),
            cond.calls,
        ));
    }

    if let Some(caps) = DEF_RE.captures(stripped) {
        let is_async = caps.get(1).is_some();
        let name = &caps[2];
        let raw_params = &caps[3];
        let mut calls = Vec::new();

        let has_self = raw_params
            .split(',')
            .next()
            .is_some_and(|p| p.trim() == "self");
        let params = rewrite_params(raw_params, mappings, awaited, &mut calls);
        let async_kw = if is_async { "async " } else { "" };

        let text = if has_self && name == "__init__" {
            format!("constructor({params}) {{")
        } else if has_self {
            format!("{async_kw}{name}({params}) {{")
        } else {
            format!("{async_kw}function {name}({params}) {{")
        };
        return Some(BlockOutcome::open(text, calls));
    }

    if let Some(caps) = CLASS_RE.captures(stripped) {
        let name = &caps[1];
        let text = match caps.get(2).map(|m| m.as_str()) {
            Some(base) if !base.is_empty() && base != "object" => {
                format!("class {name} extends {base} {{")
            }
            _ => format!("class {name} {{"),
        };
        return Some(BlockOutcome::open(text, Vec::new()));
    }

    None
}

/// A line the rules cannot express in the target language. Returns the
/// reason to surface as a fallback annotation.
pub fn unconvertible_reason(stripped: &str) -> Option<String> {
    if stripped.starts_with('@') {
        return Some("decorator has no direct JavaScript equivalent".to_string());
    }

    let first = stripped
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(':');
    match first {
        "import" | "from" => {
            return Some("module imports must be ported manually".to_string());
        }
        "with" => {
            return Some("context manager has no direct JavaScript equivalent".to_string());
        }
        "raise" => {
            return Some("exception raising must be ported manually".to_string());
        }
        "global" | "nonlocal" | "del" | "pass" | "assert" | "yield" | "match" => {
            return Some(format!("`{first}` has no direct JavaScript equivalent"));
        }
        _ => {}
    }

    if stripped.ends_with(':') {
        return Some("unrecognized block construct".to_string());
    }

    None
}

/// Apply every token-level substitution to an expression or statement:
/// literal and keyword mapping, call-style rewrites, f-string conversion,
/// mapping-table lookups and the library-call rule. String literals are
/// left untouched except f-strings, which become template literals.
pub fn rewrite_expression(expr: &str, mappings: &MappingSet, awaited: bool) -> LineOutcome {
    let mut calls = Vec::new();
    let mut parts: Vec<String> = Vec::new();
    let mut in_comment = false;

    for segment in split_segments(expr) {
        match segment {
            Segment::Str(s) if in_comment => parts.push(s),
            Segment::Str(s) => parts.push(transform_string_segment(&s)),
            Segment::Code(c) if in_comment => parts.push(c),
            Segment::Code(c) => {
                if let Some(hash) = c.find('#') {
                    let (code, comment) = c.split_at(hash);
                    parts.push(process_code(code, mappings, awaited, &mut calls));
                    parts.push(format!("//{}", &comment[1..]));
                    in_comment = true;
                } else {
                    parts.push(process_code(&c, mappings, awaited, &mut calls));
                }
            }
        }
    }

    let text = parts.concat();
    LineOutcome {
        changed: text != expr,
        text,
        calls,
    }
}

/// Rewrite a comment-only line: translate the comment marker, keep the rest.
pub fn rewrite_comment(stripped: &str) -> String {
    format!("//{}", &stripped[1..])
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Code(String),
    /// A string literal including its quotes, and an `f`/`F` prefix when
    /// present.
    Str(String),
}

fn split_segments(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut code = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '"' && ch != '\'' {
            code.push(ch);
            continue;
        }

        let mut literal = String::new();
        // An immediately preceding standalone `f` is the f-string prefix.
        if code.ends_with(['f', 'F']) {
            let before = code.chars().rev().nth(1);
            if !before.is_some_and(|c| c.is_alphanumeric() || c == '_') {
                literal.push(code.pop().unwrap_or('f'));
            }
        }
        if !code.is_empty() {
            segments.push(Segment::Code(std::mem::take(&mut code)));
        }

        literal.push(ch);
        let quote = ch;
        while let Some(inner) = chars.next() {
            literal.push(inner);
            if inner == '\\' {
                if let Some(escaped) = chars.next() {
                    literal.push(escaped);
                }
                continue;
            }
            if inner == quote {
                break;
            }
        }
        segments.push(Segment::Str(literal));
    }

    if !code.is_empty() {
        segments.push(Segment::Code(code));
    }
    segments
}

/// f-strings become template literals; everything else passes through. An
/// unterminated literal keeps its closing quote missing.
fn transform_string_segment(segment: &str) -> String {
    let Some(body) = segment.strip_prefix(['f', 'F']) else {
        return segment.to_string();
    };
    let mut chars = body.chars();
    let Some(quote) = chars.next() else {
        return segment.to_string();
    };
    let inner = chars.as_str();
    let (inner, terminated) = match inner.strip_suffix(quote) {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    };
    // `$$` is a literal dollar sign in the replacement syntax.
    let templated = FSTRING_EXPR_RE.replace_all(inner, "$${$1}");
    if terminated {
        format!("`{templated}`")
    } else {
        format!("`{templated}")
    }
}

fn process_code(
    code: &str,
    mappings: &MappingSet,
    awaited: bool,
    calls: &mut Vec<LibCall>,
) -> String {
    let mut out = TRUE_RE.replace_all(code, "true").into_owned();
    out = FALSE_RE.replace_all(&out, "false").into_owned();
    out = NONE_RE.replace_all(&out, "null").into_owned();
    out = IS_NOT_RE.replace_all(&out, "!==").into_owned();
    out = IS_RE.replace_all(&out, "===").into_owned();
    out = AND_RE.replace_all(&out, "&&").into_owned();
    out = OR_RE.replace_all(&out, "||").into_owned();
    out = NOT_RE.replace_all(&out, "!").into_owned();
    out = SELF_ATTR_RE.replace_all(&out, "this.").into_owned();
    out = PRINT_RE.replace_all(&out, "console.log(").into_owned();
    out = LEN_RE.replace_all(&out, "$1.length").into_owned();
    out = APPEND_RE.replace_all(&out, ".push(").into_owned();
    out = STRIP_RE.replace_all(&out, ".trim()").into_owned();
    out = LOWER_RE.replace_all(&out, ".toLowerCase()").into_owned();
    out = UPPER_RE.replace_all(&out, ".toUpperCase()").into_owned();

    // Simple call names from the mapping table (str -> String, ...).
    // `len` is attribute-style and was handled structurally above.
    out = NAME_CALL_RE
        .replace_all(&out, |caps: &regex::Captures| {
            let name = &caps[2];
            match mappings.get(name) {
                Some(to) if name != "len" => format!("{}{to}(", &caps[1]),
                _ => caps[0].to_string(),
            }
        })
        .into_owned();

    apply_library_calls(&out, mappings, awaited, calls)
}

/// The library-call rule. A dotted-name hit whose target is a call on a
/// client instance (`requests.get` -> `client.get`) applies the awaiting
/// convention, while a static-namespace target (`json.loads` ->
/// `JSON.parse`) is a plain token substitution. A method-name hit is
/// awaited; a snake_case miss is emitted unchanged and reported for
/// annotation.
fn apply_library_calls(
    code: &str,
    mappings: &MappingSet,
    awaited: bool,
    calls: &mut Vec<LibCall>,
) -> String {
    let mut out = String::with_capacity(code.len());
    let mut last = 0;

    for caps in LIB_CALL_RE.captures_iter(code) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let alias = &caps[1];
        let method = &caps[2];
        let full = format!("{alias}.{method}");

        out.push_str(&code[last..whole.start()]);
        last = whole.end();

        if alias == "this" {
            out.push_str(whole.as_str());
            continue;
        }

        if let Some(to) = mappings.get(&full) {
            let already_awaited = out.trim_end().ends_with("await");
            if awaited && !already_awaited && instance_call_target(to) {
                out.push_str("await ");
            }
            calls.push(LibCall::Mapped {
                from: full,
                to: to.to_string(),
            });
            out.push_str(to);
            out.push('(');
        } else if let Some(to) = mappings.get(method) {
            let already_awaited = out.trim_end().ends_with("await");
            if awaited && !already_awaited {
                out.push_str("await ");
            }
            calls.push(LibCall::Mapped {
                from: full,
                to: format!("{alias}.{to}"),
            });
            out.push_str(alias);
            out.push('.');
            out.push_str(to);
            out.push('(');
        } else if method.contains('_') {
            calls.push(LibCall::Unmapped { name: full });
            out.push_str(whole.as_str());
        } else {
            out.push_str(whole.as_str());
        }
    }

    out.push_str(&code[last..]);
    out
}

/// Whether a mapping target is a call on a client instance, as opposed to
/// a static namespace like `JSON` or a bare function like `parseInt`.
fn instance_call_target(target: &str) -> bool {
    match target.split_once('.') {
        Some((receiver, _)) => receiver.chars().next().is_some_and(char::is_lowercase),
        None => false,
    }
}

/// Split a trailing inline comment off a line, ignoring `#` inside string
/// literals. The code part has trailing whitespace trimmed.
pub fn split_inline_comment(line: &str) -> (&str, Option<&str>) {
    let mut offset = 0;
    for segment in split_segments(line) {
        let len = match &segment {
            Segment::Str(s) => s.len(),
            Segment::Code(c) => {
                if let Some(hash) = c.find('#') {
                    let at = offset + hash;
                    return (line[..at].trim_end(), Some(&line[at..]));
                }
                c.len()
            }
        };
        offset += len;
    }
    (line, None)
}

fn rewrite_params(
    params: &str,
    mappings: &MappingSet,
    awaited: bool,
    calls: &mut Vec<LibCall>,
) -> String {
    params
        .split(',')
        .filter_map(|param| {
            let param = param.trim();
            if param.is_empty() || param == "self" {
                return None;
            }

            let (head, default) = match param.split_once('=') {
                Some((head, default)) => (head.trim(), Some(default.trim())),
                None => (param, None),
            };
            // Drop the type annotation, keep the name.
            let name = head.split(':').next().unwrap_or(head).trim();
            let name = if let Some(rest) = name.strip_prefix("**") {
                format!("...{rest}")
            } else if let Some(rest) = name.strip_prefix('*') {
                format!("...{rest}")
            } else {
                name.to_string()
            };

            Some(match default {
                Some(default) => {
                    let rewritten = rewrite_expression(default, mappings, awaited);
                    calls.extend(rewritten.calls);
                    format!("{name} = {}", rewritten.text)
                }
                None => name,
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(expr: &str) -> String {
        rewrite_expression(expr, &MappingSet::new(), true).text
    }

    #[test]
    fn test_booleans_and_null() {
        assert_eq!(plain("x = True"), "x = true");
        assert_eq!(plain("x = False"), "x = false");
        assert_eq!(plain("x = None"), "x = null");
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(plain("a and b or not c"), "a && b || !c");
    }

    #[test]
    fn test_identity_comparisons() {
        assert_eq!(plain("user is not None"), "user !== null");
        assert_eq!(plain("user is None"), "user === null");
    }

    #[test]
    fn test_tokens_protected_inside_strings() {
        assert_eq!(plain("x = \"True and False\""), "x = \"True and False\"");
        assert_eq!(plain("msg = 'None'"), "msg = 'None'");
    }

    #[test]
    fn test_print_call() {
        assert_eq!(plain("print(\"hi\")"), "console.log(\"hi\")");
    }

    #[test]
    fn test_len_call() {
        assert_eq!(plain("n = len(items)"), "n = items.length");
    }

    #[test]
    fn test_append_and_string_methods() {
        assert_eq!(plain("items.append(x)"), "items.push(x)");
        assert_eq!(plain("s.strip().lower()"), "s.trim().toLowerCase()");
        assert_eq!(plain("s.upper()"), "s.toUpperCase()");
    }

    #[test]
    fn test_fstring_to_template_literal() {
        assert_eq!(plain("print(f\"hello {name}\")"), "console.log(`hello ${name}`)");
        assert_eq!(
            plain("url = f'https://x/{user_id}'"),
            "url = `https://x/${user_id}`"
        );
    }

    #[test]
    fn test_self_becomes_this() {
        assert_eq!(plain("self.count = 0"), "this.count = 0");
    }

    #[test]
    fn test_inline_comment_marker() {
        assert_eq!(plain("x = 1  # counter"), "x = 1  // counter");
    }

    #[test]
    fn test_hash_inside_string_not_a_comment() {
        assert_eq!(plain("tag = \"#1\""), "tag = \"#1\"");
    }

    #[test]
    fn test_mapping_table_simple_call() {
        let mappings = MappingSet::from_entries([("str", "String")]);
        let out = rewrite_expression("s = str(42)", &mappings, true);
        assert_eq!(out.text, "s = String(42)");
    }

    #[test]
    fn test_mapping_table_dotted_call_no_await() {
        let mappings = MappingSet::from_entries([("json.loads", "JSON.parse")]);
        let out = rewrite_expression("data = json.loads(body)", &mappings, true);
        assert_eq!(out.text, "data = JSON.parse(body)");
        assert_eq!(out.calls.len(), 1);
    }

    #[test]
    fn test_library_method_hit_applies_await() {
        let mappings = MappingSet::from_entries([("do_something", "doSomething")]);
        let out = rewrite_expression("client.do_something()", &mappings, true);
        assert_eq!(out.text, "await client.doSomething()");
        assert!(matches!(out.calls[0], LibCall::Mapped { .. }));
    }

    #[test]
    fn test_library_method_miss_reports_unmapped() {
        let out = rewrite_expression("client.do_something()", &MappingSet::new(), true);
        assert_eq!(out.text, "client.do_something()");
        assert_eq!(
            out.calls,
            vec![LibCall::Unmapped {
                name: "client.do_something".to_string()
            }]
        );
    }

    #[test]
    fn test_library_method_without_underscore_is_silent() {
        let out = rewrite_expression("response.json()", &MappingSet::new(), true);
        assert_eq!(out.text, "response.json()");
        assert!(out.calls.is_empty());
    }

    #[test]
    fn test_chained_alias_lookup() {
        let mappings = MappingSet::from_entries([(
            "openai.ChatCompletion.create",
            "client.getChatCompletions",
        )]);
        let out = rewrite_expression("openai.ChatCompletion.create(prompt)", &mappings, true);
        assert_eq!(out.text, "await client.getChatCompletions(prompt)");
    }

    #[test]
    fn test_dotted_client_mapping_awaited() {
        let mappings = MappingSet::from_entries([("requests.get", "client.get")]);
        let out = rewrite_expression("response = requests.get(url)", &mappings, true);
        assert_eq!(out.text, "response = await client.get(url)");
    }

    #[test]
    fn test_unterminated_fstring_converts_without_panic() {
        let out = rewrite_expression("x = f\"caf\u{e9}", &MappingSet::new(), true);
        assert_eq!(out.text, "x = `caf\u{e9}");

        let out = rewrite_expression("msg = f\"open {name", &MappingSet::new(), true);
        assert_eq!(out.text, "msg = `open {name");
    }

    #[test]
    fn test_split_inline_comment() {
        assert_eq!(
            split_inline_comment("if ready:  # check"),
            ("if ready:", Some("# check"))
        );
        assert_eq!(split_inline_comment("x = 1"), ("x = 1", None));
        assert_eq!(split_inline_comment("tag = \"#1\""), ("tag = \"#1\"", None));
    }

    #[test]
    fn test_block_if() {
        let block = match_block_construct("if x == 1:", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "if (x == 1) {");
        assert!(block.opens);
    }

    #[test]
    fn test_block_elif_else() {
        let elif = match_block_construct("elif x and y:", &MappingSet::new(), true).unwrap();
        assert_eq!(elif.text, "} else if (x && y) {");
        assert!(elif.continues);

        let els = match_block_construct("else:", &MappingSet::new(), true).unwrap();
        assert_eq!(els.text, "} else {");
        assert!(els.continues);
    }

    #[test]
    fn test_block_for_range() {
        let block = match_block_construct("for i in range(5):", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "for (let i = 0; i < 5; i++) {");

        let block =
            match_block_construct("for i in range(2, 8):", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "for (let i = 2; i < 8; i++) {");
    }

    #[test]
    fn test_block_for_in() {
        let block =
            match_block_construct("for item in items:", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "for (const item of items) {");
    }

    #[test]
    fn test_block_for_in_tuple_destructuring() {
        let block =
            match_block_construct("for k, v in pairs:", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "for (const [k, v] of pairs) {");
    }

    #[test]
    fn test_block_while() {
        let block = match_block_construct("while not done:", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "while (!done) {");
    }

    #[test]
    fn test_block_def() {
        let block =
            match_block_construct("def get_user(user_id):", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "function get_user(user_id) {");
    }

    #[test]
    fn test_block_async_def() {
        let block =
            match_block_construct("async def fetch_all():", &MappingSet::new(), true).unwrap();
        assert_eq!(block.text, "async function fetch_all() {");
    }

    #[test]
    fn test_block_method_and_constructor() {
        let ctor =
            match_block_construct("def __init__(self, name):", &MappingSet::new(), true).unwrap();
        assert_eq!(ctor.text, "constructor(name) {");

        let method = match_block_construct("def run(self):", &MappingSet::new(), true).unwrap();
        assert_eq!(method.text, "run() {");
    }

    #[test]
    fn test_block_def_strips_annotations_keeps_defaults() {
        let block = match_block_construct(
            "def send(self, retries: int = 3, *args, **kwargs):",
            &MappingSet::new(),
            true,
        )
        .unwrap();
        assert_eq!(block.text, "send(retries = 3, ...args, ...kwargs) {");
    }

    #[test]
    fn test_block_class() {
        let plain = match_block_construct("class Agent:", &MappingSet::new(), true).unwrap();
        assert_eq!(plain.text, "class Agent {");

        let derived =
            match_block_construct("class Agent(BaseAgent):", &MappingSet::new(), true).unwrap();
        assert_eq!(derived.text, "class Agent extends BaseAgent {");

        let object = match_block_construct("class Agent(object):", &MappingSet::new(), true)
            .unwrap();
        assert_eq!(object.text, "class Agent {");
    }

    #[test]
    fn test_block_try_except_finally() {
        let tr = match_block_construct("try:", &MappingSet::new(), true).unwrap();
        assert_eq!(tr.text, "try {");
        assert!(tr.opens);

        let bare = match_block_construct("except:", &MappingSet::new(), true).unwrap();
        assert_eq!(bare.text, "} catch (error) {");

        let typed =
            match_block_construct("except ValueError:", &MappingSet::new(), true).unwrap();
        assert_eq!(typed.text, "} catch (error) {");

        let named =
            match_block_construct("except ValueError as e:", &MappingSet::new(), true).unwrap();
        assert_eq!(named.text, "} catch (e) {");

        let fin = match_block_construct("finally:", &MappingSet::new(), true).unwrap();
        assert_eq!(fin.text, "} finally {");
    }

    #[test]
    fn test_no_block_match_for_plain_lines() {
        assert!(match_block_construct("x = 1", &MappingSet::new(), true).is_none());
        assert!(match_block_construct("return value", &MappingSet::new(), true).is_none());
    }

    #[test]
    fn test_unconvertible_reasons() {
        assert!(unconvertible_reason("import json").is_some());
        assert!(unconvertible_reason("from os import path").is_some());
        assert!(unconvertible_reason("with open(p) as f:").is_some());
        assert!(unconvertible_reason("@staticmethod").is_some());
        assert!(unconvertible_reason("raise ValueError(\"bad\")").is_some());
        assert!(unconvertible_reason("weird_thing:").is_some());
        assert!(unconvertible_reason("x = 1").is_none());
        assert!(unconvertible_reason("return value").is_none());
    }

    #[test]
    fn test_rewrite_comment() {
        assert_eq!(rewrite_comment("# hello"), "// hello");
        assert_eq!(rewrite_comment("#!shebang"), "//!shebang");
    }
}
