//! Source-literal model form
//!
//! The model laid out as C-style array initializers, the shape consumed by
//! static-table builds:
//!
//! ```text
//! #define NUM_FEATS 2
//! #define NUM_LANGS 2
//! #define NUM_STATES 3
//!
//! unsigned tk_nextmove[NUM_STATES][256] = {{0,1,2,...},{...},{...}};
//! unsigned tk_output_c[NUM_STATES] = {0,1,1};
//! unsigned tk_output_s[NUM_STATES] = {0,0,1};
//! unsigned tk_output[] = {0,1};
//! double nb_pc[NUM_LANGS] = {-0.6931471805599453,-0.6931471805599453};
//! double nb_ptc[4] = {...};
//! char* nb_classes[NUM_LANGS] = {"en","de"};
//! ```
//!
//! The transition table is chunked into rows of exactly 256 entries. The
//! `#define` header is optional when decoding: missing dimensions are
//! inferred from the array lengths, so a separate header/source pair can be
//! concatenated and decoded as one text.

use super::{ModelParts, ALPHABET_SIZE};
use crate::error::MalformedModel;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

/// Deepest brace nesting a model uses (`tk_nextmove` rows inside the table)
const MAX_NESTING: usize = 2;

static DEFINE_RE: OnceLock<Regex> = OnceLock::new();

fn define_re() -> &'static Regex {
    DEFINE_RE.get_or_init(|| {
        Regex::new(r"^#[ \t]*define[ \t]+(NUM_FEATS|NUM_LANGS|NUM_STATES)[ \t]+(\d+)[ \t]*\r?$")
            .expect("define pattern is valid")
    })
}

/// Render `parts` as source-literal text.
pub fn encode_literal(parts: &ModelParts) -> String {
    let rows = parts
        .tk_nextmove
        .chunks(ALPHABET_SIZE)
        .map(|row| format!("{{{}}}", join(row)))
        .collect::<Vec<_>>()
        .join(",");
    let classes = parts
        .nb_classes
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::new();
    out.push_str(&format!("#define NUM_FEATS {}\n", parts.num_feats));
    out.push_str(&format!("#define NUM_LANGS {}\n", parts.num_langs));
    out.push_str(&format!("#define NUM_STATES {}\n\n", parts.num_states));
    out.push_str(&format!("unsigned tk_nextmove[NUM_STATES][256] = {{{rows}}};\n"));
    out.push_str(&format!("unsigned tk_output_c[NUM_STATES] = {{{}}};\n", join(&parts.tk_output_c)));
    out.push_str(&format!("unsigned tk_output_s[NUM_STATES] = {{{}}};\n", join(&parts.tk_output_s)));
    out.push_str(&format!("unsigned tk_output[] = {{{}}};\n", join(&parts.tk_output)));
    out.push_str(&format!("double nb_pc[NUM_LANGS] = {{{}}};\n", join_f64(&parts.nb_pc)));
    out.push_str(&format!(
        "double nb_ptc[{}] = {{{}}};\n",
        parts.nb_ptc.len(),
        join_f64(&parts.nb_ptc)
    ));
    out.push_str(&format!("char* nb_classes[NUM_LANGS] = {{{classes}}};\n"));
    out
}

/// Parse source-literal text into an unvalidated record.
pub fn decode_literal(text: &str) -> Result<ModelParts, MalformedModel> {
    let Lexed { tokens, directives } = tokenize(text)?;

    let mut defines = HashMap::new();
    for (line, directive) in &directives {
        let Some(caps) = define_re().captures(directive) else {
            continue;
        };
        let value = caps[2].parse::<u32>().map_err(|e| MalformedModel::Syntax {
            line: *line,
            message: format!("invalid {} value: {e}", &caps[1]),
        })?;
        defines.insert(caps[1].to_string(), value);
    }

    let mut arrays = parse_declarations(&tokens)?;
    let last_line = text.lines().count().max(1);
    let mut take = |name: &str| {
        arrays.remove(name).ok_or_else(|| MalformedModel::Syntax {
            line: last_line,
            message: format!("missing initializer for `{name}`"),
        })
    };

    let nextmove = take("tk_nextmove")?;
    let output_c = take("tk_output_c")?;
    let output_s = take("tk_output_s")?;
    let output = take("tk_output")?;
    let pc = take("nb_pc")?;
    let ptc = take("nb_ptc")?;
    let classes = take("nb_classes")?;

    let mut tk_nextmove = Vec::new();
    let rows = nextmove.list("tk_nextmove")?;
    for row in rows {
        let row = row.list("tk_nextmove")?;
        if row.len() != ALPHABET_SIZE {
            return Err(MalformedModel::SizeMismatch {
                field: "tk_nextmove row",
                expected: ALPHABET_SIZE,
                actual: row.len(),
            });
        }
        for cell in row {
            tk_nextmove.push(cell.number::<u32>("tk_nextmove")?);
        }
    }

    let tk_output_c = output_c.numbers::<u32>("tk_output_c")?;
    let tk_output_s = output_s.numbers::<u32>("tk_output_s")?;
    let tk_output = output.numbers::<u32>("tk_output")?;
    let nb_pc = pc.numbers::<f64>("nb_pc")?;
    let nb_ptc = ptc.numbers::<f64>("nb_ptc")?;
    let nb_classes = classes
        .list("nb_classes")?
        .iter()
        .map(|c| c.string("nb_classes"))
        .collect::<Result<Vec<_>, _>>()?;

    let num_states = defines
        .get("NUM_STATES")
        .copied()
        .unwrap_or(rows.len() as u32);
    let num_langs = defines
        .get("NUM_LANGS")
        .copied()
        .unwrap_or(nb_pc.len() as u32);
    let num_feats = defines.get("NUM_FEATS").copied().unwrap_or_else(|| {
        if num_langs == 0 {
            0
        } else {
            (nb_ptc.len() / num_langs as usize) as u32
        }
    });

    Ok(ModelParts {
        num_feats,
        num_langs,
        num_states,
        tk_nextmove,
        tk_output_c,
        tk_output_s,
        tk_output,
        nb_pc,
        nb_ptc,
        nb_classes,
    })
}

fn join<T: Display>(values: &[T]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

// Debug formatting of f64 is the shortest text that parses back to the same bits.
fn join_f64(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v:?}")).collect::<Vec<_>>().join(",")
}

fn quote(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 2);
    out.push('"');
    for ch in label.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    /// Identifier, keyword or numeric literal
    Word(String),
    Str(String),
    Open,
    Close,
    Comma,
    Semi,
    Assign,
    Punct(char),
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '+' | '-')
}

/// Lexer output: code tokens plus the preprocessor lines found outside comments
struct Lexed {
    tokens: Vec<Token>,
    directives: Vec<(usize, String)>,
}

fn tokenize(text: &str) -> Result<Lexed, MalformedModel> {
    let mut tokens = Vec::new();
    let mut directives = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;
    let mut at_line_start = true;

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                line += 1;
                at_line_start = true;
                continue;
            }
            c if c.is_whitespace() => continue,
            '#' if at_line_start => {
                let mut directive = String::from('#');
                while let Some(c) = chars.next_if(|&c| c != '\n') {
                    directive.push(c);
                }
                directives.push((line, directive));
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                let start = line;
                chars.next();
                let mut prev = '\0';
                loop {
                    match chars.next() {
                        Some('/') if prev == '*' => break,
                        Some(c) => {
                            if c == '\n' {
                                line += 1;
                            }
                            prev = c;
                        }
                        None => {
                            return Err(MalformedModel::Syntax {
                                line: start,
                                message: "unterminated comment".to_string(),
                            })
                        }
                    }
                }
            }
            '"' => {
                let start = line;
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('n') => value.push('\n'),
                            Some('t') => value.push('\t'),
                            Some(c) => value.push(c),
                            None => break,
                        },
                        Some('\n') | None => {
                            return Err(MalformedModel::Syntax {
                                line: start,
                                message: "unterminated string literal".to_string(),
                            })
                        }
                        Some(c) => value.push(c),
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    line: start,
                });
            }
            c if is_word_char(c) => {
                let mut word = c.to_string();
                while let Some(&next) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line,
                });
            }
            c => {
                let kind = match c {
                    '{' => TokenKind::Open,
                    '}' => TokenKind::Close,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semi,
                    '=' => TokenKind::Assign,
                    other => TokenKind::Punct(other),
                };
                tokens.push(Token { kind, line });
            }
        }
        at_line_start = false;
    }

    Ok(Lexed { tokens, directives })
}

/// Parsed initializer: either a braced list or a single literal
#[derive(Debug)]
enum Init<'t> {
    List(Vec<Init<'t>>, usize),
    Scalar(&'t Token),
}

impl<'t> Init<'t> {
    fn line(&self) -> usize {
        match self {
            Init::List(_, line) => *line,
            Init::Scalar(token) => token.line,
        }
    }

    fn list(&self, field: &str) -> Result<&[Init<'t>], MalformedModel> {
        match self {
            Init::List(items, _) => Ok(items),
            Init::Scalar(token) => Err(MalformedModel::Syntax {
                line: token.line,
                message: format!("expected a braced list in `{field}`"),
            }),
        }
    }

    fn number<T>(&self, field: &str) -> Result<T, MalformedModel>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self {
            Init::Scalar(Token {
                kind: TokenKind::Word(word),
                line,
            }) => word.parse::<T>().map_err(|e| MalformedModel::Syntax {
                line: *line,
                message: format!("invalid number `{word}` in `{field}`: {e}"),
            }),
            other => Err(MalformedModel::Syntax {
                line: other.line(),
                message: format!("expected a number in `{field}`"),
            }),
        }
    }

    fn numbers<T>(&self, field: &str) -> Result<Vec<T>, MalformedModel>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.list(field)?.iter().map(|item| item.number(field)).collect()
    }

    fn string(&self, field: &str) -> Result<String, MalformedModel> {
        match self {
            Init::Scalar(Token {
                kind: TokenKind::Str(value),
                ..
            }) => Ok(value.clone()),
            other => Err(MalformedModel::Syntax {
                line: other.line(),
                message: format!("expected a string literal in `{field}`"),
            }),
        }
    }
}

fn parse_declarations(tokens: &[Token]) -> Result<HashMap<String, Init<'_>>, MalformedModel> {
    let mut arrays = HashMap::new();
    let mut pos = 0;

    while pos < tokens.len() {
        // Declarator: the last word before the first `[` or `=` names the array.
        let mut name: Option<&str> = None;
        let mut in_dims = false;
        let mut has_init = false;
        while let Some(token) = tokens.get(pos) {
            pos += 1;
            match &token.kind {
                TokenKind::Word(word) if !in_dims => name = Some(word),
                TokenKind::Punct('[') => in_dims = true,
                TokenKind::Assign => {
                    has_init = true;
                    break;
                }
                // Declaration without initializer (e.g. an `extern` line)
                TokenKind::Semi => break,
                _ => {}
            }
        }
        if !has_init {
            continue;
        }

        let line = tokens[pos - 1].line;
        let name = name.ok_or_else(|| MalformedModel::Syntax {
            line,
            message: "initializer without a declarator name".to_string(),
        })?;
        if arrays.contains_key(name) {
            return Err(MalformedModel::Syntax {
                line,
                message: format!("duplicate initializer for `{name}`"),
            });
        }
        let init = parse_init(tokens, &mut pos, line, 0)?;
        match tokens.get(pos) {
            Some(Token {
                kind: TokenKind::Semi,
                ..
            }) => pos += 1,
            other => {
                return Err(MalformedModel::Syntax {
                    line: other.map_or(line, |t| t.line),
                    message: format!("expected `;` after initializer of `{name}`"),
                })
            }
        }

        log::trace!("parsed initializer for `{name}`");
        arrays.insert(name.to_string(), init);
    }

    Ok(arrays)
}

fn parse_init<'t>(
    tokens: &'t [Token],
    pos: &mut usize,
    line: usize,
    depth: usize,
) -> Result<Init<'t>, MalformedModel> {
    let token = tokens.get(*pos).ok_or_else(|| MalformedModel::Syntax {
        line,
        message: "unexpected end of input in initializer".to_string(),
    })?;
    *pos += 1;

    match &token.kind {
        TokenKind::Open if depth >= MAX_NESTING => Err(MalformedModel::Syntax {
            line: token.line,
            message: "initializer nested too deeply".to_string(),
        }),
        TokenKind::Open => {
            let mut items = Vec::new();
            loop {
                match tokens.get(*pos).map(|t| &t.kind) {
                    Some(TokenKind::Close) => {
                        *pos += 1;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        return Err(MalformedModel::Syntax {
                            line: token.line,
                            message: "unterminated `{`".to_string(),
                        })
                    }
                }
                items.push(parse_init(tokens, pos, token.line, depth + 1)?);
                match tokens.get(*pos) {
                    Some(Token {
                        kind: TokenKind::Comma,
                        ..
                    }) => *pos += 1,
                    Some(Token {
                        kind: TokenKind::Close,
                        ..
                    }) => {}
                    other => {
                        return Err(MalformedModel::Syntax {
                            line: other.map_or(token.line, |t| t.line),
                            message: "expected `,` or `}` in initializer list".to_string(),
                        })
                    }
                }
            }
            Ok(Init::List(items, token.line))
        }
        TokenKind::Word(_) | TokenKind::Str(_) => Ok(Init::Scalar(token)),
        other => Err(MalformedModel::Syntax {
            line: token.line,
            message: format!("unexpected {other:?} in initializer"),
        }),
    }
}
