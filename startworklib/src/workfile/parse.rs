//! Reader for the go.work syntax produced by [`WorkFile::format`].
//!
//! Understands `go` and `use` directives, `use ( ... )` blocks, quoted and
//! bare tokens, and `//` line comments. Other directives are rejected.

use super::quote::unquote;
use super::WorkFile;
use crate::error::StartworkError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    quoted: bool,
}

impl Token {
    fn is(&self, punct: &str) -> bool {
        !self.quoted && self.text == punct
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> StartworkError {
    StartworkError::Parse {
        line,
        message: message.into(),
    }
}

/// Split one line into tokens, dropping any trailing comment.
fn tokenize(line: &str, lineno: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() || rest.starts_with("//") {
            break;
        }

        if let Some(after) = rest.strip_prefix('"') {
            let end = closing_quote(after)
                .ok_or_else(|| parse_error(lineno, "unterminated quoted string"))?;
            let text = unquote(&after[..end])
                .ok_or_else(|| parse_error(lineno, "invalid quoted string"))?;
            tokens.push(Token { text, quoted: true });
            rest = &after[end + 1..];
            continue;
        }

        if rest.starts_with(['(', ')']) {
            tokens.push(Token {
                text: rest[..1].to_string(),
                quoted: false,
            });
            rest = &rest[1..];
            continue;
        }

        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '"'))
            .unwrap_or(rest.len());
        let word = &rest[..end];
        if let Some(pos) = word.find("//") {
            tokens.push(Token {
                text: word[..pos].to_string(),
                quoted: false,
            });
            break;
        }
        tokens.push(Token {
            text: word.to_string(),
            quoted: false,
        });
        rest = &rest[end..];
    }

    tokens.retain(|t| t.quoted || !t.text.is_empty());
    Ok(tokens)
}

/// Byte offset of the unescaped closing quote in `s`.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

impl WorkFile {
    /// Parse go.work contents.
    pub fn parse(data: &str) -> Result<Self> {
        let mut work = WorkFile::new();
        let mut block_start: Option<usize> = None;

        for (idx, line) in data.lines().enumerate() {
            let lineno = idx + 1;
            let tokens = tokenize(line, lineno)?;
            if tokens.is_empty() {
                continue;
            }

            if block_start.is_some() {
                if tokens.len() == 1 && tokens[0].is(")") {
                    block_start = None;
                } else {
                    work.parse_use(&tokens, lineno)?;
                }
                continue;
            }

            let verb = &tokens[0];
            let args = &tokens[1..];
            if verb.quoted {
                return Err(parse_error(lineno, "expected directive"));
            }

            match verb.text.as_str() {
                "go" => {
                    if work.go.is_some() {
                        return Err(parse_error(lineno, "repeated go statement"));
                    }
                    let [version] = args else {
                        return Err(parse_error(lineno, "go directive expects exactly one argument"));
                    };
                    work.add_go_stmt(&version.text)
                        .map_err(|e| parse_error(lineno, e.to_string()))?;
                }
                "use" => {
                    if args.len() == 1 && args[0].is("(") {
                        block_start = Some(lineno);
                    } else {
                        work.parse_use(args, lineno)?;
                    }
                }
                other => {
                    return Err(parse_error(lineno, format!("unknown directive: {other}")));
                }
            }
        }

        if let Some(start) = block_start {
            return Err(parse_error(start, "unterminated use block"));
        }

        Ok(work)
    }

    fn parse_use(&mut self, args: &[Token], lineno: usize) -> Result<()> {
        if args.iter().any(|t| t.is("(") || t.is(")")) {
            return Err(parse_error(lineno, "unexpected parenthesis"));
        }
        let (path, module_path) = match args {
            [path] => (path.text.as_str(), ""),
            [path, module] => (path.text.as_str(), module.text.as_str()),
            _ => {
                return Err(parse_error(
                    lineno,
                    "usage: use local/dir [module/path]",
                ))
            }
        };
        self.add_directory(path, module_path)
            .map_err(|e| parse_error(lineno, e.to_string()))
    }
}
