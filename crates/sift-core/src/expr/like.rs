///
/// Token
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    AnyRun,
    One,
    Char(char),
}

// `\` escapes the next character; a trailing `\` is literal.
fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        let token = match ch {
            '%' => Token::AnyRun,
            '_' => Token::One,
            '\\' => Token::Char(chars.next().unwrap_or('\\')),
            other => Token::Char(other),
        };

        // collapse runs of `%`
        if token == Token::AnyRun && tokens.last() == Some(&Token::AnyRun) {
            continue;
        }
        tokens.push(token);
    }

    tokens
}

/// SQL-style `LIKE` match: `%` matches any run, `_` exactly one character.
/// Literal characters compare ASCII case-insensitively.
#[must_use]
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let tokens = tokenize(pattern);
    let chars: Vec<char> = text.chars().collect();

    let mut token_at = 0;
    let mut char_at = 0;
    let mut backtrack: Option<(usize, usize)> = None;

    while let Some(&ch) = chars.get(char_at) {
        match tokens.get(token_at) {
            Some(Token::AnyRun) => {
                backtrack = Some((token_at, char_at));
                token_at += 1;
            }
            Some(Token::One) => {
                token_at += 1;
                char_at += 1;
            }
            Some(Token::Char(expected)) if expected.eq_ignore_ascii_case(&ch) => {
                token_at += 1;
                char_at += 1;
            }
            _ => match backtrack {
                Some((run_at, consumed)) => {
                    token_at = run_at + 1;
                    char_at = consumed + 1;
                    backtrack = Some((run_at, consumed + 1));
                }
                None => return false,
            },
        }
    }

    tokens[token_at..]
        .iter()
        .all(|token| *token == Token::AnyRun)
}
