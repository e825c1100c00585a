// stubgen_parser/lexer - Token definitions and hand-written lexer
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token types for the signature format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    String(String),
    Character(char),
    Number(String), // Raw spelling, classified by the parser
    Boolean(bool),
    Null,
    Identifier(String),

    /// Content of a `/** ... */` block with fences and gutters stripped.
    DocComment(String),

    // Keywords
    Package,
    Class,
    Interface,
    Enum,
    Ctor,
    Method,
    Field,
    EnumConstant,
    Extends,
    Implements,
    Super,
    Throws,
    Public,
    Protected,
    Static,
    Final,
    Abstract,
    Default,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Deprecated,

    // Punctuation
    At,           // @
    LeftBrace,    // {
    RightBrace,   // }
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    LeftAngle,    // <
    RightAngle,   // >
    Comma,        // ,
    Dot,          // .
    Semicolon,    // ;
    Assign,       // =
    Question,     // ?
    Ampersand,    // &
    Ellipsis,     // ...

    Eof,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{0}' at line {1}, column {2}")]
    UnexpectedChar(char, usize, usize),
    #[error("Unterminated string at line {0}, column {1}")]
    UnterminatedString(usize, usize),
    #[error("Unterminated character literal at line {0}, column {1}")]
    UnterminatedChar(usize, usize),
    #[error("Unterminated comment at line {0}, column {1}")]
    UnterminatedComment(usize, usize),
    #[error("Invalid escape sequence '\\{0}' at line {1}, column {2}")]
    InvalidEscape(char, usize, usize),
}

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.current < self.chars.len() {
            let start_line = self.line;
            let start_column = self.column;

            match self.chars[self.current] {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance_line();
                }
                '/' => {
                    if let Some(token) = self.lex_comment(start_line, start_column)? {
                        tokens.push(token);
                    }
                }
                '"' => tokens.push(self.lex_string(start_line, start_column)?),
                '\'' => tokens.push(self.lex_char(start_line, start_column)?),
                '@' => tokens.push(self.single(TokenType::At, "@", start_line, start_column)),
                '{' => tokens.push(self.single(TokenType::LeftBrace, "{", start_line, start_column)),
                '}' => {
                    tokens.push(self.single(TokenType::RightBrace, "}", start_line, start_column))
                }
                '(' => tokens.push(self.single(TokenType::LeftParen, "(", start_line, start_column)),
                ')' => {
                    tokens.push(self.single(TokenType::RightParen, ")", start_line, start_column))
                }
                '[' => {
                    tokens.push(self.single(TokenType::LeftBracket, "[", start_line, start_column))
                }
                ']' => {
                    tokens.push(self.single(TokenType::RightBracket, "]", start_line, start_column))
                }
                '<' => tokens.push(self.single(TokenType::LeftAngle, "<", start_line, start_column)),
                '>' => {
                    tokens.push(self.single(TokenType::RightAngle, ">", start_line, start_column))
                }
                ',' => tokens.push(self.single(TokenType::Comma, ",", start_line, start_column)),
                ';' => tokens.push(self.single(TokenType::Semicolon, ";", start_line, start_column)),
                '=' => tokens.push(self.single(TokenType::Assign, "=", start_line, start_column)),
                '?' => tokens.push(self.single(TokenType::Question, "?", start_line, start_column)),
                '&' => tokens.push(self.single(TokenType::Ampersand, "&", start_line, start_column)),
                '.' => {
                    if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') {
                        self.advance();
                        self.advance();
                        self.advance();
                        tokens.push(Token {
                            token_type: TokenType::Ellipsis,
                            lexeme: "...".to_string(),
                            line: start_line,
                            column: start_column,
                        });
                    } else {
                        tokens.push(self.single(TokenType::Dot, ".", start_line, start_column));
                    }
                }
                '-' => {
                    if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                        tokens.push(self.lex_number(start_line, start_column));
                    } else {
                        return Err(LexError::UnexpectedChar('-', start_line, start_column));
                    }
                }
                c if c.is_ascii_digit() => tokens.push(self.lex_number(start_line, start_column)),
                c if c.is_alphabetic() || c == '_' || c == '$' => {
                    tokens.push(self.lex_word(start_line, start_column));
                }
                c => return Err(LexError::UnexpectedChar(c, start_line, start_column)),
            }
        }

        tokens.push(Token {
            token_type: TokenType::Eof,
            lexeme: String::new(),
            line: self.line,
            column: self.column,
        });
        Ok(tokens)
    }

    fn single(&mut self, token_type: TokenType, lexeme: &str, line: usize, column: usize) -> Token {
        self.advance();
        Token {
            token_type,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    fn lex_comment(&mut self, line: usize, column: usize) -> Result<Option<Token>, LexError> {
        match self.peek_at(1) {
            Some('/') => {
                // Line comment, dropped. This also skips the
                // `// Signature format: N` banner line.
                while self.current < self.chars.len() && self.chars[self.current] != '\n' {
                    self.advance();
                }
                Ok(None)
            }
            Some('*') => {
                let is_doc = self.peek_at(2) == Some('*') && self.peek_at(3) != Some('/');
                self.advance(); // /
                self.advance(); // *
                if is_doc {
                    self.advance(); // second *
                }

                let mut body = String::new();
                loop {
                    if self.current >= self.chars.len() {
                        return Err(LexError::UnterminatedComment(line, column));
                    }
                    if self.chars[self.current] == '*' && self.peek_at(1) == Some('/') {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.chars[self.current] == '\n' {
                        body.push('\n');
                        self.advance_line();
                    } else {
                        body.push(self.chars[self.current]);
                        self.advance();
                    }
                }

                if is_doc {
                    Ok(Some(Token {
                        token_type: TokenType::DocComment(strip_doc_gutters(&body)),
                        lexeme: String::new(),
                        line,
                        column,
                    }))
                } else {
                    Ok(None)
                }
            }
            _ => Err(LexError::UnexpectedChar('/', line, column)),
        }
    }

    fn lex_string(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            if self.current >= self.chars.len() || self.chars[self.current] == '\n' {
                return Err(LexError::UnterminatedString(line, column));
            }
            match self.chars[self.current] {
                '"' => {
                    self.advance();
                    break;
                }
                '\\' => {
                    self.advance();
                    let escaped = self
                        .chars
                        .get(self.current)
                        .copied()
                        .ok_or(LexError::UnterminatedString(line, column))?;
                    value.push(unescape(escaped).ok_or(LexError::InvalidEscape(
                        escaped, self.line, self.column,
                    ))?);
                    self.advance();
                }
                c => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        Ok(Token {
            token_type: TokenType::String(value.clone()),
            lexeme: value,
            line,
            column,
        })
    }

    fn lex_char(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let value = match self.chars.get(self.current).copied() {
            Some('\\') => {
                self.advance();
                let escaped = self
                    .chars
                    .get(self.current)
                    .copied()
                    .ok_or(LexError::UnterminatedChar(line, column))?;
                self.advance();
                unescape(escaped).ok_or(LexError::InvalidEscape(escaped, line, column))?
            }
            Some(c) if c != '\'' && c != '\n' => {
                self.advance();
                c
            }
            _ => return Err(LexError::UnterminatedChar(line, column)),
        };
        if self.chars.get(self.current).copied() != Some('\'') {
            return Err(LexError::UnterminatedChar(line, column));
        }
        self.advance(); // closing quote
        Ok(Token {
            token_type: TokenType::Character(value),
            lexeme: value.to_string(),
            line,
            column,
        })
    }

    fn lex_number(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();
        if self.chars[self.current] == '-' {
            text.push('-');
            self.advance();
        }
        // Hex, decimal, floating and suffixed (L/f/F/d/D) spellings are all
        // collected raw; classification happens in the parser.
        while let Some(c) = self.chars.get(self.current).copied() {
            if c.is_ascii_hexdigit()
                || c == '.' && self.peek_at(1).is_some_and(|next| next.is_ascii_digit())
                || matches!(c, 'x' | 'X' | 'L' | 'l' | 'e' | 'E' | '+' | '-')
                    && !text.is_empty()
                    && !matches!(text.chars().last(), Some('L') | Some('l'))
            {
                // '+'/'-' only continue an exponent
                if matches!(c, '+' | '-') && !matches!(text.chars().last(), Some('e') | Some('E')) {
                    break;
                }
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token {
            token_type: TokenType::Number(text.clone()),
            lexeme: text,
            line,
            column,
        }
    }

    fn lex_word(&mut self, line: usize, column: usize) -> Token {
        let mut word = String::new();
        while let Some(c) = self.chars.get(self.current).copied() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let token_type = match word.as_str() {
            "package" => TokenType::Package,
            "class" => TokenType::Class,
            "interface" => TokenType::Interface,
            "enum" => TokenType::Enum,
            "ctor" => TokenType::Ctor,
            "method" => TokenType::Method,
            "field" => TokenType::Field,
            "enum_constant" => TokenType::EnumConstant,
            "extends" => TokenType::Extends,
            "implements" => TokenType::Implements,
            "super" => TokenType::Super,
            "throws" => TokenType::Throws,
            "public" => TokenType::Public,
            "protected" => TokenType::Protected,
            "static" => TokenType::Static,
            "final" => TokenType::Final,
            "abstract" => TokenType::Abstract,
            "default" => TokenType::Default,
            "native" => TokenType::Native,
            "synchronized" => TokenType::Synchronized,
            "transient" => TokenType::Transient,
            "volatile" => TokenType::Volatile,
            "deprecated" => TokenType::Deprecated,
            "true" => TokenType::Boolean(true),
            "false" => TokenType::Boolean(false),
            "null" => TokenType::Null,
            _ => TokenType::Identifier(word.clone()),
        };

        Token {
            token_type,
            lexeme: word,
            line,
            column,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.current + offset).copied()
    }

    fn advance(&mut self) {
        self.current += 1;
        self.column += 1;
    }

    fn advance_line(&mut self) {
        self.current += 1;
        self.line += 1;
        self.column = 1;
    }
}

fn unescape(escaped: char) -> Option<char> {
    Some(match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        _ => return None,
    })
}

/// Strip the ` * ` gutter convention from a doc block body and trim the
/// blank first/last lines left behind by the fences.
fn strip_doc_gutters(body: &str) -> String {
    let mut lines: Vec<String> = body
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let stripped = if let Some(rest) = trimmed.strip_prefix("* ") {
                rest
            } else if let Some(rest) = trimmed.strip_prefix('*') {
                rest
            } else {
                trimmed
            };
            stripped.trim_end().to_string()
        })
        .collect();

    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
