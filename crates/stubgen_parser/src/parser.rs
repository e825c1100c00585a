// stubgen_parser/parser - Recursive descent over the signature token stream
use crate::lexer::{LexError, Lexer, Token, TokenType};
use stubgen_api::{
    ApiSurface, ConstantValue, DocComment, Member, Modifiers, Nullability, PackageDecl, Parameter,
    PrimitiveType, Span, TypeDecl, TypeKind, TypeParam, TypeRef, Visibility, WildcardBound,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Expected {expected} but found '{found}' at line {line}, column {column}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("Unexpected end of input while parsing {context}")]
    UnexpectedEof { context: String },
    #[error("Invalid constant literal '{literal}' at line {line}, column {column}: {message}")]
    InvalidConstant {
        literal: String,
        message: String,
        line: usize,
        column: usize,
    },
}

/// Parse one signature file into a surface. The first error aborts the
/// whole file; callers must not use any part of a failed parse.
pub fn parse_surface(input: &str) -> Result<ApiSurface, ParseError> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn parse(mut self) -> Result<ApiSurface, ParseError> {
        let mut surface = ApiSurface::new();

        while !self.at_end() {
            let doc = self.take_doc();
            self.expect(&TokenType::Package, "`package`")?;
            let name = self.parse_qualified_name("package name")?;
            self.expect(&TokenType::LeftBrace, "`{` after package name")?;

            let mut package = PackageDecl::new(name);
            package.doc = doc;

            while !self.check(&TokenType::RightBrace) {
                let decl = self.parse_type_decl()?;
                package.types.push(decl);
            }
            self.expect(&TokenType::RightBrace, "`}` closing package block")?;

            merge_package(&mut surface, package);
        }

        Ok(surface)
    }

    fn parse_type_decl(&mut self) -> Result<TypeDecl, ParseError> {
        let doc = self.take_doc();
        let start = self.current_position();
        let modifiers = self.parse_modifiers();

        let kind = match self.peek_type().clone() {
            TokenType::Class => {
                self.advance();
                TypeKind::Class
            }
            TokenType::Interface => {
                self.advance();
                TypeKind::Interface
            }
            TokenType::Enum => {
                self.advance();
                TypeKind::Enum
            }
            TokenType::At => {
                self.advance();
                self.expect(&TokenType::Interface, "`interface` after `@`")?;
                TypeKind::Annotation
            }
            _ => {
                return Err(self.unexpected("`class`, `interface`, `enum` or `@interface`"));
            }
        };

        let name = self.parse_dotted_simple_name("type name")?;
        let type_params = self.parse_type_params()?;

        let mut extends = None;
        let mut implements = Vec::new();

        if self.consume(&TokenType::Extends) {
            if kind == TypeKind::Interface {
                // Interfaces list every superinterface after `extends`.
                implements.push(self.parse_type()?);
                while self.consume(&TokenType::Comma) {
                    implements.push(self.parse_type()?);
                }
            } else {
                extends = Some(self.parse_type()?);
            }
        }
        if self.consume(&TokenType::Implements) {
            implements.push(self.parse_type()?);
            while self.consume(&TokenType::Comma) {
                implements.push(self.parse_type()?);
            }
        }

        self.expect(&TokenType::LeftBrace, "`{` opening type body")?;
        let mut members = Vec::new();
        while !self.check(&TokenType::RightBrace) {
            members.push(self.parse_member()?);
        }
        self.expect(&TokenType::RightBrace, "`}` closing type body")?;

        Ok(TypeDecl {
            kind,
            modifiers,
            name,
            type_params,
            extends,
            implements,
            members,
            doc,
            span: start,
        })
    }

    fn parse_member(&mut self) -> Result<Member, ParseError> {
        let doc = self.take_doc();
        let span = self.current_position();

        match self.peek_type().clone() {
            TokenType::Ctor => {
                self.advance();
                let (modifiers, _) = self.parse_annotated_modifiers();
                self.parse_dotted_simple_name("constructor name")?;
                self.expect(&TokenType::LeftParen, "`(` opening parameter list")?;
                let parameters = self.parse_parameters()?;
                let throws = self.parse_throws()?;
                self.expect(&TokenType::Semicolon, "`;` after constructor")?;
                Ok(Member::Constructor {
                    modifiers,
                    parameters,
                    throws,
                    doc,
                    span,
                })
            }
            TokenType::Method => {
                self.advance();
                let (modifiers, return_nullability) = self.parse_annotated_modifiers();
                let type_params = self.parse_type_params()?;
                let return_type = self.parse_return_type()?;
                let name = self.parse_identifier("method name")?;
                self.expect(&TokenType::LeftParen, "`(` opening parameter list")?;
                let parameters = self.parse_parameters()?;
                let throws = self.parse_throws()?;
                let annotation_default = if self.consume(&TokenType::Default) {
                    Some(self.parse_constant_value()?)
                } else {
                    None
                };
                self.expect(&TokenType::Semicolon, "`;` after method")?;
                Ok(Member::Method {
                    modifiers,
                    type_params,
                    return_type,
                    return_nullability,
                    name,
                    parameters,
                    throws,
                    annotation_default,
                    doc,
                    span,
                })
            }
            TokenType::Field => {
                self.advance();
                let (modifiers, nullability) = self.parse_annotated_modifiers();
                let type_ref = self.parse_type()?;
                let name = self.parse_identifier("field name")?;
                let constant = if self.consume(&TokenType::Assign) {
                    Some(self.parse_constant_value()?)
                } else {
                    None
                };
                self.expect(&TokenType::Semicolon, "`;` after field")?;
                Ok(Member::Field {
                    modifiers,
                    type_ref,
                    nullability,
                    name,
                    constant,
                    doc,
                    span,
                })
            }
            TokenType::EnumConstant => {
                self.advance();
                let _ = self.parse_annotated_modifiers();
                // The declaring enum type may be spelled before the constant
                // name; the last identifier before `;` is the name.
                let mut name = self.parse_identifier("enum constant name")?;
                while !self.check(&TokenType::Semicolon) {
                    if self.consume(&TokenType::Dot) {
                        name = self.parse_identifier("enum constant name")?;
                    } else if matches!(self.peek_type(), TokenType::Identifier(_)) {
                        name = self.parse_identifier("enum constant name")?;
                    } else {
                        return Err(self.unexpected("`;` after enum constant"));
                    }
                }
                self.expect(&TokenType::Semicolon, "`;` after enum constant")?;
                Ok(Member::EnumConstant { name, doc, span })
            }
            _ => Err(self.unexpected("`ctor`, `method`, `field` or `enum_constant`")),
        }
    }

    /// Modifier run with interleaved marker annotations. `@NonNull` and
    /// `@Nullable` set the returned nullability, `@Deprecated` sets the
    /// modifier flag, any other annotation is skipped.
    fn parse_annotated_modifiers(&mut self) -> (Modifiers, Nullability) {
        let mut modifiers = Modifiers::default();
        let mut nullability = Nullability::Unspecified;

        loop {
            match self.peek_type().clone() {
                TokenType::At => {
                    if matches!(self.peek_type_at(1), TokenType::Identifier(_)) {
                        self.advance();
                        let name = self
                            .parse_identifier("annotation name")
                            .unwrap_or_default();
                        match name.as_str() {
                            "NonNull" => nullability = Nullability::NonNull,
                            "Nullable" => nullability = Nullability::Nullable,
                            "Deprecated" => modifiers.deprecated = true,
                            _ => {}
                        }
                    } else {
                        break;
                    }
                }
                TokenType::Public => {
                    self.advance();
                    modifiers.visibility = Visibility::Public;
                }
                TokenType::Protected => {
                    self.advance();
                    modifiers.visibility = Visibility::Protected;
                }
                TokenType::Static => {
                    self.advance();
                    modifiers.is_static = true;
                }
                TokenType::Final => {
                    self.advance();
                    modifiers.is_final = true;
                }
                TokenType::Abstract => {
                    self.advance();
                    modifiers.is_abstract = true;
                }
                TokenType::Default => {
                    // `default` doubles as the annotation-element value
                    // introducer; in modifier position it always precedes a
                    // type, never a literal or `;`.
                    if matches!(
                        self.peek_type_at(1),
                        TokenType::String(_)
                            | TokenType::Character(_)
                            | TokenType::Number(_)
                            | TokenType::Boolean(_)
                            | TokenType::Null
                    ) {
                        break;
                    }
                    self.advance();
                    modifiers.is_default = true;
                }
                TokenType::Native => {
                    self.advance();
                    modifiers.is_native = true;
                }
                TokenType::Synchronized => {
                    self.advance();
                    modifiers.is_synchronized = true;
                }
                TokenType::Transient => {
                    self.advance();
                    modifiers.is_transient = true;
                }
                TokenType::Volatile => {
                    self.advance();
                    modifiers.is_volatile = true;
                }
                TokenType::Deprecated => {
                    self.advance();
                    modifiers.deprecated = true;
                }
                _ => break,
            }
        }

        (modifiers, nullability)
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        self.parse_annotated_modifiers().0
    }

    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut parameters = Vec::new();
        if self.consume(&TokenType::RightParen) {
            return Ok(parameters);
        }

        loop {
            let mut nullability = Nullability::Unspecified;
            while self.check(&TokenType::At) {
                self.advance();
                let name = self.parse_identifier("annotation name")?;
                match name.as_str() {
                    "NonNull" => nullability = Nullability::NonNull,
                    "Nullable" => nullability = Nullability::Nullable,
                    _ => {}
                }
            }

            let type_ref = self.parse_type()?;
            let is_varargs = self.consume(&TokenType::Ellipsis);
            let name = match self.peek_type() {
                TokenType::Identifier(_) => self.parse_identifier("parameter name")?,
                // Signature files may omit parameter names; synthesize a
                // stable one so rendered stubs stay deterministic.
                _ => format!("arg{}", parameters.len()),
            };

            parameters.push(Parameter {
                name,
                type_ref,
                nullability,
                is_varargs,
            });

            if self.consume(&TokenType::Comma) {
                continue;
            }
            self.expect(&TokenType::RightParen, "`)` closing parameter list")?;
            break;
        }

        Ok(parameters)
    }

    fn parse_throws(&mut self) -> Result<Vec<TypeRef>, ParseError> {
        let mut throws = Vec::new();
        if self.consume(&TokenType::Throws) {
            throws.push(self.parse_type()?);
            while self.consume(&TokenType::Comma) {
                throws.push(self.parse_type()?);
            }
        }
        Ok(throws)
    }

    fn parse_type_params(&mut self) -> Result<Vec<TypeParam>, ParseError> {
        let mut params = Vec::new();
        if !self.consume(&TokenType::LeftAngle) {
            return Ok(params);
        }

        loop {
            let name = self.parse_identifier("type parameter name")?;
            let mut param = TypeParam::new(name);
            if self.consume(&TokenType::Extends) {
                param.bounds.push(self.parse_type()?);
                while self.consume(&TokenType::Ampersand) {
                    param.bounds.push(self.parse_type()?);
                }
            }
            params.push(param);

            if self.consume(&TokenType::Comma) {
                continue;
            }
            self.expect(&TokenType::RightAngle, "`>` closing type parameters")?;
            break;
        }

        Ok(params)
    }

    fn parse_return_type(&mut self) -> Result<TypeRef, ParseError> {
        if let TokenType::Identifier(word) = self.peek_type() {
            if word == "void" {
                self.advance();
                return Ok(TypeRef::Void);
            }
        }
        self.parse_type()
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let base = if let TokenType::Identifier(word) = self.peek_type().clone() {
            if let Some(primitive) = PrimitiveType::from_keyword(&word) {
                self.advance();
                TypeRef::Primitive(primitive)
            } else {
                let name = self.parse_qualified_name("type name")?;
                let type_args = self.parse_type_args()?;
                TypeRef::Named { name, type_args }
            }
        } else {
            return Err(self.unexpected("a type name"));
        };

        let mut dimensions = 0;
        while self.check(&TokenType::LeftBracket) {
            self.advance();
            self.expect(&TokenType::RightBracket, "`]` closing array dimension")?;
            dimensions += 1;
        }

        if dimensions > 0 {
            Ok(TypeRef::Array {
                element: Box::new(base),
                dimensions,
            })
        } else {
            Ok(base)
        }
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeRef>, ParseError> {
        let mut args = Vec::new();
        if !self.consume(&TokenType::LeftAngle) {
            return Ok(args);
        }

        loop {
            if self.consume(&TokenType::Question) {
                let bound = if self.consume(&TokenType::Extends) {
                    WildcardBound::Extends(Box::new(self.parse_type()?))
                } else if self.consume(&TokenType::Super) {
                    WildcardBound::Super(Box::new(self.parse_type()?))
                } else {
                    WildcardBound::Unbounded
                };
                args.push(TypeRef::Wildcard(bound));
            } else {
                args.push(self.parse_type()?);
            }

            if self.consume(&TokenType::Comma) {
                continue;
            }
            self.expect(&TokenType::RightAngle, "`>` closing type arguments")?;
            break;
        }

        Ok(args)
    }

    fn parse_constant_value(&mut self) -> Result<ConstantValue, ParseError> {
        let token = self.advance_token("a constant literal")?;
        match token.token_type.clone() {
            TokenType::String(value) => Ok(ConstantValue::String(value)),
            TokenType::Character(value) => Ok(ConstantValue::Char(value)),
            TokenType::Boolean(value) => Ok(ConstantValue::Boolean(value)),
            TokenType::Null => Ok(ConstantValue::Null),
            TokenType::Number(raw) => classify_number(&raw).ok_or(ParseError::InvalidConstant {
                literal: raw,
                message: "not a valid Java numeric literal".to_string(),
                line: token.line,
                column: token.column,
            }),
            _ => Err(ParseError::UnexpectedToken {
                expected: "a constant literal".to_string(),
                found: token.lexeme.clone(),
                line: token.line,
                column: token.column,
            }),
        }
    }

    fn parse_qualified_name(&mut self, context: &str) -> Result<String, ParseError> {
        let mut name = self.parse_identifier(context)?;
        while self.check(&TokenType::Dot) && matches!(self.peek_type_at(1), TokenType::Identifier(_))
        {
            self.advance();
            name.push('.');
            name.push_str(&self.parse_identifier(context)?);
        }
        Ok(name)
    }

    /// Dotted simple name for nested types (`Outer.Inner`). Shares the
    /// qualified-name grammar; the distinction is semantic.
    fn parse_dotted_simple_name(&mut self, context: &str) -> Result<String, ParseError> {
        self.parse_qualified_name(context)
    }

    fn parse_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        match self.peek_type().clone() {
            TokenType::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(context)),
        }
    }

    fn take_doc(&mut self) -> Option<DocComment> {
        if let TokenType::DocComment(text) = self.peek_type().clone() {
            self.advance();
            Some(DocComment::from_text(&text))
        } else {
            None
        }
    }

    fn current_position(&self) -> Span {
        let token = &self.tokens[self.position.min(self.tokens.len() - 1)];
        Span::point(token.line, token.column)
    }

    fn peek_type(&self) -> &TokenType {
        &self.tokens[self.position.min(self.tokens.len() - 1)].token_type
    }

    fn peek_type_at(&self, offset: usize) -> &TokenType {
        &self.tokens[(self.position + offset).min(self.tokens.len() - 1)].token_type
    }

    fn check(&self, token_type: &TokenType) -> bool {
        self.peek_type() == token_type
    }

    fn consume(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: &TokenType, expected: &str) -> Result<(), ParseError> {
        if self.consume(token_type) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn advance_token(&mut self, context: &str) -> Result<Token, ParseError> {
        if self.at_end() {
            return Err(ParseError::UnexpectedEof {
                context: context.to_string(),
            });
        }
        let token = self.tokens[self.position].clone();
        self.advance();
        Ok(token)
    }

    fn at_end(&self) -> bool {
        matches!(self.peek_type(), TokenType::Eof)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = &self.tokens[self.position.min(self.tokens.len() - 1)];
        let found = if matches!(token.token_type, TokenType::Eof) {
            "<eof>".to_string()
        } else {
            token.lexeme.clone()
        };
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            line: token.line,
            column: token.column,
        }
    }
}

fn merge_package(surface: &mut ApiSurface, incoming: PackageDecl) {
    let target = surface.package_mut(&incoming.name);
    if target.doc.is_none() {
        target.doc = incoming.doc;
    }
    target.types.extend(incoming.types);
}

/// Classify a raw numeric spelling into a constant value, keeping floating
/// literals as written so regeneration stays byte-stable.
fn classify_number(raw: &str) -> Option<ConstantValue> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    // Suffix checks must not fire on hex spellings, where trailing f/d/e
    // are ordinary digits.
    if !is_hex(text) {
        if let Some(stripped) = text.strip_suffix(['f', 'F']) {
            stripped.parse::<f32>().ok()?;
            return Some(ConstantValue::Float(text.to_string()));
        }
        if let Some(stripped) = text.strip_suffix(['d', 'D']) {
            stripped.parse::<f64>().ok()?;
            return Some(ConstantValue::Double(text.to_string()));
        }
        if text.contains(['.', 'e', 'E']) {
            text.parse::<f64>().ok()?;
            return Some(ConstantValue::Double(text.to_string()));
        }
    }

    let (digits, is_long) = match text.strip_suffix(['L', 'l']) {
        Some(rest) => (rest, true),
        None => (text, false),
    };

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
            .ok()
            .or_else(|| u64::from_str_radix(hex, 16).ok().map(|wide| wide as i64))?
    } else if let Some(hex) = digits
        .strip_prefix("-0x")
        .or_else(|| digits.strip_prefix("-0X"))
    {
        i64::from_str_radix(hex, 16).ok().map(|magnitude| -magnitude)?
    } else {
        digits.parse::<i64>().ok()?
    };

    if is_long {
        Some(ConstantValue::Long(value))
    } else {
        Some(ConstantValue::Int(value))
    }
}

fn is_hex(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    unsigned.starts_with("0x") || unsigned.starts_with("0X")
}
