//! Message schema parser built on nom parser combinators.
//!
//! The input is first split into statements (see [`crate::lex`]); each
//! statement is then parsed on its own:
//!
//! - `message <name> {` opens the root,
//! - `<repetition> group <name> [(<LOGICAL>)] {` opens a group,
//! - `<repetition> <primitive> <name> [(<LOGICAL>)];` declares a leaf,
//! - `}` closes the innermost open body.

use columnio_core::{
    GroupType, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition, Type,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char, digit1, space0},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
};

use crate::{
    error::ParseError,
    lex::{Statement, Terminator, split_statements},
};

/// A group whose body is still being read.
struct Frame {
    header: Option<GroupHeader>,
    fields: Vec<Type>,
}

struct GroupHeader {
    name: String,
    repetition: Repetition,
    logical: Option<LogicalType>,
}

/// Parse a textual message schema into a validated [`MessageType`].
pub fn parse_message_type(input: &str) -> Result<MessageType, ParseError> {
    let (statements, trailing) = split_statements(input);
    if let Some((line, text)) = trailing {
        return Err(ParseError::syntax(
            line,
            format!("unterminated statement: {text}"),
        ));
    }

    let mut statements = statements.into_iter();
    let first = statements
        .next()
        .ok_or_else(|| ParseError::syntax(1, "empty schema"))?;
    if first.terminator != Terminator::Open {
        return Err(ParseError::syntax(
            first.line,
            "schema must start with `message <name> {`",
        ));
    }
    let name = parse_statement(&first, message_header)?.to_string();

    let mut frames = vec![Frame {
        header: None,
        fields: Vec::new(),
    }];
    let mut root_fields: Option<Vec<Type>> = None;
    let mut last_line = first.line;

    for statement in statements {
        last_line = statement.line;
        if root_fields.is_some() {
            return Err(ParseError::syntax(
                statement.line,
                "unexpected statement after end of message",
            ));
        }

        match statement.terminator {
            Terminator::Semicolon => {
                if statement.text.is_empty() {
                    return Err(ParseError::syntax(statement.line, "empty statement"));
                }
                let field = parse_statement(&statement, primitive_decl)?;
                current_fields(&mut frames, statement.line)?.push(field.into());
            }
            Terminator::Open => {
                let header = parse_statement(&statement, group_header)?;
                frames.push(Frame {
                    header: Some(header),
                    fields: Vec::new(),
                });
            }
            Terminator::Close => {
                if !statement.text.is_empty() {
                    return Err(ParseError::syntax(
                        statement.line,
                        format!("missing ';' after `{}`", statement.text),
                    ));
                }
                let frame = frames
                    .pop()
                    .ok_or_else(|| ParseError::syntax(statement.line, "unmatched '}'"))?;
                match frame.header {
                    Some(header) => {
                        let group = GroupType {
                            name: header.name,
                            repetition: header.repetition,
                            logical: header.logical,
                            fields: frame.fields,
                        };
                        current_fields(&mut frames, statement.line)?.push(group.into());
                    }
                    None => root_fields = Some(frame.fields),
                }
            }
        }
    }

    let fields =
        root_fields.ok_or_else(|| ParseError::syntax(last_line, "unclosed message body"))?;
    let message = MessageType::new(name, fields);
    message.validate()?;
    Ok(message)
}

fn current_fields(frames: &mut [Frame], line: usize) -> Result<&mut Vec<Type>, ParseError> {
    frames
        .last_mut()
        .map(|frame| &mut frame.fields)
        .ok_or_else(|| ParseError::syntax(line, "field outside of message body"))
}

/// Run `parser` over a whole statement, rejecting trailing input.
fn parse_statement<'a, T>(
    statement: &'a Statement,
    parser: impl Fn(&'a str) -> IResult<&'a str, T>,
) -> Result<T, ParseError> {
    match parser(statement.text.as_str()) {
        Ok((remaining, parsed)) if remaining.trim().is_empty() => Ok(parsed),
        Ok((remaining, _)) => Err(ParseError::syntax(
            statement.line,
            format!("unexpected trailing characters: {remaining}"),
        )),
        Err(e) => Err(ParseError::syntax(
            statement.line,
            format!("failed to parse `{}`: {e}", statement.text),
        )),
    }
}

/// Parse the root header: message Name
fn message_header(input: &str) -> IResult<&str, &str> {
    map(
        tuple((tag("message"), ws1, identifier, ws)),
        |(_, _, name, _)| name,
    )(input)
}

/// Parse a group header: repetition group Name (LOGICAL)
fn group_header(input: &str) -> IResult<&str, GroupHeader> {
    map(
        tuple((
            repetition,
            ws1,
            terminated(tag("group"), keyword_boundary),
            ws1,
            identifier,
            opt(preceded(ws, logical_annotation)),
            ws,
        )),
        |(repetition, _, _, _, name, logical, _)| GroupHeader {
            name: name.to_string(),
            repetition,
            logical,
        },
    )(input)
}

/// Parse a leaf declaration (without semicolon): repetition kind name (LOGICAL)
fn primitive_decl(input: &str) -> IResult<&str, PrimitiveType> {
    map(
        tuple((
            repetition,
            ws1,
            primitive_kind,
            ws1,
            identifier,
            opt(preceded(ws, logical_annotation)),
            ws,
        )),
        |(repetition, _, kind, _, name, logical, _)| PrimitiveType {
            name: name.to_string(),
            repetition,
            kind,
            logical,
        },
    )(input)
}

fn repetition(input: &str) -> IResult<&str, Repetition> {
    terminated(
        alt((
            value(Repetition::Required, tag("required")),
            value(Repetition::Optional, tag("optional")),
            value(Repetition::Repeated, tag("repeated")),
        )),
        keyword_boundary,
    )(input)
}

/// Parse primitive kind names (fixed_len_byte_array carries its length)
fn primitive_kind(input: &str) -> IResult<&str, PrimitiveKind> {
    alt((
        map(
            tuple((
                tag("fixed_len_byte_array"),
                ws,
                char('('),
                ws,
                number,
                ws,
                char(')'),
            )),
            |(_, _, _, _, len, _, _)| PrimitiveKind::FixedLenByteArray(len),
        ),
        terminated(
            alt((
                value(PrimitiveKind::Boolean, tag("boolean")),
                value(PrimitiveKind::Int32, tag("int32")),
                value(PrimitiveKind::Int64, tag("int64")),
                value(PrimitiveKind::Int96, tag("int96")),
                value(PrimitiveKind::Float, tag("float")),
                value(PrimitiveKind::Double, tag("double")),
                value(PrimitiveKind::Binary, tag("binary")),
            )),
            keyword_boundary,
        ),
    ))(input)
}

/// Parse a parenthesized logical annotation: (UTF8), (DECIMAL(9,2)), ...
fn logical_annotation(input: &str) -> IResult<&str, LogicalType> {
    map(
        tuple((char('('), ws, logical_type, ws, char(')'))),
        |(_, _, logical, _, _)| logical,
    )(input)
}

/// Parse logical type names (order matters: longer matches first)
fn logical_type(input: &str) -> IResult<&str, LogicalType> {
    alt((
        map(
            tuple((
                tag("DECIMAL"),
                ws,
                char('('),
                ws,
                number_u32,
                ws,
                char(','),
                ws,
                number_u32,
                ws,
                char(')'),
            )),
            |(_, _, _, _, precision, _, _, _, scale, _, _)| LogicalType::Decimal {
                precision,
                scale,
            },
        ),
        terminated(
            alt((
                value(LogicalType::MapKeyValue, tag("MAP_KEY_VALUE")),
                value(LogicalType::Map, tag("MAP")),
                value(LogicalType::Utf8, tag("UTF8")),
                value(LogicalType::Enum, tag("ENUM")),
                value(LogicalType::Json, tag("JSON")),
                value(LogicalType::Bson, tag("BSON")),
                value(LogicalType::List, tag("LIST")),
                value(LogicalType::Date, tag("DATE")),
                value(LogicalType::TimestampMillis, tag("TIMESTAMP_MILLIS")),
                value(LogicalType::TimeMillis, tag("TIME_MILLIS")),
            )),
            keyword_boundary,
        ),
    ))(input)
}

/// Parse an identifier (alphanumeric + underscore, must start with alpha or _)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn keyword_boundary(input: &str) -> IResult<&str, ()> {
    if input.chars().next().is_some_and(is_ident_continue) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, ()))
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ws(input: &str) -> IResult<&str, ()> {
    value((), space0)(input)
}

fn ws1(input: &str) -> IResult<&str, ()> {
    value((), take_while1(|c: char| c.is_whitespace()))(input)
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn number_u32(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}
