// ABOUTME: Tokeniser and parser turning source text into value trees

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace1},
    combinator::{map_res, opt, recognize, value},
    multi::many0,
    IResult, Parser,
};

use crate::error::EvalError;
use crate::symbol::Symbol;
use crate::value::Value;
use std::rc::Rc;

// Bytes that terminate a symbol token. Everything else that is not
// whitespace may appear inside a symbol.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !"()[]{}'\"`;~,".contains(c)
}

/// Parse a line comment: `;` to end of line
fn parse_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n')(input)?;
    Ok((input, ()))
}

/// Skip whitespace and comments
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    many0(alt((value((), multispace1), parse_comment)))
        .map(|_| ())
        .parse(input)
}

/// Parse an integer literal with an optional leading minus sign
fn parse_number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize((opt(char('-')), digit1)),
        |num_str: &str| num_str.parse::<i64>(),
    )
    .map(Value::Number)
    .parse(input)
}

/// Parse a symbol token; `nil`, `true` and `false` name the singletons,
/// everything else goes through the intern pool.
fn parse_symbol(input: &str) -> IResult<&str, Value> {
    let (input, token) = take_while1::<_, _, nom::error::Error<_>>(is_symbol_char)(input)?;

    let parsed = match token {
        "nil" => Value::Nil,
        "true" => Value::True,
        "false" => Value::False,
        _ => Value::Symbol(Symbol::intern(token)),
    };
    Ok((input, parsed))
}

/// Parse a string literal, decoding the escapes `\\`, `\"`, `\n`, `\t`, `\r`.
/// An unknown escape passes its trailing character through literally.
fn parse_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('"')(input)?;

    let mut result = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&input[i + 1..], Value::String(Rc::from(result)))),
            '\\' => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, other)) => result.push(other),
                None => break,
            },
            _ => result.push(c),
        }
    }

    // ran off the end without a closing quote
    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn shorthand(name: &str, expr: Value) -> Value {
    Value::list(vec![Value::Symbol(Symbol::intern(name)), expr])
}

/// Parse a quoted expression: 'expr -> (quote expr)
fn parse_quote(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('\'')(input)?;
    let (input, expr) = parse_expr(input)?;
    Ok((input, shorthand("quote", expr)))
}

/// Parse a quasiquoted expression: `expr -> (quasiquote expr)
fn parse_quasiquote(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('`')(input)?;
    let (input, expr) = parse_expr(input)?;
    Ok((input, shorthand("quasiquote", expr)))
}

/// Parse ~expr -> (unquote expr) or ~@expr -> (splice-unquote expr)
fn parse_unquote(input: &str) -> IResult<&str, Value> {
    if let Ok((input, _)) = tag::<_, _, nom::error::Error<_>>("~@")(input) {
        let (input, expr) = parse_expr(input)?;
        Ok((input, shorthand("splice-unquote", expr)))
    } else {
        let (input, _) = char('~')(input)?;
        let (input, expr) = parse_expr(input)?;
        Ok((input, shorthand("unquote", expr)))
    }
}

/// Parse a list: (expr1 expr2 ...); `()` is the canonical empty list
fn parse_list(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('(')(input)?;
    let (input, _) = ws_and_comments(input)?;

    let mut items = Vec::new();
    let mut remaining = input;

    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(remaining) {
            return Ok((rest, Value::list(items)));
        }

        let (rest, expr) = parse_expr(remaining)?;
        items.push(expr);

        let (rest, _) = ws_and_comments(rest)?;
        remaining = rest;
    }
}

/// Main expression parser - tries all alternatives
fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws_and_comments(input)?;
    alt((
        parse_quote,
        parse_quasiquote,
        parse_unquote,
        parse_list,
        parse_number,
        parse_string,
        parse_symbol,
    ))
    .parse(input)
}

/// Reads exactly one form from `input`.
///
/// Returns `Ok(None)` when the input holds nothing but whitespace and
/// comments. Anything left over after the form is a syntax error, as is any
/// unreadable token; reader failures are static errors, never catchable.
pub fn read_str(input: &str) -> Result<Option<Value>, EvalError> {
    let (rest, _) = ws_and_comments(input).unwrap_or((input, ()));
    if rest.is_empty() {
        return Ok(None);
    }

    match parse_expr(rest) {
        Ok((rest, form)) => {
            let (rest, _) = ws_and_comments(rest).unwrap_or((rest, ()));
            if rest.is_empty() {
                Ok(Some(form))
            } else {
                Err(EvalError::bad_syntax(format!(
                    "unexpected trailing input: '{}'",
                    rest.trim_end()
                )))
            }
        }
        Err(e) => Err(EvalError::bad_syntax(format!("could not read form: {:?}", e))),
    }
}
