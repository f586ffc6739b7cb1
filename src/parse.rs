//! Parse content streams back into instructions.
//!
//! Covers the operand kinds the canvas emits (numbers, names, arrays), which
//! is enough to inspect composed output.

use pest::Parser;
use pest::iterators::Pair;

use crate::errors::{CanvasError, Result};
use crate::types::{Name, Operand};
use crate::{ContentParser, Rule};

/// One operator with the operands preceding it
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub operator: String,
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// The numeric operands, in order
    pub fn numbers(&self) -> Vec<f64> {
        self.operands.iter().filter_map(Operand::as_number).collect()
    }
}

/// Split a content stream into instructions
pub fn tokenize(source: &str) -> Result<Vec<Instruction>> {
    let pairs = ContentParser::parse(Rule::content, source).map_err(|e| CanvasError::Parse {
        message: e.to_string(),
    })?;

    let mut instructions = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::content {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::instruction {
                    instructions.push(parse_instruction(inner)?);
                }
            }
        }
    }
    Ok(instructions)
}

fn parse_instruction(pair: Pair<Rule>) -> Result<Instruction> {
    let mut operands = Vec::new();
    let mut operator = String::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::operator => operator = inner.as_str().to_string(),
            _ => operands.push(parse_operand(inner)?),
        }
    }
    Ok(Instruction { operator, operands })
}

fn parse_operand(pair: Pair<Rule>) -> Result<Operand> {
    match pair.as_rule() {
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map(Operand::Number)
            .map_err(|e| parse_error(format!("invalid number {:?}: {}", pair.as_str(), e))),
        Rule::name => Ok(Operand::Name(unescape_name(&pair.as_str()[1..])?)),
        Rule::array => Ok(Operand::Array(
            pair.into_inner()
                .map(parse_operand)
                .collect::<Result<Vec<_>>>()?,
        )),
        rule => Err(parse_error(format!("unexpected operand rule {:?}", rule))),
    }
}

/// Decode `#xx` escapes in a name
fn unescape_name(raw: &str) -> Result<Name> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' {
            let hex = raw
                .get(i + 1..i + 3)
                .ok_or_else(|| parse_error(format!("truncated escape in name /{}", raw)))?;
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|_| parse_error(format!("bad escape #{} in name /{}", hex, raw)))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out)
        .map(Name::new)
        .map_err(|e| parse_error(format!("name /{} is not UTF-8: {}", raw, e)))
}

fn parse_error(message: String) -> CanvasError {
    CanvasError::Parse { message }
}
