use crate::engines::generation::program::Program;
use crate::error::{EvotreeError, Result};
use crate::functions::Function;
use crate::types::Node;
use std::iter::Peekable;

fn tokenize(text: &str) -> Vec<String> {
    text.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn parse_terminal(token: &str) -> Result<Node> {
    if let Some(index) = token.strip_prefix("x[").and_then(|t| t.strip_suffix(']')) {
        return index
            .parse::<usize>()
            .map(Node::Input)
            .map_err(|_| EvotreeError::InvalidProgram(format!("bad input reference '{}'", token)));
    }
    token
        .parse::<f64>()
        .map(Node::Constant)
        .map_err(|_| EvotreeError::InvalidProgram(format!("unexpected token '{}'", token)))
}

fn parse_expr<I>(tokens: &mut Peekable<I>, functions: &[Function]) -> Result<Vec<Node>>
where
    I: Iterator<Item = String>,
{
    let token = tokens
        .next()
        .ok_or_else(|| EvotreeError::InvalidProgram("unexpected end of expression".to_string()))?;

    match token.as_str() {
        "(" => {
            let symbol = tokens.next().ok_or_else(|| {
                EvotreeError::InvalidProgram("missing function symbol".to_string())
            })?;

            let mut children = Vec::new();
            let mut arity = 0;
            loop {
                match tokens.peek().map(String::as_str) {
                    Some(")") => {
                        tokens.next();
                        break;
                    }
                    Some(_) => {
                        children.extend(parse_expr(tokens, functions)?);
                        arity += 1;
                    }
                    None => {
                        return Err(EvotreeError::InvalidProgram(format!(
                            "unclosed '({}'",
                            symbol
                        )))
                    }
                }
            }

            // Symbols may be shared across arities, e.g. `-` for subtraction and negation.
            let function = functions
                .iter()
                .find(|f| f.symbol() == symbol && f.arity() == arity)
                .ok_or_else(|| {
                    EvotreeError::InvalidProgram(format!(
                        "no function '{}' taking {} argument(s)",
                        symbol, arity
                    ))
                })?;

            let mut nodes = Vec::with_capacity(children.len() + 1);
            nodes.push(Node::Function(function.clone()));
            nodes.extend(children);
            Ok(nodes)
        }
        ")" => Err(EvotreeError::InvalidProgram("unbalanced ')'".to_string())),
        atom => Ok(vec![parse_terminal(atom)?]),
    }
}

/// Parse the fully parenthesised prefix form produced by `Display for Program`.
pub fn parse_sexpr(text: &str, functions: &[Function]) -> Result<Program> {
    let mut tokens = tokenize(text).into_iter().peekable();
    let nodes = parse_expr(&mut tokens, functions)?;
    if let Some(extra) = tokens.next() {
        return Err(EvotreeError::InvalidProgram(format!(
            "trailing token '{}'",
            extra
        )));
    }
    Program::try_new(nodes)
}
