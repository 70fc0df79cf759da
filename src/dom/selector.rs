//! A small CSS selector engine.
//!
//! Supported grammar: comma separated lists of complex selectors made of compound
//! selectors (`tag`, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`) joined by the
//! descendant (whitespace) and child (`>`) combinators. Ancestor parts of a selector
//! are matched against the whole document, as `querySelectorAll` does.

use crate::{
    dom::document::Arena,
    foundation::core::NodeId,
    foundation::error::{SelError, SelResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>, // None also covers `*`
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches(&self, arena: &Arena, node: NodeId) -> bool {
        let Some(tag) = arena.tag(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if arena.attr(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class = arena.attr(node, "class").unwrap_or("");
            let present: Vec<&str> = class.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|a| match a {
            AttrMatch::Exists(name) => arena.attr(node, name).is_some(),
            AttrMatch::Equals(name, value) => arena.attr(node, name) == Some(value.as_str()),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    // combinators[i] joins compounds[i] and compounds[i + 1]
    combinators: Vec<Combinator>,
}

impl Complex {
    fn matches(&self, arena: &Arena, node: NodeId) -> bool {
        self.match_at(arena, self.compounds.len() - 1, node)
    }

    fn match_at(&self, arena: &Arena, i: usize, node: NodeId) -> bool {
        if !self.compounds[i].matches(arena, node) {
            return false;
        }
        if i == 0 {
            return true;
        }
        match self.combinators[i - 1] {
            Combinator::Child => arena
                .parent(node)
                .is_some_and(|p| self.match_at(arena, i - 1, p)),
            Combinator::Descendant => {
                let mut cursor = arena.parent(node);
                while let Some(ancestor) = cursor {
                    if self.match_at(arena, i - 1, ancestor) {
                        return true;
                    }
                    cursor = arena.parent(ancestor);
                }
                false
            }
        }
    }
}

/// A parsed selector group such as `svg > g.data, rect[fill]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    alternatives: Vec<Complex>,
}

impl SelectorList {
    /// Parse selector text; malformed input yields [`SelError::Selector`].
    pub fn parse(input: &str) -> SelResult<Self> {
        let mut parser = Parser {
            src: input,
            chars: input.chars().collect(),
            pos: 0,
        };
        let mut alternatives = Vec::new();
        loop {
            parser.skip_ws();
            alternatives.push(parser.complex()?);
            parser.skip_ws();
            match parser.peek() {
                None => break,
                Some(',') => parser.pos += 1,
                Some(c) => return Err(parser.error(format!("unexpected {c:?}"))),
            }
        }
        Ok(Self { alternatives })
    }

    pub(crate) fn matches(&self, arena: &Arena, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(arena, node))
    }
}

impl std::str::FromStr for SelectorList {
    type Err = SelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    src: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, msg: String) -> SelError {
        SelError::selector(format!("{msg} at offset {} in '{}'", self.pos, self.src))
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn complex(&mut self) -> SelResult<Complex> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    Combinator::Child
                }
                Some(_) if had_ws => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected {c:?}"))),
            };
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }
        Ok(Complex {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> SelResult<Compound> {
        let start = self.pos;
        let mut compound = Compound::default();
        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => compound.tag = Some(self.ident()?),
            _ => {}
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attr()?);
                }
                _ => break,
            }
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found {c:?}")),
                None => self.error("expected a selector".to_string()),
            });
        }
        Ok(compound)
    }

    fn ident(&mut self) -> SelResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected an identifier".to_string()));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attr(&mut self) -> SelResult<AttrMatch> {
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();
        let matcher = match self.peek() {
            Some(']') => AttrMatch::Exists(name),
            Some('=') => {
                self.pos += 1;
                self.skip_ws();
                let value = match self.peek() {
                    Some(q @ ('"' | '\'')) => self.quoted(q)?,
                    _ => self.ident()?,
                };
                self.skip_ws();
                AttrMatch::Equals(name, value)
            }
            _ => return Err(self.error("malformed attribute selector".to_string())),
        };
        if self.peek() != Some(']') {
            return Err(self.error("expected ']'".to_string()));
        }
        self.pos += 1;
        Ok(matcher)
    }

    fn quoted(&mut self, quote: char) -> SelResult<String> {
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated string".to_string()))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
#[path = "../../tests/unit/dom/selector.rs"]
mod tests;
