//! Name interning tables

use std::collections::HashMap;

use super::Code;

/// Growable name→code table; codes are handed out sequentially from `base`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternTable {
    base: Code,
    limit: Option<Code>,
    codes: HashMap<String, Code>,
    names: Vec<String>,
}

impl InternTable {
    pub fn new(base: Code) -> Self {
        Self {
            base,
            limit: None,
            codes: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// A table whose codes must stay strictly below `limit`
    pub fn bounded(base: Code, limit: Code) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(base)
        }
    }

    /// Return the code for `name`, assigning the next free one on first sight.
    ///
    /// Returns `None` only when a bounded table has no codes left.
    pub fn intern(&mut self, name: &str) -> Option<Code> {
        if let Some(&code) = self.codes.get(name) {
            return Some(code);
        }

        let code = self.base + self.names.len() as Code;
        if self.limit.is_some_and(|limit| code >= limit) {
            return None;
        }

        self.codes.insert(name.to_string(), code);
        self.names.push(name.to_string());
        Some(code)
    }

    pub fn lookup(&self, name: &str) -> Option<Code> {
        self.codes.get(name).copied()
    }

    pub fn name_of(&self, code: Code) -> Option<&str> {
        code.checked_sub(self.base)
            .and_then(|index| self.names.get(index as usize))
            .map(String::as_str)
    }

    pub fn base(&self) -> Code {
        self.base
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in the order they were interned
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
