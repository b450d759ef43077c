//! Flat symbol table used while lowering

use std::collections::HashMap;

/// Where a symbol was defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolScope {
    /// Defined by the program being compiled
    Local,
    /// Pre-seeded before any user code
    Builtin,
}

/// A resolved name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Name as written in source
    pub name: String,
    /// Origin of the definition
    pub scope: SymbolScope,
    /// Definition order within its scope
    pub index: usize,
}

/// Single flat scope. Redefining a name replaces the earlier symbol; no
/// shadowing is modeled.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    store: HashMap<String, Symbol>,
    num_definitions: usize,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a program-defined name
    pub fn define(&mut self, name: &str) -> &Symbol {
        let symbol = Symbol {
            name: name.to_string(),
            scope: SymbolScope::Local,
            index: self.num_definitions,
        };
        self.num_definitions += 1;
        self.insert(symbol)
    }

    /// Register a builtin name at a fixed index
    pub fn define_builtin(&mut self, index: usize, name: &str) -> &Symbol {
        self.insert(Symbol {
            name: name.to_string(),
            scope: SymbolScope::Builtin,
            index,
        })
    }

    /// Look a name up
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.store.get(name)
    }

    /// Number of program-defined names
    pub fn num_definitions(&self) -> usize {
        self.num_definitions
    }

    /// All symbols sorted by scope, then definition order
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.store.values().collect();
        symbols.sort_by_key(|s| (s.scope == SymbolScope::Local, s.index));
        symbols
    }

    fn insert(&mut self, symbol: Symbol) -> &Symbol {
        let name = symbol.name.clone();
        self.store.insert(name.clone(), symbol);
        &self.store[&name]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_resolve() {
        let mut table = SymbolTable::new();
        let a = table.define("a").clone();
        let b = table.define("b").clone();

        assert_eq!(a.index, 0);
        assert_eq!(b.index, 1);
        assert_eq!(table.resolve("a"), Some(&a));
        assert_eq!(table.resolve("c"), None);
    }

    #[test]
    fn test_builtins_resolve_with_builtin_scope() {
        let mut table = SymbolTable::new();
        table.define_builtin(0, "console");

        let symbol = table.resolve("console");
        assert_eq!(symbol.map(|s| s.scope), Some(SymbolScope::Builtin));
        assert_eq!(table.num_definitions(), 0);
    }

    #[test]
    fn test_symbols_lists_builtins_first() {
        let mut table = SymbolTable::new();
        table.define("x");
        table.define_builtin(0, "Math");

        let names: Vec<&str> = table.symbols().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Math", "x"]);
    }
}
