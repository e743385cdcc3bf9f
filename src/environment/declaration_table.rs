use std::collections::HashMap;

use thiserror::Error;

use crate::ast::types::ValueType;

/// Misuse of an [`Environment`](super::environment::Environment) or one of
/// its tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("'{name}' is already declared in this block")]
    DuplicateDeclaration { name: String },
    #[error("'{name}' is not declared")]
    UndeclaredName { name: String },
    #[error("'{name}' is read before being assigned")]
    UninitializedAccess { name: String },
    #[error("call stack depth limit of {max_depth} reached")]
    CallStackOverflow { max_depth: usize },
    #[error("no active call to leave")]
    EmptyCallStack,
    #[error("no open block to leave")]
    NoOpenBlock,
}

/// One declaration of a name. Inner declarations shadow outer ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowEntry<V> {
    pub var_type: ValueType,
    pub value: Option<V>,
    /// Nesting level the declaration was made at.
    level: usize,
    /// Lowest nesting level the entry has been assigned at, if any.
    init_level: Option<usize>,
}

/// Variables of one scope chain: the globals, or the locals of one call.
///
/// Every name maps to a stack of shadow entries, the innermost on top.
/// Exiting a block pops exactly the entries that block declared.
#[derive(Debug, Clone)]
pub struct DeclarationTable<V> {
    entries: HashMap<String, Vec<ShadowEntry<V>>>,
    nesting_level: usize,
    /// Names declared by each open block, outermost first.
    cleanup: Vec<Vec<String>>,
}

impl<V> Default for DeclarationTable<V> {
    fn default() -> Self {
        DeclarationTable {
            entries: HashMap::new(),
            nesting_level: 0,
            cleanup: vec![vec![]],
        }
    }
}

impl<V> DeclarationTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nesting_level(&self) -> usize {
        self.nesting_level
    }

    pub fn enter_block(&mut self) {
        self.nesting_level += 1;
        self.cleanup.push(vec![]);
    }

    pub fn exit_block(&mut self) -> Result<(), ScopeError> {
        if self.nesting_level == 0 {
            return Err(ScopeError::NoOpenBlock);
        }

        let declared = self.cleanup.pop().unwrap_or_default();
        self.nesting_level -= 1;

        for name in declared {
            if let Some(stack) = self.entries.get_mut(&name) {
                stack.pop();
                if stack.is_empty() {
                    self.entries.remove(&name);
                }
            }
        }

        // Assignments made only inside the closed block no longer count
        let level = self.nesting_level;
        for entry in self.entries.values_mut().flat_map(|stack| stack.iter_mut()) {
            if entry.init_level.is_some_and(|init_level| init_level > level) {
                entry.init_level = None;
            }
        }

        Ok(())
    }

    pub fn declare(&mut self, name: &str, var_type: ValueType) -> Result<(), ScopeError> {
        if self.is_declared_in_current_block(name) {
            return Err(ScopeError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }

        self.entries
            .entry(name.to_string())
            .or_default()
            .push(ShadowEntry {
                var_type,
                value: None,
                level: self.nesting_level,
                init_level: None,
            });

        if let Some(declared) = self.cleanup.last_mut() {
            declared.push(name.to_string());
        }

        Ok(())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_declared_in_current_block(&self, name: &str) -> bool {
        self.entry(name)
            .is_some_and(|entry| entry.level == self.nesting_level)
    }

    /// The visible (innermost) entry for `name`.
    pub fn entry(&self, name: &str) -> Option<&ShadowEntry<V>> {
        self.entries.get(name).and_then(|stack| stack.last())
    }

    pub fn variable_type(&self, name: &str) -> Option<ValueType> {
        self.entry(name).map(|entry| entry.var_type)
    }

    pub fn is_initialized(&self, name: &str) -> bool {
        self.entry(name)
            .and_then(|entry| entry.init_level)
            .is_some_and(|init_level| init_level <= self.nesting_level)
    }

    pub fn assign(&mut self, name: &str, value: V) -> Result<(), ScopeError> {
        let level = self.nesting_level;
        let entry = self
            .entries
            .get_mut(name)
            .and_then(|stack| stack.last_mut())
            .ok_or_else(|| ScopeError::UndeclaredName {
                name: name.to_string(),
            })?;

        entry.value = Some(value);
        entry.init_level = Some(entry.init_level.map_or(level, |init_level| init_level.min(level)));

        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<&V, ScopeError> {
        let entry = self.entry(name).ok_or_else(|| ScopeError::UndeclaredName {
            name: name.to_string(),
        })?;

        match &entry.value {
            Some(value) if self.is_initialized(name) => Ok(value),
            _ => Err(ScopeError::UninitializedAccess {
                name: name.to_string(),
            }),
        }
    }
}
