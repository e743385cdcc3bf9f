use std::collections::HashMap;

use crate::{ast::types::ValueType, config::DEFAULT_MAX_CALL_DEPTH};

use super::declaration_table::{DeclarationTable, ScopeError};

#[derive(Debug, Clone)]
struct FunctionEntry<F> {
    payload: F,
    return_type: ValueType,
}

/// An active call: the called function and its local variables.
#[derive(Debug, Clone)]
struct CallFrame<F, V> {
    function: F,
    locals: DeclarationTable<V>,
}

/// Functions, globals and the call stack of one pass over a program.
///
/// `F` is whatever a pass keeps per function (a signature while checking,
/// the callable while executing), `V` the per-variable value (`()` while
/// checking). Variable lookups search the locals of the innermost call
/// first, then the globals. With no call active, declarations and blocks
/// go to the global table.
#[derive(Debug, Clone)]
pub struct Environment<F, V> {
    functions: HashMap<String, FunctionEntry<F>>,
    globals: DeclarationTable<V>,
    call_stack: Vec<CallFrame<F, V>>,
    max_call_depth: usize,
}

impl<F, V> Default for Environment<F, V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}

impl<F, V> Environment<F, V> {
    pub fn new(max_call_depth: usize) -> Self {
        Environment {
            functions: HashMap::new(),
            globals: DeclarationTable::new(),
            call_stack: vec![],
            max_call_depth,
        }
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn declare_function(
        &mut self,
        name: &str,
        payload: F,
        return_type: ValueType,
    ) -> Result<(), ScopeError> {
        if self.functions.contains_key(name) {
            return Err(ScopeError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }

        self.functions.insert(
            name.to_string(),
            FunctionEntry {
                payload,
                return_type,
            },
        );
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&F> {
        self.functions.get(name).map(|entry| &entry.payload)
    }

    pub fn function_return_type(&self, name: &str) -> Option<ValueType> {
        self.functions.get(name).map(|entry| entry.return_type)
    }

    pub fn is_function_declared(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    fn active_table(&self) -> &DeclarationTable<V> {
        match self.call_stack.last() {
            Some(frame) => &frame.locals,
            None => &self.globals,
        }
    }

    fn active_table_mut(&mut self) -> &mut DeclarationTable<V> {
        match self.call_stack.last_mut() {
            Some(frame) => &mut frame.locals,
            None => &mut self.globals,
        }
    }

    /// Table holding the visible declaration of `name`, locals first.
    fn table_for(&self, name: &str) -> Option<&DeclarationTable<V>> {
        let active = self.active_table();
        if active.is_declared(name) {
            Some(active)
        } else if self.globals.is_declared(name) {
            Some(&self.globals)
        } else {
            None
        }
    }

    fn table_for_mut(&mut self, name: &str) -> Option<&mut DeclarationTable<V>> {
        let local = self
            .call_stack
            .last()
            .is_some_and(|frame| frame.locals.is_declared(name));

        if local {
            self.call_stack.last_mut().map(|frame| &mut frame.locals)
        } else if self.globals.is_declared(name) {
            Some(&mut self.globals)
        } else {
            None
        }
    }

    pub fn declare_variable(&mut self, name: &str, var_type: ValueType) -> Result<(), ScopeError> {
        self.active_table_mut().declare(name, var_type)
    }

    pub fn is_declared_in_current_block(&self, name: &str) -> bool {
        self.active_table().is_declared_in_current_block(name)
    }

    pub fn is_variable_declared(&self, name: &str) -> bool {
        self.table_for(name).is_some()
    }

    pub fn variable_type(&self, name: &str) -> Option<ValueType> {
        self.table_for(name)
            .and_then(|table| table.variable_type(name))
    }

    pub fn is_initialized(&self, name: &str) -> bool {
        self.table_for(name)
            .is_some_and(|table| table.is_initialized(name))
    }

    pub fn assign(&mut self, name: &str, value: V) -> Result<(), ScopeError> {
        match self.table_for_mut(name) {
            Some(table) => table.assign(name, value),
            None => Err(ScopeError::UndeclaredName {
                name: name.to_string(),
            }),
        }
    }

    pub fn read(&self, name: &str) -> Result<&V, ScopeError> {
        match self.table_for(name) {
            Some(table) => table.read(name),
            None => Err(ScopeError::UndeclaredName {
                name: name.to_string(),
            }),
        }
    }

    pub fn enter_block(&mut self) {
        self.active_table_mut().enter_block();
    }

    pub fn exit_block(&mut self) -> Result<(), ScopeError> {
        self.active_table_mut().exit_block()
    }

    /// Pushes a call frame with an empty local table.
    pub fn enter_call(&mut self, function: F) -> Result<(), ScopeError> {
        if self.call_stack.len() >= self.max_call_depth {
            return Err(ScopeError::CallStackOverflow {
                max_depth: self.max_call_depth,
            });
        }

        self.call_stack.push(CallFrame {
            function,
            locals: DeclarationTable::new(),
        });
        tracing::trace!(depth = self.call_stack.len(), "entered call");
        Ok(())
    }

    pub fn exit_call(&mut self) -> Result<(), ScopeError> {
        self.call_stack.pop().ok_or(ScopeError::EmptyCallStack)?;
        tracing::trace!(depth = self.call_stack.len(), "left call");
        Ok(())
    }

    pub fn current_function(&self) -> Option<&F> {
        self.call_stack.last().map(|frame| &frame.function)
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }
}
