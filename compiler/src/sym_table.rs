use std::collections::HashMap;

use crate::{
    error::{CompileError, Result},
    vm_writer::Segment,
};

/// Name the implicit receiver of a method is registered under. `this` is a
/// keyword, so no user declaration can collide with it.
pub const RECEIVER: &str = "this";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Static,
    Field,
    Argument,
    Local,
}

impl From<VarKind> for Segment {
    fn from(kind: VarKind) -> Self {
        match kind {
            VarKind::Static => Segment::Static,
            VarKind::Field => Segment::This,
            VarKind::Argument => Segment::Argument,
            VarKind::Local => Segment::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: String,
    pub kind: VarKind,
    pub index: u32,
}

impl Symbol {
    pub fn segment(&self) -> Segment {
        self.kind.into()
    }
}

/// One scope of the two-level chain. The class table has no parent; a
/// subroutine table borrows the class table it was started from.
#[derive(Debug)]
pub struct SymbolTable<'p> {
    class_name: String,
    parent: Option<&'p SymbolTable<'p>>,
    entries: HashMap<String, Symbol>,
    counts: HashMap<VarKind, u32>,
}

impl SymbolTable<'static> {
    pub fn new(class_name: &str) -> Self {
        SymbolTable {
            class_name: class_name.to_string(),
            parent: None,
            entries: HashMap::new(),
            counts: HashMap::new(),
        }
    }
}

impl<'p> SymbolTable<'p> {
    /// Opens a subroutine scope chained to this one. A method gets its
    /// receiver as argument 0, ahead of any declared parameter.
    pub fn start_subroutine(&self, is_method: bool) -> SymbolTable<'_> {
        let mut table = SymbolTable {
            class_name: self.class_name.clone(),
            parent: Some(self),
            entries: HashMap::new(),
            counts: HashMap::new(),
        };
        if is_method {
            table.insert(RECEIVER, &self.class_name, VarKind::Argument);
        }
        return table;
    }

    /// Adds `name` at the next free offset for `kind` in this scope.
    pub fn define(&mut self, name: &str, ty: &str, kind: VarKind) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(CompileError::DuplicateIdentifier {
                name: name.to_string(),
            });
        }
        self.insert(name, ty, kind);
        return Ok(());
    }

    fn insert(&mut self, name: &str, ty: &str, kind: VarKind) {
        let counter = self.counts.entry(kind).or_insert(0);
        let symbol = Symbol {
            name: name.to_string(),
            ty: ty.to_string(),
            kind,
            index: *counter,
        };
        *counter += 1;
        self.entries.insert(name.to_string(), symbol);
    }

    /// Number of `kind` symbols declared in this scope only.
    pub fn var_count(&self, kind: VarKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of fields of the class, from whichever scope is asked.
    pub fn field_count(&self) -> u32 {
        match self.parent {
            Some(parent) => parent.field_count(),
            None => self.var_count(VarKind::Field),
        }
    }

    /// Innermost declaration of `name`, or `None`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.entries
            .get(name)
            .or_else(|| self.parent.and_then(|p| p.lookup(name)))
    }

    pub fn resolve(&self, name: &str) -> Result<&Symbol> {
        self.lookup(name)
            .ok_or_else(|| CompileError::UndefinedIdentifier {
                name: name.to_string(),
            })
    }
}
