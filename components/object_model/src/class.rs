//! Class templates.
//!
//! A class owns three layouts:
//! - fields, whose values are the defaults copied into every instance (a
//!   derived class starts with a copy of its base's fields)
//! - methods, which are looked up along the base-class chain
//! - hidden fields, implementation-private slots invisible to ordinary field
//!   access and never created on demand
//!
//! A class is frozen when its first instance is created. After that its
//! layouts never change, so instance storage stays in sync with them.

use crate::barrier::{record_write, write_barrier};
use crate::layout::SlotLayout;
use crate::value::{ClassRef, Value};
use core_types::{GcId, RuntimeError, RuntimeResult};
use memory_manager::MemoryManager;
use std::rc::Rc;

/// Location of a member inside a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSlot {
    /// Offset into the field layout
    Field(usize),
    /// Offset into the method layout
    Method(usize),
    /// Offset into the hidden-field layout
    Hidden(usize),
}

/// A class template.
#[derive(Debug)]
pub struct Class {
    id: GcId,
    name: Rc<str>,
    base: Option<ClassRef>,
    fields: SlotLayout,
    field_values: Vec<Value>,
    methods: SlotLayout,
    method_values: Vec<Value>,
    hidden: SlotLayout,
    hidden_values: Vec<Value>,
    frozen: bool,
}

impl Class {
    /// Creates a class, optionally derived from `base`.
    ///
    /// The base's fields and their current defaults are copied into the new
    /// class. Methods stay with the base and are found by walking the chain.
    pub fn new(mem: &mut dyn MemoryManager, id: GcId, name: Rc<str>, base: Option<ClassRef>) -> Self {
        let (fields, field_values) = match &base {
            Some(base) => {
                mem.write_barrier(id, base.id());
                let base = base.borrow();
                (base.fields.clone(), base.field_values.clone())
            }
            None => (SlotLayout::new(), Vec::new()),
        };

        for value in &field_values {
            record_write(mem, id, value);
        }

        Class {
            id,
            name,
            base,
            fields,
            field_values,
            methods: SlotLayout::new(),
            method_values: Vec::new(),
            hidden: SlotLayout::new(),
            hidden_values: Vec::new(),
            frozen: false,
        }
    }

    /// Returns the heap identity of this class.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Returns the class name.
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    /// Returns the base class, if any.
    pub fn base(&self) -> Option<&ClassRef> {
        self.base.as_ref()
    }

    /// Returns true once the layout can no longer change.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freezes the layout.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn check_frozen(&self, what: &str, name: &str) -> RuntimeResult<()> {
        if self.frozen {
            return Err(RuntimeError::state(format!(
                "Attempting to add {} '{}' to class '{}' which is frozen",
                what, name, self.name
            )));
        }
        Ok(())
    }

    fn check_unique_member(&self, what: &str, name: &str) -> RuntimeResult<()> {
        if self.get_member(name).is_some() {
            return Err(RuntimeError::field(format!(
                "Attempting to add {} '{}' which already exists to class '{}'",
                what, name, self.name
            )));
        }
        Ok(())
    }

    /// Declares a field with a default value.
    pub fn add_field(
        &mut self,
        mem: &mut dyn MemoryManager,
        name: Rc<str>,
        default: Value,
    ) -> RuntimeResult<()> {
        self.check_frozen("a field", &name)?;
        self.check_unique_member("a field", &name)?;
        record_write(mem, self.id, &default);
        self.fields.add(name);
        self.field_values.push(default);
        Ok(())
    }

    /// Declares a method.
    pub fn add_method(
        &mut self,
        mem: &mut dyn MemoryManager,
        name: Rc<str>,
        method: Value,
    ) -> RuntimeResult<()> {
        self.check_frozen("a method", &name)?;
        self.check_unique_member("a method", &name)?;
        record_write(mem, self.id, &method);
        self.methods.add(name);
        self.method_values.push(method);
        Ok(())
    }

    /// Declares a hidden field with a default value.
    pub fn add_hidden_field(
        &mut self,
        mem: &mut dyn MemoryManager,
        name: Rc<str>,
        default: Value,
    ) -> RuntimeResult<()> {
        self.check_frozen("a hidden field", &name)?;
        if self.hidden.lookup(&name).is_some() {
            return Err(RuntimeError::field(format!(
                "Attempting to add a hidden field '{}' which already exists to class '{}'",
                name, self.name
            )));
        }
        record_write(mem, self.id, &default);
        self.hidden.add(name);
        self.hidden_values.push(default);
        Ok(())
    }

    /// Looks up a field declared on (or inherited by) this class.
    pub fn get_field(&self, name: &str) -> Option<MemberSlot> {
        self.fields.lookup(name).map(MemberSlot::Field)
    }

    /// Looks up a method declared directly on this class.
    pub fn get_method(&self, name: &str) -> Option<MemberSlot> {
        self.methods.lookup(name).map(MemberSlot::Method)
    }

    /// Looks up a field, then an own method.
    pub fn get_member(&self, name: &str) -> Option<MemberSlot> {
        self.get_field(name).or_else(|| self.get_method(name))
    }

    /// Looks up a hidden field declared on this class.
    pub fn get_hidden_field(&self, name: &str) -> Option<MemberSlot> {
        self.hidden.lookup(name).map(MemberSlot::Hidden)
    }

    /// Returns the value stored in a member slot.
    pub fn member(&self, slot: MemberSlot) -> &Value {
        match slot {
            MemberSlot::Field(i) => &self.field_values[i],
            MemberSlot::Method(i) => &self.method_values[i],
            MemberSlot::Hidden(i) => &self.hidden_values[i],
        }
    }

    /// Overwrites the value stored in a member slot.
    pub fn set_member(&mut self, mem: &mut dyn MemoryManager, slot: MemberSlot, value: Value) {
        let target = match slot {
            MemberSlot::Field(i) => &mut self.field_values[i],
            MemberSlot::Method(i) => &mut self.method_values[i],
            MemberSlot::Hidden(i) => &mut self.hidden_values[i],
        };
        write_barrier(mem, self.id, target, value);
    }

    /// Returns the field layout.
    pub fn field_layout(&self) -> &SlotLayout {
        &self.fields
    }

    /// Returns the field defaults, in layout order.
    pub fn field_defaults(&self) -> &[Value] {
        &self.field_values
    }

    /// Returns the hidden-field layout.
    pub fn hidden_layout(&self) -> &SlotLayout {
        &self.hidden
    }

    /// Returns the hidden-field defaults, in layout order.
    pub fn hidden_defaults(&self) -> &[Value] {
        &self.hidden_values
    }
}

/// Finds a method by walking the class chain from most to least derived.
pub fn find_method(class: &ClassRef, name: &str) -> Option<Value> {
    let mut next = Some(class.clone());

    while let Some(current) = next {
        let current = current.borrow();
        if let Some(slot) = current.get_method(name) {
            return Some(current.member(slot).clone());
        }
        next = current.base.clone();
    }

    None
}

/// Finds a member accessible through a class value: a field, then a method
/// anywhere along the chain.
pub fn lookup_member(class: &ClassRef, name: &str) -> Option<Value> {
    let field = {
        let c = class.borrow();
        c.get_field(name).map(|slot| c.member(slot).clone())
    };
    field.or_else(|| find_method(class, name))
}
