//! Class instances.

use crate::barrier::{record_write, write_barrier};
use crate::value::{ClassRef, Value};
use core_types::GcId;
use memory_manager::MemoryManager;
use std::rc::Rc;

/// Location of a field inside an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    /// Offset into the class's field layout
    Field(usize),
    /// Offset into the class's hidden-field layout
    Hidden(usize),
}

/// An object created from a class.
///
/// Field storage mirrors the layouts of the (frozen) class, so a field's
/// offset in the class is also its offset here.
#[derive(Debug)]
pub struct Instance {
    id: GcId,
    class: ClassRef,
    fields: Vec<Value>,
    hidden: Vec<Value>,
}

impl Instance {
    /// Creates an instance of `class`, freezing the class.
    ///
    /// Fields and hidden fields start out as copies of the class defaults.
    pub fn new(mem: &mut dyn MemoryManager, id: GcId, class: &ClassRef) -> Self {
        let (fields, hidden) = {
            let mut c = class.borrow_mut();
            c.freeze();
            (c.field_defaults().to_vec(), c.hidden_defaults().to_vec())
        };

        mem.write_barrier(id, class.id());
        for value in fields.iter().chain(hidden.iter()) {
            record_write(mem, id, value);
        }

        Instance {
            id,
            class: class.clone(),
            fields,
            hidden,
        }
    }

    /// Returns the heap identity of this instance.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Returns the class this instance was created from.
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// Returns the name of the instance's class.
    pub fn class_name(&self) -> Rc<str> {
        self.class.borrow().name().clone()
    }

    /// Looks up a field by name.
    pub fn get_field(&self, name: &str) -> Option<FieldSlot> {
        self.class
            .borrow()
            .field_layout()
            .lookup(name)
            .map(FieldSlot::Field)
    }

    /// Looks up a hidden field by name.
    pub fn get_hidden_field(&self, name: &str) -> Option<FieldSlot> {
        self.class
            .borrow()
            .hidden_layout()
            .lookup(name)
            .map(FieldSlot::Hidden)
    }

    /// Returns the value stored in a field slot.
    pub fn field(&self, slot: FieldSlot) -> &Value {
        match slot {
            FieldSlot::Field(i) => &self.fields[i],
            FieldSlot::Hidden(i) => &self.hidden[i],
        }
    }

    /// Overwrites the value stored in a field slot.
    pub fn set_field(&mut self, mem: &mut dyn MemoryManager, slot: FieldSlot, value: Value) {
        let target = match slot {
            FieldSlot::Field(i) => &mut self.fields[i],
            FieldSlot::Hidden(i) => &mut self.hidden[i],
        };
        write_barrier(mem, self.id, target, value);
    }

    /// Iterates over `(name, value)` pairs of the ordinary fields.
    pub fn fields(&self) -> Vec<(Rc<str>, Value)> {
        let class = self.class.borrow();
        class
            .field_layout()
            .iter()
            .map(|slot| (slot.name.clone(), self.fields[slot.offset].clone()))
            .collect()
    }
}
