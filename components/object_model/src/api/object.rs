//! Creating objects, globals and class members.

use crate::alloc;
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

impl Thread {
    /// Pushes a new, empty table.
    pub fn new_table(&mut self) -> isize {
        let table = self.with_mem(alloc::new_table);
        self.push_value(Value::Table(table))
    }

    /// Pushes a new array of `len` nulls.
    pub fn new_array(&mut self, len: usize) -> isize {
        let array = self.with_mem(|mem| alloc::new_array(mem, len));
        self.push_value(Value::Array(array))
    }

    /// Pushes a new namespace whose parent is the global namespace.
    pub fn new_namespace(&mut self, name: &str) -> isize {
        let parent = self.vm().globals().clone();
        let ns = self.with_mem(|mem| alloc::new_namespace(mem, Rc::from(name), Some(parent)));
        self.push_value(Value::Namespace(ns))
    }

    /// Pushes a new namespace whose parent is the namespace in `parent`.
    pub fn new_namespace_with_parent(&mut self, parent: isize, name: &str) -> RuntimeResult<isize> {
        let parent = match self.param(parent)? {
            Value::Namespace(ns) => ns,
            _ => {
                return Err(self.param_type_error(
                    "new_namespace_with_parent",
                    parent,
                    "parent",
                    "namespace",
                ))
            }
        };
        let ns = self.with_mem(|mem| alloc::new_namespace(mem, Rc::from(name), Some(parent)));
        Ok(self.push_value(Value::Namespace(ns)))
    }

    /// Pushes a new class, derived from the class in `base` if given.
    pub fn new_class(&mut self, name: &str, base: Option<isize>) -> RuntimeResult<isize> {
        let base = match base {
            Some(slot) => Some(self.check_class_param("new_class", slot, "base")?),
            None => None,
        };
        let class = self.with_mem(|mem| alloc::new_class(mem, Rc::from(name), base));
        Ok(self.push_value(Value::Class(class)))
    }

    /// Pushes a new native function.
    pub fn new_function<F>(&mut self, name: &str, native: F) -> isize
    where
        F: Fn(&mut Thread, usize) -> RuntimeResult<usize> + 'static,
    {
        let func = self.with_mem(|mem| alloc::new_function(mem, Rc::from(name), Rc::new(native)));
        self.push_value(Value::Function(func))
    }

    /// Pushes the global namespace.
    pub fn push_globals(&mut self) -> isize {
        let globals = self.vm().globals().clone();
        self.push_value(Value::Namespace(globals))
    }

    /// Pops the topmost value and binds it to a new global `name`.
    pub fn new_global(&mut self, name: &str) -> RuntimeResult<()> {
        self.check_num_params("new_global", 1)?;
        let globals = self.vm().globals().clone();
        if globals.borrow().contains(name) {
            return Err(RuntimeError::field(format!(
                "new_global - attempting to create global '{}' that already exists",
                name
            )));
        }
        let value = self.stack_mut().pop_value()?;
        self.with_mem(|mem| globals.borrow_mut().set(mem, Rc::from(name), value));
        Ok(())
    }

    /// Pushes the value of the global `name`.
    pub fn get_global(&mut self, name: &str) -> RuntimeResult<isize> {
        let value = self.vm().globals().borrow().get(name).cloned();
        match value {
            Some(value) => Ok(self.push_value(value)),
            None => Err(RuntimeError::field(format!(
                "get_global - attempting to get nonexistent global '{}'",
                name
            ))),
        }
    }

    /// Pops the topmost value and adds it to the class in `class` as field
    /// `name`.
    pub fn add_field(&mut self, class: isize, name: &str) -> RuntimeResult<()> {
        self.add_member("add_field", class, name, MemberKind::Field)
    }

    /// Pops the topmost value and adds it to the class in `class` as method
    /// `name`.
    pub fn add_method(&mut self, class: isize, name: &str) -> RuntimeResult<()> {
        self.add_member("add_method", class, name, MemberKind::Method)
    }

    /// Pops the topmost value and adds it to the class in `class` as hidden
    /// field `name`.
    pub fn add_hidden_field(&mut self, class: isize, name: &str) -> RuntimeResult<()> {
        self.add_member("add_hidden_field", class, name, MemberKind::Hidden)
    }

    fn add_member(&mut self, func: &str, class: isize, name: &str, kind: MemberKind) -> RuntimeResult<()> {
        self.check_num_params(func, 1)?;
        let class = self.check_class_param(func, class, "class")?;
        let value = self.param(-1)?;
        let name: Rc<str> = Rc::from(name);

        self.with_mem(|mem| {
            let mut class = class.borrow_mut();
            match kind {
                MemberKind::Field => class.add_field(mem, name, value),
                MemberKind::Method => class.add_method(mem, name, value),
                MemberKind::Hidden => class.add_hidden_field(mem, name, value),
            }
        })?;
        self.pop_top()
    }
}

#[derive(Clone, Copy)]
enum MemberKind {
    Field,
    Method,
    Hidden,
}
