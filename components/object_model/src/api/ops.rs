//! Generic operations on stack slots.

use crate::dispatch::{self, Foreach};
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

impl Thread {
    fn abs(&self, slot: isize) -> RuntimeResult<usize> {
        self.stack().fake_to_abs(slot)
    }

    fn at(&self, abs: usize) -> Value {
        self.stack().get(abs).clone()
    }

    fn replace_top(&mut self, value: Value) -> RuntimeResult<isize> {
        let top = self.abs(-1)?;
        self.stack_mut().set(top, value);
        Ok(self.top_index())
    }

    /// Replaces the key on top of the stack with `container[key]`.
    pub fn idx(&mut self, container: isize) -> RuntimeResult<isize> {
        self.check_num_params("idx", 1)?;
        let container = self.at(self.abs(container)?);
        let key = self.param(-1)?;
        let value = dispatch::index_get(self, &container, &key)?;
        self.replace_top(value)
    }

    /// Performs `container[key] = value` with key and value on top of the
    /// stack, then pops both.
    pub fn idxa(&mut self, container: isize) -> RuntimeResult<()> {
        self.check_num_params("idxa", 2)?;
        let container = self.at(self.abs(container)?);
        let key = self.param(-2)?;
        let value = self.param(-1)?;
        dispatch::index_set(self, &container, &key, value)?;
        self.pop(2)
    }

    /// Pushes `container[index]`.
    pub fn idxi(&mut self, container: isize, index: i64) -> RuntimeResult<isize> {
        let container = self.abs_index(container)?;
        self.push_int(index);
        self.idx(container)
    }

    /// Performs `container[index] = value` with the value on top of the
    /// stack, then pops it.
    pub fn idxai(&mut self, container: isize, index: i64) -> RuntimeResult<()> {
        self.check_num_params("idxai", 1)?;
        let container = self.abs_index(container)?;
        self.push_int(index);
        self.swap_top()?;
        self.idxa(container)
    }

    /// Replaces the bounds `lo, hi` on top of the stack with
    /// `container[lo .. hi]`.
    pub fn slice(&mut self, container: isize) -> RuntimeResult<isize> {
        self.check_num_params("slice", 2)?;
        let container = self.at(self.abs(container)?);
        let lo = self.param(-2)?;
        let hi = self.param(-1)?;
        let value = dispatch::slice_get(self, &container, &lo, &hi)?;
        self.pop(1)?;
        self.replace_top(value)
    }

    /// Performs `container[lo .. hi] = value` with `lo, hi, value` on top of
    /// the stack, then pops them.
    pub fn slicea(&mut self, container: isize) -> RuntimeResult<()> {
        self.check_num_params("slicea", 3)?;
        let container = self.at(self.abs(container)?);
        let lo = self.param(-3)?;
        let hi = self.param(-2)?;
        let value = self.param(-1)?;
        dispatch::slice_set(self, &container, &lo, &hi, value)?;
        self.pop(3)
    }

    fn field_impl(&mut self, container: isize, name: &str, raw: bool) -> RuntimeResult<isize> {
        let container = self.at(self.abs(container)?);
        let name: Rc<str> = Rc::from(name);
        self.push_value(Value::String(name.clone()));
        let value = dispatch::field_get(self, &container, &name, raw)?;
        self.replace_top(value)
    }

    fn field_stk_impl(&mut self, func: &str, container: isize, raw: bool) -> RuntimeResult<isize> {
        self.check_num_params(func, 1)?;
        let name = self.check_string_param(func, -1, "field name")?;
        let container = self.at(self.abs(container)?);
        let value = dispatch::field_get(self, &container, &name, raw)?;
        self.replace_top(value)
    }

    fn fielda_impl(&mut self, func: &str, container: isize, name: &str, raw: bool) -> RuntimeResult<()> {
        self.check_num_params(func, 1)?;
        let container = self.abs_index(container)?;
        self.push_string(name);
        self.swap_top()?;
        self.fielda_stk_impl(func, container, raw)
    }

    fn fielda_stk_impl(&mut self, func: &str, container: isize, raw: bool) -> RuntimeResult<()> {
        self.check_num_params(func, 2)?;
        let name = self.check_string_param(func, -2, "field name")?;
        let container = self.at(self.abs(container)?);
        let value = self.param(-1)?;
        dispatch::field_set(self, &container, &name, value, raw)?;
        self.pop(2)
    }

    /// Pushes the field `name` of `container`.
    pub fn field(&mut self, container: isize, name: &str) -> RuntimeResult<isize> {
        self.field_impl(container, name, false)
    }

    /// Replaces the field name on top of the stack with that field of
    /// `container`.
    pub fn field_stk(&mut self, container: isize) -> RuntimeResult<isize> {
        self.field_stk_impl("field_stk", container, false)
    }

    /// Assigns the value on top of the stack to the field `name` of
    /// `container`, then pops it.
    pub fn fielda(&mut self, container: isize, name: &str) -> RuntimeResult<()> {
        self.fielda_impl("fielda", container, name, false)
    }

    /// Assigns with the field name and value on top of the stack, then pops
    /// both.
    pub fn fielda_stk(&mut self, container: isize) -> RuntimeResult<()> {
        self.fielda_stk_impl("fielda_stk", container, false)
    }

    /// Like [`Thread::field`], without consulting `opField`.
    pub fn raw_field(&mut self, container: isize, name: &str) -> RuntimeResult<isize> {
        self.field_impl(container, name, true)
    }

    /// Like [`Thread::field_stk`], without consulting `opField`.
    pub fn raw_field_stk(&mut self, container: isize) -> RuntimeResult<isize> {
        self.field_stk_impl("raw_field_stk", container, true)
    }

    /// Like [`Thread::fielda`], without consulting `opFieldAssign`.
    pub fn raw_fielda(&mut self, container: isize, name: &str) -> RuntimeResult<()> {
        self.fielda_impl("raw_fielda", container, name, true)
    }

    /// Like [`Thread::fielda_stk`], without consulting `opFieldAssign`.
    pub fn raw_fielda_stk(&mut self, container: isize) -> RuntimeResult<()> {
        self.fielda_stk_impl("raw_fielda_stk", container, true)
    }

    /// Pushes the hidden field `name` of a class or instance.
    pub fn hfield(&mut self, container: isize, name: &str) -> RuntimeResult<isize> {
        let container = self.abs_index(container)?;
        self.push_string(name);
        self.hfield_stk(container)
    }

    /// Replaces the hidden field name on top of the stack with that hidden
    /// field of `container`.
    pub fn hfield_stk(&mut self, container: isize) -> RuntimeResult<isize> {
        self.check_num_params("hfield_stk", 1)?;
        let name = self.check_string_param("hfield_stk", -1, "hidden field name")?;
        let object = self.at(self.abs(container)?);
        if !matches!(object, Value::Class(_) | Value::Instance(_)) {
            return Err(self.param_type_error("hfield_stk", container, "container", "class|instance"));
        }
        let value = dispatch::hidden_field_get(&object, &name)?;
        self.replace_top(value)
    }

    /// Assigns the value on top of the stack to the hidden field `name`,
    /// then pops it.
    pub fn hfielda(&mut self, container: isize, name: &str) -> RuntimeResult<()> {
        self.check_num_params("hfielda", 1)?;
        let container = self.abs_index(container)?;
        self.push_string(name);
        self.swap_top()?;
        self.hfielda_stk(container)
    }

    /// Assigns with the hidden field name and value on top of the stack, then
    /// pops both.
    pub fn hfielda_stk(&mut self, container: isize) -> RuntimeResult<()> {
        self.check_num_params("hfielda_stk", 2)?;
        let name = self.check_string_param("hfielda_stk", -2, "hidden field name")?;
        let object = self.at(self.abs(container)?);
        if !matches!(object, Value::Class(_) | Value::Instance(_)) {
            return Err(self.param_type_error("hfielda_stk", container, "container", "class|instance"));
        }
        let value = self.param(-1)?;
        dispatch::hidden_field_set(self, &object, &name, value)?;
        self.pop(2)
    }

    /// Pushes the length of the value in `slot`.
    pub fn push_len(&mut self, slot: isize) -> RuntimeResult<isize> {
        let value = self.at(self.abs(slot)?);
        let len = dispatch::length_get_value(self, &value)?;
        Ok(self.push_value(len))
    }

    /// Returns the length of the value in `slot`, which must be an int.
    pub fn len(&mut self, slot: isize) -> RuntimeResult<i64> {
        let value = self.at(self.abs(slot)?);
        dispatch::length_get(self, &value).map_err(|e| RuntimeError {
            message: format!("len - {}", e.message),
            ..e
        })
    }

    /// Sets the length of the value in `slot` to the value on top of the
    /// stack, then pops it.
    pub fn lena(&mut self, slot: isize) -> RuntimeResult<()> {
        self.check_num_params("lena", 1)?;
        let value = self.at(self.abs(slot)?);
        let length = self.param(-1)?;
        dispatch::length_set(self, &value, length)?;
        self.pop_top()
    }

    /// Sets the length of the value in `slot`.
    pub fn lenai(&mut self, slot: isize, length: i64) -> RuntimeResult<()> {
        let slot = self.abs_index(slot)?;
        self.push_int(length);
        self.lena(slot)
    }

    /// Replaces the `n` topmost values with their concatenation.
    pub fn cat(&mut self, n: usize) -> RuntimeResult<isize> {
        if n == 0 {
            return Err(RuntimeError::usage("cat - must concatenate at least one value"));
        }
        self.check_num_params("cat", n)?;
        let first = self.abs(-(n as isize))?;
        let values = self.stack().values_from(first).to_vec();

        let mut values = values.into_iter();
        let mut result = values.next().unwrap_or(Value::Null);
        for value in values {
            result = dispatch::concatenate(self, &result, &value)?;
        }

        self.pop(n - 1)?;
        self.replace_top(result)
    }

    /// Appends the `n` topmost values to the value in `dest`, then pops them.
    pub fn cateq(&mut self, dest: isize, n: usize) -> RuntimeResult<()> {
        if n == 0 {
            return Err(RuntimeError::usage("cateq - must append at least one value"));
        }
        self.check_num_params("cateq", n)?;
        let dest = self.abs(dest)?;
        let first = self.abs(-(n as isize))?;
        let values = self.stack().values_from(first).to_vec();

        for value in values {
            let target = self.at(dest);
            if let Some(result) = dispatch::concatenate_assign(self, &target, &value)? {
                self.stack_mut().set(dest, result);
            }
        }

        self.pop(n)
    }

    /// Whether the container in `container` includes the value in `item`.
    pub fn is_in(&mut self, item: isize, container: isize) -> RuntimeResult<bool> {
        let item = self.at(self.abs(item)?);
        let container = self.at(self.abs(container)?);
        dispatch::contains(self, &item, &container)
    }

    /// Three-way comparison of two slots.
    pub fn cmp(&mut self, a: isize, b: isize) -> RuntimeResult<i64> {
        let a = self.at(self.abs(a)?);
        let b = self.at(self.abs(b)?);
        dispatch::compare(self, &a, &b)
    }

    /// Equality of two slots.
    pub fn equals(&mut self, a: isize, b: isize) -> RuntimeResult<bool> {
        let a = self.at(self.abs(a)?);
        let b = self.at(self.abs(b)?);
        dispatch::equals(self, &a, &b)
    }

    /// Identity of two slots.
    pub fn is(&self, a: isize, b: isize) -> RuntimeResult<bool> {
        let a = self.at(self.abs(a)?);
        let b = self.at(self.abs(b)?);
        Ok(dispatch::identity_equals(&a, &b))
    }

    /// Pushes the string form of the value in `slot`.
    pub fn push_to_string(&mut self, slot: isize) -> RuntimeResult<isize> {
        let value = self.at(self.abs(slot)?);
        let s = dispatch::to_display_string(self, &value, false)?;
        Ok(self.push_value(Value::String(s)))
    }

    /// Pushes the structural string form of the value in `slot`.
    pub fn push_to_string_raw(&mut self, slot: isize) -> RuntimeResult<isize> {
        let value = self.at(self.abs(slot)?);
        let s = dispatch::to_display_string(self, &value, true)?;
        Ok(self.push_value(Value::String(s)))
    }

    /// Removes the key on top of the stack from the table or namespace in
    /// `obj`, then pops the key.
    pub fn remove_key(&mut self, obj: isize) -> RuntimeResult<()> {
        self.check_num_params("remove_key", 1)?;
        let container = self.at(self.abs(obj)?);
        match container {
            Value::Table(_) => {}
            Value::Namespace(_) => {
                self.check_string_param("remove_key", -1, "key")?;
            }
            _ => return Err(self.param_type_error("remove_key", obj, "obj", "table|namespace")),
        }
        let key = self.param(-1)?;
        dispatch::remove_key(self, &container, &key).map_err(|e| RuntimeError {
            message: format!("remove_key - {}", e.message),
            ..e
        })?;
        self.pop_top()
    }

    /// Calls the value in `slot` with `this` and the arguments above it.
    ///
    /// Returns the number of results, which replace the callee and
    /// everything above it.
    pub fn call(&mut self, slot: isize, expected: Option<usize>) -> RuntimeResult<usize> {
        let slot = self.abs(slot)?;
        self.call_abs(slot, expected)
    }

    /// Calls the method `name` of the value in `slot` with the arguments
    /// above it.
    pub fn method_call(&mut self, slot: isize, name: &str, expected: Option<usize>) -> RuntimeResult<usize> {
        let slot = self.abs(slot)?;
        dispatch::call_method(self, slot, &Rc::from(name), expected)
    }

    /// Starts a `foreach` loop over the value in `container`.
    pub fn foreach_begin(&mut self, container: isize) -> RuntimeResult<Foreach> {
        let container = self.at(self.abs(container)?);
        dispatch::foreach_begin(self, &container, Value::Null)
    }

    /// Advances a `foreach` loop, pushing the index and value. Returns
    /// false, pushing nothing, when the loop is over.
    pub fn foreach_next(&mut self, state: &mut Foreach) -> RuntimeResult<bool> {
        match state.next(self)? {
            Some((index, value)) => {
                self.push_value(index);
                self.push_value(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
