//! List value kind (spec §3 "Supplemented value kinds: List"): an
//! ordered, reference-counted tuple/array literal.

use crate::object::Obj;

/// An ordered list of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue(pub Vec<Obj>);

impl ListValue {
    pub fn new(items: Vec<Obj>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn concat(&self, other: &ListValue) -> ListValue {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend(self.0.iter().cloned());
        out.extend(other.0.iter().cloned());
        ListValue(out)
    }

    pub fn repeat(&self, n: usize) -> ListValue {
        let mut out = Vec::with_capacity(self.len() * n);
        for _ in 0..n {
            out.extend(self.0.iter().cloned());
        }
        ListValue(out)
    }

    /// Gathers elements at the given (possibly negative, Python-style)
    /// indices.
    pub fn gather(&self, indices: &[i64]) -> ListValue {
        let len = self.0.len() as i64;
        let mut out = Vec::with_capacity(indices.len());
        for &i in indices {
            let idx = if i < 0 { i + len } else { i };
            if idx >= 0 && idx < len {
                out.push(self.0[idx as usize].clone());
            }
        }
        ListValue(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Value;
    use std::rc::Rc;

    fn int_obj(v: i64) -> Obj {
        Rc::new(Value::Int(crate::integer::Int::from_i64(v)))
    }

    #[test]
    fn concat_preserves_order() {
        let a = ListValue::new(vec![int_obj(1), int_obj(2)]);
        let b = ListValue::new(vec![int_obj(3)]);
        assert_eq!(a.concat(&b).len(), 3);
    }

    #[test]
    fn gather_supports_negative_indices() {
        let a = ListValue::new(vec![int_obj(1), int_obj(2), int_obj(3)]);
        let got = a.gather(&[-1, 0]);
        assert_eq!(got.len(), 2);
    }
}
