//! Hash-addressed, multi-pass symbol table (spec §3 "Namespace", §4.5).
//!
//! Open addressing with the Python-style probe recurrence
//! `next = (5*offs + (hash >>= 5) + 1) & mask`, guaranteed to visit every
//! slot of a power-of-two-sized table.

mod anon;
pub mod label;

use tracing::trace;

use crate::consts::{NAMESPACE_INITIAL_CAPACITY, NAMESPACE_MAX_LOAD_FACTOR};
use crate::error::ValueError;
use crate::object::Obj;

pub use anon::find_anonlabel2;
pub use label::Label;

/// A probe key: `(hash, strength, canonical-folded name)` (spec §3).
fn probe_next(hash: &mut u64, offs: u64, mask: u64) -> u64 {
    let next = (5u64.wrapping_mul(offs).wrapping_add(*hash).wrapping_add(1)) & mask;
    *hash >>= 5;
    next
}

/// A multi-pass, hash-addressed label table.
pub struct Namespace {
    slots: Vec<Option<Label>>,
    mask: u64,
    live_count: usize,
    pass: u32,
    fixeddig: bool,
    forward_marks: Vec<u32>,
    backward_marks: Vec<u32>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Builds an empty namespace at pass 1.
    pub fn new() -> Self {
        Self::with_capacity(NAMESPACE_INITIAL_CAPACITY)
    }

    /// Builds an empty namespace using `config.namespace_initial_capacity`.
    pub fn with_config(config: &crate::config::Config) -> Self {
        Self::with_capacity(config.namespace_initial_capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            mask: (capacity - 1) as u64,
            live_count: 0,
            pass: 1,
            fixeddig: false,
            forward_marks: Vec::new(),
            backward_marks: Vec::new(),
        }
    }

    pub fn pass(&self) -> u32 {
        self.pass
    }

    pub fn fixeddig(&self) -> bool {
        self.fixeddig
    }

    /// Advances to the next assembly pass, optionally marking convergence.
    /// Errors once `pass` exceeds `max_pass` (spec §7 `PassLimitExceeded`).
    pub fn advance_pass(&mut self, fixeddig: bool, max_pass: u32) -> Result<(), ValueError> {
        self.pass += 1;
        self.fixeddig = fixeddig;
        trace!(pass = self.pass, fixeddig, "namespace pass transition");
        if self.pass > max_pass {
            return Err(ValueError::PassLimitExceeded { pass: self.pass, max_pass });
        }
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn probe_slots(&self, hash: u64, strength: u32, folded: &str) -> ProbeIter<'_> {
        ProbeIter { ns: self, hash, strength, folded, offs: 0, remaining: self.capacity() }
    }

    /// Inserts or overwrites a label of the same `(hash, strength, folded
    /// name)` key, rebuilding the table first if the load factor target
    /// would be exceeded.
    pub fn insert(&mut self, label: Label) {
        if (self.live_count + 1) as f64 > self.capacity() as f64 * NAMESPACE_MAX_LOAD_FACTOR {
            self.rebuild(self.capacity() * 2);
        }
        let (hash, strength, folded) = (label.hash, label.strength, label.folded.clone());
        let slot = self
            .probe_slots(hash, strength, &folded)
            .find(|&i| match &self.slots[i] {
                None => true,
                Some(existing) => existing.hash == hash && existing.strength == strength && existing.folded.as_ref() == folded.as_ref(),
            })
            .expect("probe sequence visits every slot");
        if self.slots[slot].is_none() {
            self.live_count += 1;
        }
        self.slots[slot] = Some(label);
    }

    fn rebuild(&mut self, new_capacity: usize) {
        trace!(old_capacity = self.capacity(), new_capacity, "namespace rebuild");
        let old = std::mem::replace(&mut self.slots, (0..new_capacity).map(|_| None).collect());
        self.mask = (new_capacity - 1) as u64;
        self.live_count = 0;
        for label in old.into_iter().flatten() {
            self.insert(label);
        }
    }

    /// Looks up a label live in the current pass by `(hash, strength,
    /// folded name)`.
    pub fn lookup(&self, hash: u64, strength: u32, folded: &str) -> Option<&Label> {
        for i in self.probe_slots(hash, strength, folded) {
            match &self.slots[i] {
                None => return None,
                Some(label) if label.hash == hash && label.strength == strength && label.folded.as_ref() == folded => {
                    return label.is_live(self.pass, self.fixeddig).then_some(label);
                }
                Some(_) => continue,
            }
        }
        None
    }

    /// Member access (`obj.ident`, spec §4.5): returns the bound value and
    /// marks the label referenced; `None` during early passes, or an error
    /// once the namespace has reached its fixed point.
    pub fn member(&mut self, hash: u64, strength: u32, folded: &str, name: &str) -> Result<Option<Obj>, ValueError> {
        let resolved_past_fixpoint = self.fixeddig;
        for i in self.probe_slots(hash, strength, folded) {
            match &mut self.slots[i] {
                None => break,
                Some(label) if label.hash == hash && label.strength == strength && label.folded.as_ref() == folded => {
                    if label.is_live(self.pass, self.fixeddig) {
                        label.referenced = true;
                        return Ok(Some(label.value.clone()));
                    }
                    break;
                }
                Some(_) => continue,
            }
        }
        if resolved_past_fixpoint {
            Err(ValueError::NotDefined { name: name.to_string(), backward: None })
        } else {
            Ok(None)
        }
    }

    pub fn mark_forward_anon(&mut self, position: u32) {
        self.forward_marks.push(position);
    }

    pub fn mark_backward_anon(&mut self, position: u32) {
        self.backward_marks.push(position);
    }

    /// Mutual-subset equality: every live entry of `self` has a
    /// same-valued live entry in `other`, and vice versa (spec §4.5).
    pub fn same(&self, other: &Namespace, value_same: impl Fn(&Obj, &Obj) -> bool + Copy) -> bool {
        let live = |ns: &Namespace| -> Vec<&Label> {
            ns.slots.iter().flatten().filter(|l| l.is_live(ns.pass, ns.fixeddig)).collect()
        };
        let subset = |a: &[&Label], b_ns: &Namespace| {
            a.iter().all(|l| {
                b_ns.lookup(l.hash, l.strength, &l.folded)
                    .is_some_and(|other_label| value_same(&l.value, &other_label.value))
            })
        };
        let a = live(self);
        let b = live(other);
        subset(&a, other) && subset(&b, self)
    }
}

struct ProbeIter<'a> {
    ns: &'a Namespace,
    hash: u64,
    strength: u32,
    folded: &'a str,
    offs: u64,
    remaining: usize,
}

impl Iterator for ProbeIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let _ = (self.strength, self.folded); // part of the probe key, not the address function
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let slot = if self.offs == 0 {
            self.hash & self.ns.mask
        } else {
            probe_next(&mut self.hash, self.offs, self.ns.mask)
        };
        self.offs += 1;
        Some(slot as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::Int;
    use crate::object::Value;
    use std::rc::Rc;

    fn int_obj(v: i64) -> Obj {
        Rc::new(Value::Int(Int::from_i64(v)))
    }

    fn label(name: &str, strength: u32, constant: bool, defpass: u32, v: i64) -> Label {
        Label::new(name, strength, constant, defpass, int_obj(v))
    }

    #[test]
    fn insert_then_lookup_same_pass() {
        let mut ns = Namespace::new();
        let l = label("foo", 0, true, 1, 3);
        let (hash, strength, folded) = (l.hash, l.strength, l.folded.clone());
        ns.insert(l);
        let found = ns.lookup(hash, strength, &folded).unwrap();
        assert_eq!(found.value, int_obj(3));
    }

    #[test]
    fn scenario_s5_namespace_multipass() {
        let mut ns = Namespace::new();
        ns.insert(label("foo", 0, true, 1, 3));
        let l = Label::new("foo", 0, true, 1, int_obj(3));
        assert_eq!(ns.lookup(l.hash, 0, "foo").unwrap().value, int_obj(3));

        ns.advance_pass(false, 10).unwrap();
        ns.insert(label("foo", 0, true, 2, 4));
        assert_eq!(ns.lookup(l.hash, 0, "foo").unwrap().value, int_obj(4));

        ns.insert(label("foo", 1, true, 2, 99));
        assert_eq!(ns.lookup(l.hash, 0, "foo").unwrap().value, int_obj(4));
        assert_eq!(ns.lookup(l.hash, 1, "foo").unwrap().value, int_obj(99));
    }

    #[test]
    fn rebuild_preserves_all_entries() {
        let mut ns = Namespace::new();
        for i in 0..64 {
            ns.insert(label(&format!("sym{i}"), 0, true, 1, i as i64));
        }
        for i in 0..64 {
            let l = Label::new(&format!("sym{i}"), 0, true, 1, int_obj(i as i64));
            assert_eq!(ns.lookup(l.hash, 0, &l.folded).unwrap().value, int_obj(i as i64));
        }
    }

    #[test]
    fn pass_limit_exceeded_errors() {
        let mut ns = Namespace::new();
        assert!(ns.advance_pass(false, 1).is_err());
    }

    #[test]
    fn namespace_equality_is_reflexive() {
        let mut ns = Namespace::new();
        ns.insert(label("foo", 0, true, 1, 3));
        assert!(ns.same(&ns, |a, b| a == b));
    }
}
