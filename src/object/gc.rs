//! Three-phase mark/sweep cycle collector (spec §4.6).
//!
//! Reference counting alone cannot collect cycles that arise through
//! namespaces whose code symbols reference them back. Phase one
//! (decrement) subtracts every in-batch edge from each referent's strong
//! count, leaving each root with a residual count that reflects only
//! references held from *outside* the batch. Phase two (restore) treats
//! every root whose residual count is still positive as alive — it is
//! reachable from something the collector didn't see — and walks forward
//! from it, marking everything it reaches alive too (a root one hop from
//! an external holder is just as alive as the holder itself). Phase three
//! (sweep) collects whatever was never marked. Marking uses a side
//! `Cell<bool>` in place of the source's stolen high bit (`Rc` has no
//! spare bit to steal).

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use super::Obj;

/// A root set participating in cycle collection. A node's `references`
/// closure yields the other roots it points to (e.g. a code symbol's
/// namespace, a namespace's bound code-symbol values).
pub struct Root {
    pub value: Obj,
    pub visited: Cell<bool>,
}

impl Root {
    pub fn new(value: Obj) -> Self {
        Self { value, visited: Cell::new(false) }
    }
}

/// Runs the three phases over `roots`, calling `references` to enumerate
/// each root's outgoing edges by index into `roots`. Returns the indices
/// collected in the sweep phase.
pub fn collect(roots: &[Root], references: impl Fn(&Obj) -> Vec<usize>) -> Vec<usize> {
    trace!(phase = "decrement", nodes = roots.len(), "gc phase start");
    // Signed so a node referenced only from inside the batch, more times
    // than its strong count (a bare cycle with no external holder), can go
    // negative rather than being clamped at zero and losing information.
    let mut external_refs: Vec<i64> = roots.iter().map(|r| Rc::strong_count(&r.value) as i64).collect();
    for root in roots.iter() {
        for j in references(&root.value) {
            external_refs[j] -= 1;
        }
    }

    trace!(phase = "restore", "gc phase start");
    // A root whose count is still positive after every in-batch edge was
    // subtracted is held from outside the batch and is therefore alive;
    // everything reachable from it is alive too, regardless of what its
    // own residual count says.
    for i in 0..roots.len() {
        if external_refs[i] > 0 {
            mark(roots, i, &references);
        }
    }

    trace!(phase = "sweep", "gc phase start");
    let collected: Vec<usize> = (0..roots.len()).filter(|&i| !roots[i].visited.get()).collect();

    trace!(nodes_visited = roots.iter().filter(|r| r.visited.get()).count(), collected = collected.len(), "gc complete");
    collected
}

fn mark(roots: &[Root], i: usize, references: &impl Fn(&Obj) -> Vec<usize>) {
    if roots[i].visited.replace(true) {
        return;
    }
    for j in references(&roots[i].value) {
        mark(roots, j, references);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::Int;
    use crate::object::Value;

    #[test]
    fn acyclic_roots_are_not_collected_when_externally_held() {
        let a = Rc::new(Value::Int(Int::from_i64(1)));
        let roots = vec![Root::new(a.clone())];
        let collected = collect(&roots, |_| vec![]);
        assert!(collected.is_empty());
    }

    #[test]
    fn mark_visits_every_reachable_node_once() {
        let a = Rc::new(Value::Int(Int::from_i64(1)));
        let b = Rc::new(Value::Int(Int::from_i64(2)));
        let roots = vec![Root::new(a), Root::new(b)];
        // Node 0 points to node 1; marking from 0 must reach 1 too.
        mark(&roots, 0, &|i| if *i == 0 { vec![1] } else { vec![] });
        assert!(roots[0].visited.get());
        assert!(roots[1].visited.get());
    }

    #[test]
    fn node_referenced_by_an_externally_held_root_survives() {
        let a = Rc::new(Value::Int(Int::from_i64(1)));
        let b_value = Rc::new(Value::Int(Int::from_i64(2)));
        // `a` has a second strong holder outside the batch (this binding);
        // the node held at `roots[1]` has none beyond `roots` itself. `a`
        // references it, so decrementing `roots[1]`'s count through that
        // one edge alone must not make it collectible.
        let roots = vec![Root::new(a.clone()), Root::new(b_value)];
        let collected = collect(&roots, |v| if Rc::ptr_eq(v, &a) { vec![1] } else { vec![] });
        assert!(collected.is_empty(), "node reachable from a live root must survive");
    }

    #[test]
    fn mutual_cycle_with_no_external_holder_is_collected() {
        let x = Rc::new(Value::Int(Int::from_i64(1)));
        let y = Rc::new(Value::Int(Int::from_i64(2)));
        let roots = vec![Root::new(x), Root::new(y)];
        // Neither node has a strong holder outside `roots`; each references
        // the other, so the whole cycle is garbage.
        let collected = collect(&roots, |v| if **v == Value::Int(Int::from_i64(1)) { vec![1] } else { vec![0] });
        assert_eq!(collected, vec![0, 1]);
    }
}
