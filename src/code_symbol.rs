//! Code symbol value kind (spec §3 "Supplemented value kinds: Code
//! symbol"): an opaque handle to an assembled code fragment, carrying
//! enough identity to participate in equality and the cycle collector's
//! graph without re-implementing code generation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::namespace::Namespace;

/// A handle to an assembled code fragment.
#[derive(Debug, Clone)]
pub struct CodeSymbol {
    /// Monotonic counter distinguishing successive fragments at the same
    /// namespace (e.g. macro re-expansion across passes).
    pub generation: u64,
    /// The fragment's local namespace; this is the back-reference that
    /// can form a cycle with the namespace that holds the label bound to
    /// this symbol (spec §4.6).
    pub names: Rc<RefCell<Namespace>>,
}

impl CodeSymbol {
    pub fn new(generation: u64, names: Rc<RefCell<Namespace>>) -> Self {
        Self { generation, names }
    }
}

impl PartialEq for CodeSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && Rc::ptr_eq(&self.names, &other.names)
    }
}
impl Eq for CodeSymbol {}
