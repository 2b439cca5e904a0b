use super::error::Result;
use super::{Mode, Printer};
use crate::value::port::Port;
use crate::value::{ExtensionId, Value};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// A registered serialization callback. It receives the same parameters as
/// `Printer::print` and is responsible for honoring the same depth and
/// length budgets.
pub type PrintCallback = dyn Fn(&mut Printer, &Value, &Port, Mode, i64, i64) -> Result<()>;

/// Maps runtime-extensible object categories to their serialization
/// callbacks. The core serializer consults this after the built-in
/// categories failed to match; a live category with no entry here is a
/// defect in the runtime's own bookkeeping.
#[derive(Default)]
pub struct ExtensionTable {
    callbacks: FxHashMap<ExtensionId, Rc<PrintCallback>>,
}

impl ExtensionTable {
    pub fn new() -> Self {
        Self {
            callbacks: FxHashMap::default(),
        }
    }

    pub fn register(&mut self, id: ExtensionId, callback: Rc<PrintCallback>) {
        log::debug!("registering print callback for extension category {}", id.0);
        self.callbacks.insert(id, callback);
    }

    pub fn lookup(&self, id: ExtensionId) -> Option<Rc<PrintCallback>> {
        self.callbacks.get(&id).cloned()
    }
}
