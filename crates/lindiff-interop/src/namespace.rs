//! Named collections of external callables

use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::info;
use crate::call::{Callable, NativeFn};
use crate::error::{CallResult, InteropError, InteropResult};
use crate::native::Native;

pub struct Namespace {
    name: String,
    vars: BTreeMap<String, Rc<dyn Callable>>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self { Namespace { name: name.into(), vars: BTreeMap::new() } }

    pub fn name(&self) -> &str { &self.name }

    pub fn define(&mut self, callable: Rc<dyn Callable>) {
        self.vars.insert(callable.name().to_string(), callable);
    }

    pub fn define_fn(&mut self, name: &str, body: fn(&[Native]) -> CallResult) {
        self.define(Rc::new(NativeFn::new(name, body)));
    }

    /// Resolves `name` within this namespace.
    pub fn var(&self, name: &str) -> InteropResult<Rc<dyn Callable>> {
        self.vars.get(name).cloned().ok_or_else(|| InteropError::Unresolved {
            namespace: self.name.clone(),
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.vars.keys().map(String::as_str) }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace").field("name", &self.name).field("vars", &self.vars.keys().collect::<Vec<_>>()).finish()
    }
}

/// Known namespaces, built on demand.
#[derive(Default)]
pub struct Registry {
    loaders: BTreeMap<String, fn() -> Namespace>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, name: impl Into<String>, loader: fn() -> Namespace) {
        self.loaders.insert(name.into(), loader);
    }

    pub fn load(&self, name: &str) -> InteropResult<Namespace> {
        info!("Loading namespace \"{}\"", name);
        let loader = self.loaders.get(name).ok_or_else(|| InteropError::UnknownNamespace(name.to_string()))?;
        let ns = loader();
        info!("Namespace \"{}\" loaded with {} vars", name, ns.vars.len());
        Ok(ns)
    }
}
