//! Parameter value sources used by reversal.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only name to value lookup consulted while reversing a template.
///
/// Names absent from the source leave their parameter tokens unresolved.
pub trait ParamLookup {
    fn lookup(&self, name: &str) -> Option<&str>;

    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

impl<S: BuildHasher> ParamLookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> ParamLookup for HashMap<&str, &str, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl ParamLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParamLookup for BTreeMap<&str, &str> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl ParamLookup for [(&str, &str)] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

impl<const N: usize> ParamLookup for [(&str, &str); N] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.as_slice().lookup(name)
    }
}

impl<T: ParamLookup + ?Sized> ParamLookup for &T {
    fn lookup(&self, name: &str) -> Option<&str> {
        (**self).lookup(name)
    }
}
