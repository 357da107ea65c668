use crate::object::Object;

/// The scope bindings of one expansion.
///
/// Each binding maps a root name to the object it currently stands for. The
/// outermost binding is the root object, loops and implicit groups push a
/// binding per element and pop it afterwards.
#[cfg_attr(test, derive(Debug))]
pub struct Stack<'a> {
    bindings: Vec<(&'a str, &'a Object)>,
}

impl<'a> Stack<'a> {
    pub fn new(name: &'a str, root: &'a Object) -> Self {
        Self {
            bindings: vec![(name, root)],
        }
    }

    pub fn push(&mut self, name: &'a str, object: &'a Object) {
        self.bindings.push((name, object));
    }

    pub fn pop(&mut self) {
        assert!(self.bindings.len() > 1, "cannot pop the root binding");
        self.bindings.pop();
    }

    /// Returns the object bound to the name, innermost first.
    pub fn lookup(&self, name: &str) -> Option<&'a Object> {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, object)| *object)
    }

    /// Returns the elements of the relation on the innermost binding that
    /// exposes it.
    pub fn relation(&self, relation: &str) -> Option<&'a [Object]> {
        self.bindings
            .iter()
            .rev()
            .find_map(|(_, object)| object.relation(relation))
    }

    /// Returns the innermost binding.
    pub fn innermost(&self) -> (&'a str, &'a Object) {
        *self.bindings.last().expect("root binding is never popped")
    }

    /// Returns the bindings visible to the resolver.
    ///
    /// A shadowed binding is hidden by a later one with the same name.
    pub fn candidates(&self) -> Vec<(&'a str, &'a Object)> {
        let mut candidates: Vec<(&'a str, &'a Object)> = Vec::with_capacity(self.bindings.len());
        for &(name, object) in &self.bindings {
            match candidates.iter_mut().find(|(n, _)| *n == name) {
                Some(binding) => binding.1 = object,
                None => candidates.push((name, object)),
            }
        }
        candidates
    }

    /// Returns the sorted set of bound names.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<_> = self.bindings.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
