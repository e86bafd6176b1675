//! Sheet name allocation.

/// Ordered registry of finalized sheet names.
///
/// Names are pairwise distinct. A requested name that is already taken gets the
/// first free `_1`, `_2`, ... suffix.
#[derive(Debug, Default, Clone)]
pub struct SheetNameRegistry {
    names: Vec<String>,
}

impl SheetNameRegistry {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Resolve `requested` to an unused name, record it and return it.
    ///
    /// Every candidate is checked verbatim, so a base name counts as taken even
    /// when only suffixed variants exist next to it, and a suffixed name that
    /// happens to be taken already is skipped.
    pub fn add(&mut self, requested: &str) -> String {
        let mut name = requested.to_string();
        let mut suffix = 0u32;

        while self.contains(&name) {
            suffix += 1;
            name = format!("{}_{}", requested, suffix);
        }

        if suffix > 0 {
            log::warn!("sheet name '{}' already in use, renamed to '{}'", requested, name);
        }

        self.names.push(name.clone());
        name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
