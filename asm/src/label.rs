use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Address once defined. `None` while only forward references exist.
    pub addr: Option<usize>,
    /// Line index of the definition, or of the first reference.
    pub line: usize,
}

/// Label table, in order of first mention.
#[derive(Debug, Default)]
pub struct Labels(IndexMap<String, Label>);

impl Labels {
    /// Register a reference. Creates an unresolved entry if the label is new.
    pub fn reference(&mut self, name: &str, line: usize) {
        if !self.0.contains_key(name) {
            self.0.insert(name.to_string(), Label { addr: None, line });
        }
    }

    /// Bind `name` to `addr`. Returns the previous entry if it already held
    /// an address.
    pub fn define(&mut self, name: &str, addr: usize, line: usize) -> Option<Label> {
        let new = Label {
            addr: Some(addr),
            line,
        };
        match self.0.get_mut(name) {
            Some(entry) => {
                let prev = std::mem::replace(entry, new);
                prev.addr.map(|_| prev)
            }
            None => {
                self.0.insert(name.to_string(), new);
                None
            }
        }
    }

    pub fn get_val(&self, name: &str) -> Option<usize> {
        self.0.get(name).and_then(|label| label.addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Label)> {
        self.0.iter().map(|(name, label)| (name.as_str(), label))
    }
}
