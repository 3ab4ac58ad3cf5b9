//! Captured path parameters.

/// Parameters captured by a matched route pattern.
///
/// One map is produced per matched route per request, and it wholesale
/// *replaces* the previous map in the context; parameters never leak from
/// one matched route into the next.
///
/// An optional capture (`:name?`, `:name*`) that did not participate in the
/// match is recorded with a `None` value, distinguishing "declared but
/// absent" from "no such parameter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(Box<str>, Option<String>)>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a capture. Later entries win on duplicate names.
    pub(crate) fn insert(&mut self, name: &str, value: Option<String>) {
        self.entries.push((name.into(), value));
    }

    /// The captured value for `name`, if the capture participated in the
    /// match.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_opt(name).flatten()
    }

    /// The capture slot for `name`: `None` if the pattern declares no such
    /// capture, `Some(None)` if it does but the optional segment was absent.
    pub fn get_opt(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, v)| v.as_deref())
    }

    /// Number of declared captures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no captures.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate captures in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v.as_deref()))
    }
}
