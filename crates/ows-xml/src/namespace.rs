//! Namespace prefix tables for path expressions.

/// One prefix → URI binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    uri: String,
}

impl Namespace {
    pub fn new(prefix: &str, uri: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Prefix table a schema's path expressions are resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    namespaces: Vec<Namespace>,
}

impl NamespaceMap {
    pub fn new(namespaces: Vec<Namespace>) -> Self {
        let mut map = Self::default();
        for namespace in namespaces {
            map.add(namespace);
        }
        map
    }

    /// Adds a binding; a repeated prefix replaces the previous one.
    pub fn add(&mut self, namespace: Namespace) {
        match self
            .namespaces
            .iter_mut()
            .find(|existing| existing.prefix == namespace.prefix)
        {
            Some(existing) => *existing = namespace,
            None => self.namespaces.push(namespace),
        }
    }

    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|namespace| namespace.prefix == prefix)
            .map(|namespace| namespace.uri.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_and_replace() {
        let mut map = NamespaceMap::new(vec![Namespace::new(
            "ows",
            "http://www.opengis.net/ows/2.0",
        )]);
        assert_eq!(map.resolve("ows"), Some("http://www.opengis.net/ows/2.0"));
        assert_eq!(map.resolve("wcs"), None);

        map.add(Namespace::new("ows", "http://example.com/other"));
        assert_eq!(map.resolve("ows"), Some("http://example.com/other"));
    }
}
