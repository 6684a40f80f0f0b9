use std::collections::HashSet;

/// Names seen so far, for uniqueness checks.
///
/// Section names are tracked for the whole document. Key names only for the
/// section they appear in; keys in front of the first section share one
/// unnamed scope.
#[derive(Debug, Default)]
pub(crate) struct SectionScope {
    sections: HashSet<String>,
    keys: HashSet<String>,
}

impl SectionScope {
    pub(crate) fn has_section(&self, name: &str) -> bool {
        self.sections.contains(name)
    }

    /// Starts a new key scope for section `name`
    pub(crate) fn enter_section<S: Into<String>>(&mut self, name: S) {
        self.sections.insert(name.into());
        self.keys.clear();
    }

    pub(crate) fn has_key(&self, name: &str) -> bool {
        self.keys.contains(name)
    }

    pub(crate) fn add_key<S: Into<String>>(&mut self, name: S) {
        self.keys.insert(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod enter_section {
        use super::*;

        #[test]
        fn remembers_sections_for_the_whole_document() {
            let mut scope = SectionScope::default();
            scope.enter_section("Nini");
            scope.enter_section("Pets");

            assert!(scope.has_section("Nini"));
            assert!(scope.has_section("Pets"));
            assert!(!scope.has_section("nini"));
        }

        #[test]
        fn resets_keys() {
            let mut scope = SectionScope::default();
            scope.enter_section("Nini");
            scope.add_key("superkey");
            assert!(scope.has_key("superkey"));

            scope.enter_section("Pets");
            assert!(!scope.has_key("superkey"));
        }
    }

    mod add_key {
        use super::*;

        #[test]
        fn works_before_first_section() {
            let mut scope = SectionScope::default();
            scope.add_key("global");

            assert!(scope.has_key("global"));
            assert!(!scope.has_section(""));
        }
    }
}
