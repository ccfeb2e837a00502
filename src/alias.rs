use indexmap::IndexMap;
use std::collections::HashSet;

/// Hands out short table aliases `t1`, `t2`, ... for diagnostics.
///
/// Aliases already present in the used set are skipped, which allows merging
/// with aliases assigned elsewhere. The counter only moves forward.
#[derive(Clone, Debug)]
pub struct AliasAllocator {
    used: HashSet<String>,
    next: usize,
    aliases: IndexMap<String, String>,
}

impl Default for AliasAllocator {
    fn default() -> Self {
        Self {
            used: HashSet::new(),
            next: 1,
            aliases: IndexMap::new(),
        }
    }
}

impl AliasAllocator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Start with aliases that must not be handed out
    pub fn with_used<I, S>(used: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            used: used.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Alias of `table`, assigning a fresh one on first encounter
    pub fn alias_of(&mut self, table: &str) -> &str {
        if !self.aliases.contains_key(table) {
            let alias = loop {
                let candidate = format!("t{}", self.next);
                if !self.used.contains(&candidate) {
                    break candidate;
                }
                self.next += 1;
            };
            self.used.insert(alias.clone());
            self.aliases.insert(table.to_owned(), alias);
        }
        &self.aliases[table]
    }

    /// Assign aliases to `tables` in order and return every alias assigned
    /// so far
    pub fn allocate<I, S>(&mut self, tables: I) -> &IndexMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for table in tables {
            self.alias_of(table.as_ref());
        }
        &self.aliases
    }

    pub fn get(&self, table: &str) -> Option<&str> {
        self.aliases.get(table).map(String::as_str)
    }

    pub fn into_aliases(self) -> IndexMap<String, String> {
        self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn allocate_in_encounter_order() {
        let mut allocator = AliasAllocator::new();
        let aliases = allocator.allocate(["SalesLT.Customer", "SalesLT.Product", "SalesLT.Customer"]);

        assert_eq!(
            aliases.iter().collect::<Vec<_>>(),
            vec![
                (&"SalesLT.Customer".to_owned(), &"t1".to_owned()),
                (&"SalesLT.Product".to_owned(), &"t2".to_owned()),
            ]
        );
    }

    #[test]
    fn skip_used_aliases() {
        let mut allocator = AliasAllocator::with_used(["t1", "t3"]);
        allocator.allocate(["a", "b", "c"]);

        assert_eq!(allocator.get("a"), Some("t2"));
        assert_eq!(allocator.get("b"), Some("t4"));
        assert_eq!(allocator.get("c"), Some("t5"));
    }

    #[test]
    fn aliases_increase_monotonically() {
        let mut allocator = AliasAllocator::with_used(["t2", "t5", "t6"]);
        let aliases = allocator
            .allocate(["a", "b", "c", "d", "e"])
            .values()
            .map(|alias| alias[1..].parse::<usize>().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(aliases, vec![1, 3, 4, 7, 8]);
        assert!(aliases.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn keep_alias_across_calls() {
        let mut allocator = AliasAllocator::new();
        allocator.allocate(["a"]);
        allocator.allocate(["b", "a"]);

        assert_eq!(
            allocator.into_aliases().into_iter().collect::<Vec<_>>(),
            vec![
                ("a".to_owned(), "t1".to_owned()),
                ("b".to_owned(), "t2".to_owned()),
            ]
        );
    }
}
