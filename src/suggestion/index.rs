use std::collections::HashMap;
use std::fmt;

/// A completion offered for the current input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text beyond what the user has typed, rendered as ghost text
    pub remainder: String,
    /// The complete catalog question
    pub full: String,
}

impl Suggestion {
    /// True when the input already spells out the whole question
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    /// Lowest catalog index whose lowercase form passes through this node
    first: Option<usize>,
}

/// Case-insensitive prefix index over the question catalog
///
/// Every node remembers the first catalog entry (in declaration order) that
/// reaches it, so a lookup walks the typed characters once and never scans
/// the catalog.
pub struct SuggestionIndex {
    catalog: Vec<String>,
    nodes: Vec<TrieNode>,
}

impl fmt::Debug for SuggestionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionIndex")
            .field("entries", &self.catalog.len())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl Default for SuggestionIndex {
    fn default() -> Self {
        Self::new(super::DEFAULT_CATALOG.iter().copied())
    }
}

impl SuggestionIndex {
    /// Build an index; blank entries are dropped
    pub fn new<I, S>(catalog: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog: Vec<String> = catalog
            .into_iter()
            .map(Into::into)
            .filter(|q: &String| !q.trim().is_empty())
            .collect();

        let mut nodes = vec![TrieNode::default()];
        for (idx, question) in catalog.iter().enumerate() {
            let mut node = 0;
            for ch in question.chars().flat_map(char::to_lowercase) {
                node = match nodes[node].children.get(&ch) {
                    Some(&next) => next,
                    None => {
                        nodes.push(TrieNode::default());
                        let next = nodes.len() - 1;
                        nodes[node].children.insert(ch, next);
                        next
                    }
                };
                // Entries are inserted in declaration order, so the first
                // writer is the lowest index.
                nodes[node].first.get_or_insert(idx);
            }
        }

        Self { catalog, nodes }
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Best completion for `input`, or None when nothing in the catalog
    /// starts with the trimmed input
    pub fn suggest(&self, input: &str) -> Option<Suggestion> {
        let key = input.trim();
        if key.is_empty() {
            return None;
        }

        let mut node = 0;
        for ch in key.chars().flat_map(char::to_lowercase) {
            node = *self.nodes[node].children.get(&ch)?;
        }
        let full = &self.catalog[self.nodes[node].first?];

        let rest: String = full.chars().skip(key.chars().count()).collect();
        // Typed trailing whitespace already separates the ghost text
        let remainder = if input.ends_with(char::is_whitespace) {
            rest.trim_start().to_string()
        } else {
            rest
        };

        Some(Suggestion {
            remainder,
            full: full.clone(),
        })
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod index_tests;
