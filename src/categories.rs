use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::data::Descriptor;
use crate::error::AllowListError;
use crate::matcher::suggest_categories;

/// Descriptors grouped by their verbatim `category`, in first-seen order.
#[derive(Debug, Default)]
pub struct CategoryGroups {
    order: Vec<String>,
    groups: HashMap<String, Vec<Descriptor>>,
}

impl CategoryGroups {
    pub fn insert(&mut self, descriptor: Descriptor) {
        let category = descriptor.category();
        match self.groups.get_mut(&category) {
            Some(list) => list.push(descriptor),
            None => {
                self.order.push(category.clone());
                self.groups.insert(category, vec![descriptor]);
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&[Descriptor]> {
        self.groups.get(category).map(Vec::as_slice)
    }

    /// Categories with their descriptors, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Descriptor])> {
        self.order.iter().filter_map(|name| {
            self.groups
                .get(name)
                .map(|list| (name.as_str(), list.as_slice()))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_apps(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Read the known-category list: a JSON array of strings.
pub fn load_allow_list(path: &Path) -> Result<Vec<String>, AllowListError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AllowListError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AllowListError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like `load_allow_list`, but an unusable file degrades to an empty list.
pub fn load_allow_list_or_empty(path: &Path) -> Vec<String> {
    match load_allow_list(path) {
        Ok(list) => list,
        Err(err) => {
            warn!("{}; continuing without known categories", err);
            Vec::new()
        }
    }
}

/// Partition descriptors by category. `known` only feeds log messages and
/// never drops a descriptor.
pub fn group_by_category(descriptors: Vec<Descriptor>, known: &[String]) -> CategoryGroups {
    let mut groups = CategoryGroups::default();
    for descriptor in descriptors {
        groups.insert(descriptor);
    }

    if !known.is_empty() {
        let known_set: HashSet<&str> = known.iter().map(String::as_str).collect();
        for (category, _) in groups.iter() {
            if known_set.contains(category) {
                continue;
            }
            let suggestions = suggest_categories(category, known);
            if suggestions.is_empty() {
                info!("category {:?} is not in the known category list", category);
            } else {
                info!(
                    "category {:?} is not in the known category list; did you mean {}?",
                    category,
                    suggestions.join(", ")
                );
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn app(name: &str, category: &str) -> Descriptor {
        let value = json!({"name": name, "category": category});
        Descriptor::new(value.as_object().unwrap().clone(), String::new())
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups = group_by_category(
            vec![app("a", "Tools"), app("b", "Games"), app("c", "Tools")],
            &[],
        );
        let order: Vec<&str> = groups.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["Tools", "Games"]);
        assert_eq!(groups.get("Tools").unwrap().len(), 2);
        assert_eq!(groups.total_apps(), 3);
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let groups = group_by_category(vec![app("a", "tools"), app("b", "Tools")], &[]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn unknown_categories_are_kept() {
        let known = vec!["Games".to_string()];
        let groups = group_by_category(vec![app("a", "Gamez"), app("b", "Other")], &known);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.total_apps(), 2);
    }

    #[test]
    fn allow_list_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("valid-categories.json");
        fs::write(&path, r#"["Tools", "Games"]"#).unwrap();
        assert_eq!(load_allow_list_or_empty(&path), vec!["Tools", "Games"]);
    }

    #[test]
    fn broken_allow_list_degrades_to_empty() {
        let dir = tempdir().unwrap();
        assert!(load_allow_list_or_empty(&dir.path().join("missing.json")).is_empty());

        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"not": "a list"}"#).unwrap();
        assert!(matches!(
            load_allow_list(&path),
            Err(AllowListError::Parse { .. })
        ));
        assert!(load_allow_list_or_empty(&path).is_empty());
    }
}
