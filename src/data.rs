use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every metadata.json must carry with a non-null, non-empty value.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "category",
    "description",
    "version",
    "commit",
    "owner",
    "repo",
    "path",
];

/// A validated metadata.json plus the directory it was found in.
#[derive(Debug, Clone)]
pub struct Descriptor {
    fields: Map<String, Value>,
    location: String,
}

impl Descriptor {
    /// Callers are expected to have checked `REQUIRED_FIELDS` already.
    pub fn new(fields: Map<String, Value>, location: String) -> Self {
        Self { fields, location }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Text form of a field, empty when absent.
    pub fn text(&self, key: &str) -> String {
        self.field(key).map(value_text).unwrap_or_default()
    }

    pub fn name(&self) -> String {
        self.text("name")
    }

    pub fn category(&self) -> String {
        self.text("category")
    }

    /// Forward-slash directory holding the descriptor. Never emitted.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// `owner/repo/name`
    pub fn app_slug(&self) -> String {
        format!(
            "{}/{}/{}",
            self.text("owner"),
            self.text("repo"),
            self.text("name")
        )
    }

    /// `owner/repo` + `path` + `name` with repeated slashes collapsed.
    pub fn release_slug(&self) -> String {
        collapse_slashes(&format!(
            "{}/{}{}{}",
            self.text("owner"),
            self.text("repo"),
            self.text("path"),
            self.text("name")
        ))
    }

    /// Public projection used in category manifests. Only the fields listed
    /// here ever leave the process.
    pub fn clean_app(&self) -> CleanApp {
        let copy = |key: &str| self.field(key).cloned();
        CleanApp {
            name: copy("name").unwrap_or(Value::Null),
            description: copy("description").unwrap_or(Value::Null),
            version: copy("version").unwrap_or(Value::Null),
            author: copy("author"),
            license: copy("license"),
            homepage: copy("homepage"),
            icon: copy("icon"),
            tags: copy("tags"),
            slug: self.app_slug(),
        }
    }

    pub fn release_entry(&self) -> ReleaseEntry {
        ReleaseEntry {
            name: self.field("name").cloned().unwrap_or(Value::Null),
            version: self.field("version").cloned().unwrap_or(Value::Null),
            slug: self.release_slug(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CleanApp {
    pub name: Value,
    pub description: Value,
    pub version: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CategoryManifest {
    pub category: String,
    pub count: usize,
    pub apps: Vec<CleanApp>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesIndex {
    pub total_categories: usize,
    pub total_apps: usize,
    pub categories: Vec<CategorySummary>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReleaseEntry {
    pub name: Value,
    pub version: Value,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReleasesIndex {
    pub count: usize,
    pub apps: Vec<ReleaseEntry>,
}

/// Strings as-is, anything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lowercase, then every character outside `[a-z0-9]` becomes `-`.
pub fn category_slug(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}

pub fn manifest_file_name(category: &str) -> String {
    format!("category-{}.json", category_slug(category))
}

fn collapse_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_slash = false;
    for c in s.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        out.push(c);
    }
    out
}
