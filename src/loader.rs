use serde_json::{Map, Value};
use std::path::Path;

use crate::data::{Descriptor, REQUIRED_FIELDS};
use crate::error::DescriptorError;
use crate::file_ops::normalized_parent;

/// Read and validate one metadata.json. No side effects; the caller decides
/// how to report a rejected file.
pub fn load_descriptor(path: &Path) -> Result<Descriptor, DescriptorError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DescriptorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| DescriptorError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Object(fields) = value else {
        return Err(DescriptorError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    if let Some(field) = first_missing_field(&fields) {
        return Err(DescriptorError::MissingField {
            path: path.to_path_buf(),
            field,
        });
    }

    Ok(Descriptor::new(fields, normalized_parent(path)))
}

/// First required field that is absent, null or an empty string.
pub fn first_missing_field(fields: &Map<String, Value>) -> Option<&'static str> {
    REQUIRED_FIELDS.into_iter().find(|field| match fields.get(*field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn valid() -> Value {
        json!({
            "name": "Foo",
            "category": "Tools",
            "description": "d",
            "version": "1.0",
            "commit": "abc",
            "owner": "o1",
            "repo": "r1",
            "path": "/a/"
        })
    }

    fn write(dir: &Path, body: &str) -> std::path::PathBuf {
        let app = dir.join("foo");
        fs::create_dir_all(&app).unwrap();
        let path = app.join("metadata.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn valid_descriptor_gets_location() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), &valid().to_string());
        let descriptor = load_descriptor(&path).unwrap();
        assert_eq!(descriptor.name(), "Foo");
        assert_eq!(descriptor.location(), normalized_parent(&path));
        assert!(descriptor.location().ends_with("/foo"));
    }

    #[test]
    fn each_missing_or_empty_field_is_reported() {
        for field in REQUIRED_FIELDS {
            for broken in [None, Some(Value::Null), Some(json!(""))] {
                let mut value = valid();
                let object = value.as_object_mut().unwrap();
                match broken {
                    None => {
                        object.remove(field);
                    }
                    Some(v) => {
                        object.insert(field.to_string(), v);
                    }
                }
                assert_eq!(first_missing_field(object), Some(field));
            }
        }
    }

    #[test]
    fn first_missing_field_wins() {
        let mut value = valid();
        let object = value.as_object_mut().unwrap();
        object.remove("version");
        object.remove("owner");
        assert_eq!(first_missing_field(object), Some("version"));
    }

    #[test]
    fn non_string_values_count_as_present() {
        let mut value = valid();
        value["version"] = json!(0);
        value["path"] = json!(false);
        assert_eq!(first_missing_field(value.as_object().unwrap()), None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "{ not json");
        assert!(matches!(
            load_descriptor(&path),
            Err(DescriptorError::Parse { .. })
        ));
    }

    #[test]
    fn top_level_array_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "[]");
        assert!(matches!(
            load_descriptor(&path),
            Err(DescriptorError::NotAnObject { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_descriptor(&dir.path().join("metadata.json")),
            Err(DescriptorError::Read { .. })
        ));
    }

    #[test]
    fn missing_field_error_names_path_and_field() {
        let dir = tempdir().unwrap();
        let mut value = valid();
        value.as_object_mut().unwrap().remove("commit");
        let path = write(dir.path(), &value.to_string());
        match load_descriptor(&path) {
            Err(err @ DescriptorError::MissingField { field: "commit", .. }) => {
                let message = err.to_string();
                assert!(message.contains("`commit`"));
                assert!(message.contains("metadata.json"));
            }
            other => panic!("expected missing commit, got {other:?}"),
        }
    }
}
