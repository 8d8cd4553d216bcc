use std::collections::HashMap;

/// Well-known form field names.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const PASSPHRASE: &str = "passphrase";
    pub const DATE: &str = "date";
    pub const PHOTO_COUNT: &str = "photoCount";
    /// Older form name for the photo count, read when `photoCount` is absent.
    pub const LEGACY_PHOTO_COUNT: &str = "numPhotos";
    pub const CAPTION_PREFIX: &str = "caption";

    /// Name of the caption field for the photo at `index`.
    pub fn caption(index: usize) -> String {
        format!("{CAPTION_PREFIX}{index}")
    }
}

/// Raw text fields of one submitted form.
///
/// Values are untrusted and unvalidated. When a field is submitted more than
/// once, the first value wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field unless a value for `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the field value, or an empty string when the field is absent.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let form: FormData = [("title", "first"), ("title", "second")].into_iter().collect();
        assert_eq!(form.value("title"), "first");
        assert_eq!(form, FormData::from_iter([("title", "first")]));
    }

    #[test]
    fn test_missing_field_reads_as_empty() {
        let form = FormData::new();
        assert_eq!(form.value("caption3"), "");
        assert!(form.get("caption3").is_none());
        assert!(form.is_empty());
    }

    #[test]
    fn test_caption_field_name() {
        assert_eq!(fields::caption(0), "caption0");
        assert_eq!(fields::caption(12), "caption12");
    }
}
