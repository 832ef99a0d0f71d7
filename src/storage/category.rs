use std::collections::HashMap;

/// Label dictionary for a categorical column.
///
/// Codes are contiguous from zero and assigned in order of first insertion.
/// A label keeps its code for the lifetime of the dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDictionary {
    labels: Vec<String>,
    codes: HashMap<String, i32>,
}

impl CategoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the code for `label`, inserting it if unseen.
    pub fn code_or_insert(&mut self, label: &str) -> i32 {
        if let Some(&code) = self.codes.get(label) {
            return code;
        }

        let code = self.labels.len() as i32;
        self.labels.push(label.to_owned());
        self.codes.insert(label.to_owned(), code);

        tracing::debug!(label, code, "new category");
        code
    }

    pub fn code(&self, label: &str) -> Option<i32> {
        self.codes.get(label).copied()
    }

    pub fn label(&self, code: i32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    pub fn contains_code(&self, code: i32) -> bool {
        self.label(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_assigned_in_insertion_order() {
        let mut dict = CategoryDictionary::new();
        assert_eq!(dict.code_or_insert("red"), 0);
        assert_eq!(dict.code_or_insert("green"), 1);
        assert_eq!(dict.code_or_insert("red"), 0);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_label_lookup() {
        let mut dict = CategoryDictionary::new();
        dict.code_or_insert("red");

        assert_eq!(dict.label(0), Some("red"));
        assert_eq!(dict.code("red"), Some(0));
        assert_eq!(dict.label(1), None);
        assert_eq!(dict.label(-1), None);
        assert!(!dict.contains_code(5));
    }
}
