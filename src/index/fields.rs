//! Submitted field sets and queries over them
//!
//! Both types keep fields in first-seen order and merge repeated field
//! names into one entry, the way repeated form parameters arrive over HTTP.

/// A submission's data: field name → one or more values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<(String, Vec<String>)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `name`, appending to an existing field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((name, vec![value])),
        }
    }

    /// Builder method: add a value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Values recorded for a field
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate fields in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct field names
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of (name, value) pairs
    pub fn value_count(&self) -> usize {
        self.fields.iter().map(|(_, values)| values.len()).sum()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// A query: field name → accepted values
///
/// An empty value list means any value is acceptable for that field.
/// An empty query matches every stored form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormQuery {
    terms: Vec<(String, Vec<String>)>,
}

impl FormQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw (name, value) parameters.
    ///
    /// Blank values are dropped, so `size=` asks only for the presence of `size`.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = FormQuery::new();
        for (name, value) in pairs {
            let value = value.into();
            if value.trim().is_empty() {
                query = query.field(name);
            } else {
                query = query.value(name, value);
            }
        }
        query
    }

    /// Builder method: require the field to be present
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.term_mut(name.into());
        self
    }

    /// Builder method: require the field, accepting `value` among others
    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.term_mut(name.into()).push(value.into());
        self
    }

    fn term_mut(&mut self, name: String) -> &mut Vec<String> {
        let pos = match self.terms.iter().position(|(n, _)| *n == name) {
            Some(pos) => pos,
            None => {
                self.terms.push((name, Vec::new()));
                self.terms.len() - 1
            }
        };
        &mut self.terms[pos].1
    }

    /// Iterate terms in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.terms
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_merges_repeated_names() {
        let fields: FieldSet = vec![("tag", "a"), ("color", "red"), ("tag", "b"), ("tag", "a")]
            .into_iter()
            .collect();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.value_count(), 4);
        assert_eq!(
            fields.get("tag").unwrap(),
            &["a".to_string(), "b".to_string(), "a".to_string()]
        );

        let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["tag", "color"]);
    }

    #[test]
    fn test_query_from_pairs_drops_blank_values() {
        let query = FormQuery::from_pairs(vec![("size", ""), ("color", "red"), ("color", "  ")]);

        let terms: Vec<(&str, &[String])> = query.iter().collect();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0], ("size", &[][..]));
        assert_eq!(terms[1].0, "color");
        assert_eq!(terms[1].1, &["red".to_string()]);
    }

    #[test]
    fn test_query_builder() {
        let query = FormQuery::new()
            .value("color", "red")
            .value("color", "blue")
            .field("size");

        assert_eq!(query.len(), 2);
        assert!(!query.is_empty());
        assert!(FormQuery::new().is_empty());
    }
}
