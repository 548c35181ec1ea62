use serde::{Deserialize, Serialize};

use crate::translation::Translation;

/// Ordered translations in source row order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    translations: Vec<Translation>,
}

impl TranslationTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, translation: Translation) {
        self.translations.push(translation);
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Translation> {
        self.translations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Translation> {
        self.translations.iter()
    }

    pub fn as_slice(&self) -> &[Translation] {
        &self.translations
    }

    pub fn into_vec(self) -> Vec<Translation> {
        self.translations
    }

    /// RDF value of the first row whose database value matches.
    pub fn to_rdf_value(&self, database_value: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.database_value() == database_value)
            .map(Translation::rdf_value)
    }

    /// Database value of the first row whose RDF value matches.
    pub fn to_database_value(&self, rdf_value: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.rdf_value() == rdf_value)
            .map(Translation::database_value)
    }
}

impl From<Vec<Translation>> for TranslationTable {
    fn from(translations: Vec<Translation>) -> Self {
        Self { translations }
    }
}

impl FromIterator<Translation> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = Translation>>(iter: I) -> Self {
        Self {
            translations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TranslationTable {
    type Item = Translation;
    type IntoIter = std::vec::IntoIter<Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.translations.into_iter()
    }
}

impl<'a> IntoIterator for &'a TranslationTable {
    type Item = &'a Translation;
    type IntoIter = std::slice::Iter<'a, Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.translations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> TranslationTable {
        TranslationTable::from(vec![
            Translation::new("M", "male"),
            Translation::new("F", "female"),
            Translation::new("M", "man"),
            Translation::new("X", "female"),
        ])
    }

    #[rstest]
    fn test_lookup_returns_first_match(table: TranslationTable) {
        assert_eq!(table.to_rdf_value("M"), Some("male"));
        assert_eq!(table.to_database_value("female"), Some("F"));
        assert_eq!(table.to_rdf_value("unknown"), None);
    }

    #[rstest]
    fn test_order_and_duplicates_preserved(table: TranslationTable) {
        let db_values: Vec<&str> = table.iter().map(Translation::database_value).collect();
        assert_eq!(db_values, vec!["M", "F", "M", "X"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(2), Some(&Translation::new("M", "man")));
    }

    #[rstest]
    fn test_serializes_as_array(table: TranslationTable) {
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(4));
        assert_eq!(json[1]["database_value"], "F");
        assert_eq!(json[1]["rdf_value"], "female");
    }
}
