pub mod table;

pub use table::TranslationTable;

use serde::{Deserialize, Serialize};

/// One row of a translation table: a value as it appears in the database and
/// the RDF value it is rewritten to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Translation {
    database_value: String,
    rdf_value: String,
}

impl Translation {
    pub fn new(database_value: impl Into<String>, rdf_value: impl Into<String>) -> Self {
        Self {
            database_value: database_value.into(),
            rdf_value: rdf_value.into(),
        }
    }

    pub fn database_value(&self) -> &str {
        &self.database_value
    }

    pub fn rdf_value(&self) -> &str {
        &self.rdf_value
    }

    pub fn into_parts(self) -> (String, String) {
        (self.database_value, self.rdf_value)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Translation {
    fn from((database_value, rdf_value): (A, B)) -> Self {
        Self::new(database_value, rdf_value)
    }
}
