use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use tracing::debug;

const BOM: char = '\u{FEFF}';

/// Splits one line of text into CSV fields.
///
/// Implementations never fail: a line the tokenizer cannot make sense of yields
/// an empty field list, which the loader reports like any other row of the wrong
/// shape.
pub trait LineTokenizer {
    fn split_line(&self, line: &str) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub struct CsvLineTokenizer {
    delimiter: u8,
    quote: u8,
}

impl Default for CsvLineTokenizer {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvLineTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }
}

impl LineTokenizer for CsvLineTokenizer {
    fn split_line(&self, line: &str) -> Vec<String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(line.as_bytes());

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => {
                let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
                // The csv reader drops a leading BOM; put it back so the
                // line's content is unchanged.
                if line.starts_with(BOM) {
                    if let Some(first) = fields.first_mut().filter(|f| !f.starts_with(BOM)) {
                        first.insert(0, BOM);
                    }
                }
                fields
            }
            // No record for an empty line.
            Ok(false) => vec![line.to_string()],
            Err(e) => {
                debug!(error = %e, "Failed to tokenize CSV line");
                Vec::new()
            }
        }
    }
}
