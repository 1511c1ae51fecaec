//! CSV rendering for list exports.

/// Quote a field if it contains a comma, quote, CR or LF; double embedded quotes.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Build a CSV document with a header row. Lines end with `\n`.
pub struct CsvBuilder {
    columns: usize,
    out: String,
}

impl CsvBuilder {
    pub fn new(headers: &[&str]) -> Self {
        let mut builder = Self {
            columns: headers.len(),
            out: String::new(),
        };
        builder.push_line(headers.iter().copied());
        builder
    }

    /// Append a row. Short rows are padded with empty fields and long rows
    /// are truncated to the header width.
    pub fn row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells: Vec<String> = fields
            .into_iter()
            .take(self.columns)
            .map(|f| f.as_ref().to_string())
            .collect();
        cells.resize(self.columns, String::new());
        self.push_line(cells.iter().map(String::as_str));
    }

    fn push_line<'a>(&mut self, fields: impl Iterator<Item = &'a str>) {
        let line: Vec<String> = fields.map(escape_field).collect();
        self.out.push_str(&line.join(","));
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}
