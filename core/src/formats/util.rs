use miette::SourceSpan;

/// Stores an entire input line to work out where in it errors occured.
#[derive(Debug)]
pub struct InputLocator<'a> {
    pub full_input: &'a str,
}

impl<'a> InputLocator<'a> {
    pub fn new(full_input: &'a str) -> Self {
        Self { full_input }
    }

    /// Creates a span for an item using a substring of self.full_input
    ///
    /// Note that substr must be a literal substring, as in it must be
    /// a pointer into the same string!
    pub fn span_from_substr(&self, substr: &str) -> SourceSpan {
        let base_addr = self.full_input.as_ptr() as usize;
        let substr_addr = substr.as_ptr() as usize;
        debug_assert!(
            substr_addr >= base_addr && substr_addr <= base_addr + self.full_input.len(),
            "tried to get the span of a non-substring!"
        );
        let start = substr_addr.saturating_sub(base_addr);
        SourceSpan::from(start..start + substr.len())
    }
}

/// Splits a line on single spaces, keeping empty tokens between repeated spaces.
///
/// A leading space therefore shifts every column by one, which the file
/// formats rely on.
pub fn columns(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\n', '\r']).split(' ').collect()
}

/// Parses a single column, ignoring surrounding whitespace.
pub fn parse_column<T: std::str::FromStr>(column: &str) -> Result<T, T::Err> {
    column.trim().parse::<T>()
}
