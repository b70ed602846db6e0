/// Settings shared by the parser and the printer.
///
/// A zero `max_depth` or `max_column` lifts the corresponding bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub max_depth: usize,
    pub max_column: usize,
    pub warnings_are_errors: bool,
}

pub const DEFAULT_MAX_DEPTH: usize = 1024;

pub const DEFAULT_MAX_COLUMN: usize = 75;

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            max_column: DEFAULT_MAX_COLUMN,
            warnings_are_errors: false,
        }
    }
}

impl Options {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_column(mut self, max_column: usize) -> Self {
        self.max_column = max_column;
        self
    }

    pub fn warnings_are_errors(mut self, strict: bool) -> Self {
        self.warnings_are_errors = strict;
        self
    }
}
