/// Tabular projection used when exporting results as sheets or tables.
///
/// `header()` and `content()` always have the same length for a given value.
pub trait TableRow {
    fn header(&self) -> Vec<String>;

    fn content(&self) -> Vec<String>;
}
