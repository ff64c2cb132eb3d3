//! Plain-text path-data files.

/// Splits a path-data file into one path-data string per line.
///
/// Blank lines are skipped and `#` starts a comment that runs to the end of
/// the line. Returned strings are trimmed.
///
/// ```
/// use meshmerize::io::read_path_data;
///
/// let text = "# outline\nM0 0 L1 0\n\nM2 2 L3 3  # inner\n";
/// assert_eq!(read_path_data(text), ["M0 0 L1 0", "M2 2 L3 3"]);
/// ```
pub fn read_path_data(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
