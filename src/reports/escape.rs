//! Escaping utilities for Markdown report output.
//!
//! Doc ids routinely contain Markdown metacharacters (`` ` `` in generic
//! arity, `#` in constructors, `[]` in array types), and breaking-change
//! text is free-form. Everything taken from data files is escaped before it
//! is embedded in a table or inline span.

/// Escape a string for a Markdown table cell.
///
/// Pipes would end the cell and newlines would end the row.
///
/// # Examples
///
/// ```
/// use apiport_offline::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a|b"), "a\\|b");
/// assert_eq!(escape_markdown_table("M:List`1.Sort"), "M:List\\`1.Sort");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for Markdown inline content such as headings.
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Table-escape an optional value, `-` for None.
pub fn escape_md_opt(s: Option<&str>) -> String {
    s.map_or_else(|| "-".to_string(), escape_markdown_table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escape_doc_ids() {
        assert_eq!(
            escape_markdown_table("M:System.Uri.#ctor(System.String)"),
            "M:System.Uri.#ctor(System.String)"
        );
        assert_eq!(
            escape_markdown_table("M:System.Array.Sort(System.Int32[])"),
            "M:System.Array.Sort(System.Int32\\[\\])"
        );
    }

    #[test]
    fn test_table_escape_row_breaking_input() {
        assert_eq!(escape_markdown_table("line1\r\nline2|x"), "line1 line2\\|x");
    }

    #[test]
    fn test_inline_escape() {
        assert_eq!(escape_markdown_inline("**bold** #1"), "\\*\\*bold\\*\\* \\#1");
    }

    #[test]
    fn test_opt_helper() {
        assert_eq!(escape_md_opt(None), "-");
        assert_eq!(escape_md_opt(Some("4.5")), "4.5");
    }
}
