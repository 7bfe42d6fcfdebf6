use thiserror::Error;

/// Sentinel character substituted for a block's common leading indentation.
///
/// Later matchers treat a run of these as "this line is subordinate to the
/// nearest enclosing block".
pub const MARKER: char = '.';

/// Columns a leading tab expands to when no width is given.
pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("wrong indentation at line {line}")]
pub struct IndentError {
    /// 1-based line number of the offending line.
    pub line: usize,
}

/// Canonicalizes leading whitespace, one line at a time.
///
/// Tabs in a line's leading run expand to `tab_width` spaces. The first
/// indented line after a column-zero line establishes the minimum indent for
/// its block; that minimum prefix is replaced with [`MARKER`] characters on
/// every line of the block, and any indentation beyond it is kept as literal
/// spaces. A line indented less than its block's minimum is an error,
/// reported with its 1-based line number.
///
/// Lazy: lines are rewritten as the iterator is driven, and the first `Err`
/// ends the parse.
pub fn normalize<I, S>(
    lines: I,
    tab_width: usize,
) -> impl Iterator<Item = Result<String, IndentError>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut min_indent: Option<usize> = None;
    lines.into_iter().enumerate().map(move |(i, line)| {
        let line = line.as_ref();
        let (indent, rest) = split_indent(line);
        if indent.is_empty() || rest.is_empty() {
            // Column-zero or whitespace-only line: a new block starts after it.
            min_indent = None;
            return Ok(line.to_string());
        }

        let expanded = expand_tabs(indent, tab_width);
        let min = *min_indent.get_or_insert(expanded.len());
        if expanded.len() < min {
            return Err(IndentError { line: i + 1 });
        }

        let mut out = String::with_capacity(expanded.len() + rest.len());
        for _ in 0..min {
            out.push(MARKER);
        }
        out.push_str(&expanded[min..]);
        out.push_str(rest);
        Ok(out)
    })
}

/// Splits a line at the end of its leading run of spaces and tabs.
fn split_indent(line: &str) -> (&str, &str) {
    let end = line
        .find(|c| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    line.split_at(end)
}

fn expand_tabs(indent: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(indent.len() * tab_width);
    for c in indent.chars() {
        if c == '\t' {
            for _ in 0..tab_width {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(lines: &[&str]) -> Result<Vec<String>, IndentError> {
        normalize(lines, DEFAULT_TAB_WIDTH).collect()
    }

    #[rstest]
    #[case::spaces(&["    foo"], &["....foo"])]
    #[case::tab(&["\tfoo"], &["....foo"])]
    #[case::mixed_tab_and_space(&["\t  foo"], &["......foo"])]
    #[case::no_indent(&["foo"], &["foo"])]
    #[case::extra_indent_kept_as_spaces(&["  a", "    b"], &["..a", "..  b"])]
    fn rewrites_leading_whitespace(#[case] input: &[&str], #[case] expected: &[&str]) {
        assert_eq!(run(input).unwrap(), expected);
    }

    #[test]
    fn tab_and_four_spaces_normalize_identically() {
        assert_eq!(run(&["\tfoo"]).unwrap(), run(&["    foo"]).unwrap());
    }

    #[test]
    fn column_zero_line_resets_block_minimum() {
        // Two blocks with different widths, normalized independently.
        let out = run(&["  one", "top", "    two"]).unwrap();
        assert_eq!(out, vec!["..one", "top", "....two"]);
    }

    #[test]
    fn whitespace_only_line_resets_block_minimum() {
        let out = run(&["    one", "   ", "  two"]).unwrap();
        assert_eq!(out, vec!["....one", "   ", "..two"]);
    }

    #[test]
    fn under_indented_line_fails_with_line_number() {
        let err = run(&["top", "    a", "  b"]).unwrap_err();
        assert_eq!(err, IndentError { line: 3 });
    }

    #[test]
    fn equal_or_deeper_indentation_never_fails() {
        assert!(run(&["  a", "  b", "      c", "  d"]).is_ok());
    }

    #[test]
    fn is_lazy_up_to_first_error() {
        let mut iter = normalize(["    a", "  bad", "unreached"], 4);
        assert_eq!(iter.next().unwrap().unwrap(), "....a");
        assert_eq!(iter.next().unwrap().unwrap_err(), IndentError { line: 2 });
    }

    #[test]
    fn custom_tab_width() {
        let out: Vec<_> = normalize(["\tfoo"], 2).collect::<Result<_, _>>().unwrap();
        assert_eq!(out, vec!["..foo"]);
    }
}
