//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output.
///
/// Lines are compared pairwise; surplus lines on either side are listed
/// after the common prefix.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");

    let exp: Vec<&str> = expected.split('\n').collect();
    let act: Vec<&str> = actual.split('\n').collect();
    for i in 0..exp.len().max(act.len()) {
        match (exp.get(i), act.get(i)) {
            (Some(e), Some(a)) if e == a => {}
            (e, a) => {
                out.push_str(&format!("@@ line {} @@\n", i + 1));
                if let Some(e) = e {
                    out.push_str(&format!("-{}\n", e.escape_debug()));
                }
                if let Some(a) = a {
                    out.push_str(&format!("+{}\n", a.escape_debug()));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        assert_eq!(render_diff("a\nb", "a\nb"), "[identical]");
    }

    #[test]
    fn changed_line() {
        let diff = render_diff("x=1\ny=2", "x=1\ny=3");
        assert!(diff.contains("@@ line 2 @@\n-y=2\n+y=3\n"));
        assert!(!diff.contains("line 1"));
    }

    #[test]
    fn trailing_whitespace_is_visible() {
        let diff = render_diff("ab", "ab  \t");
        assert!(diff.contains("+ab  \\t"));
    }

    #[test]
    fn extra_lines_are_listed() {
        let diff = render_diff("a", "a\nb");
        assert!(diff.contains("@@ line 2 @@\n+b\n"));
    }
}
