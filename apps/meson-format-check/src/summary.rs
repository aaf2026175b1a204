//! Job summary document builder.
//!
//! Elements render to the same HTML snippets the Actions job-summary
//! builder produces, so the result displays identically on the run page.
//! The buffer is written once per run and always overwrites the target.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const EOL: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the finished summary goes.
pub enum SummaryTarget {
    /// `$GITHUB_STEP_SUMMARY` or `--summary-file`.
    File(PathBuf),
    /// No summary file configured (local runs).
    Stdout,
    /// No summary file configured and stdout carries the JSON report.
    Stderr,
}

#[derive(Debug, Default)]
pub struct Summary {
    buffer: String,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.buffer.clear();
        self
    }

    pub fn add_raw(&mut self, text: &str, add_eol: bool) -> &mut Self {
        self.buffer.push_str(text);
        if add_eol {
            self.add_eol();
        }
        self
    }

    pub fn add_eol(&mut self) -> &mut Self {
        self.buffer.push_str(EOL);
        self
    }

    /// Levels outside `1..=6` fall back to `h1`.
    pub fn add_heading(&mut self, text: &str, level: u8) -> &mut Self {
        let tag = match level {
            1..=6 => format!("h{level}"),
            _ => "h1".to_string(),
        };
        let element = wrap(&tag, text, &[]);
        self.add_raw(&element, true)
    }

    pub fn add_break(&mut self) -> &mut Self {
        self.add_raw("<br>", true)
    }

    pub fn add_separator(&mut self) -> &mut Self {
        self.add_raw("<hr>", true)
    }

    /// Collapsible section; `content` is inserted verbatim.
    pub fn add_details(&mut self, label: &str, content: &str) -> &mut Self {
        let inner = format!("{}{}", wrap("summary", label, &[]), content);
        let element = wrap("details", &inner, &[]);
        self.add_raw(&element, true)
    }

    pub fn add_code_block(&mut self, code: &str, lang: Option<&str>) -> &mut Self {
        let attrs: Vec<(&str, &str)> = lang.map(|l| vec![("lang", l)]).unwrap_or_default();
        let element = wrap("pre", &wrap("code", code, &[]), &attrs);
        self.add_raw(&element, true)
    }

    /// Write the buffer to `target`, replacing previous content, then empty it.
    pub fn write(&mut self, target: &SummaryTarget) -> Result<()> {
        match target {
            SummaryTarget::File(path) => {
                fs::write(path, &self.buffer).map_err(|source| Error::Summary {
                    path: path.clone(),
                    source,
                })?;
                log::debug!("job summary written to {}", path.display());
            }
            SummaryTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(self.buffer.as_bytes())?;
                out.flush()?;
            }
            SummaryTarget::Stderr => {
                let mut err = std::io::stderr().lock();
                err.write_all(self.buffer.as_bytes())?;
                err.flush()?;
            }
        }
        self.buffer.clear();
        Ok(())
    }
}

fn wrap(tag: &str, content: &str, attrs: &[(&str, &str)]) -> String {
    let attrs: String = attrs
        .iter()
        .map(|(k, v)| format!(" {k}=\"{v}\""))
        .collect();
    format!("<{tag}{attrs}>{content}</{tag}>")
}

/// Render `items` as a bare HTML list, one `<li>` per item, no escaping.
pub fn markdown_list(items: &[String], ordered: bool) -> String {
    let list_type = if ordered { "ol" } else { "ul" };
    let content: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!("<{list_type}>{content}</{list_type}>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_markdown_list_unordered() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(markdown_list(&items, false), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(markdown_list(&items, true), "<ol><li>a</li><li>b</li></ol>");
        assert_eq!(markdown_list(&[], false), "<ul></ul>");
    }

    #[test]
    fn test_elements_render() {
        let mut s = Summary::new();
        s.add_heading("Result", 1)
            .add_raw("ok", true)
            .add_break()
            .add_details("Files", "<ul></ul>")
            .add_separator()
            .add_code_block("meson format -i \"a\"", Some("bash"));
        assert_eq!(
            s.as_str(),
            "<h1>Result</h1>\nok\n<br>\n<details><summary>Files</summary><ul></ul></details>\n<hr>\n<pre lang=\"bash\"><code>meson format -i \"a\"</code></pre>\n"
        );
    }

    #[test]
    fn test_heading_level_out_of_range_falls_back() {
        let mut s = Summary::new();
        s.add_heading("x", 9);
        assert_eq!(s.as_str(), "<h1>x</h1>\n");
    }

    #[test]
    fn test_write_overwrites_and_empties_buffer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.md");
        fs::write(&path, "stale content from an earlier step").unwrap();
        let mut s = Summary::new();
        s.add_raw("fresh", true);
        s.write(&SummaryTarget::File(path.clone())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        assert!(s.is_empty());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/summary.md");
        let mut s = Summary::new();
        s.add_raw("x", false);
        let err = s.write(&SummaryTarget::File(path)).unwrap_err();
        assert!(matches!(err, Error::Summary { .. }));
    }
}
