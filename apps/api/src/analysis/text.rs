//! Text scanning primitives shared by the JD and resume extractors.
//!
//! Every inference in the pipeline is built from the same operation: split the
//! input into lines, find the lines that mention a keyword, and keep each
//! trimmed line once. Keeping that in one place stops the two extractors from
//! drifting apart on what counts as a line or a duplicate.

/// Characters that end an evidence line.
const LINE_BREAKS: [char; 3] = ['\n', '.', ';'];

struct Line<'a> {
    original: &'a str,
    lower: String,
}

/// A lowercased view of an input text, pre-split into trimmed lines.
///
/// Snippets handed out by this type are always verbatim slices of the text
/// it was built from, which is what makes every quoted claim traceable.
pub struct ScannedText<'a> {
    lower: String,
    lines: Vec<Line<'a>>,
}

impl<'a> ScannedText<'a> {
    /// Splits on newlines, periods and semicolons.
    pub fn new(text: &'a str) -> Self {
        Self::with_breaks(text, &LINE_BREAKS)
    }

    /// Splits on newlines only. Education lines keep their punctuation
    /// ("B.Sc. Computer Science") so they are scanned this way.
    pub fn newline_only(text: &'a str) -> Self {
        Self::with_breaks(text, &['\n'])
    }

    fn with_breaks(text: &'a str, breaks: &[char]) -> Self {
        let lines = text
            .split(|c| breaks.contains(&c))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|original| Line {
                original,
                lower: original.to_lowercase(),
            })
            .collect();

        Self {
            lower: text.to_lowercase(),
            lines,
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    /// Non-overlapping occurrences of `needle` in the lowercased text.
    pub fn occurrences(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.lower.matches(needle).count()
    }

    /// Keywords from `keywords` that appear anywhere in the text, in list order.
    pub fn matched_keywords(&self, keywords: &[&'static str]) -> Vec<&'static str> {
        keywords
            .iter()
            .copied()
            .filter(|kw| self.lower.contains(kw))
            .collect()
    }

    /// Collects every line containing any of `keywords`.
    ///
    /// Lines are grouped by keyword in list order and each line is kept once,
    /// at the position of the first keyword that matched it.
    pub fn evidence_lines(&self, keywords: &[&str]) -> Vec<String> {
        let mut snippets = Vec::new();
        for keyword in keywords {
            if !self.lower.contains(keyword) {
                continue;
            }
            for line in &self.lines {
                if line.lower.contains(keyword) {
                    push_unique(&mut snippets, line.original);
                }
            }
        }
        snippets
    }

    /// Collects lines satisfying `predicate` (called with the lowercased line).
    pub fn lines_where(&self, predicate: impl Fn(&str) -> bool) -> Vec<String> {
        let mut snippets = Vec::new();
        for line in &self.lines {
            if predicate(&line.lower) {
                push_unique(&mut snippets, line.original);
            }
        }
        snippets
    }
}

fn push_unique(snippets: &mut Vec<String>, line: &str) {
    if !snippets.iter().any(|s| s == line) {
        snippets.push(line.to_string());
    }
}

/// First `n` snippets of `items`, cloned.
pub fn top(items: &[String], n: usize) -> Vec<String> {
    items.iter().take(n).cloned().collect()
}

/// Counts whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Shortens a quote for display, preferring a natural break point.
///
/// Used only when rendering; the structured result keeps full snippets.
pub fn trim_quote(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }

    let head = &chars[..max_len];
    let cut = |end: usize| chars[..end].iter().collect::<String>();
    let last_of = |targets: &[char]| head.iter().rposition(|c| targets.contains(c));

    if let Some(end) = last_of(&['.', '!', '?']) {
        if end as f64 > max_len as f64 * 0.6 {
            return cut(end + 1);
        }
    }

    if let Some(comma) = last_of(&[',']) {
        if comma as f64 > max_len as f64 * 0.6 {
            return format!("{}...", cut(comma));
        }
    }

    let head_str: String = head.iter().collect();
    for clause in [" and ", " or ", " but ", " with ", " for ", " to "] {
        if let Some(byte_idx) = head_str.rfind(clause) {
            let idx = head_str[..byte_idx].chars().count();
            if idx as f64 > max_len as f64 * 0.5 {
                return format!("{}...", cut(idx));
            }
        }
    }

    if let Some(space) = last_of(&[' ']) {
        if space as f64 > max_len as f64 * 0.5 {
            return format!("{}...", cut(space));
        }
    }

    format!("{head_str}...")
}
