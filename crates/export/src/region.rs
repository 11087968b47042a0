use std::collections::HashMap;

/// Wrap width used by transcript exports when the caller has no opinion.
pub const DEFAULT_WRAP_COLUMNS: usize = 96;

/// One logical block of rendered region content.
///
/// A paragraph maps to one rendered message: an optional bold heading
/// (icon prefix line) followed by its body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionParagraph {
    pub heading: Option<String>,
    pub body: String,
}

impl RegionParagraph {
    pub fn new(heading: Option<String>, body: impl Into<String>) -> Self {
        Self {
            heading,
            body: body.into(),
        }
    }
}

/// Snapshot of everything a rendered region currently shows.
///
/// The snapshot is plain data so export actions never need a live view,
/// and layout covers the full content rather than the visible viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionContent {
    paragraphs: Vec<RegionParagraph>,
    wrap_columns: usize,
}

impl RegionContent {
    pub fn new(wrap_columns: usize) -> Self {
        Self {
            paragraphs: Vec::new(),
            wrap_columns: wrap_columns.max(1),
        }
    }

    pub fn push(&mut self, paragraph: RegionParagraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn paragraphs(&self) -> &[RegionParagraph] {
        &self.paragraphs
    }

    pub fn wrap_columns(&self) -> usize {
        self.wrap_columns
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Lays the full content out as wrapped lines.
    ///
    /// Paragraph order is preserved exactly; consecutive paragraphs are
    /// separated by one blank line.
    pub fn layout(&self) -> RegionLayout {
        let mut lines = Vec::new();

        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if index > 0 {
                lines.push(RegionLine::blank());
            }

            if let Some(heading) = &paragraph.heading {
                for text in wrap_text(heading, self.wrap_columns) {
                    lines.push(RegionLine::new(text, LineRole::Heading));
                }
            }

            if !paragraph.body.is_empty() {
                for text in wrap_text(&paragraph.body, self.wrap_columns) {
                    lines.push(RegionLine::new(text, LineRole::Body));
                }
            }
        }

        RegionLayout {
            columns: self.wrap_columns,
            lines,
        }
    }
}

/// Visual role of one laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Heading,
    Body,
    Blank,
}

/// One laid-out line of region content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLine {
    pub text: String,
    pub role: LineRole,
}

impl RegionLine {
    pub fn new(text: impl Into<String>, role: LineRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    pub fn blank() -> Self {
        Self::new(String::new(), LineRole::Blank)
    }
}

/// Full logical layout of a region, independent of any viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLayout {
    pub columns: usize,
    pub lines: Vec<RegionLine>,
}

/// Id-keyed store of published region snapshots.
///
/// Rendering surfaces publish here; export actions resolve regions by id.
/// Looking up an id nothing has published returns `None`, which callers
/// treat as a silent no-op.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: HashMap<String, RegionContent>,
}

impl RegionRegistry {
    pub fn publish(&mut self, region_id: impl Into<String>, content: RegionContent) {
        self.regions.insert(region_id.into(), content);
    }

    pub fn withdraw(&mut self, region_id: &str) -> Option<RegionContent> {
        self.regions.remove(region_id)
    }

    pub fn lookup(&self, region_id: &str) -> Option<&RegionContent> {
        self.regions.get(region_id)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Greedy word wrap at `columns`, preserving explicit newlines.
///
/// Words longer than one full line are hard-split so no output line ever
/// exceeds `columns` characters.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        wrap_single_line(raw_line, columns, &mut lines);
    }

    lines
}

fn wrap_single_line(raw_line: &str, columns: usize, lines: &mut Vec<String>) {
    let mut words = raw_line.split_whitespace().peekable();
    if words.peek().is_none() {
        lines.push(String::new());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0usize;

    for word in words {
        let word_width = word.chars().count();

        if word_width > columns {
            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            // The trailing chunk stays open so following words can join it.
            let mut chunks = split_oversized_word(word, columns);
            let tail = chunks.pop().unwrap_or_default();
            lines.extend(chunks);
            current_width = tail.chars().count();
            current = tail;
            continue;
        }

        let needed = if current_width == 0 {
            word_width
        } else {
            word_width + 1
        };

        if current_width + needed <= columns {
            if current_width > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += needed;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_width = word_width;
        }
    }

    if current_width > 0 {
        lines.push(current);
    }
}

fn split_oversized_word(word: &str, columns: usize) -> Vec<String> {
    word.chars()
        .collect::<Vec<_>>()
        .chunks(columns)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(heading: Option<&str>, body: &str) -> RegionParagraph {
        RegionParagraph::new(heading.map(str::to_string), body)
    }

    #[test]
    fn layout_preserves_paragraph_order() {
        let mut content = RegionContent::new(80);
        content.push(paragraph(Some("first"), "alpha"));
        content.push(paragraph(Some("second"), "beta"));
        content.push(paragraph(None, "gamma"));

        let texts = content
            .layout()
            .lines
            .iter()
            .filter(|line| line.role != LineRole::Blank)
            .map(|line| line.text.clone())
            .collect::<Vec<_>>();

        assert_eq!(texts, ["first", "alpha", "second", "beta", "gamma"]);
    }

    #[test]
    fn layout_separates_paragraphs_with_blank_lines() {
        let mut content = RegionContent::new(80);
        content.push(paragraph(None, "one"));
        content.push(paragraph(None, "two"));

        let roles = content
            .layout()
            .lines
            .iter()
            .map(|line| line.role)
            .collect::<Vec<_>>();

        assert_eq!(roles, [LineRole::Body, LineRole::Blank, LineRole::Body]);
    }

    #[test]
    fn wrap_respects_column_limit() {
        let wrapped = wrap_text("the quick brown fox jumps over the lazy dog", 10);

        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(line.chars().count() <= 10, "line too wide: {line:?}");
        }
        assert_eq!(
            wrapped.join(" "),
            "the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        let wrapped = wrap_text("abcdefghij", 4);

        assert_eq!(wrapped, ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_keeps_explicit_newlines_and_blank_lines() {
        let wrapped = wrap_text("one\n\ntwo", 20);

        assert_eq!(wrapped, ["one", "", "two"]);
    }

    #[test]
    fn registry_lookup_misses_unknown_ids() {
        let mut registry = RegionRegistry::default();
        assert!(registry.lookup("transcript-message-list").is_none());

        registry.publish("transcript-message-list", RegionContent::new(80));
        assert!(registry.lookup("transcript-message-list").is_some());
        assert!(registry.lookup("somewhere-else").is_none());

        registry.withdraw("transcript-message-list");
        assert!(registry.lookup("transcript-message-list").is_none());
    }
}
