//! Finite-state scanner that locates a `model <Name> { ... }` block.
//!
//! The scanner never copies or normalizes text; it only reports byte
//! offsets, so callers can splice the document without touching any byte
//! outside the region they edit.
//!
//! `//` line comments and `"..."` string literals are skipped in every
//! state: a brace or keyword inside them is never structure. A comment
//! counts as whitespace.
//!
//! States:
//!
//! ```text
//! Seeking --"model" at brace depth 0--> InHeader
//! InHeader --identifier == target, then '{'--> InBlock
//! InHeader --other identifier / punctuation / string--> Seeking
//! InBlock --first '}' outside strings and comments--> Done
//! ```

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for a `model` keyword at the top level.
    Seeking,
    /// Saw `model`; the next identifier and an opening brace decide whether
    /// this is the target.
    InHeader,
    /// Inside the target block, waiting for its closing brace.
    InBlock,
    /// The closing brace was found.
    Done,
}

/// Whether a character is code, comment text, or string text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Lexical {
    #[default]
    Code,
    LineComment,
    Str {
        escaped: bool,
    },
}

impl Lexical {
    /// Advances over `ch` and reports whether it is code.
    ///
    /// The opening quote of a string is code; its contents, the closing
    /// quote and everything from `//` to the end of the line are not.
    pub(crate) fn step(&mut self, ch: char, next: Option<char>) -> bool {
        match *self {
            Self::LineComment => {
                if ch == '\n' {
                    *self = Self::Code;
                }
                false
            }
            Self::Str { escaped } => {
                *self = match ch {
                    _ if escaped => Self::Str { escaped: false },
                    '\\' => Self::Str { escaped: true },
                    '"' => Self::Code,
                    _ => Self::Str { escaped: false },
                };
                false
            }
            Self::Code => {
                if ch == '/' && next == Some('/') {
                    *self = Self::LineComment;
                    return false;
                }
                if ch == '"' {
                    *self = Self::Str { escaped: false };
                }
                true
            }
        }
    }
}

/// `line` up to its `//` comment, if any. A `//` inside a string is kept.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    let mut lexical = Lexical::default();
    let mut chars = line.char_indices().peekable();
    while let Some((at, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        lexical.step(ch, next);
        if lexical == Lexical::LineComment {
            return &line[..at];
        }
    }
    line
}

/// Byte offsets of a located model block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// Offset of the `model` keyword.
    pub header_start: usize,
    /// Offset just past the model name.
    pub name_end: usize,
    /// Offset of the opening `{`.
    pub open_brace: usize,
    /// Offset of the closing `}`.
    pub close_brace: usize,
}

impl BlockSpan {
    /// Offset of the first byte of the block body.
    pub fn body_start(&self) -> usize {
        self.open_brace + 1
    }

    /// The text between the opening and closing braces.
    pub fn body<'a>(&self, document: &'a str) -> &'a str {
        &document[self.body_start()..self.close_brace]
    }
}

/// Result of scanning a document for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Found(BlockSpan),
    /// The header matched but the document ended before a closing brace.
    Unterminated { header_start: usize },
    NotFound,
}

/// Scans a document for the block of one model.
#[derive(Debug)]
pub struct BlockScanner<'a> {
    document: &'a str,
    target: &'a str,
    state: ScanState,
    lexical: Lexical,
    depth: usize,
    run_start: Option<usize>,
    header_start: usize,
    name_end: Option<usize>,
    open_brace: usize,
    close_brace: Option<usize>,
}

impl<'a> BlockScanner<'a> {
    pub fn new(document: &'a str, target: &'a str) -> Self {
        Self {
            document,
            target,
            state: ScanState::Seeking,
            lexical: Lexical::Code,
            depth: 0,
            run_start: None,
            header_start: 0,
            name_end: None,
            open_brace: 0,
            close_brace: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Runs the scanner to completion.
    pub fn run(mut self) -> ScanOutcome {
        let mut chars = self.document.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            let next = chars.peek().map(|&(_, c)| c);
            self.feed(offset, ch, next);
            if self.state == ScanState::Done {
                break;
            }
        }
        if self.state != ScanState::Done {
            // Flush an identifier run that reaches end of input.
            self.feed(self.document.len(), '\n', None);
        }

        match (self.state, self.name_end, self.close_brace) {
            (ScanState::Done, Some(name_end), Some(close_brace)) => {
                ScanOutcome::Found(BlockSpan {
                    header_start: self.header_start,
                    name_end,
                    open_brace: self.open_brace,
                    close_brace,
                })
            }
            (ScanState::InBlock, _, _) | (ScanState::InHeader, Some(_), _) => {
                ScanOutcome::Unterminated {
                    header_start: self.header_start,
                }
            }
            _ => ScanOutcome::NotFound,
        }
    }

    fn feed(&mut self, offset: usize, ch: char, next: Option<char>) {
        let is_code = self.lexical.step(ch, next);
        let in_header = matches!(self.state, ScanState::Seeking | ScanState::InHeader);

        if is_code && in_header && is_ident_char(ch) {
            self.run_start.get_or_insert(offset);
            return;
        }
        if let Some(start) = self.run_start.take() {
            self.end_run(start, offset);
        }
        if !is_code {
            return;
        }

        match self.state {
            ScanState::Seeking => self.track_depth(ch),
            ScanState::InHeader => self.feed_header(offset, ch),
            ScanState::InBlock => self.feed_block(offset, ch),
            ScanState::Done => {}
        }
    }

    fn end_run(&mut self, start: usize, end: usize) {
        let run = &self.document[start..end];
        match self.state {
            ScanState::Seeking if self.depth == 0 && run == "model" => {
                self.header_start = start;
                self.name_end = None;
                self.transition(ScanState::InHeader, start);
            }
            ScanState::InHeader if self.name_end.is_none() && run == self.target => {
                self.name_end = Some(end);
            }
            // `model model User {` restarts the header at the second keyword
            ScanState::InHeader if run == "model" => {
                self.header_start = start;
                self.name_end = None;
            }
            ScanState::InHeader => self.abandon_header(start),
            _ => {}
        }
    }

    fn feed_header(&mut self, offset: usize, ch: char) {
        if ch.is_whitespace() {
            return;
        }
        if ch == '{' && self.name_end.is_some() {
            self.open_brace = offset;
            self.transition(ScanState::InBlock, offset);
            return;
        }
        self.abandon_header(offset);
        self.track_depth(ch);
    }

    fn abandon_header(&mut self, offset: usize) {
        self.name_end = None;
        self.transition(ScanState::Seeking, offset);
    }

    fn feed_block(&mut self, offset: usize, ch: char) {
        if ch == '}' {
            self.close_brace = Some(offset);
            self.transition(ScanState::Done, offset);
        }
    }

    fn track_depth(&mut self, ch: char) {
        match ch {
            '{' => self.depth += 1,
            '}' => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }

    fn transition(&mut self, next: ScanState, offset: usize) {
        tracing::trace!(from = ?self.state, to = ?next, offset, target = self.target, "scanner");
        self.state = next;
    }
}

/// Identifier characters; a run of them forms one word.
fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Locates the block of model `name` in `document`.
pub fn locate_block(document: &str, name: &str) -> ScanOutcome {
    BlockScanner::new(document, name).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(document: &str, name: &str) -> BlockSpan {
        match locate_block(document, name) {
            ScanOutcome::Found(span) => span,
            other => panic!("expected block for {name}, got {other:?}"),
        }
    }

    #[test]
    fn finds_simple_block() {
        let doc = "model User {\n\tid Int @id\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, 0);
        assert_eq!(span.name_end, 10);
        assert_eq!(span.open_brace, 11);
        assert_eq!(&doc[span.close_brace..], "}\n");
        assert_eq!(span.body(doc), "\n\tid Int @id\n");
    }

    #[test]
    fn brace_directly_after_name() {
        let doc = "model User{ id Int @id }";
        let span = found(doc, "User");
        assert_eq!(span.open_brace, 10);
        assert_eq!(span.body(doc), " id Int @id ");
    }

    #[test]
    fn prefix_name_does_not_match() {
        let doc = "model UserProfile {\n\tid Int @id\n}\n";
        assert_eq!(locate_block(doc, "User"), ScanOutcome::NotFound);
    }

    #[test]
    fn repeated_keyword_restarts_header() {
        let doc = "model model User {\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, 6);
    }

    #[test]
    fn keyword_in_comment_is_skipped() {
        let doc = "// generated model\nmodel User {\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, 19);
    }

    #[test]
    fn longer_target_does_not_match_shorter_name() {
        let doc = "model User {\n\tid Int @id\n}\n";
        assert_eq!(locate_block(doc, "Use"), ScanOutcome::NotFound);
    }

    #[test]
    fn type_reference_is_not_a_header() {
        let doc = "model Post {\n\tauthor User\n}\n\nmodel User {\n\tid Int @id\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, doc.find("model User").unwrap());
    }

    #[test]
    fn field_named_model_inside_block_is_ignored() {
        let doc = "model Car {\n\tmodel User?\n}\n\nmodel User {\n\tid Int @id\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, doc.find("model User {").unwrap());
    }

    #[test]
    fn skips_other_declarations() {
        let doc = "datasource db {\n\tprovider = \"sqlite\"\n}\n\nmodel Tag {\n\tid Int @id\n}\n";
        let span = found(doc, "Tag");
        assert_eq!(span.body(doc), "\n\tid Int @id\n");
    }

    #[test]
    fn header_interrupted_by_punctuation_resumes_seeking() {
        let doc = "model = User\nmodel User {\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, 13);
    }

    #[test]
    fn unbalanced_brace_in_comment_keeps_later_models_visible() {
        let doc = "// see {docs\nmodel User {\n\tid Int @id\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, 13);
        assert_eq!(span.body(doc), "\n\tid Int @id\n");
    }

    #[test]
    fn braces_in_top_level_string_are_not_structure() {
        let doc = "datasource db {\n\turl = \"file:{{dev}.db\"\n}\n\nmodel User {\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, doc.find("model User").unwrap());
    }

    #[test]
    fn closing_brace_inside_string_does_not_end_block() {
        let doc = "model User {\n\ttmpl String @default(\"}\")\n\tid Int @id\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.close_brace, doc.rfind('}').unwrap());
        assert!(span.body(doc).contains("id Int @id"));
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let doc = "model User {\n\tq String @default(\"a\\\"}\")\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.close_brace, doc.rfind('}').unwrap());
    }

    #[test]
    fn closing_brace_inside_comment_does_not_end_block() {
        let doc = "model User {\n\t// }\n\tid Int @id\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.close_brace, doc.rfind('}').unwrap());
    }

    #[test]
    fn commented_out_header_is_not_a_declaration() {
        let doc = "// model User was dropped\nmodel Post {\n\tid Int @id\n}\n";
        assert_eq!(locate_block(doc, "User"), ScanOutcome::NotFound);
        assert_eq!(found(doc, "Post").header_start, 26);
    }

    #[test]
    fn name_must_be_followed_by_brace() {
        let doc = "model User was dropped\nmodel Post {\n}\n";
        assert_eq!(locate_block(doc, "User"), ScanOutcome::NotFound);

        let doc = "model User = 1\nmodel User {\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.header_start, 15);
    }

    #[test]
    fn comment_between_name_and_brace() {
        let doc = "model User // people\n{\n}\n";
        let span = found(doc, "User");
        assert_eq!(span.open_brace, doc.find('{').unwrap());
    }

    #[test]
    fn unterminated_block() {
        let doc = "model User {\n\tid Int @id\n";
        assert_eq!(
            locate_block(doc, "User"),
            ScanOutcome::Unterminated { header_start: 0 }
        );
    }

    #[test]
    fn name_at_end_of_input_is_unterminated() {
        assert_eq!(
            locate_block("model User", "User"),
            ScanOutcome::Unterminated { header_start: 0 }
        );
    }

    #[test]
    fn empty_document() {
        assert_eq!(locate_block("", "User"), ScanOutcome::NotFound);
    }

    #[test]
    fn scanner_starts_seeking() {
        assert_eq!(BlockScanner::new("", "A").state(), ScanState::Seeking);
    }

    #[test]
    fn non_ascii_text_passes_through() {
        let doc = "// café ☕\nmodel Café {\n}\nmodel User {\n\tname String @default(\"ü\")\n}\n";
        let span = found(doc, "User");
        assert!(span.body(doc).contains("\"ü\""));
    }

    #[test]
    fn strip_line_comment_keeps_slashes_in_strings() {
        assert_eq!(strip_line_comment("\tx Int // note"), "\tx Int ");
        assert_eq!(
            strip_line_comment("\turl String @default(\"a//b\")"),
            "\turl String @default(\"a//b\")"
        );
        assert_eq!(strip_line_comment("// only"), "");
    }
}
