//! Hierarchical chunking strategy

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{reindex, SemanticChunker};
use crate::domain::chunking::{
    BoundaryKind, Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, ChunkingStrategyKind,
    TokenCounter,
};
use crate::domain::DomainError;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap_or_else(|e| panic!("heading regex: {}", e)));

/// Groups content by the deepest enclosing heading and emits every chunk
/// with its full heading path (ancestor titles, outermost first).
///
/// A group over the budget is split with the semantic algorithm; every piece
/// keeps the group's path. A heading with no body merges forward into its
/// first child's group instead of becoming an empty chunk; a bare heading
/// with no child is emitted as its own chunk so no source line is lost.
#[derive(Debug, Clone)]
pub struct HierarchicalChunker {
    counter: Arc<dyn TokenCounter>,
    semantic: SemanticChunker,
}

/// One heading group: the section's own heading line plus the body lines
/// under it, up to the next heading.
#[derive(Debug)]
struct Section {
    path: Vec<String>,
    lines: Vec<String>,
    has_heading: bool,
}

impl Section {
    fn body_is_empty(&self) -> bool {
        self.lines
            .iter()
            .skip(usize::from(self.has_heading))
            .all(|l| l.trim().is_empty())
    }
}

impl HierarchicalChunker {
    /// Create a new hierarchical chunker
    pub fn new(counter: Arc<dyn TokenCounter>) -> Self {
        let semantic = SemanticChunker::new(Arc::clone(&counter));
        Self { counter, semantic }
    }

    fn parse_sections(content: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut stack: Vec<(usize, String)> = Vec::new();
        let mut current = Section {
            path: Vec::new(),
            lines: Vec::new(),
            has_heading: false,
        };

        for line in content.lines() {
            if let Some(caps) = HEADING.captures(line) {
                let level = caps[1].len();
                let title = caps[2].trim().to_string();

                sections.push(current);

                while stack.last().is_some_and(|(l, _)| *l >= level) {
                    stack.pop();
                }
                stack.push((level, title));

                current = Section {
                    path: stack.iter().map(|(_, t)| t.clone()).collect(),
                    lines: vec![line.to_string()],
                    has_heading: true,
                };
            } else {
                current.lines.push(line.to_string());
            }
        }

        sections.push(current);
        sections
    }

    /// Merge body-less headings forward into their first child's group.
    /// A bare heading with no descendant group still becomes its own group,
    /// so every source line survives into some chunk.
    fn merge_empty_forward(sections: Vec<Section>) -> Vec<Section> {
        let mut result: Vec<Section> = Vec::new();
        let mut carry: Vec<String> = Vec::new();
        let mut carry_path: Option<Vec<String>> = None;

        for mut section in sections {
            if section.body_is_empty() {
                if section.has_heading {
                    // Hold the bare heading for the next section, if that
                    // section turns out to be a descendant
                    carry.extend(section.lines);
                    carry_path = Some(section.path);
                }
                continue;
            }

            let is_child = carry_path
                .as_ref()
                .is_some_and(|p| section.path.starts_with(p));

            if is_child && !carry.is_empty() {
                let mut lines = std::mem::take(&mut carry);
                lines.append(&mut section.lines);
                section.lines = lines;
            } else if let Some(path) = carry_path.take() {
                result.push(Section {
                    path,
                    lines: std::mem::take(&mut carry),
                    has_heading: true,
                });
            }

            carry_path = None;
            result.push(section);
        }

        // Trailing bare headings at the end of the document
        if let Some(path) = carry_path {
            result.push(Section {
                path,
                lines: carry,
                has_heading: true,
            });
        }

        result
    }
}

impl ChunkingStrategy for HierarchicalChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let content = content.trim_end();

        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        let sections = Self::merge_empty_forward(Self::parse_sections(content));
        let mut chunks = Vec::new();

        for section in sections {
            let text = section.lines.join("\n");
            let text = text.trim();

            if text.is_empty() {
                continue;
            }

            if self.counter.count(text) <= config.max_tokens {
                let metadata = ChunkMetadata::new(
                    chunks.len(),
                    self.counter.count(text),
                    BoundaryKind::Paragraph,
                )
                .with_heading_path(section.path.clone());

                chunks.push(Chunk::new(text, metadata));
            } else {
                for mut chunk in self.semantic.split(text, config) {
                    chunk.metadata.heading_path = section.path.clone();
                    chunks.push(chunk);
                }
            }
        }

        reindex(&mut chunks);

        Ok(chunks)
    }

    fn kind(&self) -> ChunkingStrategyKind {
        ChunkingStrategyKind::Hierarchical
    }
}
