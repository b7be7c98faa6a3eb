//! Starter templates and the in-place code block rewrite.
//!
//! Writing a template is split in two: [`build_replacement`] is a pure text transform, and
//! [`commit_template_sync`] runs it against a [`DocumentHost`]. The document is only replaced
//! when the section still starts and ends with the expected fences.

use crate::SheetConfig;
use crate::model::{DieFace, LAYOUT_ONE_THIRD_TWO_THIRD, LayoutRegion, Rating, StatBlock, Trait};
use indexmap::IndexMap;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, TemplateError>;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("no document at {path}")]
    FileNotFound { path: String },

    #[error("no section found for the code block")]
    SectionNotFound,

    #[error("invalid section: lines {line_start}..={line_end} are not a `{fence}` code block")]
    FenceMismatch {
        line_start: usize,
        line_end: usize,
        fence: String,
    },

    #[error("failed to serialize template: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Underworld,
}

impl TemplateKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "underworld" => Some(Self::Underworld),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Underworld => "underworld",
        }
    }

    /// Returns the template named by a top-level `template` string, if it is a known one.
    pub fn requested_by(value: &Value) -> Option<Self> {
        value
            .get("template")
            .and_then(Value::as_str)
            .and_then(Self::from_name)
    }

    pub fn stat_block(self) -> StatBlock {
        match self {
            Self::Underworld => underworld(),
        }
    }
}

fn underworld() -> StatBlock {
    fn uniform(title: &str, labels: &[&str], face: DieFace) -> Trait {
        labels
            .iter()
            .fold(Trait::new(title), |t, label| t.with_rating(*label, face))
    }

    StatBlock::new("Character Name")
        .with_layout(LAYOUT_ONE_THIRD_TWO_THIRD)
        .with_trait(
            uniform(
                "Attributes",
                &["Might", "Wit", "Presence", "Reason", "Courage", "Grace"],
                DieFace::D4,
            )
            .in_region(LayoutRegion::Left),
        )
        .with_trait(
            uniform(
                "Roles",
                &["Bruiser", "Face", "Driver", "Marksman", "Mastermind", "Hacker"],
                DieFace::D4,
            )
            .in_region(LayoutRegion::Left),
        )
        .with_trait(
            uniform(
                "Stress",
                &["Afraid", "Angry", "Exhausted", "Injured", "Heat", "Insecure"],
                DieFace::Unrated,
            )
            .in_region(LayoutRegion::Left),
        )
        .with_trait(
            uniform(
                "Distinctions",
                &[
                    "Why did you turn to the revolution?",
                    "How did you fall through the cracks in society?",
                    "Do you have a life contract with a Corp?",
                ],
                DieFace::D8,
            )
            .with_sfx(
                "Hinder",
                "Step a distinction down to a [d4] for a roll to gain a [PP]",
            ),
        )
        .with_trait(uniform(
            "Bonds",
            &[
                "Character 1",
                "Character 2",
                "Character 3",
                "Character 4",
                "Character 5",
            ],
            DieFace::D4,
        ))
        .with_trait(uniform(
            "Specialties",
            &["Speciality 1", "Speciality 2"],
            DieFace::D6,
        ))
        .with_trait(Trait {
            title: "Talents".to_string(),
            layout_region: None,
            sfx: Some(IndexMap::from([
                ("Talent 1".to_string(), "Rules description".to_string()),
                (
                    "Talent 2".to_string(),
                    "You can use [d4] - [D12], and [PP]".to_string(),
                ),
            ])),
            ratings: IndexMap::<String, Rating>::new(),
        })
}

/// Zero-based, inclusive line span of a fenced code block (fence lines included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInfo {
    pub line_start: usize,
    pub line_end: usize,
}

/// Replaces the interior of `section` with the pretty-printed `block`.
pub fn build_replacement(
    document: &str,
    section: SectionInfo,
    block: &StatBlock,
    fence: &str,
) -> Result<String> {
    let lines: Vec<&str> = document.split('\n').collect();
    let SectionInfo {
        line_start,
        line_end,
    } = section;
    if line_start >= line_end || line_end >= lines.len() {
        return Err(TemplateError::SectionNotFound);
    }

    let opening = format!("```{fence}");
    let is_line = |idx: usize, expected: &str| lines[idx].trim_end_matches('\r') == expected;
    if !is_line(line_start, &opening) || !is_line(line_end, "```") {
        return Err(TemplateError::FenceMismatch {
            line_start,
            line_end,
            fence: fence.to_string(),
        });
    }

    // Lines keep their `\r` when the document uses CRLF; the body has to match.
    let mut body = serde_json::to_string_pretty(block)?;
    if lines[line_start].ends_with('\r') {
        body = body.replace('\n', "\r\n");
        body.push('\r');
    }
    let mut out: Vec<&str> = Vec::with_capacity(line_start + 2 + lines.len() - line_end);
    out.extend_from_slice(&lines[..=line_start]);
    out.push(&body);
    out.extend_from_slice(&lines[line_end..]);
    Ok(out.join("\n"))
}

/// Host storage for the documents code blocks live in.
pub trait DocumentHost {
    fn exists(&self, path: &str) -> bool;

    /// Read-modify-write of one document. When `edit` fails the stored text must stay unchanged
    /// and the error is returned.
    fn process(
        &mut self,
        path: &str,
        edit: &mut dyn FnMut(&str) -> Result<String>,
    ) -> Result<()>;
}

/// Documents held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentHost {
    documents: IndexMap<String, String>,
}

impl MemoryDocumentHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }
}

impl DocumentHost for MemoryDocumentHost {
    fn exists(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    fn process(
        &mut self,
        path: &str,
        edit: &mut dyn FnMut(&str) -> Result<String>,
    ) -> Result<()> {
        let Some(current) = self.documents.get_mut(path) else {
            return Err(TemplateError::FileNotFound {
                path: path.to_string(),
            });
        };
        let updated = edit(current)?;
        *current = updated;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    pub source_path: String,
    /// `None` when the host could not locate the originating block.
    pub section: Option<SectionInfo>,
    pub kind: TemplateKind,
}

pub fn commit_template_sync(
    host: &mut dyn DocumentHost,
    request: &TemplateRequest,
    config: &SheetConfig,
) -> Result<()> {
    let result = commit_inner(host, request, config);
    match &result {
        Ok(()) => tracing::info!(
            path = %request.source_path,
            template = request.kind.name(),
            "template written"
        ),
        Err(err) => tracing::error!(
            path = %request.source_path,
            template = request.kind.name(),
            error = %err,
            "template not written"
        ),
    }
    result
}

/// Executor-agnostic wrapper over [`commit_template_sync`].
pub async fn commit_template(
    host: &mut dyn DocumentHost,
    request: &TemplateRequest,
    config: &SheetConfig,
) -> Result<()> {
    commit_template_sync(host, request, config)
}

fn commit_inner(
    host: &mut dyn DocumentHost,
    request: &TemplateRequest,
    config: &SheetConfig,
) -> Result<()> {
    if !host.exists(&request.source_path) {
        return Err(TemplateError::FileNotFound {
            path: request.source_path.clone(),
        });
    }
    let section = request.section.ok_or(TemplateError::SectionNotFound)?;
    let block = request.kind.stat_block();
    let fence = config.fence();

    host.process(&request.source_path, &mut |document: &str| {
        build_replacement(document, section, &block, fence)
    })
}
