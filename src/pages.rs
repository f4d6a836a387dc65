/// Static content pages
///
/// Pages are small markdown-like files:
///
/// ```text
/// # Title
/// > One line description
///
/// A paragraph.
///
/// ## A heading
/// Another paragraph.
/// [Email](mailto:someone@example.com)
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File extension of content pages
pub const PAGE_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum PageError {
    #[error("page '{0}' not found")]
    NotFound(String),

    #[error("failed to read page {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("page {0} has no '# Title' line")]
    MissingTitle(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    /// `[label](target)` on a line of its own
    Link { label: String, target: String },
}

fn parse_link(line: &str) -> Option<Block> {
    let (label, rest) = line.strip_prefix('[')?.split_once("](")?;
    let target = rest.strip_suffix(')')?;
    if label.is_empty() || target.is_empty() {
        return None;
    }
    Some(Block::Link {
        label: label.to_string(),
        target: target.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub description: String,
    pub blocks: Vec<Block>,
}

impl Page {
    /// Parse page text. Returns None when there is no title line.
    pub fn parse(id: impl Into<String>, text: &str) -> Option<Self> {
        let mut title = None;
        let mut description = String::new();
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.lines().map(str::trim) {
            if let Some(heading) = line.strip_prefix("## ") {
                flush(&mut paragraph, &mut blocks);
                blocks.push(Block::Heading(heading.trim().to_string()));
            } else if let Some(text) = line.strip_prefix("# ") {
                flush(&mut paragraph, &mut blocks);
                if title.is_none() {
                    title = Some(text.trim().to_string());
                }
            } else if let Some(text) = line.strip_prefix('>') {
                flush(&mut paragraph, &mut blocks);
                if description.is_empty() {
                    description = text.trim().to_string();
                }
            } else if line.is_empty() {
                flush(&mut paragraph, &mut blocks);
            } else if let Some(link) = parse_link(line) {
                flush(&mut paragraph, &mut blocks);
                blocks.push(link);
            } else {
                paragraph.push(line);
            }
        }
        flush(&mut paragraph, &mut blocks);

        Some(Self {
            id: id.into(),
            title: title?,
            description,
            blocks,
        })
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = std::fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(id, &text).ok_or_else(|| PageError::MissingTitle(path.to_path_buf()))
    }

    /// The "Myself" page, always available
    pub fn about() -> Self {
        Self {
            id: "about".to_string(),
            title: "Hi, I'm Michael!".to_string(),
            description: "Product manager, builder, and long-distance cyclist.".to_string(),
            blocks: vec![
                Block::Paragraph(
                    "I like to build products centered on customer experiences and go on biking adventures."
                        .to_string(),
                ),
                Block::Heading("Get in touch".to_string()),
                Block::Paragraph(
                    "I'm always open to discussing product management, new opportunities, or anything bike related."
                        .to_string(),
                ),
                Block::Link {
                    label: "Email".to_string(),
                    target: "mailto:mhoefert1@gmail.com".to_string(),
                },
                Block::Link {
                    label: "LinkedIn".to_string(),
                    target: "https://www.linkedin.com/in/michael-hoefert/".to_string(),
                },
            ],
        }
    }
}

fn flush(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(paragraph.join(" ")));
        paragraph.clear();
    }
}

/// Summary of a page on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub id: String,
    pub title: String,
    pub path: PathBuf,
}

/// Index of the content pages found under a directory
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    entries: Vec<PageEntry>,
}

impl PageIndex {
    /// Walk `dir` for page files. Unreadable pages are skipped with a warning.
    pub fn scan(dir: &Path) -> Self {
        let mut entries = Vec::new();

        for entry in WalkDir::new(dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_page = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PAGE_EXTENSION));
            if !is_page {
                continue;
            }

            match Page::load(path) {
                Ok(page) => entries.push(PageEntry {
                    id: page.id,
                    title: page.title,
                    path: path.to_path_buf(),
                }),
                Err(e) => tracing::warn!("Skipping page: {e}"),
            }
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::debug!("Indexed {} content pages in {}", entries.len(), dir.display());
        Self { entries }
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn load(&self, id: &str) -> Result<Page, PageError> {
        if id == "about" {
            return Ok(Page::about());
        }
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| PageError::NotFound(id.to_string()))?;
        Page::load(&entry.path)
    }
}
