/// Content page scaffolding for `folio generate-pages`
///
/// Writes new pages from a fixed template. Existing files are never
/// overwritten.
use std::fs;
use std::path::Path;

use crate::pages::PAGE_EXTENSION;

const TEMPLATE: &str = "# {title}
> {description}

[Your content here]

## My Approach

[Describe your approach to this phase]

## Case Study: [Project Name]

[Describe a relevant case study]

## Outcomes & Impact

[Describe the outcomes and impact of your work]

## Tools & Methods

[List tools and methods used]

## Next Steps

[Describe what comes next after this phase]
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl PageSpec {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn render(&self) -> String {
        TEMPLATE
            .replace("{title}", &self.title)
            .replace("{description}", &self.description)
    }
}

/// The product process pages
pub fn default_pages() -> Vec<PageSpec> {
    vec![
        PageSpec::new(
            "vision-strategy",
            "Vision, Strategy & Specifications",
            "Defining clear product vision, strategy, and detailed specifications to guide development.",
        ),
        PageSpec::new(
            "roadmapping",
            "Roadmapping",
            "Creating and maintaining a strategic product roadmap that aligns with business goals.",
        ),
        PageSpec::new(
            "delivery",
            "Delivery",
            "Leading cross-functional teams to deliver high-quality products on time and within scope.",
        ),
        PageSpec::new(
            "launch-measure-iterate",
            "Launch, Measure & Iterate",
            "Successfully launching products, measuring impact, and iterating based on data and feedback.",
        ),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Write each page into `dir`, creating the directory if needed
pub fn generate(dir: &Path, pages: &[PageSpec]) -> std::io::Result<ScaffoldReport> {
    fs::create_dir_all(dir)?;

    let mut report = ScaffoldReport::default();
    for page in pages {
        let filename = format!("{}.{PAGE_EXTENSION}", page.id);
        let path = dir.join(&filename);

        if path.exists() {
            tracing::info!("Skipping {filename} - file already exists");
            report.skipped.push(page.id.clone());
            continue;
        }

        fs::write(&path, page.render())?;
        tracing::info!("Created {filename}");
        report.created.push(page.id.clone());
    }

    tracing::info!("Page generation complete!");
    Ok(report)
}
