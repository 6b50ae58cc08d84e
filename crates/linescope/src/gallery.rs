//! Project gallery
//!
//! Loads the portfolio's `projects.json` and answers the queries the project
//! pages make of it: the heading count, the latest few projects, free-text
//! search, and the per-year pie with its year filter.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Gallery errors
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Failed to read the projects file
    #[error("Failed to read projects file: {0}")]
    Io(#[from] std::io::Error),

    /// The projects file is not valid JSON
    #[error("Failed to parse projects file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A portfolio project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project title
    #[serde(default)]
    pub title: String,
    /// Image path or URL
    #[serde(default)]
    pub image: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Year, written as text or a number in the source
    #[serde(default, deserialize_with = "year_text")]
    pub year: String,
}

impl Project {
    fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.image, &self.description, &self.year]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

fn year_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Resolve an image path relative to the project pages
///
/// Absolute URLs and paths already starting with `../` are kept; anything
/// else loses a leading `./` and gains a `../` prefix. An empty path stays
/// empty.
#[must_use]
pub fn resolve_image(image: &str) -> String {
    let lower = image.to_ascii_lowercase();
    if image.is_empty()
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || image.starts_with("../")
    {
        return image.to_string();
    }
    format!("../{}", image.strip_prefix("./").unwrap_or(image))
}

/// Projects with any field containing `query`, ignoring case
///
/// An empty query matches everything.
#[must_use]
pub fn search<'a, I>(projects: I, query: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    let needle = query.to_lowercase();
    projects.into_iter().filter(|p| p.matches(&needle)).collect()
}

/// Projects with the same year, for the pie chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSlice {
    /// The year
    pub label: String,
    /// Number of projects
    pub value: usize,
}

/// Count projects per year, in the order years first appear
#[must_use]
pub fn year_slices<'a, I>(projects: I) -> Vec<YearSlice>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut slices: Vec<YearSlice> = Vec::new();
    for project in projects {
        match slices.iter_mut().find(|s| s.label == project.year) {
            Some(slice) => slice.value += 1,
            None => slices.push(YearSlice {
                label: project.year.clone(),
                value: 1,
            }),
        }
    }
    slices
}

/// Projects from one year
#[must_use]
pub fn filter_year<'a, I>(projects: I, year: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects.into_iter().filter(|p| p.year == year).collect()
}

/// The loaded project list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Gallery {
    projects: Vec<Project>,
}

impl Gallery {
    /// Load a projects file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not JSON.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, GalleryError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&text)
    }

    /// Parse a projects document
    ///
    /// A document that is not an array yields an empty gallery; entries that
    /// are not objects are skipped. Image paths are resolved on load.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON.
    pub fn parse_str(text: &str) -> Result<Self, GalleryError> {
        let Value::Array(entries) = serde_json::from_str::<Value>(text)? else {
            warn!("Projects document is not an array; showing no projects");
            return Ok(Self::default());
        };

        let mut projects = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Project>(entry) {
                Ok(mut project) => {
                    project.image = resolve_image(&project.image);
                    projects.push(project);
                }
                Err(e) => warn!(index, error = %e, "Skipping malformed project entry"),
            }
        }

        debug!(projects = projects.len(), "Loaded projects");
        Ok(Self { projects })
    }

    /// All projects in document order
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Check whether there are no projects
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Page heading, e.g. `Projects (12)`
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Projects ({})", self.projects.len())
    }

    /// The first `n` projects, which the document lists newest first
    #[must_use]
    pub fn latest(&self, n: usize) -> &[Project] {
        &self.projects[..n.min(self.projects.len())]
    }
}
