use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::ProjectCandidate;

#[derive(Debug)]
pub enum ProjectImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ProjectImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectImportError::Io(err) => write!(f, "failed to read project export: {}", err),
            ProjectImportError::Csv(err) => write!(f, "invalid project CSV data: {}", err),
        }
    }
}

impl std::error::Error for ProjectImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectImportError::Io(err) => Some(err),
            ProjectImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProjectImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProjectImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads `id,name,categories,stage,location` rows; categories are `;`-separated.
pub struct ProjectCsvImporter;

impl ProjectCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectCandidate>, ProjectImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProjectCandidate>, ProjectImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut projects = Vec::new();

        for row in csv_reader.deserialize::<ProjectRow>() {
            projects.push(row?.into_candidate());
        }

        Ok(projects)
    }
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    categories: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    stage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
}

impl ProjectRow {
    fn into_candidate(self) -> ProjectCandidate {
        let categories = self
            .categories
            .split(';')
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_string)
            .collect();

        ProjectCandidate {
            id: self.id,
            name: self.name,
            categories,
            stage: self.stage,
            location: self.location,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
