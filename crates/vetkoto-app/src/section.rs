//! Section fragments
//!
//! Each navigation target has a small TOML fragment (`<id>.toml`) with a
//! title, intro lines and toolbar hints. Fragments are read from the
//! configured directory on every navigation, or from the built-in set.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use vetkoto_core::prelude::*;
use vetkoto_core::Entity;

/// Id of the landing section.
pub const DASHBOARD: &str = "dashboard";

/// Section ids in navigation order.
pub fn section_ids() -> Vec<&'static str> {
    std::iter::once(DASHBOARD)
        .chain(Entity::ALL.iter().map(Entity::as_str))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolbarAction {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct FragmentFile {
    title: String,
    #[serde(default)]
    intro: Vec<String>,
    #[serde(default)]
    toolbar: Vec<ToolbarAction>,
}

/// Static content of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFragment {
    pub id: String,
    pub title: String,
    pub intro: Vec<String>,
    pub toolbar: Vec<ToolbarAction>,
}

impl SectionFragment {
    pub fn parse(id: &str, text: &str) -> Result<Self> {
        let file: FragmentFile =
            toml::from_str(text).map_err(|e| Error::section(id, e.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            title: file.title,
            intro: file.intro,
            toolbar: file.toolbar,
        })
    }
}

fn builtin(id: &str) -> Option<&'static str> {
    let text = match id {
        DASHBOARD => include_str!("../sections/dashboard.toml"),
        "owners" => include_str!("../sections/owners.toml"),
        "patients" => include_str!("../sections/patients.toml"),
        "veterinarians" => include_str!("../sections/veterinarians.toml"),
        "visits" => include_str!("../sections/visits.toml"),
        "diagnoses" => include_str!("../sections/diagnoses.toml"),
        "medications" => include_str!("../sections/medications.toml"),
        "prescriptions" => include_str!("../sections/prescriptions.toml"),
        "allergies" => include_str!("../sections/allergies.toml"),
        "vaccinations" => include_str!("../sections/vaccinations.toml"),
        _ => return None,
    };
    Some(text)
}

/// Loads fragments from `<dir>/<id>.toml` or the built-in set.
#[derive(Debug, Clone, Default)]
pub struct SectionLoader {
    dir: Option<PathBuf>,
}

impl SectionLoader {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub async fn load(&self, id: &str) -> Result<SectionFragment> {
        let text = match &self.dir {
            Some(dir) => {
                let path = dir.join(format!("{}.toml", id));
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| Error::section(id, format!("{}: {}", path.display(), e)))?
            }
            None => builtin(id)
                .ok_or_else(|| Error::section(id, "no such section"))?
                .to_string(),
        };
        debug!("Loaded section fragment '{}'", id);
        SectionFragment::parse(id, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_every_builtin_section_parses() {
        let loader = SectionLoader::default();
        for id in section_ids() {
            let fragment = loader.load(id).await.unwrap();
            assert_eq!(fragment.id, id);
            assert!(!fragment.title.is_empty());
        }
    }

    #[test]
    fn test_section_order() {
        let ids = section_ids();
        assert_eq!(ids.len(), 10);
        assert_eq!(ids[0], "dashboard");
        assert_eq!(ids[1], "owners");
        assert_eq!(ids[9], "vaccinations");
    }

    #[tokio::test]
    async fn test_unknown_builtin_section() {
        let err = SectionLoader::default().load("billing").await.unwrap_err();
        assert!(matches!(err, Error::Section { ref id, .. } if id == "billing"));
    }

    #[tokio::test]
    async fn test_directory_is_reread_each_time() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("owners.toml");
        std::fs::write(&path, "title = \"Clients\"").unwrap();

        let loader = SectionLoader::new(Some(dir.path().to_path_buf()));
        assert_eq!(loader.load("owners").await.unwrap().title, "Clients");

        std::fs::write(&path, "title = \"Owners\"\nintro = [\"Updated\"]").unwrap();
        let fragment = loader.load("owners").await.unwrap();
        assert_eq!(fragment.title, "Owners");
        assert_eq!(fragment.intro, vec!["Updated".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_and_invalid_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("visits.toml"), "title = ").unwrap();
        let loader = SectionLoader::new(Some(dir.path().to_path_buf()));

        assert!(matches!(
            loader.load("owners").await,
            Err(Error::Section { .. })
        ));
        assert!(matches!(
            loader.load("visits").await,
            Err(Error::Section { .. })
        ));
    }
}
