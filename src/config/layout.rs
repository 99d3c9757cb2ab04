use crate::utils::error::{GalleryError, Result};
use crate::utils::validation::{validate_token, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names the matching rules look for. The defaults describe the site the tool
/// was written for; a TOML file can override any subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryLayout {
    pub gallery_id: String,
    pub grid_class: String,
    pub card_class: String,
    pub image_tag: String,
    pub date_row_classes: Vec<String>,
    pub date_label_tag: String,
    pub title_tag: String,
    pub description_tag: String,
    pub icon_tag: String,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self {
            gallery_id: "galeri".to_string(),
            grid_class: "grid".to_string(),
            card_class: "card-hover".to_string(),
            image_tag: "img".to_string(),
            date_row_classes: vec![
                "flex".to_string(),
                "items-center".to_string(),
                "text-gray-500".to_string(),
            ],
            date_label_tag: "span".to_string(),
            title_tag: "h3".to_string(),
            description_tag: "p".to_string(),
            icon_tag: "i".to_string(),
        }
    }
}

impl GalleryLayout {
    /// Loads a layout from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GalleryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GalleryError::ConfigValidationError {
            field: "layout".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid env var pattern: {e}"))
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for GalleryLayout {
    fn validate(&self) -> Result<()> {
        validate_token("gallery_id", &self.gallery_id)?;
        validate_token("grid_class", &self.grid_class)?;
        validate_token("card_class", &self.card_class)?;
        validate_token("image_tag", &self.image_tag)?;
        validate_token("date_label_tag", &self.date_label_tag)?;
        validate_token("title_tag", &self.title_tag)?;
        validate_token("description_tag", &self.description_tag)?;
        validate_token("icon_tag", &self.icon_tag)?;
        for class in &self.date_row_classes {
            validate_token("date_row_classes", class)?;
        }
        Ok(())
    }
}
