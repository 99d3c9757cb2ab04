use crate::domain::model::MatchMode;
use crate::utils::error::Result;

/// File access needed by the editor. Paths are plain strings as given on the command line.
pub trait DocumentStore {
    fn exists(&self, path: &str) -> bool;
    fn read_to_string(&self, path: &str) -> Result<String>;
    /// Byte-for-byte copy, used for the `.bak` file.
    fn copy(&self, from: &str, to: &str) -> Result<()>;
    fn write(&self, path: &str, data: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn mapping_path(&self) -> &str;
    fn target_path(&self) -> &str;
    fn match_mode(&self) -> MatchMode;
    fn backup_enabled(&self) -> bool;
    fn dry_run(&self) -> bool;
}
