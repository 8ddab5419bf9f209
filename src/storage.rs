use crate::plan::SubstitutionPlan;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un plan depuis un support.
    fn load(&self) -> anyhow::Result<SubstitutionPlan>;
    /// Sauvegarde de manière atomique.
    fn save(&self, plan: &SubstitutionPlan) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<SubstitutionPlan> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let plan: SubstitutionPlan = serde_json::from_slice(&data)
            .with_context(|| format!("parsing plan {}", self.path.display()))?;
        Ok(plan)
    }

    fn save(&self, plan: &SubstitutionPlan) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(plan)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
