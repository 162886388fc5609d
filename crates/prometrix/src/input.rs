use crate::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};

const STDIN: &str = "-";

/// Source of a command's input: a file, or stdin when omitted or `-`.
#[derive(Debug, Clone, Default)]
pub struct Source(Option<PathBuf>);

impl Source {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self(path.filter(|p| p != Path::new(STDIN)))
    }

    pub fn name(&self) -> String {
        match &self.0 {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }

    /// Read the whole input as UTF-8.
    pub fn read(&self) -> Result<String> {
        let content = match &self.0 {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| Error::Input(self.name(), e))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| Error::Input(self.name(), e))?;
                buffer
            }
        };

        log::debug!("read {} bytes from {}", content.len(), self.name());

        Ok(content)
    }

    /// Like [`Source::read`], but rejects blank input.
    pub fn read_non_empty(&self) -> Result<String> {
        let content = self.read()?;
        if content.trim().is_empty() {
            return Err(Error::EmptyInput(self.name()).into());
        }
        Ok(content)
    }
}
