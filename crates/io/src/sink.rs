// Notice output: one plain-text file per channel

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use powerbill_recon::{Channel, NoticeSink};

use crate::error::IoError;

/// Two text files, truncated on reset and appended to afterwards.
#[derive(Debug, Clone)]
pub struct FileSink {
    email_path: PathBuf,
    print_path: PathBuf,
}

impl FileSink {
    pub fn new(email_path: impl Into<PathBuf>, print_path: impl Into<PathBuf>) -> Self {
        Self {
            email_path: email_path.into(),
            print_path: print_path.into(),
        }
    }

    pub fn path(&self, channel: Channel) -> &Path {
        match channel {
            Channel::Email => &self.email_path,
            Channel::Print => &self.print_path,
        }
    }
}

fn write_err(path: &Path, e: std::io::Error) -> IoError {
    IoError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

impl NoticeSink for FileSink {
    type Error = IoError;

    fn reset(&mut self) -> Result<(), IoError> {
        for path in [&self.email_path, &self.print_path] {
            File::create(path).map_err(|e| write_err(path, e))?;
        }
        Ok(())
    }

    fn append(&mut self, channel: Channel, text: &str) -> Result<(), IoError> {
        let path = self.path(channel);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| write_err(path, e))?;
        file.write_all(text.as_bytes()).map_err(|e| write_err(path, e))
    }
}
