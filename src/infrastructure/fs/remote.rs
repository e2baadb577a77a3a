//! Remote File System Implementation
//!
//! Implements the FileSystem port for a remote host via SSH. Every operation
//! is one `ssh <destination> <command>` round trip.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Remote file system implementation using SSH
pub struct RemoteFs {
    /// SSH destination (user@host or host)
    destination: String,
}

impl RemoteFs {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Run a command on the remote host, returning raw stdout
    fn run_command(&self, command: &str, input: Option<&str>) -> FsResult<String> {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let mut child = Command::new("ssh")
            .arg(&self.destination)
            .arg(command)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(inp) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(inp.as_bytes())?;
            }
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FsError::Other(format!("SSH error: {}", stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn test(&self, flag: &str, path: &Path) -> bool {
        self.run_command(&format!("test {} {}", flag, Self::quote_path(path)), None)
            .is_ok()
    }

    /// Quote a path for safe use in shell commands
    fn quote_path(path: &Path) -> String {
        format!("'{}'", path.to_string_lossy().replace('\'', "'\\''"))
    }

    /// One round trip that writes stdin to a fresh `mktemp` file next to
    /// `path` and renames it into place
    fn write_command(path: &Path) -> String {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let dir = Self::quote_path(parent);
        let template = Self::quote_path(&parent.join(".tshost.XXXXXX"));
        format!(
            "mkdir -p {dir} && tmp=$(mktemp {template}) && \
             {{ cat > \"$tmp\" && chmod 644 \"$tmp\" && mv -f \"$tmp\" {dest}; }} \
             || {{ rm -f \"$tmp\"; exit 1; }}",
            dest = Self::quote_path(path),
        )
    }

    /// Parse `ls -1A` output into child paths
    fn parse_listing(dir: &Path, output: &str) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = output
            .lines()
            .filter(|line| !line.is_empty())
            .map(|name| dir.join(name))
            .collect();
        entries.sort();
        entries
    }

    /// Parse seconds-since-epoch from `stat` output
    fn parse_mtime(output: &str) -> Option<SystemTime> {
        let secs: u64 = output.trim().parse().ok()?;
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }
}

impl FileSystem for RemoteFs {
    fn exists(&self, path: &Path) -> bool {
        self.test("-e", path)
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        if !self.test("-f", path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        self.run_command(&format!("cat {}", Self::quote_path(path)), None)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.run_command(&Self::write_command(path), Some(content))?;
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        if !self.test("-d", path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        let out = self.run_command(&format!("ls -1A {}", Self::quote_path(path)), None)?;
        Ok(Self::parse_listing(path, &out))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.test("-d", path)
    }

    fn modified(&self, path: &Path) -> FsResult<SystemTime> {
        // GNU stat first, BSD stat on macOS
        let p = Self::quote_path(path);
        let cmd = format!("stat -c %Y {} 2>/dev/null || stat -f %m {} 2>/dev/null", p, p);
        let out = self
            .run_command(&cmd, None)
            .map_err(|_| FsError::NotFound(path.to_path_buf()))?;
        Self::parse_mtime(&out)
            .ok_or_else(|| FsError::Other(format!("unexpected stat output for {}", path.display())))
    }

    fn case_sensitive(&self) -> bool {
        true
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.test("-L", path)
    }
}
