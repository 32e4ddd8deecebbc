//! Where JSON text comes from and where declarations go.
//!
//! The converter itself never touches I/O. Hosts (the CLI here, an editor
//! elsewhere) implement these two traits over whatever they have: files,
//! stdin, a selection, the clipboard, a new document.
use std::io::{self, Read};
use std::path::PathBuf;

pub trait TextSource: Send + Sync {
    /// Human-readable origin, used in messages.
    fn describe(&self) -> String;

    /// The text, or `None` when the source has nothing to offer (missing, empty).
    fn read_text(&self) -> io::Result<Option<String>>;
}

pub trait TextSink {
    /// `language` is a hint such as `"go"`; sinks may use it or ignore it.
    fn write_text(&mut self, text: &str, language: Option<&str>) -> io::Result<()>;
}

// ————————————————————————————————————————————————————————————————————————————
// SOURCES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn read_text(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(non_blank(text)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl TextSource for StdinSource {
    fn describe(&self) -> String {
        "<stdin>".to_string()
    }

    fn read_text(&self) -> io::Result<Option<String>> {
        let mut text = String::new();
        io::stdin().lock().read_to_string(&mut text)?;
        Ok(non_blank(text))
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Expand literal paths, quoted glob patterns and `-` (stdin) into sources.
pub fn resolve_sources<I>(patterns: I) -> Result<Vec<Box<dyn TextSource>>, Box<dyn std::error::Error + Send + Sync>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<Box<dyn TextSource>>::new();
    let mut stdin_seen = false;

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            if stdin_seen {
                return Err("stdin ('-') given more than once".into());
            }
            stdin_seen = true;
            out.push(Box::new(StdinSource));
        } else if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(Box::new(FileSource { path: entry? }));
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
        } else {
            out.push(Box::new(FileSource { path: PathBuf::from(pattern) }));
        }
    }

    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// SINKS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl TextSink for StdoutSink {
    fn write_text(&mut self, text: &str, _language: Option<&str>) -> io::Result<()> {
        use std::io::Write;
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

/// Writes to a file, creating parent directories. A path without an
/// extension gets one from the language hint (`out` + `go` → `out.go`).
#[derive(Debug, Clone)]
pub struct FileSink {
    pub path: PathBuf,
}

impl FileSink {
    pub fn resolved_path(&self, language: Option<&str>) -> PathBuf {
        match (self.path.extension(), language.and_then(extension_for)) {
            (None, Some(ext)) => self.path.with_extension(ext),
            _ => self.path.clone(),
        }
    }
}

impl TextSink for FileSink {
    fn write_text(&mut self, text: &str, language: Option<&str>) -> io::Result<()> {
        let path = self.resolved_path(language);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, text)?;
        tracing::info!(path = %path.display(), bytes = text.len(), "wrote declarations");
        Ok(())
    }
}

fn extension_for(language: &str) -> Option<&'static str> {
    match language {
        "go" => Some("go"),
        "rust" => Some("rs"),
        _ => None,
    }
}

/// Collects everything written; handy for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub written: Vec<(String, Option<String>)>,
}

impl TextSink for MemorySink {
    fn write_text(&mut self, text: &str, language: Option<&str>) -> io::Result<()> {
        self.written.push((text.to_string(), language.map(str::to_string)));
        Ok(())
    }
}
