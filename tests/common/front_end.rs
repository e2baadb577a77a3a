//! Scripted compiler front-end
//!
//! Behaves like a tiny compiler with fixed, predictable rules:
//!
//! - `./name` resolves to `<dir>/name.ts`, then `<dir>/name/index.ts`
//! - `import ... from "<specifier>"` lines are resolved through the host; a miss is
//!   diagnostic TS2307 at that line
//! - `: number = "` on a line is diagnostic TS2322 at the quote
//! - `@@fatal` anywhere skips emission
//! - `src/x.ts` emits `<outDir>/x.js` (or next to the source) with the text

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tshost::domain::entities::{ProgramOutput, SourceUnit};
use tshost::domain::value_objects::{FileVersion, ScriptTarget};
use tshost::{
    CompilerHost, CompilerOptions, Diagnostic, EmitOutput, FileSystem, FrontEnd, HostResult,
    LanguageService, LanguageServiceHost, OutputArtifact, ResolvedModule,
};

#[derive(Default)]
pub struct ScriptedFrontEnd {
    /// Number of files the language services actually re-analyzed
    pub analyses: Arc<AtomicUsize>,
}

impl ScriptedFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyses(&self) -> usize {
        self.analyses.load(Ordering::SeqCst)
    }
}

pub fn output_path(source: &Path, options: &CompilerOptions) -> PathBuf {
    let stem = source.file_stem().unwrap().to_string_lossy().into_owned();
    let dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| source.parent().unwrap().to_path_buf());
    dir.join(format!("{stem}.js"))
}

fn imports(text: &str) -> Vec<(u32, String)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| line.trim_start().starts_with("import "))
        .filter_map(|(i, line)| {
            let start = line.find(" from \"")? + 7;
            let end = start + line[start..].find('"')?;
            Some((i as u32 + 1, line[start..end].to_string()))
        })
        .collect()
}

fn check(
    file: &Path,
    text: &str,
    resolve: impl Fn(&[String], &Path) -> Vec<Option<ResolvedModule>>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let found = imports(text);
    let specifiers: Vec<String> = found.iter().map(|(_, s)| s.clone()).collect();
    let resolved = resolve(&specifiers, file);
    assert_eq!(resolved.len(), specifiers.len(), "resolution must be positional");
    for ((line, specifier), resolution) in found.iter().zip(resolved) {
        if resolution.is_none() {
            diagnostics.push(
                Diagnostic::error(format!("Cannot find module '{specifier}'."))
                    .with_code(2307)
                    .at(file, *line, 1),
            );
        }
    }

    for (i, line) in text.lines().enumerate() {
        if let Some(pos) = line.find(": number = \"") {
            diagnostics.push(
                Diagnostic::error("Type 'string' is not assignable to type 'number'.")
                    .with_code(2322)
                    .at(file, i as u32 + 1, pos as u32 + 12),
            );
        }
    }
    diagnostics
}

impl FrontEnd for ScriptedFrontEnd {
    fn default_lib_location(&self) -> PathBuf {
        PathBuf::from("/compiler/lib/lib.d.ts")
    }

    fn parse(&self, file_name: &Path, text: &str, target: ScriptTarget) -> SourceUnit {
        SourceUnit::new(file_name, text, target)
    }

    fn resolve_module_name(
        &self,
        specifier: &str,
        containing_file: &Path,
        _options: &CompilerOptions,
        fs: &dyn FileSystem,
    ) -> Option<PathBuf> {
        let rest = specifier.strip_prefix("./")?;
        let dir = containing_file.parent()?;
        [dir.join(format!("{rest}.ts")), dir.join(rest).join("index.ts")]
            .into_iter()
            .find(|candidate| fs.exists(candidate))
    }

    fn emit_program(
        &self,
        root_files: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost,
    ) -> HostResult<ProgramOutput> {
        let mut output = ProgramOutput::default();
        let mut units = Vec::new();
        for root in root_files {
            match host.read_source(root, options.target) {
                Some(unit) => units.push(unit),
                None => {
                    let message = format!("File '{}' not found.", root.display());
                    output
                        .diagnostics
                        .push(Diagnostic::error(message).with_code(6053));
                }
            }
        }

        for unit in &units {
            output
                .diagnostics
                .extend(check(unit.file_name(), unit.text(), |s, f| host.resolve_imports(s, f)));
            if unit.text().contains("@@fatal") {
                output.emit_skipped = true;
            }
        }
        if output.emit_skipped {
            return Ok(output);
        }

        for unit in &units {
            let out = output_path(unit.file_name(), options);
            host.write_output(&out, unit.text())?;
            output.emitted.push(out);
        }
        Ok(output)
    }

    fn create_language_service(
        &self,
        host: Arc<dyn LanguageServiceHost>,
    ) -> Box<dyn LanguageService> {
        Box::new(ScriptedService {
            host,
            analyzed: HashMap::new(),
            analyses: Arc::clone(&self.analyses),
        })
    }
}

struct Analysis {
    version: FileVersion,
    text: String,
    diagnostics: Vec<Diagnostic>,
}

struct ScriptedService {
    host: Arc<dyn LanguageServiceHost>,
    analyzed: HashMap<PathBuf, Analysis>,
    analyses: Arc<AtomicUsize>,
}

impl ScriptedService {
    fn analyze(&mut self, file_name: &Path) -> Option<&Analysis> {
        let version = self.host.script_version(file_name)?;
        let fresh = self
            .analyzed
            .get(file_name)
            .is_some_and(|a| a.version == version);
        if !fresh {
            let text = self.host.script_snapshot(file_name)?.text().to_string();
            let host = Arc::clone(&self.host);
            let diagnostics = check(file_name, &text, |s, f| host.resolve_imports(s, f));
            self.analyses.fetch_add(1, Ordering::SeqCst);
            self.analyzed.insert(
                file_name.to_path_buf(),
                Analysis {
                    version,
                    text,
                    diagnostics,
                },
            );
        }
        self.analyzed.get(file_name)
    }
}

impl LanguageService for ScriptedService {
    fn emit_output(&mut self, file_name: &Path) -> EmitOutput {
        let options = self.host.compilation_options();
        let Some(analysis) = self.analyze(file_name) else {
            return EmitOutput::skipped();
        };
        if analysis.text.contains("@@fatal") {
            return EmitOutput::skipped();
        }
        EmitOutput {
            artifacts: vec![OutputArtifact::new(
                output_path(file_name, &options),
                analysis.text.clone(),
            )],
            emit_skipped: false,
        }
    }

    fn diagnostics(&mut self, file_name: &Path) -> Vec<Diagnostic> {
        self.analyze(file_name)
            .map(|a| a.diagnostics.clone())
            .unwrap_or_default()
    }
}
