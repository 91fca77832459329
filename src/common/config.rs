use codespan_reporting::diagnostic;
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{
    self,
    termcolor::{ColorChoice, StandardStream},
};

pub type File<'a> = SimpleFile<&'a str, &'a str>;
pub type Diagnostic = diagnostic::Diagnostic<()>;

/// A named assembly source file being processed.
pub struct Process<'a> {
    file: File<'a>,
}

impl<'a> Process<'a> {
    #[must_use]
    pub fn new(name: &'a str, source: &'a str) -> Self {
        Self {
            file: SimpleFile::new(name, source),
        }
    }

    #[must_use]
    pub fn source(&self) -> &'a str {
        *self.file.source()
    }

    #[must_use]
    pub fn file(&self) -> &File<'a> {
        &self.file
    }

    /// Renders diagnostics to the standard error stream.
    pub fn emit(&self, diagnostics: &[Diagnostic]) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();
        let mut writer = writer.lock();
        for diagnostic in diagnostics {
            let _ = term::emit(&mut writer, &config, &self.file, diagnostic);
        }
    }
}

pub trait VmDiagnostic {
    fn to_diagnostic(&self, process: &Process<'_>) -> Diagnostic;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct RunConfig {
    pub dump_bytecode: bool,
    pub trace_execution: bool,
}
