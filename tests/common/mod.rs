// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed environment (config directory,
// target root, factory tree) and a recording executor so each integration
// test can drive the create phase without touching the real system.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tmpfiles_cli::commands::create::{self, CreateOptions};
use tmpfiles_cli::exec::{ExecResult, Executor};
use tmpfiles_cli::logging::MemoryLog;
use tmpfiles_cli::processing::ApplyStats;
use tmpfiles_cli::processing::plan::PathFilter;
use tmpfiles_cli::resources::error::ResourceError;
use tmpfiles_cli::specifier::SpecifierTable;

/// One helper invocation as seen by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    /// Permission bits of the last argument at the time of the call, if it
    /// existed.
    pub target_mode: Option<u32>,
}

/// Executor that records every invocation instead of running it.
///
/// Programs listed as missing fail with [`ResourceError::NotFound`]; all
/// others succeed.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    missing: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `program` as absent from `PATH`.
    pub fn without(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Every recorded invocation, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<ExecResult> {
        let target_mode = args
            .last()
            .and_then(|p| std::fs::symlink_metadata(p).ok())
            .map(|meta| meta.permissions().mode() & 0o7777);
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().cloned());
        self.calls
            .lock()
            .expect("calls lock")
            .push(Call { argv, target_mode });

        if !self.which(program) {
            return Err(ResourceError::NotFound {
                resource: format!("program '{program}'"),
            }
            .into());
        }
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn which(&self, program: &str) -> bool {
        !self.missing.iter().any(|m| m == program)
    }
}

/// Outcome of one create run.
pub struct RunOutcome {
    pub result: anyhow::Result<ApplyStats>,
    pub log: Arc<MemoryLog>,
    pub executor: Arc<RecordingExecutor>,
}

impl RunOutcome {
    /// The statistics of a run that must not have failed fatally.
    pub fn stats(&self) -> ApplyStats {
        match &self.result {
            Ok(stats) => *stats,
            Err(e) => panic!("create run failed: {e:#}"),
        }
    }
}

/// An isolated environment backed by temporary directories.
///
/// Directive files may use `{root}` as a placeholder for the target root so
/// every path stays inside the test's own directory.
pub struct TestEnv {
    pub conf: tempfile::TempDir,
    pub root: tempfile::TempDir,
    pub factory: tempfile::TempDir,
    pub filter: PathFilter,
    pub specifiers: SpecifierTable,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create root dir");
        let home = root.path().join("home");
        Self {
            conf: tempfile::tempdir().expect("create conf dir"),
            factory: tempfile::tempdir().expect("create factory dir"),
            filter: PathFilter::default(),
            specifiers: SpecifierTable::from_entries([
                ('h', home.display().to_string()),
                ('%', "%".to_string()),
            ]),
            root,
        }
    }

    /// Path below the target root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Write a directive file, expanding `{root}`.
    pub fn with_config(self, name: &str, content: &str) -> Self {
        let content = content.replace("{root}", &self.root.path().display().to_string());
        std::fs::write(self.conf.path().join(name), content).expect("write config file");
        self
    }

    /// Only process paths below `rel` (relative to the target root).
    pub fn with_prefix(mut self, rel: &str) -> Self {
        self.filter.prefix = self.path(rel);
        self
    }

    pub fn run(&self) -> RunOutcome {
        self.run_with(RecordingExecutor::new(), false)
    }

    pub fn run_with(&self, executor: RecordingExecutor, dry_run: bool) -> RunOutcome {
        let log = Arc::new(MemoryLog::new());
        let executor = Arc::new(executor);
        let opts = CreateOptions {
            config_dirs: vec![self.conf.path().to_path_buf()],
            configs: Vec::new(),
            filter: self.filter.clone(),
            factory_dir: self.factory.path().to_path_buf(),
            dry_run,
        };
        let result = create::run(
            &opts,
            &self.specifiers,
            Arc::clone(&executor) as Arc<dyn Executor>,
            Arc::clone(&log) as Arc<dyn tmpfiles_cli::logging::Log>,
        );
        RunOutcome {
            result,
            log,
            executor,
        }
    }
}

/// Permission bits of `path` without following a final symlink.
pub fn mode_of(path: &Path) -> u32 {
    std::fs::symlink_metadata(path)
        .expect("stat path")
        .permissions()
        .mode()
        & 0o7777
}
