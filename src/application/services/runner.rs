//! Toolchain runner service
//!
//! Resolves problem directories by number prefix and hands them to the
//! external toolchain. The child inherits stdout/stderr; this process only
//! waits for its exit status.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    dir_prefix, package_arg, select_problem_dir, validate_number, DomainError, ProblemDir,
    ToolchainInvocation,
};
use crate::infrastructure::traits::{CommandRunner, FileSystem};
use crate::infrastructure::InfraError;

/// Target token that selects the whole-tree test run.
pub const ALL_TARGET: &str = "all";

/// Service resolving problems and invoking the toolchain.
pub struct RunnerService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl RunnerService {
    /// Create a new runner service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
    ) -> Self {
        Self { fs, cmd, settings }
    }

    /// Find the single directory under the problems root named `<number>_*`.
    pub fn resolve(&self, number: &str) -> ApplicationResult<ProblemDir> {
        validate_number(number)?;
        let root = self.settings.problems_root();
        debug!(
            "resolve: pattern={}",
            root.join(format!("{}*", dir_prefix(number))).display()
        );

        if !self.fs.is_dir(&root) {
            return Err(DomainError::ProblemNotFound(number.to_string()).into());
        }

        let candidates = self
            .fs
            .list_dirs(&root)
            .with_path_context("list problems", &root)?
            .into_iter()
            .filter_map(ProblemDir::from_path)
            .collect();

        let found = select_problem_dir(number, candidates)?;
        debug!("resolve: found {}", found.path.display());
        Ok(found)
    }

    /// Run tests for one problem, or for the whole tree when `target` is `all`.
    pub fn test(&self, target: &str) -> ApplicationResult<()> {
        if target == ALL_TARGET {
            return self.test_all();
        }

        let problem = self.resolve(target)?;
        let mut args = self.settings.toolchain.test_args.clone();
        args.push(self.package_path(&problem));
        self.execute(&self.invocation(args))
    }

    /// Run the project-wide test command.
    pub fn test_all(&self) -> ApplicationResult<()> {
        let args = self.settings.toolchain.test_all_args.clone();
        self.execute(&self.invocation(args))
    }

    /// Path of a problem's solution file.
    pub fn solution_path(&self, number: &str) -> ApplicationResult<PathBuf> {
        let problem = self.resolve(number)?;
        Ok(problem.path.join(&self.settings.solution_file))
    }

    /// Execute a problem's solution file as a program.
    pub fn run(&self, number: &str) -> ApplicationResult<()> {
        let problem = self.resolve(number)?;
        let solution = self
            .settings
            .problems_dir
            .join(&problem.name)
            .join(&self.settings.solution_file);
        let mut args = self.settings.toolchain.run_args.clone();
        args.push(package_arg(&solution));
        self.execute(&self.invocation(args))
    }

    /// Problem directory as the toolchain sees it from the project directory.
    fn package_path(&self, problem: &ProblemDir) -> String {
        package_arg(&self.settings.problems_dir.join(&problem.name))
    }

    fn invocation(&self, args: Vec<String>) -> ToolchainInvocation {
        ToolchainInvocation::new(
            self.settings.toolchain.program.clone(),
            args,
            self.settings.project_dir.clone(),
        )
    }

    fn execute(&self, invocation: &ToolchainInvocation) -> ApplicationResult<()> {
        debug!("execute: {}", invocation);
        let status = self
            .cmd
            .run_inherited(
                &invocation.program,
                &invocation.arg_refs(),
                invocation.cwd.as_deref(),
            )
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("start {}", invocation),
                source: Box::new(e),
            })?;

        if !status.success() {
            return Err(ApplicationError::OperationFailed {
                context: format!("run {}", invocation),
                source: Box::new(InfraError::Toolchain {
                    message: status.to_string(),
                    exit_code: status.code(),
                }),
            });
        }
        Ok(())
    }
}
