//! Command dispatch: maps parsed arguments onto services

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::TemplateInit;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Problem;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Commands::New {
            problem_number,
            problem_name,
        } => cmd_new(container, problem_number, problem_name),
        Commands::Test { problem_number } => cmd_test(container, problem_number),
        Commands::Run {
            problem_number,
            exec,
        } => cmd_run(container, problem_number, *exec),
        Commands::Init { force } => cmd_init(container, *force),
        Commands::Config { command } => cmd_config(container, command),
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

#[instrument(skip(container))]
fn cmd_new(container: &ServiceContainer, number: &str, name: &str) -> CliResult<()> {
    debug!("new: number={}, name={}", number, name);
    let problem = Problem::new(number, name).map_err(|e| CliError::InvalidArgs(e.to_string()))?;

    let dir = container.scaffold_service().create(&problem)?;
    output::action("Created new problem directory", &dir.display());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_test(container: &ServiceContainer, target: &str) -> CliResult<()> {
    debug!("test: target={}", target);
    container.runner_service().test(target)?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_run(container: &ServiceContainer, number: &str, exec: bool) -> CliResult<()> {
    debug!("run: number={}, exec={}", number, exec);
    let runner = container.runner_service();

    if exec {
        runner.run(number)?;
        return Ok(());
    }

    let solution = runner.solution_path(number)?;
    output::action("Solution file", &solution.display());
    output::detail(&format!(
        "Solutions are exercised through their tests: grind75 test {number}"
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_init(container: &ServiceContainer, force: bool) -> CliResult<()> {
    let results = container.scaffold_service().init_templates(force)?;

    output::header(&format!(
        "Templates in {}",
        container.settings.template_root().display()
    ));
    for result in &results {
        match result {
            TemplateInit::Written(path) => output::success_detail(&path.display()),
            TemplateInit::Kept(path) => {
                output::detail(&format!("kept {} (use --force to overwrite)", path.display()))
            }
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let toml = container.settings.to_toml()?;
            output::info(&toml.trim_end());
            Ok(())
        }
        ConfigCommands::Path => {
            let local = local_config_path(container.settings.project_dir.as_deref());
            match global_config_path() {
                Some(global) => print_config_path("global", &global, container),
                None => output::warning("cannot determine global config directory"),
            }
            print_config_path("local", &local, container);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(container.settings.project_dir.as_deref())
            };

            if container.fs.exists(&path) {
                return Err(CliError::InvalidArgs(format!(
                    "config file already exists: {}",
                    path.display()
                )));
            }

            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write config {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn print_config_path(label: &str, path: &std::path::Path, container: &ServiceContainer) {
    let state = if container.fs.exists(path) {
        "exists"
    } else {
        "not found"
    };
    output::info(&format!("{label}: {} ({state})", path.display()));
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
