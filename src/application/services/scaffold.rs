//! Problem scaffolding service
//!
//! Creates `<problems_dir>/<number>_<name>` and fills it from the template
//! directory. Templates are read fresh on every call.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::templates::default_templates;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Problem, TemplateFile};
use crate::infrastructure::traits::FileSystem;

/// Outcome for one file written by [`ScaffoldService::init_templates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateInit {
    /// Template file was written
    Written(PathBuf),
    /// Template file already existed and was left alone
    Kept(PathBuf),
}

/// Service creating problem directories from templates.
pub struct ScaffoldService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ScaffoldService {
    /// Create a new scaffold service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Target directory for a problem.
    pub fn problem_path(&self, problem: &Problem) -> PathBuf {
        self.settings.problems_root().join(problem.dir_name())
    }

    /// Scaffold a new problem directory.
    ///
    /// Steps: create the directory, read every template, substitute
    /// placeholders, write the results (overwriting). Not atomic: a failed
    /// write leaves earlier files in place.
    ///
    /// # Returns
    /// Path of the problem directory
    pub fn create(&self, problem: &Problem) -> ApplicationResult<PathBuf> {
        let dir = self.problem_path(problem);
        debug!("create: problem={:?}, dir={}", problem, dir.display());

        self.fs
            .create_dir_all(&dir)
            .with_path_context("create directory", &dir)?;

        let templates = self.load_templates()?;
        let placeholders = problem.placeholders();

        for template in &templates {
            let rendered = template.render(&placeholders);
            let target = dir.join(&rendered.name);
            self.fs
                .write(&target, &rendered.content)
                .with_path_context("write file", &target)?;
            debug!("create: wrote {}", target.display());
        }

        info!("created {} with {} files", dir.display(), templates.len());
        Ok(dir)
    }

    /// Read the configured template files from the template directory.
    pub fn load_templates(&self) -> ApplicationResult<Vec<TemplateFile>> {
        let template_dir = self.settings.template_root();
        self.settings
            .template_files
            .iter()
            .map(|name| {
                let path = template_dir.join(name);
                let content = self
                    .fs
                    .read_to_string(&path)
                    .with_path_context("read template", &path)?;
                Ok(TemplateFile {
                    name: name.clone(),
                    content,
                })
            })
            .collect()
    }

    /// Write the built-in templates into the template directory.
    ///
    /// Existing files are kept unless `force` is set.
    pub fn init_templates(&self, force: bool) -> ApplicationResult<Vec<TemplateInit>> {
        let template_dir = self.settings.template_root();
        debug!("init_templates: dir={}, force={}", template_dir.display(), force);

        self.fs
            .create_dir_all(&template_dir)
            .with_path_context("create directory", &template_dir)?;

        let mut results = Vec::new();
        for (name, content) in default_templates() {
            let path = template_dir.join(name);
            if self.fs.exists(&path) && !force {
                results.push(TemplateInit::Kept(path));
                continue;
            }
            self.fs
                .write(&path, content)
                .with_path_context("write template", &path)?;
            results.push(TemplateInit::Written(path));
        }
        Ok(results)
    }
}
