//! Domain entities: core data structures

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::DomainError;

/// Placeholder replaced by the problem number.
pub const NUMBER_TOKEN: &str = "{{PROBLEM_NUMBER}}";
/// Placeholder replaced by the problem name as typed.
pub const NAME_TOKEN: &str = "{{PROBLEM_NAME}}";
/// Placeholder replaced by the URL slug (lower-case, hyphenated).
pub const SLUG_TOKEN: &str = "{{PROBLEM_SLUG}}";

/// Common prefix of all placeholder tokens.
const TOKEN_PREFIX: &str = "{{PROBLEM_";

/// A practice problem, identified by number and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Opaque problem number, e.g. "42" (not required to be numeric)
    pub number: String,
    /// Human-readable name, e.g. "Binary Search"
    pub name: String,
}

impl Problem {
    /// Create a problem after validating its identifiers.
    ///
    /// Both identifiers end up in a single path component, so neither may be
    /// blank or contain a path separator.
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        let number = number.into();
        let name = name.into();

        validate_number(&number)?;
        if name.trim().is_empty() {
            return Err(DomainError::InvalidProblem(
                "problem name must not be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\']) {
            return Err(DomainError::InvalidProblem(format!(
                "problem name must not contain a path separator: {name}"
            )));
        }

        Ok(Self { number, name })
    }

    /// Directory name: `<number>_<name lower-cased, spaces as underscores>`.
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.number, normalize(&self.name, '_'))
    }

    /// URL slug: name lower-cased, spaces as hyphens.
    pub fn slug(&self) -> String {
        normalize(&self.name, '-')
    }

    /// Values substituted into templates for this problem.
    pub fn placeholders(&self) -> Placeholders {
        Placeholders {
            number: self.number.clone(),
            name: self.name.clone(),
            slug: self.slug(),
        }
    }
}

fn normalize(name: &str, separator: char) -> String {
    name.to_lowercase().replace(' ', &separator.to_string())
}

/// Validate a problem number used for lookup or creation.
pub fn validate_number(number: &str) -> Result<(), DomainError> {
    if number.is_empty() {
        return Err(DomainError::InvalidProblem(
            "problem number must not be empty".to_string(),
        ));
    }
    if number.contains(['/', '\\']) {
        return Err(DomainError::InvalidProblem(format!(
            "problem number must not contain a path separator: {number}"
        )));
    }
    Ok(())
}

/// Substitution values for the three template placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub number: String,
    pub name: String,
    pub slug: String,
}

impl Placeholders {
    /// Replace every placeholder occurrence in `template`.
    ///
    /// Literal, single pass: substituted values are never rescanned, so a
    /// name that itself looks like a token is copied through verbatim.
    /// Unknown `{{PROBLEM_*` sequences are left untouched.
    pub fn apply(&self, template: &str) -> String {
        let pairs = [
            (NUMBER_TOKEN, self.number.as_str()),
            (NAME_TOKEN, self.name.as_str()),
            (SLUG_TOKEN, self.slug.as_str()),
        ];

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find(TOKEN_PREFIX) {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match pairs.iter().find(|(token, _)| tail.starts_with(token)) {
                Some((token, value)) => {
                    out.push_str(value);
                    rest = &tail[token.len()..];
                }
                None => {
                    out.push_str(TOKEN_PREFIX);
                    rest = &tail[TOKEN_PREFIX.len()..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// A template file as read from the template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File name, reused verbatim for the generated file
    pub name: String,
    /// Raw content with placeholder tokens
    pub content: String,
}

impl TemplateFile {
    /// Substitute placeholders, keeping the file name.
    pub fn render(&self, placeholders: &Placeholders) -> TemplateFile {
        TemplateFile {
            name: self.name.clone(),
            content: placeholders.apply(&self.content),
        }
    }
}

/// An existing problem directory found under the problems root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDir {
    /// Path to the directory (as seen from the current process)
    pub path: PathBuf,
    /// Directory name, e.g. "1_two_sum"
    pub name: String,
}

impl ProblemDir {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self { path, name })
    }
}

/// Prefix a problem directory name must start with to match `number`.
pub fn dir_prefix(number: &str) -> String {
    format!("{number}_")
}

/// Pick the single directory whose name starts with `<number>_`.
///
/// Zero matches is `ProblemNotFound`, more than one is `AmbiguousProblem`.
pub fn select_problem_dir(
    number: &str,
    candidates: Vec<ProblemDir>,
) -> Result<ProblemDir, DomainError> {
    let prefix = dir_prefix(number);
    let mut matches: Vec<ProblemDir> = candidates
        .into_iter()
        .filter(|d| d.name.starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(DomainError::ProblemNotFound(number.to_string())),
        1 => Ok(matches.remove(0)),
        _ => {
            let mut names: Vec<String> = matches.into_iter().map(|d| d.name).collect();
            names.sort();
            Err(DomainError::AmbiguousProblem {
                number: number.to_string(),
                matches: names,
            })
        }
    }
}

/// An external toolchain command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child (None = inherit)
    pub cwd: Option<PathBuf>,
}

impl ToolchainInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd,
        }
    }

    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for ToolchainInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Render a path as a toolchain package argument.
///
/// Relative paths get an explicit `./` so tools like `go test` treat them as
/// directories rather than import paths.
pub fn package_arg(path: &Path) -> String {
    match path.components().next() {
        Some(Component::CurDir | Component::ParentDir) | None => path.display().to_string(),
        _ if path.is_absolute() => path.display().to_string(),
        _ => format!("./{}", path.display()),
    }
}

/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Unresolvable input is returned as is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(name: &str) -> ProblemDir {
        ProblemDir {
            path: PathBuf::from("problems").join(name),
            name: name.to_string(),
        }
    }

    #[test]
    fn given_name_with_spaces_when_dir_name_then_lowercases_and_underscores() {
        let problem = Problem::new("42", "Binary Search").unwrap();
        assert_eq!(problem.dir_name(), "42_binary_search");
        assert_eq!(problem.slug(), "binary-search");
    }

    #[test]
    fn given_empty_number_when_new_then_rejects() {
        assert!(matches!(
            Problem::new("", "Two Sum"),
            Err(DomainError::InvalidProblem(_))
        ));
    }

    #[test]
    fn given_number_with_separator_when_new_then_rejects() {
        assert!(Problem::new("../1", "Two Sum").is_err());
    }

    #[test]
    fn given_name_with_separator_when_new_then_rejects() {
        for name in ["x/../../../escaped", "A/B Tree", "a\\b"] {
            assert!(
                matches!(Problem::new("1", name), Err(DomainError::InvalidProblem(_))),
                "accepted {name}"
            );
        }
    }

    #[test]
    fn given_dotted_name_when_dir_name_then_single_component() {
        let problem = Problem::new("1", "..").unwrap();
        assert_eq!(Path::new(&problem.dir_name()).components().count(), 1);
    }

    #[test]
    fn given_blank_name_when_new_then_rejects() {
        assert!(Problem::new("1", "   ").is_err());
    }

    #[test]
    fn given_all_tokens_when_apply_then_replaces_every_occurrence() {
        let p = Problem::new("42", "Binary Search").unwrap().placeholders();
        let out = p.apply("{{PROBLEM_NUMBER}}: {{PROBLEM_NAME}} ({{PROBLEM_SLUG}}) #{{PROBLEM_NUMBER}}");
        assert_eq!(out, "42: Binary Search (binary-search) #42");
    }

    #[test]
    fn given_name_that_looks_like_token_when_apply_then_not_rescanned() {
        let p = Problem::new("7", "{{PROBLEM_NUMBER}}").unwrap().placeholders();
        assert_eq!(p.apply("{{PROBLEM_NAME}}"), "{{PROBLEM_NUMBER}}");
    }

    #[test]
    fn given_unknown_token_when_apply_then_left_untouched() {
        let p = Problem::new("1", "Two Sum").unwrap().placeholders();
        assert_eq!(p.apply("{{PROBLEM_OTHER}} {{ x }}"), "{{PROBLEM_OTHER}} {{ x }}");
    }

    #[test]
    fn given_single_match_when_select_then_returns_it() {
        let found = select_problem_dir("1", vec![dir("1_two_sum"), dir("10_x"), dir("template")]).unwrap();
        assert_eq!(found.name, "1_two_sum");
    }

    #[test]
    fn given_no_match_when_select_then_not_found() {
        let err = select_problem_dir("3", vec![dir("1_two_sum"), dir("30_x")]).unwrap_err();
        assert!(matches!(err, DomainError::ProblemNotFound(ref n) if n == "3"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn given_two_matches_when_select_then_ambiguous() {
        let err = select_problem_dir("1", vec![dir("1_two_sum"), dir("1_other")]).unwrap_err();
        match err {
            DomainError::AmbiguousProblem { matches, .. } => {
                assert_eq!(matches, vec!["1_other".to_string(), "1_two_sum".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn given_relative_path_when_package_arg_then_prefixes_dot() {
        assert_eq!(package_arg(Path::new("problems/1_two_sum")), "./problems/1_two_sum");
        assert_eq!(package_arg(Path::new("./problems/1_two_sum")), "./problems/1_two_sum");
        assert_eq!(package_arg(Path::new("/abs/problems")), "/abs/problems");
    }

    #[test]
    fn given_invocation_when_display_then_joins_program_and_args() {
        let inv = ToolchainInvocation::new("go", vec!["test".into(), "./...".into()], None);
        assert_eq!(inv.to_string(), "go test ./...");
    }
}
