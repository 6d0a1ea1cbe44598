use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{LinterError, Result};
use crate::matcher::{anchored, ArgumentRule, AttributeMatcher, MatcherSet, MatcherSpec};

/// Lint configuration shared by every rule.
///
/// Matchers (attributes, callees, variables) decide where class lists live;
/// the remaining knobs tune individual rule policies. Patterns are kept as
/// strings here and compiled eagerly by `matcher_set` so a bad regex fails
/// the run up front instead of silently matching nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintOptions {
    /// Regex patterns for markup/JSX attribute names
    pub attributes: Vec<String>,

    /// Legacy alias merged into `attributes`
    pub class_attributes: Vec<String>,

    /// Function calls whose arguments carry class lists
    pub callees: Vec<CalleeOption>,

    /// Regex patterns for variable declarations holding class lists
    pub variables: Vec<String>,

    /// Maximum classes per wrapped line; 0 means unlimited
    pub classes_per_line: usize,

    /// Maximum rendered line width before wrapping kicks in
    pub print_width: usize,

    /// How wrapped lines are grouped
    pub group: GroupOption,

    /// Sorting policy for the sort rule
    pub sort: SortOption,

    /// Sort direction where `sort` does not already imply one
    pub order: SortDirection,

    /// Trim leading/trailing whitespace when normalizing
    pub trim: bool,

    /// Explicit Tailwind v3 config path; discovered by upward search if unset
    pub tailwind_config: Option<PathBuf>,

    /// Tailwind v4 CSS entry point
    pub entry_point: Option<PathBuf>,

    /// Where classes the framework does not recognize end up when sorting
    pub unregistered_position: UnregisteredPosition,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            attributes: vec!["^class(Name)?$".to_string()],
            class_attributes: Vec::new(),
            callees: [
                "clsx",
                "cn",
                "classNames",
                "classnames",
                "ctl",
                "cva",
                "tw",
                "twJoin",
                "twMerge",
            ]
            .iter()
            .map(|name| CalleeOption::Name(name.to_string()))
            .collect(),
            variables: vec!["^classes$".to_string(), "^styles$".to_string()],
            classes_per_line: 0,
            print_width: 80,
            group: GroupOption::Style(GroupStyle::EmptyLine),
            sort: SortOption::Toggle(true),
            order: SortDirection::Asc,
            trim: true,
            tailwind_config: None,
            entry_point: None,
            unregistered_position: UnregisteredPosition::End,
        }
    }
}

/// A callee matcher: either a bare name (all string arguments) or a name
/// with explicit per-argument rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalleeOption {
    Name(String),
    Detailed {
        name: String,
        args: Vec<ArgumentRuleOption>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "camelCase")]
pub enum ArgumentRuleOption {
    Strings,
    ObjectKeys {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    ObjectValues {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupStyle {
    EmptyLine,
    Never,
    NewLine,
}

/// `group` accepts either a style name or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupOption {
    Style(GroupStyle),
    Toggle(bool),
}

impl GroupOption {
    pub fn style(self) -> GroupStyle {
        match self {
            GroupOption::Style(style) => style,
            GroupOption::Toggle(false) => GroupStyle::Never,
            GroupOption::Toggle(true) => GroupStyle::NewLine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortStyle {
    Asc,
    Desc,
    Never,
}

/// `sort` accepts a direction, `"never"`, or a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortOption {
    Style(SortStyle),
    Toggle(bool),
}

impl SortOption {
    /// The effective direction, `None` when sorting is off. A bare `true`
    /// defers to the `order` option.
    pub fn direction(self, fallback: SortDirection) -> Option<SortDirection> {
        match self {
            SortOption::Style(SortStyle::Asc) => Some(SortDirection::Asc),
            SortOption::Style(SortStyle::Desc) => Some(SortDirection::Desc),
            SortOption::Style(SortStyle::Never) | SortOption::Toggle(false) => None,
            SortOption::Toggle(true) => Some(fallback),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnregisteredPosition {
    Keep,
    End,
}

impl LintOptions {
    /// Load options from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LinterError::ConfigError {
            message: format!("Failed to read options file {}: {}", path.display(), e),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LinterError::ConfigError {
            message: format!("Failed to parse YAML options: {}", e),
        })
    }

    /// Load options from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LinterError::ConfigError {
            message: format!("Failed to read options file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| LinterError::ConfigError {
            message: format!("Failed to parse JSON options: {}", e),
        })
    }

    /// Load options from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(LinterError::ConfigError {
                message: format!(
                    "Unsupported options file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Compile all patterns into a matcher set. Fails on the first invalid
    /// regex so misconfiguration never passes silently.
    pub fn matcher_set(&self) -> Result<MatcherSet> {
        let mut attributes = Vec::new();
        for pattern in self.attributes.iter().chain(&self.class_attributes) {
            attributes.push(AttributeMatcher::new(pattern, None)?);
        }

        let mut callees = Vec::new();
        for callee in &self.callees {
            callees.push(match callee {
                CalleeOption::Name(name) => MatcherSpec {
                    callee: name.clone(),
                    rules: vec![ArgumentRule::Strings],
                },
                CalleeOption::Detailed { name, args } => {
                    let mut rules = Vec::new();
                    for arg in args {
                        rules.push(compile_rule(arg)?);
                    }
                    MatcherSpec {
                        callee: name.clone(),
                        rules,
                    }
                }
            });
        }

        let mut variables = Vec::new();
        for pattern in &self.variables {
            variables.push(anchored(pattern)?);
        }

        Ok(MatcherSet {
            callees,
            attributes,
            variables,
        })
    }
}

fn compile_rule(option: &ArgumentRuleOption) -> Result<ArgumentRule> {
    Ok(match option {
        ArgumentRuleOption::Strings => ArgumentRule::Strings,
        ArgumentRuleOption::ObjectKeys { path } => ArgumentRule::ObjectKeys {
            path: path.as_deref().map(anchored).transpose()?,
        },
        ArgumentRuleOption::ObjectValues { path } => ArgumentRule::ObjectValues {
            path: path.as_deref().map(anchored).transpose()?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_options() {
        let options = LintOptions::default();
        assert_eq!(options.print_width, 80);
        assert!(options.trim);
        assert_eq!(options.unregistered_position, UnregisteredPosition::End);
        assert!(options
            .callees
            .iter()
            .any(|c| matches!(c, CalleeOption::Name(n) if n == "twMerge")));
    }

    #[test]
    fn test_yaml_options_loading() {
        let yaml_content = r##"
attributes:
  - "^class$"
callees:
  - ctl
  - name: cva
    args:
      - match: objectValues
        path: "variants\\..*"
classesPerLine: 4
group: never
sort: desc
"##;

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let options = LintOptions::from_yaml_file(file.path()).unwrap();
        assert_eq!(options.attributes, vec!["^class$"]);
        assert_eq!(options.callees.len(), 2);
        assert_eq!(options.classes_per_line, 4);
        assert_eq!(options.group.style(), GroupStyle::Never);
        assert_eq!(
            options.sort.direction(SortDirection::Asc),
            Some(SortDirection::Desc)
        );
    }

    #[test]
    fn test_json_options_with_false_toggles() {
        let json_content = r##"{
  "group": false,
  "sort": false,
  "unregisteredPosition": "keep"
}"##;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json_content.as_bytes()).unwrap();

        let options = LintOptions::from_json_file(file.path()).unwrap();
        assert_eq!(options.group.style(), GroupStyle::Never);
        assert_eq!(options.sort.direction(SortDirection::Asc), None);
        assert_eq!(options.unregistered_position, UnregisteredPosition::Keep);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let err = LintOptions::from_file(file.path()).unwrap_err();
        assert!(matches!(err, LinterError::ConfigError { .. }));
    }

    #[test]
    fn test_matcher_set_compilation() {
        let options = LintOptions::default();
        let set = options.matcher_set().unwrap();
        assert!(!set.callees.is_empty());
        assert!(set.attributes[0].matches("className", crate::matcher::SourceKind::Jsx));
    }

    #[test]
    fn test_bad_regex_is_fatal() {
        let options = LintOptions {
            attributes: vec!["[unclosed".to_string()],
            ..Default::default()
        };
        assert!(options.matcher_set().is_err());
    }

    #[test]
    fn test_class_attributes_alias_merged() {
        let options = LintOptions {
            attributes: vec!["^class$".to_string()],
            class_attributes: vec!["^ngClass$".to_string()],
            ..Default::default()
        };
        let set = options.matcher_set().unwrap();
        assert_eq!(set.attributes.len(), 2);
    }

    #[test]
    fn test_sort_toggle_defers_to_order() {
        let options = LintOptions {
            sort: SortOption::Toggle(true),
            order: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(
            options.sort.direction(options.order),
            Some(SortDirection::Desc)
        );
    }
}
