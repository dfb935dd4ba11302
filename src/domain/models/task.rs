//! Task definitions and their tunable parameters.
//!
//! A [`Task`] is a closed union of the task variants a curriculum may
//! schedule. Every variant carries a fixed version and a set of
//! [`TaskParameters`] that policies rewrite between sessions. The variant
//! tag is serialized as `name`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version shared by every task variant shipped with this crate.
pub const TASK_VERSION: &str = "0.0.0";

/// Operating mode of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Foo,
    Bar,
    Baz,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Foo => "foo",
            Self::Bar => "bar",
            Self::Baz => "baz",
        };
        f.write_str(s)
    }
}

/// Parameters a policy may update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskParameters {
    /// An example parameter
    #[serde(default = "default_example_parameter")]
    pub example_parameter: f64,

    pub mode: Mode,
}

const fn default_example_parameter() -> f64 {
    1.0
}

impl TaskParameters {
    /// Parameters in `mode` with every other field at its default.
    pub const fn new(mode: Mode) -> Self {
        Self {
            example_parameter: default_example_parameter(),
            mode,
        }
    }
}

/// Body shared by the task variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLogic {
    #[serde(default = "default_task_version")]
    pub version: String,

    pub task_parameters: TaskParameters,

    #[serde(default = "default_description")]
    pub description: String,
}

fn default_task_version() -> String {
    TASK_VERSION.to_string()
}

fn default_description() -> String {
    "A template task".to_string()
}

impl TaskLogic {
    pub fn new(task_parameters: TaskParameters) -> Self {
        Self {
            version: default_task_version(),
            task_parameters,
            description: default_description(),
        }
    }
}

/// The task variants a curriculum can schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Task {
    #[serde(rename = "TemplateTask")]
    Template(TaskLogic),

    #[serde(rename = "AnotherTask")]
    Another(TaskLogic),
}

impl Task {
    /// A `TemplateTask` with the given parameters.
    pub fn template(task_parameters: TaskParameters) -> Self {
        Self::Template(TaskLogic::new(task_parameters))
    }

    /// An `AnotherTask` with the given parameters.
    pub fn another(task_parameters: TaskParameters) -> Self {
        Self::Another(TaskLogic::new(task_parameters))
    }

    /// Serialized variant tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Template(_) => "TemplateTask",
            Self::Another(_) => "AnotherTask",
        }
    }

    const fn logic(&self) -> &TaskLogic {
        match self {
            Self::Template(logic) | Self::Another(logic) => logic,
        }
    }

    pub fn version(&self) -> &str {
        &self.logic().version
    }

    pub const fn parameters(&self) -> &TaskParameters {
        &self.logic().task_parameters
    }

    /// Same task, parameters replaced.
    #[must_use]
    pub fn with_parameters(&self, task_parameters: TaskParameters) -> Self {
        let mut task = self.clone();
        match &mut task {
            Self::Template(logic) | Self::Another(logic) => logic.task_parameters = task_parameters,
        }
        task
    }

    /// Variant key used by the curriculum allow-list.
    pub fn variant(&self) -> TaskVariant {
        TaskVariant::new(self.name(), self.version())
    }
}

/// A task name/version pair a curriculum accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskVariant {
    pub name: String,
    pub version: String,
}

impl TaskVariant {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for TaskVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_with_name_tag() {
        let task = Task::template(TaskParameters::new(Mode::Foo));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["name"], "TemplateTask");
        assert_eq!(json["version"], "0.0.0");
        assert_eq!(json["task_parameters"]["mode"], "foo");
        assert_eq!(json["task_parameters"]["example_parameter"], 1.0);
    }

    #[test]
    fn test_task_deserializes_another_variant_with_defaults() {
        let json = r#"{"name": "AnotherTask", "task_parameters": {"mode": "baz"}}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.name(), "AnotherTask");
        assert_eq!(task.version(), TASK_VERSION);
        assert_eq!(task.parameters().mode, Mode::Baz);
        assert!((task.parameters().example_parameter - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let json = r#"{"name": "TemplateTask", "task_parameters": {"mode": "qux"}}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_unknown_task_name_is_rejected() {
        let json = r#"{"name": "OtherTask", "task_parameters": {"mode": "foo"}}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_with_parameters_keeps_variant() {
        let task = Task::another(TaskParameters::new(Mode::Foo));
        let updated = task.with_parameters(TaskParameters::new(Mode::Bar));
        assert_eq!(updated.name(), "AnotherTask");
        assert_eq!(updated.parameters().mode, Mode::Bar);
        assert_eq!(task.parameters().mode, Mode::Foo);
    }

    #[test]
    fn test_variant_display() {
        let task = Task::template(TaskParameters::new(Mode::Foo));
        assert_eq!(task.variant().to_string(), "TemplateTask@0.0.0");
    }
}
