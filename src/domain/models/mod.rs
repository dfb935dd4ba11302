pub mod config;
pub mod curriculum;
pub mod metrics;
pub mod policy;
pub mod stage;
pub mod task;
pub mod trainer_state;
pub mod transition;

pub use config::{Config, LoggingConfig, RunConfig};
pub use curriculum::{Curriculum, CurriculumId, StageEdge};
pub use metrics::Metrics;
pub use policy::{apply_policies, identity_policy, Policy, PolicyRule};
pub use stage::{MetricsProvider, Stage};
pub use task::{Mode, Task, TaskLogic, TaskParameters, TaskVariant, TASK_VERSION};
pub use trainer_state::TrainerState;
pub use transition::{PolicyTransition, StageTransition, TransitionRule};
