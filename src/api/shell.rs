use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::engine::{EngineConfig, EngineMode, TaskEngine};
use crate::api::task::TaskSpec;
use crate::error::{EngineError, EngineResult};
use crate::render::Renderer;

/// How long the shell advertises the "still warming up" cursor after
/// construction.
pub const INITIAL_CURSOR_TIMEOUT_MS: f64 = 8_000.0;

/// Plain navigation state, separable from the engines it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    /// Index into the task list, or `None` while the menu is showing.
    pub active: Option<usize>,
    /// One-shot cursor affordance, cleared by the first tick past the
    /// timeout.
    pub initial_cursor: bool,
}

/// Top-level navigation: a menu of animated task previews, or one task
/// opened for interaction.
///
/// Opening a task builds a fresh interactive engine; going back drops it,
/// so re-entering a task always starts from blank fields, matching the
/// mount/unmount behavior this models.
pub struct AppShell<R: Renderer + Default> {
    tasks: Vec<TaskSpec>,
    config: EngineConfig,
    previews: Vec<TaskEngine<R>>,
    active: Option<TaskEngine<R>>,
    state: ShellState,
    created_at_ms: f64,
}

impl<R: Renderer + Default> AppShell<R> {
    /// Shell over the three builtin tasks.
    pub fn new(config: EngineConfig, now_ms: f64) -> EngineResult<Self> {
        Self::with_tasks(TaskSpec::builtin_tasks(), config, now_ms)
    }

    pub fn with_tasks(
        tasks: Vec<TaskSpec>,
        config: EngineConfig,
        now_ms: f64,
    ) -> EngineResult<Self> {
        config.validate()?;
        let previews = tasks
            .iter()
            .map(|task| {
                TaskEngine::new(
                    task.clone(),
                    config.with_mode(EngineMode::ChartOnly),
                    R::default(),
                )
            })
            .collect::<EngineResult<Vec<_>>>()?;
        debug!(tasks = tasks.len(), "app shell created");
        Ok(Self {
            tasks,
            config,
            previews,
            active: None,
            state: ShellState {
                active: None,
                initial_cursor: true,
            },
            created_at_ms: now_ms,
        })
    }

    /// Opens task `index` with a fresh interactive engine.
    pub fn activate(&mut self, index: usize) -> EngineResult<()> {
        let Some(task) = self.tasks.get(index) else {
            return Err(EngineError::InvalidData(format!(
                "task index {index} out of range (have {})",
                self.tasks.len()
            )));
        };
        let engine = TaskEngine::new(
            task.clone(),
            self.config.with_mode(EngineMode::Interactive),
            R::default(),
        )?;
        debug!(task = %task.name, index, "task opened");
        self.active = Some(engine);
        self.state.active = Some(index);
        Ok(())
    }

    /// Returns to the menu, discarding the open task's state.
    pub fn go_back(&mut self) {
        if let Some(index) = self.state.active.take() {
            debug!(index, "task closed");
        }
        self.active = None;
    }

    /// Advances every live engine and the one-shot cursor affordance.
    /// Returns true while anything on screen still needs repainting.
    pub fn tick(&mut self, now_ms: f64) -> EngineResult<bool> {
        if self.state.initial_cursor && now_ms - self.created_at_ms >= INITIAL_CURSOR_TIMEOUT_MS {
            self.state.initial_cursor = false;
        }

        let mut animating = false;
        match &mut self.active {
            Some(engine) => {
                animating |= engine.tick(now_ms)?.animating;
            }
            None => {
                for preview in &mut self.previews {
                    animating |= preview.tick(now_ms)?.animating;
                }
            }
        }
        Ok(animating)
    }

    #[must_use]
    pub fn state(&self) -> ShellState {
        self.state
    }

    #[must_use]
    pub fn is_menu(&self) -> bool {
        self.state.active.is_none()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.state.active
    }

    #[must_use]
    pub fn active_engine(&self) -> Option<&TaskEngine<R>> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn active_engine_mut(&mut self) -> Option<&mut TaskEngine<R>> {
        self.active.as_mut()
    }

    #[must_use]
    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    #[must_use]
    pub fn previews(&self) -> &[TaskEngine<R>] {
        &self.previews
    }

    #[must_use]
    pub fn preview_mut(&mut self, index: usize) -> Option<&mut TaskEngine<R>> {
        self.previews.get_mut(index)
    }
}
