//! The bootstrap sequencer.

use std::sync::Arc;

use camino::Utf8PathBuf;

use crate::argv::{ArgvParser, ClapArgvParser};
use crate::config::{ConfigOverlay, ConfigSources, FrozenConfig, resolve_config};
use crate::env::{Environment, ProcessEnvironment};
use crate::file::{ConfigFileLoader, TomlFileLoader};
use crate::globals::LegacyGlobals;
use crate::paths::{FsProbe, PathProbe};
use crate::preconfig::{
    EnvLocaleProbe, FrozenPreConfig, LocaleProbe, PreConfigOverlay, PreConfigSources,
    resolve_preconfig,
};
use crate::{BootError, BootResult, Outcome, RawArg};

use super::{BootState, GlobalProcessState, ProcessHooks, Runtime};

/// Drives pre-initialisation, configuration and the hand-off to the
/// runtime, enforcing the lifecycle in [`BootState`].
///
/// Every collaborator has a process-backed default; builders replace them.
///
/// ```rust
/// use boot_config::{Bootstrap, ConfigOverlay, FixedLocale, MapEnvironment, NoopHooks};
///
/// let mut bootstrap = Bootstrap::new()
///     .with_environment(MapEnvironment::new().with("PYTHONVERBOSE", "2"))
///     .with_locale(FixedLocale::new("en_GB.UTF-8"))
///     .with_hooks(NoopHooks)
///     .with_runtime(|config: &boot_config::FrozenConfig| i32::from(config.verbose));
///
/// assert!(bootstrap.initialize_from_config(Some(ConfigOverlay::default())).is_ok());
/// assert_eq!(bootstrap.run_main(), Ok(2));
/// ```
pub struct Bootstrap {
    state: BootState,
    globals: LegacyGlobals,
    environment: Box<dyn Environment + Send>,
    locale: Box<dyn LocaleProbe + Send>,
    paths: Box<dyn PathProbe + Send>,
    argv_parser: Box<dyn ArgvParser + Send>,
    file_loader: Box<dyn ConfigFileLoader + Send>,
    config_files: Vec<Utf8PathBuf>,
    hooks: Box<dyn ProcessHooks + Send>,
    runtime: Option<Box<dyn Runtime + Send>>,
    /// Overlay loaded from `config_files`, shared by both phases of a cycle.
    file: Option<ConfigOverlay>,
    pre: Option<Arc<FrozenPreConfig>>,
    config: Option<Arc<FrozenConfig>>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("state", &self.state)
            .field("globals", &self.globals)
            .field("config_files", &self.config_files)
            .field("file", &self.file)
            .field("pre", &self.pre)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Bootstrap {
    /// Sequencer reading the real process environment, locale and
    /// filesystem, with no runtime installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BootState::Unstarted,
            globals: LegacyGlobals::default(),
            environment: Box::new(ProcessEnvironment),
            locale: Box::new(EnvLocaleProbe),
            paths: Box::new(FsProbe),
            argv_parser: Box::new(ClapArgvParser),
            file_loader: Box::new(TomlFileLoader),
            config_files: Vec::new(),
            hooks: Box::new(GlobalProcessState),
            runtime: None,
            file: None,
            pre: None,
            config: None,
        }
    }

    /// Use `globals` as the legacy compatibility layer.
    #[must_use]
    pub fn with_globals(mut self, globals: LegacyGlobals) -> Self {
        self.globals = globals;
        self
    }

    /// Read environment variables from `environment`.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Environment + Send + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Probe and coerce the locale through `locale`.
    #[must_use]
    pub fn with_locale(mut self, locale: impl LocaleProbe + Send + 'static) -> Self {
        self.locale = Box::new(locale);
        self
    }

    /// Query the filesystem through `paths`.
    #[must_use]
    pub fn with_paths(mut self, paths: impl PathProbe + Send + 'static) -> Self {
        self.paths = Box::new(paths);
        self
    }

    /// Parse decoded arguments with `parser`.
    #[must_use]
    pub fn with_argv_parser(mut self, parser: impl ArgvParser + Send + 'static) -> Self {
        self.argv_parser = Box::new(parser);
        self
    }

    /// Load configuration files with `loader`.
    #[must_use]
    pub fn with_file_loader(mut self, loader: impl ConfigFileLoader + Send + 'static) -> Self {
        self.file_loader = Box::new(loader);
        self
    }

    /// Layer the configuration files at `paths`; later files win.
    #[must_use]
    pub fn with_config_files(mut self, paths: impl IntoIterator<Item = Utf8PathBuf>) -> Self {
        self.config_files = paths.into_iter().collect();
        self
    }

    /// Apply process-wide effects through `hooks`.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl ProcessHooks + Send + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Hand the frozen configuration to `runtime`.
    #[must_use]
    pub fn with_runtime(mut self, runtime: impl Runtime + Send + 'static) -> Self {
        self.runtime = Some(Box::new(runtime));
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BootState {
        self.state
    }

    /// Frozen pre-configuration, once pre-initialised.
    #[must_use]
    pub const fn pre_config(&self) -> Option<&Arc<FrozenPreConfig>> {
        self.pre.as_ref()
    }

    /// Frozen configuration, once resolved. Stays readable after the runtime
    /// returns.
    #[must_use]
    pub const fn config(&self) -> Option<&Arc<FrozenConfig>> {
        self.config.as_ref()
    }

    /// Resolve and adopt the pre-configuration.
    pub fn pre_initialize(&mut self, explicit: Option<PreConfigOverlay>) -> Outcome {
        let result = self.try_pre_initialize(explicit.as_ref(), None);
        self.settle(result)
    }

    /// Resolve and adopt the pre-configuration, pre-scanning `args`.
    pub fn pre_initialize_from_args(
        &mut self,
        explicit: Option<PreConfigOverlay>,
        args: &[RawArg],
    ) -> Outcome {
        let result = self.try_pre_initialize(explicit.as_ref(), Some(args));
        self.settle(result)
    }

    /// Resolve and adopt the configuration without a command line.
    ///
    /// Pre-initialises first when needed, taking the explicit
    /// pre-configuration from `explicit`.
    pub fn initialize_from_config(&mut self, explicit: Option<ConfigOverlay>) -> Outcome {
        let result = self.try_initialize(explicit.as_ref(), None);
        self.settle(result)
    }

    /// Resolve and adopt the configuration, parsing `args`.
    pub fn initialize_from_args(
        &mut self,
        explicit: Option<ConfigOverlay>,
        args: &[RawArg],
    ) -> Outcome {
        let result = self.try_initialize(explicit.as_ref(), Some(args));
        self.settle(result)
    }

    /// Hand the frozen configuration to the runtime and return its exit
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::InvalidState`] unless the configuration has been
    /// resolved, and an internal error when no runtime is installed.
    pub fn run_main(&mut self) -> BootResult<i32> {
        let (BootState::ConfigResolved, Some(config)) = (self.state, self.config.clone()) else {
            return Err(self.invalid_state("run_main"));
        };
        let Some(mut runtime) = self.runtime.take() else {
            self.transition(BootState::Failed);
            return Err(BootError::internal(
                "run_main",
                "no runtime entry point installed",
            ));
        };
        self.transition(BootState::Running);
        tracing::info!(mode = ?config.run_mode(), "running runtime entry point");
        let status = runtime.run(&config);
        self.runtime = Some(runtime);
        self.transition(BootState::Finalized);
        tracing::info!(status, "runtime entry point returned");
        Ok(status)
    }

    /// Return to [`BootState::Unstarted`], discarding frozen state.
    ///
    /// Process-wide effects already applied are not rolled back.
    pub fn reset(&mut self) {
        self.file = None;
        self.pre = None;
        self.config = None;
        self.transition(BootState::Unstarted);
    }

    fn try_pre_initialize(
        &mut self,
        explicit: Option<&PreConfigOverlay>,
        args: Option<&[RawArg]>,
    ) -> BootResult<()> {
        match self.state {
            BootState::Unstarted => {}
            BootState::Finalized => self.reset(),
            BootState::PreInitialized | BootState::ConfigResolved => {
                tracing::debug!(state = %self.state, "pre-configuration already frozen");
                return Ok(());
            }
            BootState::Running | BootState::Failed => {
                return Err(self.invalid_state("pre_initialize"));
            }
        }
        if !self.config_files.is_empty() {
            self.file = Some(self.file_loader.load(&self.config_files)?);
        }
        let file = self
            .file
            .as_ref()
            .map(ConfigOverlay::pre_overlay)
            .transpose()?;
        let pre = resolve_preconfig(&PreConfigSources {
            globals: &self.globals,
            environment: &*self.environment,
            locale: &*self.locale,
            args,
            file: file.as_ref(),
            explicit,
        })?;
        self.hooks.apply(&pre, &*self.locale)?;
        self.pre = Some(Arc::new(pre));
        self.transition(BootState::PreInitialized);
        Ok(())
    }

    fn try_initialize(
        &mut self,
        explicit: Option<&ConfigOverlay>,
        args: Option<&[RawArg]>,
    ) -> BootResult<()> {
        match self.state {
            BootState::Unstarted | BootState::Finalized => {
                let implied = explicit.map(ConfigOverlay::pre_overlay).transpose()?;
                self.try_pre_initialize(implied.as_ref(), args)?;
            }
            BootState::PreInitialized => {}
            BootState::ConfigResolved | BootState::Running | BootState::Failed => {
                return Err(self.invalid_state("initialize"));
            }
        }
        let Some(pre) = self.pre.clone() else {
            return Err(BootError::internal(
                "initialize",
                "pre-configuration missing after pre-initialisation",
            ));
        };
        let command_line = args
            .map(|args| {
                let decoded = pre.decoder().decode_all(args, "argument")?;
                self.argv_parser.parse(&decoded)
            })
            .transpose()?;
        let config = resolve_config(&ConfigSources {
            pre: &pre,
            globals: &self.globals,
            environment: &*self.environment,
            paths: &*self.paths,
            file: self.file.as_ref(),
            command_line: command_line.as_ref(),
            explicit,
        })?;
        self.config = Some(Arc::new(config));
        self.transition(BootState::ConfigResolved);
        Ok(())
    }

    /// Convert a step result into an outcome, failing the cycle on error.
    ///
    /// Lifecycle misuse leaves the state untouched so the cycle in progress
    /// can continue.
    fn settle(&mut self, result: BootResult<()>) -> Outcome {
        if let Err(err) = &result
            && !matches!(err, BootError::InvalidState { .. })
        {
            tracing::debug!(error = %err, "bootstrap step failed");
            self.transition(BootState::Failed);
        }
        Outcome::from(result)
    }

    const fn invalid_state(&self, operation: &'static str) -> BootError {
        BootError::InvalidState {
            operation,
            state: self.state.as_str(),
        }
    }

    fn transition(&mut self, to: BootState) {
        if self.state != to {
            tracing::info!(from = %self.state, %to, "bootstrap state transition");
            self.state = to;
        }
    }
}
