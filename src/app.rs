use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::trial::{TrialRecord, TrialRecorder};
use marking_core::{
    Geometry, GeometryError, MenuError, MenuItems, PointerEvent, SelectionMachine, SelectionState,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::ops::ControlFlow;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub type Menu = SelectionMachine<TrialRecorder, SmallRng>;

pub fn build_menu(config: &Config) -> Result<Menu, AppError> {
    let items = MenuItems::new(config.menu.items.iter().cloned())?;
    let geometry = Geometry::new(config.menu.layout, items.len(), &config.menu.dimensions())?;
    let rng = config
        .menu
        .seed
        .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
    let recorder = TrialRecorder::new(config.menu.layout, items, config.experiment.enabled);
    Ok(SelectionMachine::new(geometry, recorder, rng))
}

/// Owns the live menu and applies host events to it one at a time.
pub struct App {
    config: Config,
    config_path: Option<PathBuf>,
    menu: Menu,
    pending: Option<Config>,
    records: Vec<TrialRecord>,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let menu = build_menu(&config)?;
        log::info!(
            "{} menu ready with {} items",
            config.menu.layout,
            menu.geometry().item_count()
        );
        Ok(Self {
            config,
            config_path,
            menu,
            pending: None,
            records: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// Hands over finished trials, leaving none behind.
    pub fn take_records(&mut self) -> Vec<TrialRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn has_pending_reload(&self) -> bool {
        self.pending.is_some()
    }

    pub fn update(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Pointer(pointer) => self.handle_pointer(pointer),
            AppEvent::ConfigReload => self.reload(),
            AppEvent::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.menu.on_pointer_event(event) {
            log::warn!(
                "Ignored {} at ({:.1}, {:.1}) while {}",
                event.kind,
                event.point.x,
                event.point.y,
                self.menu.state()
            );
            return;
        }

        if self.menu.state() == SelectionState::Idle {
            self.records
                .extend(self.menu.observer_mut().take_records());
            if let Some(config) = self.pending.take() {
                self.reconfigure(config);
            }
        }
    }

    fn reload(&mut self) {
        let loaded = config::resolve_path(self.config_path.as_deref())
            .and_then(|path| config::load_config_from(&path));
        match loaded {
            Ok(config) => self.reconfigure(config),
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }

    /// Swaps in a new menu. A session in progress keeps its menu until the
    /// pointer is released.
    pub fn reconfigure(&mut self, config: Config) {
        if self.menu.state() == SelectionState::Tracking {
            log::info!("Configuration change deferred until the current selection ends");
            self.pending = Some(config);
            return;
        }

        match build_menu(&config) {
            Ok(menu) => {
                self.menu = menu;
                self.config = config;
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Keeping the previous menu: {}", e),
        }
    }
}
