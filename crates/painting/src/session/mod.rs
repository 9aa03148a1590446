//! Drawing session - the interaction state machine
//!
//! This module connects:
//! - Input events from the host ([`InputEvent`])
//! - The camera ([`ViewportTransform`]) for pan/zoom and coordinate mapping
//! - The rasterizer, filling gaps between pointer samples
//! - The surface pair (scratch + visible) and presentation
//!
//! Every handler runs to completion before the next event is processed.
//! Changes the host has to mirror (placement, presentation, picker values)
//! are queued as [`CoreToHost`] commands and drained with
//! [`DrawingSession::take_outbound`].

mod colors;
mod events;

use glam::Vec2;
use pixelpad_config::{CanvasConfig, ConfigError};
use pixelpad_ipc::{ColorSlot, CoreToHost, InputEvent};
use thiserror::Error;
use tracing::{info, warn};

use crate::color::{ColorError, ColorValue};
use crate::constants::SETUP_INSET;
use crate::palette::{Palette, PaletteError};
use crate::surface::{PixelSurface, PresentMode, SurfacePair};
use crate::types::{CursorState, SelectedColors, SessionState};
use crate::viewport::{ViewportError, ViewportTransform};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid color input: {0}")]
    InvalidColorInput(#[from] ColorError),
    #[error("{0}")]
    InvalidPaletteType(String),
    #[error(transparent)]
    DegenerateScale(#[from] ViewportError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl From<PaletteError> for SessionError {
    fn from(error: PaletteError) -> Self {
        match error {
            PaletteError::InvalidType(_) => Self::InvalidPaletteType(error.to_string()),
            PaletteError::InvalidColor { index, source } => {
                warn!("Rejected palette: color {} is invalid", index);
                Self::InvalidColorInput(source)
            }
        }
    }
}

impl SessionError {
    /// Stable code for host-side error reporting
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidColorInput(_) => "invalid_color_input",
            Self::InvalidPaletteType(_) => "invalid_palette_type",
            Self::DegenerateScale(_) => "degenerate_scale",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// One interactive drawing session over a fixed-size grid
pub struct DrawingSession {
    config: CanvasConfig,
    viewport: ViewportTransform,
    cursor: CursorState,
    colors: SelectedColors,
    palette: Palette,
    surfaces: SurfacePair,
    /// Host window size in screen units
    window: Vec2,
    /// Commands for the host, drained after each event
    outbound: Vec<CoreToHost>,
}

impl DrawingSession {
    /// Set up a session: allocate the grid, place and zoom the canvas around
    /// the window center, select the configured colors and install the
    /// default palette.
    pub fn new(config: CanvasConfig, window_size: Vec2) -> Result<Self, SessionError> {
        config.validate()?;

        let (width, height) = config.grid();
        let mode = if config.buffered {
            PresentMode::Buffered
        } else {
            PresentMode::Direct
        };

        let mut session = Self {
            viewport: ViewportTransform::new(width, height, config.min_scale, config.max_scale),
            cursor: CursorState::default(),
            colors: SelectedColors::default(),
            palette: Palette::default(),
            surfaces: SurfacePair::new(width, height, mode),
            window: window_size,
            outbound: Vec::new(),
            config,
        };

        let center = session.window_center();
        session
            .viewport
            .set_position(center.x - SETUP_INSET, center.y - SETUP_INSET, false);
        session.viewport.set_scale(session.config.initial_scale, center)?;
        session.queue_placement();

        let primary = session.config.primary.clone();
        let secondary = session.config.secondary.clone();
        session.set_primary_color(&primary)?;
        session.set_secondary_color(&secondary)?;
        session.set_palette(Palette::pico8());

        session.outbound.push(CoreToHost::Present);

        info!(
            "DrawingSession ready: grid {}x{}, scale {:.2}, offset {:?}, {:?}",
            width,
            height,
            session.viewport.scale(),
            session.viewport.offset(),
            mode
        );

        Ok(session)
    }

    /// Feed a sequence of events, stopping at the first error
    pub fn replay<I>(&mut self, events: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle(event)?;
        }
        Ok(())
    }

    /// Drain the commands queued for the host
    pub fn take_outbound(&mut self) -> Vec<CoreToHost> {
        std::mem::take(&mut self.outbound)
    }

    pub fn state(&self) -> SessionState {
        self.cursor.state()
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn selected_colors(&self) -> SelectedColors {
        self.colors
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The surface the host displays
    pub fn visible(&self) -> &PixelSurface {
        self.surfaces.visible()
    }

    pub fn surfaces(&self) -> &SurfacePair {
        &self.surfaces
    }

    pub fn window_center(&self) -> Vec2 {
        self.window / 2.0
    }

    fn queue_placement(&mut self) {
        let placement = self.viewport.placement();
        self.outbound.push(CoreToHost::PlaceSurface {
            left: placement.left,
            top: placement.top,
            width: placement.width,
            height: placement.height,
        });
    }

    fn queue_picker(&mut self, slot: ColorSlot, color: ColorValue) {
        self.outbound.push(CoreToHost::PickerChanged {
            slot,
            color: color.to_hex(),
        });
    }
}
