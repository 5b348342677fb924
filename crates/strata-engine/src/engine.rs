//! Engine bootstrap and host event entry points.
//!
//! [`Engine::start`] wires the host's discovery, rasterization, and viewport
//! services into a running instance:
//!
//! 1. **Validate** — resolve the root region and every requested layer name;
//!    both failures are fatal and raised before any rasterization begins.
//! 2. **Build** — instantiate layers, scan anchors into fragments, and queue
//!    everything for sequential loading.
//! 3. **React** — the host forwards scroll, resize, pointer, and raster
//!    completion events through the `handle_*` / `finish_raster` methods.

use thiserror::Error;

use strata_common::warning::clear_warnings;
use strata_raster::RasterImage;

use crate::entity::Entity;
use crate::fragment::FragmentOptions;
use crate::host::{Discovery, RasterTicket, Rasterizer, Viewport};
use crate::layer::{RadialLightLayer, RadialLightOptions, StarFieldLayer, StarFieldOptions};
use crate::screen::{DoneCallback, Screen};
use crate::src::Src;

/// Registry name of the star field layer.
pub const STAR_FIELD_LAYER: &str = "star-field";
/// Registry name of the radial light layer.
pub const RADIAL_LIGHT_LAYER: &str = "radial-light";

/// Fatal start-up configuration errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configured root region does not exist in the host document.
    #[error("root region not found")]
    RootNotFound,
    /// A requested layer name is not in the registry.
    #[error("unknown layer '{0}'")]
    UnknownLayer(String),
}

/// A named background layer to instantiate at start-up.
///
/// Only the options matching the name are read; the rest are ignored.
#[derive(Debug, Clone, Default)]
pub struct LayerRequest {
    /// Registry name ([`STAR_FIELD_LAYER`] or [`RADIAL_LIGHT_LAYER`]).
    pub name: String,
    /// Options for a star field layer, if non-default ones are wanted.
    pub star_field: Option<StarFieldOptions>,
    /// Options for a radial light layer.
    pub radial_light: Option<RadialLightOptions>,
}

impl LayerRequest {
    /// Request a layer by registry name with default options.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }
}

/// Start-up options.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Lock the horizontal correction axis for every fragment.
    pub h_lock: bool,
    /// Lock the vertical correction axis.
    pub v_lock: bool,
    /// Override every anchor's depth speed.
    pub velocity: Option<f32>,
    /// Background layers to instantiate, back to front.
    pub layers: Vec<LayerRequest>,
}

/// A running compositor instance.
pub struct Engine {
    /// Screen owning the surface and entities.
    screen: Screen,
    /// Set by `handle_resize`, consumed by `layout_settled`.
    needs_settle: bool,
}

impl Engine {
    /// Discover, validate, and start loading.
    ///
    /// `on_ready` fires once when every queued entity has settled.
    ///
    /// # Errors
    ///
    /// [`EngineError::RootNotFound`] if the discovery reports no root
    /// region, [`EngineError::UnknownLayer`] for an unrecognized layer name.
    /// Both are raised before any rasterization request is issued.
    pub fn start(
        discovery: &mut dyn Discovery,
        rasterizer: Box<dyn Rasterizer>,
        viewport: Box<dyn Viewport>,
        options: &EngineOptions,
        on_ready: Option<DoneCallback>,
    ) -> Result<Self, EngineError> {
        if discovery.root_frame().is_none() {
            return Err(EngineError::RootNotFound);
        }
        let mut entities: Vec<Box<dyn Entity>> = options
            .layers
            .iter()
            .map(build_layer)
            .collect::<Result<_, _>>()?;

        let fragment_options = FragmentOptions {
            h_lock: options.h_lock,
            v_lock: options.v_lock,
            velocity: options.velocity,
        };
        for fragment in Src::new(discovery).create_fragments(&fragment_options) {
            entities.push(Box::new(fragment));
        }

        let mut screen = Screen::new(rasterizer, viewport);
        screen.load_objects(entities, on_ready);
        // A batch with nothing to rasterize settles synchronously; give it
        // its first composite right away.
        if !screen.is_loading() {
            screen.redraw();
        }
        Ok(Self {
            screen,
            needs_settle: false,
        })
    }

    /// The screen.
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable access to the screen (hosts read the surface through this).
    pub const fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Whether any load is still unsettled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }

    /// Deliver a rasterization outcome from the host.
    ///
    /// Returns `true` if the ticket matched an entity. Once every load has
    /// settled the screen re-sorts by draw order, and the surface is
    /// redrawn.
    pub fn finish_raster(&mut self, ticket: RasterTicket, image: Option<RasterImage>) -> bool {
        let matched = self.screen.finish_raster(ticket, image);
        if matched && !self.screen.is_loading() {
            self.screen.redraw();
        }
        matched
    }

    /// Re-request rasterization for every settled entity, sequentially.
    pub fn reload(&mut self) {
        self.screen.reload_all();
    }

    /// Scroll event: recompute every placement and redraw.
    pub fn handle_scroll(&mut self) {
        self.screen.draw();
    }

    /// Resize event: defer the actual relayout until the host's layout has
    /// settled ([`Engine::layout_settled`]).
    pub const fn handle_resize(&mut self) {
        self.needs_settle = true;
    }

    /// Perform the relayout deferred by [`Engine::handle_resize`].
    ///
    /// The host calls this after a short bounded delay following the resize
    /// event; re-reads anchor geometry, resizes the surface, and redraws. A
    /// call with no pending resize is a no-op.
    pub fn layout_settled(&mut self) {
        if !self.needs_settle {
            return;
        }
        self.needs_settle = false;
        self.screen.invalidate_all();
        self.screen.resize();
    }

    /// Pointer press: dim the topmost hit fragment and redraw.
    ///
    /// Returns `true` if something was hit.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let hit = self.screen.pointer_down(x, y);
        if hit {
            self.screen.redraw();
        }
        hit
    }

    /// Pointer release: restore every fragment's resting appearance.
    pub fn handle_pointer_up(&mut self) {
        self.screen.pointer_up();
        self.screen.redraw();
    }
}

impl Drop for Engine {
    /// Tearing down a running instance resets the deduplicated warning set,
    /// so a fresh instance reports recoverable failures anew.
    fn drop(&mut self) {
        clear_warnings();
    }
}

/// Instantiate a layer from the registry.
fn build_layer(request: &LayerRequest) -> Result<Box<dyn Entity>, EngineError> {
    match request.name.as_str() {
        STAR_FIELD_LAYER => Ok(Box::new(StarFieldLayer::new(
            request.star_field.clone().unwrap_or_default(),
        ))),
        RADIAL_LIGHT_LAYER => Ok(Box::new(RadialLightLayer::new(
            request.radial_light.clone().unwrap_or_default(),
        ))),
        other => Err(EngineError::UnknownLayer(other.to_owned())),
    }
}
