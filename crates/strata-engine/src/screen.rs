//! The screen: surface ownership, entity registry, and the load queue.
//!
//! The screen is the composition root below the engine. It:
//!
//! 1. **Owns the surface** and clears + redraws it in full on every frame.
//! 2. **Registers entities** and keeps them sorted by draw order.
//! 3. **Loads sequentially** — at most one rasterization request is in
//!    flight at a time; the next queued entity loads only after the
//!    previous outcome arrives.

use std::collections::VecDeque;

use strata_geom::{Bounds, Rect};
use strata_raster::{RasterImage, Surface};

use crate::entity::{Entity, LoadOutcome};
use crate::host::{RasterTicket, Rasterizer, Viewport};

/// Callback invoked once when a batch of queued entities has fully settled.
pub type DoneCallback = Box<dyn FnOnce()>;

/// Surface owner and entity registry.
pub struct Screen {
    /// The compositing surface.
    surface: Surface,
    /// Settled entities in draw order (ascending `z`).
    entities: Vec<Box<dyn Entity>>,
    /// Entities waiting for their turn to load.
    queue: VecDeque<Box<dyn Entity>>,
    /// The single entity whose rasterization is currently in flight.
    loading: Option<Box<dyn Entity>>,
    /// Indices of settled entities awaiting their turn to reload.
    reload_queue: VecDeque<usize>,
    /// Fires once when the queue drains and nothing is in flight.
    on_done: Option<DoneCallback>,
    /// Active layout bounds, rebuilt on every resize.
    bounds: Bounds,
    /// Host rasterization service.
    rasterizer: Box<dyn Rasterizer>,
    /// Host scroll/size/density source.
    viewport: Box<dyn Viewport>,
}

impl Screen {
    /// Create a screen covering the host's current visible size.
    #[must_use]
    pub fn new(rasterizer: Box<dyn Rasterizer>, viewport: Box<dyn Viewport>) -> Self {
        let (width, height) = viewport.visible_size();
        let ratio = viewport.pixel_ratio();
        Self {
            surface: Surface::new(width, height, ratio),
            entities: Vec::new(),
            queue: VecDeque::new(),
            loading: None,
            reload_queue: VecDeque::new(),
            on_done: None,
            bounds: Bounds::from_rect(&Rect::new(0.0, 0.0, width, height)),
            rasterizer,
            viewport,
        }
    }

    /// The compositing surface.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Settled entities in current draw order.
    #[must_use]
    pub fn entities(&self) -> &[Box<dyn Entity>] {
        &self.entities
    }

    /// Active layout bounds.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether any queued or in-flight load or reload remains unsettled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some() || !self.queue.is_empty() || !self.reload_queue.is_empty()
    }

    /// Queue entities for loading, one at a time, in order.
    ///
    /// `on_done` fires exactly once, after every queued entity has settled
    /// (successfully or not). Entities that need no rasterization settle
    /// immediately and never hold the queue.
    pub fn load_objects(&mut self, entities: Vec<Box<dyn Entity>>, on_done: Option<DoneCallback>) {
        self.queue.extend(entities);
        self.on_done = on_done;
        self.advance_queues();
    }

    /// Deliver a rasterization outcome from the host.
    ///
    /// Returns `true` if the ticket matched an entity. The currently loading
    /// entity is checked first, then already-settled entities with a reload
    /// in flight. A ticket matching nothing (e.g. its fragment was unloaded
    /// and dropped) is ignored.
    pub fn finish_raster(&mut self, ticket: RasterTicket, image: Option<RasterImage>) -> bool {
        let center = self.bounds.center();
        if let Some(pending) = self.loading.as_ref().and_then(|e| e.pending_ticket())
            && pending == ticket
        {
            if let Some(mut entity) = self.loading.take() {
                entity.finish_load(image, center);
                entity.set_bounds(self.bounds);
                self.entities.push(entity);
            }
            self.advance_queues();
            return true;
        }
        if let Some(index) = self
            .entities
            .iter()
            .position(|e| e.pending_ticket() == Some(ticket))
        {
            self.entities[index].finish_load(image, center);
            if self.reload_queue.front() == Some(&index) {
                let _ = self.reload_queue.pop_front();
            }
            self.advance_queues();
            return true;
        }
        false
    }

    /// Re-request rasterization for every settled entity, one at a time.
    ///
    /// Reloads go through the same single in-flight slot as fresh loads: the
    /// next entity's request is only issued after the previous reload's
    /// outcome arrives. Entities keep their current image (and keep drawing)
    /// until their replacement settles.
    pub fn reload_all(&mut self) {
        self.reload_queue = (0..self.entities.len()).collect();
        self.advance_queues();
    }

    /// Re-read anchor geometry for every settled entity.
    pub fn invalidate_all(&mut self) {
        for entity in &mut self.entities {
            entity.invalidate();
        }
    }

    /// Re-sort entities by draw order. The sort is stable, so entities that
    /// share a `z` keep their registration order.
    pub fn resort(&mut self) {
        self.entities.sort_by_key(|entity| entity.z());
    }

    /// Clear the surface and draw every entity, back to front, against the
    /// host's current scroll offset.
    pub fn draw(&mut self) {
        self.surface.clear();
        let scroll = self.viewport.scroll_offset();
        for entity in &mut self.entities {
            entity.move_to(scroll);
            entity.draw(&mut self.surface, scroll);
        }
    }

    /// Full redraw (alias kept for call sites that react to invalidation).
    pub fn redraw(&mut self) {
        self.draw();
    }

    /// Resize the surface to an explicit layout size.
    ///
    /// Re-queries the device pixel ratio, installs the new bounds on every
    /// entity, recomputes resting displacements, and redraws.
    pub fn size(&mut self, width: f32, height: f32) {
        let ratio = self.viewport.pixel_ratio();
        self.surface.resize(width, height, ratio);
        self.bounds = Bounds::from_rect(&Rect::new(0.0, 0.0, width, height));
        for entity in &mut self.entities {
            entity.set_bounds(self.bounds);
            entity.sync(self.bounds);
        }
        self.redraw();
    }

    /// Resize the surface to the host's current visible size.
    pub fn resize(&mut self) {
        let (width, height) = self.viewport.visible_size();
        self.size(width, height);
    }

    /// Press feedback: dim the topmost entity hit by the position.
    ///
    /// Returns `true` if something was hit.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        for entity in self.entities.iter_mut().rev() {
            if entity.hits(x, y) {
                entity.set_pressed(true);
                return true;
            }
        }
        false
    }

    /// Release feedback: restore every entity's resting appearance.
    pub fn pointer_up(&mut self) {
        for entity in &mut self.entities {
            entity.set_pressed(false);
        }
    }

    /// Whether the front of the reload queue has a request in flight.
    fn reload_in_flight(&self) -> bool {
        self.reload_queue
            .front()
            .is_some_and(|&index| self.entities[index].pending_ticket().is_some())
    }

    /// Drive both queues until one request goes in flight or both drain.
    ///
    /// Fresh loads and reloads share the single in-flight slot. Entities
    /// that settle immediately are registered (or popped) on the spot; the
    /// first pending one blocks everything behind it. Once both queues
    /// drain, the entities are re-sorted by draw order and `on_done` fires.
    fn advance_queues(&mut self) {
        while self.loading.is_none() && !self.reload_in_flight() {
            let Some(mut entity) = self.queue.pop_front() else {
                break;
            };
            match entity.load(self.rasterizer.as_mut()) {
                LoadOutcome::Ready => {
                    entity.set_bounds(self.bounds);
                    self.entities.push(entity);
                }
                LoadOutcome::Pending(_) => {
                    self.loading = Some(entity);
                }
            }
        }
        if self.loading.is_none() {
            while let Some(&index) = self.reload_queue.front() {
                match self.entities[index].reload(self.rasterizer.as_mut()) {
                    LoadOutcome::Ready => {
                        let _ = self.reload_queue.pop_front();
                    }
                    LoadOutcome::Pending(_) => break,
                }
            }
        }
        // The reload queue holds indices, so the resort must wait until it
        // drains.
        if self.loading.is_none() && self.queue.is_empty() && self.reload_queue.is_empty() {
            self.resort();
            if let Some(done) = self.on_done.take() {
                done();
            }
        }
    }
}
