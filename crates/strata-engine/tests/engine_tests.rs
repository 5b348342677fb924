//! Integration tests for engine start-up, sequential loading, and events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use strata_engine::{
    Anchor, Discovery, Engine, EngineError, EngineOptions, Entity, LayerRequest, LoadOutcome,
    RADIAL_LIGHT_LAYER, RasterRequest, RasterTicket, Rasterizer, STAR_FIELD_LAYER, Screen,
    Viewport,
};
use strata_geom::{Point, Rect};
use strata_raster::{RasterImage, Rgba, Surface};

#[derive(Clone)]
struct FakeAnchor {
    frame: Rect,
    velocity: f32,
    z: i32,
}

impl Anchor for FakeAnchor {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn z(&self) -> i32 {
        self.z
    }

    fn markup(&self) -> String {
        "<p>fragment</p>".to_owned()
    }

    fn style_text(&self) -> String {
        "color: #fff".to_owned()
    }
}

struct FakeDiscovery {
    root: Option<Rect>,
    anchors: Vec<FakeAnchor>,
}

impl Discovery for FakeDiscovery {
    fn root_frame(&self) -> Option<Rect> {
        self.root
    }

    fn find_candidates(&mut self) -> Vec<Box<dyn Anchor>> {
        self.anchors
            .iter()
            .cloned()
            .map(|a| Box::new(a) as Box<dyn Anchor>)
            .collect()
    }
}

/// Records every request; ticket `n` identifies the `n`-th request.
#[derive(Default)]
struct RasterLog {
    requests: Vec<RasterRequest>,
}

struct ScriptedRasterizer {
    log: Rc<RefCell<RasterLog>>,
}

impl Rasterizer for ScriptedRasterizer {
    fn rasterize(&mut self, request: RasterRequest) -> RasterTicket {
        let mut log = self.log.borrow_mut();
        log.requests.push(request);
        RasterTicket::new(log.requests.len() as u64)
    }
}

struct FakeViewport {
    scroll: Rc<Cell<Point>>,
    size: Rc<Cell<(f32, f32)>>,
}

impl Viewport for FakeViewport {
    fn scroll_offset(&self) -> Point {
        self.scroll.get()
    }

    fn visible_size(&self) -> (f32, f32) {
        self.size.get()
    }
}

struct Harness {
    log: Rc<RefCell<RasterLog>>,
    scroll: Rc<Cell<Point>>,
    size: Rc<Cell<(f32, f32)>>,
    done: Rc<Cell<usize>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(RasterLog::default())),
            scroll: Rc::new(Cell::new(Point::new(0.0, 0.0))),
            size: Rc::new(Cell::new((800.0, 400.0))),
            done: Rc::new(Cell::new(0)),
        }
    }

    fn rasterizer(&self) -> Box<ScriptedRasterizer> {
        Box::new(ScriptedRasterizer {
            log: Rc::clone(&self.log),
        })
    }

    fn viewport(&self) -> Box<FakeViewport> {
        Box::new(FakeViewport {
            scroll: Rc::clone(&self.scroll),
            size: Rc::clone(&self.size),
        })
    }

    fn on_ready(&self) -> Box<dyn FnOnce()> {
        let done = Rc::clone(&self.done);
        Box::new(move || done.set(done.get() + 1))
    }

    fn request_count(&self) -> usize {
        self.log.borrow().requests.len()
    }

    fn start(&self, discovery: &mut FakeDiscovery, options: &EngineOptions) -> Engine {
        match Engine::start(
            discovery,
            self.rasterizer(),
            self.viewport(),
            options,
            Some(self.on_ready()),
        ) {
            Ok(engine) => engine,
            Err(e) => panic!("engine failed to start: {e}"),
        }
    }
}

fn anchor_at(left: f32, top: f32) -> FakeAnchor {
    FakeAnchor {
        frame: Rect::new(left, top, 50.0, 50.0),
        velocity: 1.0,
        z: 1,
    }
}

fn white_image() -> RasterImage {
    RasterImage::solid(50, 50, Rgba::WHITE)
}

#[test]
fn start_fails_without_root_before_any_request() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: None,
        anchors: vec![anchor_at(0.0, 0.0)],
    };
    let result = Engine::start(
        &mut discovery,
        harness.rasterizer(),
        harness.viewport(),
        &EngineOptions::default(),
        None,
    );
    assert!(matches!(result, Err(EngineError::RootNotFound)));
    assert_eq!(harness.request_count(), 0);
}

#[test]
fn start_rejects_unknown_layer_before_any_request() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: vec![anchor_at(0.0, 0.0)],
    };
    let options = EngineOptions {
        layers: vec![LayerRequest::named("aurora")],
        ..EngineOptions::default()
    };
    let result = Engine::start(
        &mut discovery,
        harness.rasterizer(),
        harness.viewport(),
        &options,
        None,
    );
    match result {
        Err(EngineError::UnknownLayer(name)) => assert_eq!(name, "aurora"),
        other => panic!("expected UnknownLayer, got {:?}", other.is_ok()),
    }
    assert_eq!(harness.request_count(), 0);
}

#[test]
fn load_is_strictly_sequential_and_fires_on_ready_once() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: vec![
            anchor_at(0.0, 0.0),
            anchor_at(100.0, 0.0),
            anchor_at(200.0, 0.0),
        ],
    };
    let mut engine = harness.start(&mut discovery, &EngineOptions::default());

    // Only the first request is in flight.
    assert_eq!(harness.request_count(), 1);
    assert!(engine.is_loading());
    assert_eq!(harness.done.get(), 0);

    assert!(engine.finish_raster(RasterTicket::new(1), Some(white_image())));
    assert_eq!(harness.request_count(), 2);
    assert_eq!(harness.done.get(), 0);

    assert!(engine.finish_raster(RasterTicket::new(2), Some(white_image())));
    assert_eq!(harness.request_count(), 3);

    assert!(engine.finish_raster(RasterTicket::new(3), Some(white_image())));
    assert_eq!(harness.request_count(), 3);
    assert_eq!(harness.done.get(), 1);
    assert!(!engine.is_loading());
    assert_eq!(engine.screen().entities().len(), 3);
}

#[test]
fn failed_rasterization_still_advances_the_queue() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: vec![anchor_at(0.0, 0.0), anchor_at(100.0, 0.0)],
    };
    let mut engine = harness.start(&mut discovery, &EngineOptions::default());

    assert!(engine.finish_raster(RasterTicket::new(1), None));
    assert_eq!(harness.request_count(), 2);

    assert!(engine.finish_raster(RasterTicket::new(2), Some(white_image())));
    assert_eq!(harness.done.get(), 1);
    assert!(!engine.is_loading());
    assert_eq!(engine.screen().entities().len(), 2);
}

#[test]
fn unmatched_ticket_is_ignored() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: vec![anchor_at(0.0, 0.0)],
    };
    let mut engine = harness.start(&mut discovery, &EngineOptions::default());

    assert!(engine.finish_raster(RasterTicket::new(1), Some(white_image())));
    assert!(!engine.finish_raster(RasterTicket::new(99), Some(white_image())));
    assert_eq!(engine.screen().entities().len(), 1);
}

#[test]
fn half_depth_fragment_draws_at_the_parallax_position() {
    let harness = Harness::new();
    // Frame centered on the 800x400 viewport, so the resting displacement
    // captured at load time is zero.
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: vec![FakeAnchor {
            frame: Rect::new(375.0, 175.0, 50.0, 50.0),
            velocity: 0.5,
            z: 1,
        }],
    };
    let mut engine = harness.start(&mut discovery, &EngineOptions::default());

    harness.scroll.set(Point::new(100.0, 0.0));
    let red = RasterImage::solid(50, 50, Rgba::new(255, 0, 0, 255));
    assert!(engine.finish_raster(RasterTicket::new(1), Some(red)));

    // x = 375 - 100 * 0.5 = 325, y = 175; extent 50x50.
    assert!(engine.handle_pointer_down(330.0, 180.0));
    engine.handle_pointer_up();
    assert!(!engine.handle_pointer_down(380.0, 180.0));

    assert_eq!(
        engine.screen().surface().pixel(330, 180),
        Rgba::new(255, 0, 0, 255)
    );
    assert_eq!(engine.screen().surface().pixel(380, 180), Rgba::new(0, 0, 0, 0));
}

#[test]
fn resize_defers_relayout_until_layout_settles() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: Vec::new(),
    };
    let mut engine = harness.start(&mut discovery, &EngineOptions::default());
    assert_eq!(harness.done.get(), 1);
    assert_eq!(engine.screen().surface().device_dimensions(), (800, 400));

    harness.size.set((1000.0, 500.0));
    engine.handle_resize();
    assert_eq!(engine.screen().surface().device_dimensions(), (800, 400));

    engine.layout_settled();
    assert_eq!(engine.screen().surface().device_dimensions(), (1000, 500));

    // A second settle with no pending resize is a no-op.
    engine.layout_settled();
    assert_eq!(engine.screen().surface().device_dimensions(), (1000, 500));
}

#[test]
fn synchronously_settled_batches_are_depth_sorted() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: Vec::new(),
    };
    // Supplied out of depth order: the star field (z = -10) first, the
    // radial light (z = -11) second.
    let options = EngineOptions {
        layers: vec![
            LayerRequest::named(STAR_FIELD_LAYER),
            LayerRequest::named(RADIAL_LIGHT_LAYER),
        ],
        ..EngineOptions::default()
    };
    let engine = harness.start(&mut discovery, &options);

    assert!(!engine.is_loading());
    let zs: Vec<i32> = engine.screen().entities().iter().map(|e| e.z()).collect();
    assert_eq!(zs, vec![-11, -10]);
}

#[test]
fn reload_requests_go_through_the_sequential_queue() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: vec![anchor_at(0.0, 0.0), anchor_at(100.0, 0.0)],
    };
    let mut engine = harness.start(&mut discovery, &EngineOptions::default());
    assert!(engine.finish_raster(RasterTicket::new(1), Some(white_image())));
    assert!(engine.finish_raster(RasterTicket::new(2), Some(white_image())));
    assert_eq!(harness.request_count(), 2);

    // Only the first fragment's reload goes in flight.
    engine.reload();
    assert_eq!(harness.request_count(), 3);
    assert!(engine.is_loading());

    assert!(engine.finish_raster(RasterTicket::new(3), Some(white_image())));
    assert_eq!(harness.request_count(), 4);

    assert!(engine.finish_raster(RasterTicket::new(4), Some(white_image())));
    assert_eq!(harness.request_count(), 4);
    assert!(!engine.is_loading());
    assert_eq!(engine.screen().entities().len(), 2);
}

#[test]
fn radial_light_layer_paints_the_gradient_center() {
    let harness = Harness::new();
    let mut discovery = FakeDiscovery {
        root: Some(Rect::new(0.0, 0.0, 800.0, 400.0)),
        anchors: Vec::new(),
    };
    let options = EngineOptions {
        layers: vec![LayerRequest::named(RADIAL_LIGHT_LAYER)],
        ..EngineOptions::default()
    };
    let mut engine = harness.start(&mut discovery, &options);
    assert!(!engine.is_loading());
    assert_eq!(engine.screen().entities().len(), 1);

    engine.handle_scroll();
    // Inside the inner radius every pixel takes the first stop color.
    assert_eq!(
        engine.screen().surface().pixel(107, 107),
        Rgba::new(0x8E, 0xD6, 0xFF, 255)
    );
}

/// Entity that records when it draws, for ordering assertions.
struct TaggedEntity {
    tag: &'static str,
    z: i32,
    order: Rc<RefCell<Vec<&'static str>>>,
}

impl Entity for TaggedEntity {
    fn z(&self) -> i32 {
        self.z
    }

    fn load(&mut self, _rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        LoadOutcome::Ready
    }

    fn reload(&mut self, _rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        LoadOutcome::Ready
    }

    fn pending_ticket(&self) -> Option<RasterTicket> {
        None
    }

    fn finish_load(&mut self, _image: Option<RasterImage>, _viewport_center: Point) {}

    fn set_bounds(&mut self, _bounds: strata_geom::Bounds) {}

    fn invalidate(&mut self) {}

    fn sync(&mut self, _bounds: strata_geom::Bounds) {}

    fn move_to(&mut self, _scroll: Point) {}

    fn draw(&mut self, _surface: &mut Surface, _scroll: Point) {
        self.order.borrow_mut().push(self.tag);
    }
}

#[test]
fn resort_is_stable_for_equal_draw_orders() {
    let harness = Harness::new();
    let mut screen = Screen::new(harness.rasterizer(), harness.viewport());
    let order = Rc::new(RefCell::new(Vec::new()));
    let tagged = |tag, z| {
        Box::new(TaggedEntity {
            tag,
            z,
            order: Rc::clone(&order),
        }) as Box<dyn Entity>
    };

    screen.load_objects(
        vec![tagged("a", 1), tagged("b", 0), tagged("c", 1)],
        None,
    );
    screen.resort();
    screen.draw();

    assert_eq!(*order.borrow(), vec!["b", "a", "c"]);
}
