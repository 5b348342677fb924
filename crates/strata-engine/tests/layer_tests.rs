//! Procedural layer tests: star wrapping and the radial light gradient.

use strata_engine::{
    Entity, RadialLightLayer, RadialLightOptions, Star, StarFieldLayer, StarFieldOptions,
};
use strata_geom::{Bounds, Point};
use strata_raster::{Rgba, Surface};

#[test]
fn star_positions_stay_inside_the_bounds() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let mut star = Star::new(Point::new(10.0, 20.0), 0.5, 0.5, Rgba::WHITE);

    let deltas = [
        (0.0, 0.0),
        (33.0, 7.0),
        (12_345.7, 998.2),
        (-98_765.4, -41.0),
        (-0.25, -49.9),
        (1.0e7, -1.0e7),
    ];
    for (dx, dy) in deltas {
        star.advance(dx, dy, &bounds);
        let p = star.position();
        assert!((0.0..100.0).contains(&p.x), "x = {} after ({dx}, {dy})", p.x);
        assert!((0.0..50.0).contains(&p.y), "y = {} after ({dx}, {dy})", p.y);
    }
}

#[test]
fn faster_stars_move_further() {
    let bounds = Bounds::new(0.0, 0.0, 1000.0, 1000.0);
    let mut slow = Star::new(Point::new(0.0, 0.0), 0.25, 0.25, Rgba::WHITE);
    let mut fast = Star::new(Point::new(0.0, 0.0), 0.75, 0.75, Rgba::WHITE);

    slow.advance(100.0, 0.0, &bounds);
    fast.advance(100.0, 0.0, &bounds);
    assert_eq!(slow.position().x, 25.0);
    assert_eq!(fast.position().x, 75.0);
}

#[test]
fn star_count_scales_with_the_bounds_area() {
    assert_eq!(
        StarFieldLayer::star_count_for(&Bounds::new(0.0, 0.0, 800.0, 400.0)),
        800
    );
    assert_eq!(
        StarFieldLayer::star_count_for(&Bounds::new(0.0, 0.0, 20.0, 10.0)),
        0
    );
    assert_eq!(StarFieldLayer::star_count_for(&Bounds::default()), 0);
}

#[test]
fn star_field_regenerates_when_the_bounds_change() {
    let mut layer = StarFieldLayer::new(StarFieldOptions::default());
    assert!(layer.stars().is_empty());

    layer.set_bounds(Bounds::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(layer.stars().len(), 100);

    // Same bounds keep the same payload.
    let first = layer.stars()[0].position();
    layer.set_bounds(Bounds::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(layer.stars()[0].position(), first);

    layer.set_bounds(Bounds::new(0.0, 0.0, 400.0, 400.0));
    assert_eq!(layer.stars().len(), 400);
}

#[test]
fn star_field_draw_keeps_every_star_in_bounds() {
    let bounds = Bounds::new(0.0, 0.0, 300.0, 200.0);
    let mut layer = StarFieldLayer::new(StarFieldOptions::default());
    layer.set_bounds(bounds);
    let mut surface = Surface::new(300.0, 200.0, 1.0);

    for scroll in [
        Point::new(0.0, 0.0),
        Point::new(512.5, -80.0),
        Point::new(-9000.0, 4321.0),
    ] {
        layer.draw(&mut surface, scroll);
        for star in layer.stars() {
            let p = star.position();
            assert!((0.0..300.0).contains(&p.x));
            assert!((0.0..200.0).contains(&p.y));
        }
    }
}

#[test]
fn radial_light_modulates_its_position_by_scroll() {
    let mut layer = RadialLightLayer::new(RadialLightOptions::default());
    layer.set_bounds(Bounds::new(0.0, 0.0, 300.0, 300.0));

    // (600 * 0.5) mod 300 wraps to the origin.
    let pos = layer.modulated_position(Point::new(600.0, 0.0));
    assert_eq!(pos.x, 0.0);
    assert_eq!(pos.y, 0.0);

    let pos = layer.modulated_position(Point::new(250.0, 100.0));
    assert_eq!(pos.x, 125.0);
    assert_eq!(pos.y, 50.0);
}

#[test]
fn radial_light_radius_follows_the_influence_factor() {
    let mut layer = RadialLightLayer::new(RadialLightOptions::default());
    layer.set_bounds(Bounds::new(0.0, 0.0, 300.0, 300.0));
    assert_eq!(layer.base_radius(), 100.0);

    // No lock flags: the factor is pinned to zero, so the outer radius is
    // base * (expansion - 1).
    assert_eq!(layer.outer_radius(Point::new(600.0, 0.0)), 200.0);

    // A vertical lock rates the x axis; position 0 sits at the bounds
    // minimum, so |factor| = 1.
    let mut locked = RadialLightLayer::new(RadialLightOptions {
        v_lock: true,
        ..RadialLightOptions::default()
    });
    locked.set_bounds(Bounds::new(0.0, 0.0, 300.0, 300.0));
    assert_eq!(locked.outer_radius(Point::new(600.0, 0.0)), 300.0);

    // Bounds center: factor 0 again.
    assert_eq!(locked.outer_radius(Point::new(300.0, 0.0)), 200.0);
}

#[test]
fn radial_light_draw_fills_from_the_first_stop() {
    let mut layer = RadialLightLayer::new(RadialLightOptions::default());
    layer.set_bounds(Bounds::new(0.0, 0.0, 300.0, 300.0));
    let mut surface = Surface::new(300.0, 300.0, 1.0);

    layer.draw(&mut surface, Point::new(0.0, 0.0));

    // The gradient center sits at 0.8 * base radius on both axes; inside the
    // inner radius everything takes the first color stop.
    assert_eq!(surface.pixel(80, 80), Rgba::new(0x8E, 0xD6, 0xFF, 255));
    // Far corner: beyond the outer radius, the last stop.
    assert_eq!(surface.pixel(299, 299), Rgba::new(0x00, 0x4C, 0xB3, 255));
}

#[test]
fn degenerate_bounds_draw_nothing() {
    let mut layer = RadialLightLayer::new(RadialLightOptions::default());
    layer.set_bounds(Bounds::new(0.0, 0.0, 0.0, 0.0));
    let mut surface = Surface::new(100.0, 100.0, 1.0);

    layer.draw(&mut surface, Point::new(0.0, 0.0));
    assert_eq!(surface.pixel(50, 50), Rgba::new(0, 0, 0, 0));
}
