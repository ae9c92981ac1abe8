//! Criterion benchmarks for placement search and drag-frame validation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roomplan::collision::check_placement;
use roomplan::interaction::{DragController, Ray};
use roomplan::search::find_initial_position;
use roomplan::{
    Color, DesignSession, Footprint, FurnitureKind, ItemTemplate, PlacementConfig, RoomBoundary,
    RoomType, SceneStore,
};

fn crate_template(w: f64, d: f64) -> ItemTemplate {
    ItemTemplate {
        id: 1,
        name: "Crate".into(),
        kind: FurnitureKind::Cube,
        color: Color::parse("#795548").unwrap(),
        size: Some(Footprint::new(w, 1.0, d)),
        material_type: None,
        description: None,
    }
}

/// Fill the room with small items until search gives up.
fn crowded_scene(room: &RoomBoundary, cfg: &PlacementConfig) -> SceneStore {
    let mut scene = SceneStore::new();
    let t = crate_template(0.8, 0.8);
    while scene.add(&t, Color::default(), room, cfg).is_ok() {}
    scene
}

fn bench_search_empty_room(c: &mut Criterion) {
    let room = RoomBoundary::new(10.0, 10.0);
    let cfg = PlacementConfig::default();
    let fp = Footprint::new(3.0, 1.0, 1.5);
    c.bench_function("search_empty_room", |b| {
        b.iter(|| find_initial_position(black_box(&fp), &[], &room, &cfg));
    });
}

fn bench_search_crowded_room(c: &mut Criterion) {
    let room = RoomBoundary::new(10.0, 10.0);
    let cfg = PlacementConfig::default();
    let scene = crowded_scene(&room, &cfg);
    // Nothing fits: every probe is checked against every item.
    let fp = Footprint::new(2.0, 1.0, 2.0);
    c.bench_function("search_crowded_room_exhausted", |b| {
        b.iter(|| find_initial_position(black_box(&fp), scene.items(), &room, &cfg));
    });
}

fn bench_validate_frame(c: &mut Criterion) {
    let room = RoomBoundary::new(10.0, 10.0);
    let cfg = PlacementConfig::default();
    let scene = crowded_scene(&room, &cfg);
    let mut candidate = scene.items()[0].clone();
    candidate.position.x += 0.05;
    c.bench_function("validate_drag_frame", |b| {
        b.iter(|| check_placement(black_box(&candidate), scene.items(), &room, &cfg));
    });
}

fn bench_drag_sequence(c: &mut Criterion) {
    let mut session = DesignSession::new(RoomType::LivingRoom);
    for id in 1..=6 {
        let _ = session.add_from_catalog(id);
    }
    let target = session.items()[0].id;
    c.bench_function("drag_sixty_frames", |b| {
        b.iter(|| {
            let mut ctl = DragController::new();
            ctl.click_item(&mut session, target);
            let _ = ctl.begin_drag(&session, target, None);
            for i in 0..60 {
                let x = -3.0 + 0.1 * f64::from(i);
                ctl.drag_move(&mut session, &Ray::new([x, 10.0, 0.0], [0.0, -1.0, 0.0]));
            }
            ctl.cancel_drag(&mut session);
            ctl.click_background(&mut session);
            session.drain_events();
        });
    });
}

criterion_group!(
    benches,
    bench_search_empty_room,
    bench_search_crowded_room,
    bench_validate_frame,
    bench_drag_sequence
);
criterion_main!(benches);
