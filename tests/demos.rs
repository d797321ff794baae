use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use scene_demos::clock::FrameTime;
use scene_demos::demos::{Demo, Helix, Monoliths, Orbit, Swarm, Wave};
use scene_demos::input::{InputEvent, Viewport};
use scene_demos::{build, DemoConfig, DemoKind};

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0, 1.0)
}

fn at(elapsed: f64) -> FrameTime {
    FrameTime {
        elapsed,
        delta: 0.0,
    }
}

fn swarm(seed: u64) -> Swarm {
    Swarm::new(None, &mut SmallRng::seed_from_u64(seed), viewport()).unwrap()
}

#[test]
fn default_populations() {
    let expected = [
        (DemoKind::Swarm, 300),
        (DemoKind::Wave, 625),
        (DemoKind::Orbit, 120),
        (DemoKind::Monoliths, 10),
        (DemoKind::Helix, 200),
    ];
    for (kind, count) in expected {
        let demo = build(&DemoConfig::new(kind), 7, viewport()).unwrap();
        assert_eq!(demo.kind(), kind);
        assert_eq!(demo.scene().objects.len(), count, "{}", kind);
    }
}

#[test]
fn count_overrides_are_clamped() {
    let cases = [
        (DemoKind::Swarm, 5, 10),
        (DemoKind::Swarm, 42, 42),
        (DemoKind::Wave, 100, 100),
        (DemoKind::Wave, 5000, 625),
        (DemoKind::Helix, 10_000, 600),
        (DemoKind::Monoliths, 0, 3),
    ];
    for (kind, requested, actual) in cases {
        let config = DemoConfig::new(kind).with_count(requested);
        let demo = build(&config, 1, viewport()).unwrap();
        assert_eq!(demo.scene().objects.len(), actual, "{} x{}", kind, requested);
    }
}

#[test]
fn same_seed_same_scene() {
    assert_eq!(swarm(3).params(), swarm(3).params());
    assert_ne!(swarm(3).params(), swarm(4).params());

    let a = build(&DemoConfig::new(DemoKind::Orbit), 9, viewport()).unwrap();
    let b = build(&DemoConfig::new(DemoKind::Orbit), 9, viewport()).unwrap();
    assert_eq!(a.scene().objects, b.scene().objects);
}

#[test]
fn swarm_starts_on_the_sphere() {
    let demo = swarm(11);
    for p in demo.params() {
        assert_relative_eq!(p.origin.length(), 10.0, epsilon = 1e-4);
        assert!((0.5..1.0).contains(&p.breath_scale));
        assert!(p.rotation_speed.max_element() < 0.02 && p.rotation_speed.min_element() >= 0.0);
    }
}

#[test]
fn swarm_breathing_stays_in_band() {
    let mut demo = swarm(5);
    for step in 0..600 {
        demo.update(at(step as f64 * 0.173));
        for (object, p) in demo.scene().objects.iter().zip(demo.params()) {
            let s = object.transform.scale.x;
            assert!(s >= 1.0 - 0.2 * p.breath_scale - 1e-6);
            assert!(s <= 1.0 + 0.2 * p.breath_scale + 1e-6);
            assert!((0.8..=1.2).contains(&s));
        }
    }
}

#[test]
fn swarm_motion_depends_only_on_time() {
    let mut jumped = swarm(8);
    jumped.update(at(5.0));

    let mut stepped = swarm(8);
    for i in 1..=300 {
        stepped.update(FrameTime {
            elapsed: i as f64 / 60.0,
            delta: 1.0 / 60.0,
        });
    }

    let pairs = jumped.scene().objects.iter().zip(&stepped.scene().objects);
    for ((a, b), p) in pairs.zip(stepped.params()) {
        assert!(a.transform.position.abs_diff_eq(b.transform.position, 1e-4));
        assert!(a.transform.scale.abs_diff_eq(b.transform.scale, 1e-5));
        // Only the spin accumulates frame by frame
        assert_eq!(a.transform.rotation, Vec3::ZERO);
        assert!(b.transform.rotation.abs_diff_eq(p.rotation_speed * 300.0, 1e-3));
    }
}

#[test]
fn swarm_camera_eases_towards_pointer() {
    let mut demo = swarm(2);
    demo.handle_input(&InputEvent::PointerMove { x: 1000.0, y: 0.0 });
    assert!(demo.camera_target().abs_diff_eq(Vec2::new(0.25, 0.2), 1e-6));

    demo.update(FrameTime {
        elapsed: 0.0,
        delta: 1.0 / 60.0,
    });
    let first = demo.camera().position;
    assert!(first.x > 0.0 && first.x < 0.25 * 0.06, "no snapping: {:?}", first);

    for i in 1..200 {
        demo.update(FrameTime {
            elapsed: i as f64 / 60.0,
            delta: 1.0 / 60.0,
        });
    }
    let camera = demo.camera();
    assert_relative_eq!(camera.position.x, 0.25, epsilon = 1e-3);
    assert_relative_eq!(camera.position.y, 0.2, epsilon = 1e-3);
    assert_eq!(camera.position.z, 15.0);
    assert_eq!(camera.target, Vec3::ZERO);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut demo = build(&DemoConfig::new(DemoKind::Helix), 1, viewport()).unwrap();
    assert_relative_eq!(demo.camera().aspect, 1.25);
    demo.handle_input(&InputEvent::Resize(Viewport::new(600.0, 300.0, 2.0)));
    assert_relative_eq!(demo.camera().aspect, 2.0);
    demo.handle_input(&InputEvent::Resize(Viewport::new(600.0, 0.0, 2.0)));
    assert_relative_eq!(demo.camera().aspect, 2.0);
}

#[test]
fn wave_heights_and_pulses_are_bounded() {
    let mut demo = Wave::new(Some(100), viewport()).unwrap();
    assert_eq!(demo.side(), 10);

    for step in 0..100 {
        demo.update(at(step as f64 * 0.21));
        for object in &demo.scene().objects {
            let t = object.transform;
            assert!(t.position.y.abs() <= 0.6 + 1e-5);
            assert!(t.scale.y >= 1.0 - 1e-5 && t.scale.y <= 1.5 + 1e-5);
            assert_eq!((t.scale.x, t.scale.z), (1.0, 1.0));
        }
    }
}

#[test]
fn wave_is_radially_symmetric() {
    let mut demo = Wave::new(None, viewport()).unwrap();
    demo.update(at(2.7));
    let side = demo.side();
    let objects = &demo.scene().objects;
    for row in 0..side {
        for col in 0..side {
            let here = objects[row * side + col].transform.position.y;
            let mirrored = objects[(side - 1 - row) * side + (side - 1 - col)].transform.position.y;
            assert_relative_eq!(here, mirrored, epsilon = 1e-5);
        }
    }
}

#[test]
fn wave_zoom_is_clamped() {
    let mut demo = Wave::new(None, viewport()).unwrap();
    assert_relative_eq!(demo.camera().position.length(), 22.0, epsilon = 1e-4);

    demo.handle_input(&InputEvent::Wheel { delta_y: 1.0e6 });
    assert_eq!(demo.zoom().distance(), 40.0);
    assert_relative_eq!(demo.camera().position.length(), 40.0, epsilon = 1e-3);

    demo.handle_input(&InputEvent::Wheel { delta_y: -1.0e6 });
    assert_eq!(demo.zoom().distance(), 8.0);
    assert_relative_eq!(demo.camera().position.length(), 8.0, epsilon = 1e-3);
}

#[test]
fn wave_camera_orbits_and_drags() {
    let mut demo = Wave::new(None, viewport()).unwrap();
    let start = demo.camera().position;
    assert_relative_eq!(start.x.atan2(start.z), 0.0, epsilon = 1e-6);

    // Five seconds of auto-rotation at 0.1 rad/s
    for i in 1..=50 {
        demo.update(FrameTime {
            elapsed: i as f64 * 0.1,
            delta: 0.1,
        });
    }
    assert_relative_eq!(demo.azimuth(), 0.5, epsilon = 1e-4);
    let moved = demo.camera().position;
    assert_relative_eq!(moved.x.atan2(moved.z), 0.5, epsilon = 1e-4);
    assert_relative_eq!(moved.y, start.y, epsilon = 1e-4);
    assert_relative_eq!(moved.length(), 22.0, epsilon = 1e-3);

    // Horizontal drag turns the camera against the pointer
    demo.handle_input(&InputEvent::PointerDown { x: 500.0, y: 400.0 });
    demo.handle_input(&InputEvent::PointerMove { x: 540.0, y: 400.0 });
    assert_relative_eq!(demo.azimuth(), 0.3, epsilon = 1e-4);
    let dragged = demo.camera().position;
    assert_relative_eq!(dragged.x.atan2(dragged.z), 0.3, epsilon = 1e-4);

    // Vertical drags saturate the elevation at both ends
    demo.handle_input(&InputEvent::PointerMove { x: 540.0, y: 2000.0 });
    assert_eq!(demo.elevation(), 1.3);
    assert_relative_eq!(demo.camera().position.y, 22.0 * 1.3f32.sin(), epsilon = 1e-3);
    demo.handle_input(&InputEvent::PointerMove { x: 540.0, y: -2000.0 });
    assert_eq!(demo.elevation(), 0.15);
    assert_relative_eq!(demo.camera().position.y, 22.0 * 0.15f32.sin(), epsilon = 1e-3);
    demo.handle_input(&InputEvent::PointerUp);
}

#[test]
fn wave_azimuth_wraps_on_long_sessions() {
    let mut demo = Wave::new(None, viewport()).unwrap();
    let mut elapsed = 0.0;
    for _ in 0..1000 {
        elapsed += 0.1;
        demo.update(FrameTime {
            elapsed,
            delta: 0.1,
        });
    }
    // 10 rad of travel, reported as an angle within one turn
    assert!((0.0..std::f32::consts::TAU).contains(&demo.azimuth()));
    assert_relative_eq!(demo.azimuth(), 10.0 - std::f32::consts::TAU, epsilon = 1e-3);
}

#[test]
fn orbit_group_turns_on_its_own() {
    let mut demo = Orbit::new(None, &mut SmallRng::seed_from_u64(6), viewport()).unwrap();
    demo.update(FrameTime {
        elapsed: 1.0,
        delta: 0.1,
    });
    assert_relative_eq!(demo.scene().group.rotation.y, 0.015, epsilon = 1e-6);
    demo.update(FrameTime {
        elapsed: 1.1,
        delta: 0.1,
    });
    assert_relative_eq!(demo.scene().group.rotation.y, 0.03, epsilon = 1e-6);
}

#[test]
fn orbit_objects_stay_on_their_rings() {
    let mut demo = Orbit::new(None, &mut SmallRng::seed_from_u64(6), viewport()).unwrap();
    for step in 0..50 {
        demo.update(at(step as f64 * 0.4));
        for (object, p) in demo.scene().objects.iter().zip(demo.params()) {
            let pos = object.transform.position;
            assert_relative_eq!(Vec2::new(pos.x, pos.z).length(), p.radius, epsilon = 1e-3);
            assert!(pos.y.abs() <= 0.3 + 1e-6);
        }
    }
}

#[test]
fn orbit_drag_spins_the_group_with_inertia() {
    let mut demo = Orbit::new(None, &mut SmallRng::seed_from_u64(6), viewport()).unwrap();
    demo.handle_input(&InputEvent::PointerMove { x: 500.0, y: 100.0 });
    assert_eq!(demo.scene().group.rotation.y, 0.0, "hover alone does nothing");

    demo.handle_input(&InputEvent::PointerDown { x: 100.0, y: 100.0 });
    demo.handle_input(&InputEvent::PointerMove { x: 140.0, y: 100.0 });
    assert_relative_eq!(demo.scene().group.rotation.y, 0.2, epsilon = 1e-6);
    demo.handle_input(&InputEvent::PointerUp);

    let before = demo.scene().group.rotation.y;
    demo.update(FrameTime {
        elapsed: 0.0,
        delta: 1.0 / 60.0,
    });
    let coasted = demo.scene().group.rotation.y - before;
    assert!(coasted > 0.19, "kept spinning after release: {}", coasted);
    assert!(demo.drag().velocity().x < 0.2);
}

#[test]
fn monoliths_lean_towards_pointer_within_limit() {
    let mut demo = Monoliths::new(None, &mut SmallRng::seed_from_u64(4), viewport()).unwrap();
    demo.handle_input(&InputEvent::PointerMove { x: 0.0, y: 0.0 });
    for i in 0..400 {
        demo.update(FrameTime {
            elapsed: i as f64 / 60.0,
            delta: 1.0 / 60.0,
        });
        let group = demo.scene().group;
        assert!(group.rotation.x.abs() <= 0.4 + 1e-6);
        assert!(group.rotation.y.abs() <= 0.4 + 1e-6);
    }
    let group = demo.scene().group;
    assert_relative_eq!(group.rotation.x, -0.4, epsilon = 1e-3);
    assert_relative_eq!(group.rotation.y, -0.4, epsilon = 1e-3);
}

#[test]
fn monoliths_bob_around_their_origin() {
    let mut demo = Monoliths::new(None, &mut SmallRng::seed_from_u64(4), viewport()).unwrap();
    for step in 0..100 {
        demo.update(at(step as f64 * 0.3));
        for (object, m) in demo.scene().objects.iter().zip(demo.params()) {
            let offset = object.transform.position - m.origin;
            assert_eq!((offset.x, offset.z), (0.0, 0.0));
            assert!(offset.y.abs() <= m.bob_amplitude + 1e-5);
            let s = object.transform.scale.x;
            assert!((0.8 - 1e-6..=1.2 + 1e-6).contains(&s));
        }
    }
}

#[test]
fn helix_radius_and_scale_are_bounded() {
    let mut demo = Helix::new(None, &mut SmallRng::seed_from_u64(12), viewport()).unwrap();
    for step in 0..80 {
        let t = step as f64 * 0.29;
        demo.update(at(t));
        for (object, p) in demo.scene().objects.iter().zip(demo.params()) {
            let pos = object.transform.position;
            let r = Vec2::new(pos.x, pos.z).length();
            assert!((2.5 - 1e-4..=3.5 + 1e-4).contains(&r));
            assert_relative_eq!(r, p.radius(t), epsilon = 1e-4);
            let s = object.transform.scale.x;
            assert!((0.8 - 1e-6..=1.2 + 1e-6).contains(&s));
        }
    }
}

#[test]
fn helix_strands_are_opposite() {
    let mut demo = Helix::new(Some(40), &mut SmallRng::seed_from_u64(12), viewport()).unwrap();
    demo.update(at(0.0));
    let objects = &demo.scene().objects;
    for pair in objects.chunks(2) {
        let (a, b) = (pair[0].transform.position, pair[1].transform.position);
        assert_relative_eq!(a.y, b.y);
        // Same step, half a turn apart
        assert!(Vec2::new(a.x + b.x, a.z + b.z).length() < 0.2);
    }
}

#[test]
fn helix_zoom_is_clamped() {
    let mut demo = Helix::new(None, &mut SmallRng::seed_from_u64(1), viewport()).unwrap();
    for delta in [500.0, 5000.0, 100_000.0] {
        demo.handle_input(&InputEvent::Wheel { delta_y: delta });
    }
    assert_eq!(demo.zoom().distance(), 30.0);
    demo.update(at(1.0));
    assert_eq!(demo.camera().position.z, 30.0);

    demo.handle_input(&InputEvent::Wheel { delta_y: -100_000.0 });
    assert_eq!(demo.camera().position.z, 6.0);
}

#[test]
fn helix_camera_follows_pointer() {
    let mut demo = Helix::new(None, &mut SmallRng::seed_from_u64(3), viewport()).unwrap();
    // Top-right corner maps to the edge of the pan range
    demo.handle_input(&InputEvent::PointerMove { x: 1000.0, y: 0.0 });

    demo.update(FrameTime {
        elapsed: 1.0 / 60.0,
        delta: 1.0 / 60.0,
    });
    let first = demo.camera().position;
    assert!(first.x > 0.0 && first.x < 3.0 * 0.06, "no snapping: {:?}", first);
    assert!(first.y > 0.0 && first.y < 3.0 * 0.06, "no snapping: {:?}", first);

    let mut previous = first;
    for i in 2..300 {
        demo.update(FrameTime {
            elapsed: i as f64 / 60.0,
            delta: 1.0 / 60.0,
        });
        let p = demo.camera().position;
        assert!(p.x >= previous.x && p.x <= 3.0 + 1e-6, "no overshoot: {:?}", p);
        previous = p;
    }
    let camera = demo.camera();
    assert_relative_eq!(camera.position.x, 3.0, epsilon = 1e-3);
    assert_relative_eq!(camera.position.y, 3.0, epsilon = 1e-3);
    assert_eq!(camera.position.z, 14.0);
    assert_eq!(camera.target, Vec3::ZERO);
}

#[test]
fn spins_keep_advancing_on_a_long_running_page() {
    let mut demo = swarm(21);
    let days = 3.0 * 86_400.0;
    let frame = |i: u32| FrameTime {
        elapsed: days + i as f64 / 60.0,
        delta: 1.0 / 60.0,
    };
    // Spins are kept within one turn, so small increments still register
    for i in 0..2000 {
        demo.update(frame(i));
    }
    let before: Vec<Vec3> = demo.scene().objects.iter().map(|o| o.transform.rotation).collect();
    for i in 2000..2200 {
        demo.update(frame(i));
    }
    for ((object, start), p) in demo.scene().objects.iter().zip(&before).zip(demo.params()) {
        let r = object.transform.rotation;
        assert!(r.max_element() < std::f32::consts::TAU);
        let turned = (r - *start).x.rem_euclid(std::f32::consts::TAU);
        assert!(
            (turned - p.rotation_speed.x * 200.0).abs() < 1e-3,
            "spin stalled: {} vs {}",
            turned,
            p.rotation_speed.x * 200.0
        );
    }
}
