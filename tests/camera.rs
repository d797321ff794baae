use glam::{Vec2, Vec3};
use scene_demos::camera::{DragRotate, PerspectiveCamera, PointerFollow, Zoom};
use scene_demos::input::Viewport;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

#[cfg(target_arch = "wasm32")]
wasm_bindgen_test_configure!(run_in_browser);

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn follow_converges_without_overshoot() {
    let mut follow = PointerFollow::new(0.05);
    follow.target = Vec2::new(0.25, -0.2);

    let mut current = Vec2::new(-1.0, 1.0);
    let mut gap = (follow.target - current).length();
    for _ in 0..150 {
        let next = follow.step(current, 1.0);
        let next_gap = (follow.target - next).length();
        assert!(next_gap < gap, "gap grew from {} to {}", gap, next_gap);
        // Never passes the target on either axis
        assert!(next.x <= follow.target.x && next.y >= follow.target.y);
        current = next;
        gap = next_gap;
    }
    assert!(gap < 1e-3);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn follow_step_matches_repeated_single_frames() {
    let mut follow = PointerFollow::new(0.05);
    follow.target = Vec2::new(3.0, 1.0);

    let mut stepped = Vec2::ZERO;
    for _ in 0..4 {
        stepped = follow.step(stepped, 1.0);
    }
    let jumped = follow.step(Vec2::ZERO, 4.0);
    assert!((stepped - jumped).length() < 1e-5);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn zoom_stays_within_bounds() {
    let mut zoom = Zoom::new(22.0, 8.0, 40.0, 0.02);
    let deltas = [120.0, 5000.0, -100.0, -1.0e6, 1.0e6, f32::NAN, -53.0, 0.0];
    for delta in deltas {
        let d = zoom.apply_wheel(delta);
        assert!((8.0..=40.0).contains(&d), "distance {} after {}", d, delta);
    }
    assert_eq!(Zoom::new(22.0, 8.0, 40.0, 0.02).apply_wheel(-1.0e6), 8.0);
    assert_eq!(Zoom::new(22.0, 8.0, 40.0, 0.02).apply_wheel(1.0e6), 40.0);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn drag_coasts_and_slows_after_release() {
    let mut drag = DragRotate::new(0.005, 0.92);
    drag.press(Vec2::ZERO);
    drag.drag(Vec2::new(20.0, 0.0));
    assert_eq!(drag.coast(1.0), Vec2::ZERO, "no coasting while held");

    drag.release();
    let first = drag.coast(1.0).x;
    let second = drag.coast(1.0).x;
    assert!((first - 0.1).abs() < 1e-6);
    assert!(second < first && second > 0.0);

    for _ in 0..2000 {
        drag.coast(1.0);
    }
    assert_eq!(drag.velocity(), Vec2::ZERO);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn camera_projects_target_to_screen_centre() {
    let mut camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
    camera.position = Vec3::new(0.3, -0.2, 15.0);
    camera.look_at(Vec3::ZERO);

    let clip = camera.view_projection().project_point3(Vec3::ZERO);
    assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
    assert!(clip.z > -1.0 && clip.z < 1.0);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn viewport_sizes() {
    let viewport = Viewport::new(1280.0, 720.0, 2.0);
    assert_eq!(viewport.physical_size(), (2560, 1440));
    assert!((viewport.aspect().unwrap() - 16.0 / 9.0).abs() < 1e-6);

    assert_eq!(Viewport::new(800.0, 0.0, 1.0).aspect(), None);
    assert_eq!(Viewport::new(800.0, 600.0, 0.0).pixel_ratio, 1.0);
    assert_eq!(Viewport::new(0.0, 0.0, 1.0).physical_size(), (1, 1));
}
