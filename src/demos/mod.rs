//! The demo variants. Each one populates a [`Scene`] once from a seeded RNG
//! and then recomputes every transform from elapsed time each frame.

mod helix;
mod monoliths;
mod orbit;
mod swarm;
mod wave;

pub use helix::{Helix, HelixParams};
pub use monoliths::{Monolith, Monoliths};
pub use orbit::{Orbit, OrbitParams};
pub use swarm::{Swarm, SwarmParams};
pub use wave::{Wave, WaveParams};

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::PerspectiveCamera;
use crate::clock::FrameTime;
use crate::config::{DemoConfig, DemoKind};
use crate::error::DemoResult;
use crate::input::{InputEvent, Viewport};
use crate::scene::Scene;

/// A running demo
pub trait Demo {
    fn kind(&self) -> DemoKind;

    fn stage(&self) -> &Stage;

    /// Recompute the scene for this frame
    fn update(&mut self, frame: FrameTime);

    fn handle_input(&mut self, event: &InputEvent);

    fn scene(&self) -> &Scene {
        &self.stage().scene
    }

    fn camera(&self) -> &PerspectiveCamera {
        &self.stage().camera
    }
}

/// Scene, camera and viewport every demo carries
#[derive(Clone, Debug)]
pub struct Stage {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
}

impl Stage {
    pub fn new(scene: Scene, mut camera: PerspectiveCamera, viewport: Viewport) -> Self {
        camera.set_aspect(viewport.aspect());
        Self {
            scene,
            camera,
            viewport,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    /// Pointer position mapped to `[-1, 1]` on both axes, y pointing up
    pub fn pointer_ndc(&self, x: f32, y: f32) -> Vec2 {
        let center = self.viewport.center();
        if center.x <= 0.0 || center.y <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new((x - center.x) / center.x, (center.y - y) / center.y)
            .clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    }
}

/// How many objects a demo creates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountRange {
    pub default: usize,
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default).clamp(self.min, self.max)
    }
}

/// Build the demo named by `config`
pub fn build(config: &DemoConfig, seed: u64, viewport: Viewport) -> DemoResult<Box<dyn Demo>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    log::info!("building demo `{}` with seed {}", config.kind, seed);

    let demo: Box<dyn Demo> = match config.kind {
        DemoKind::Swarm => Box::new(Swarm::new(config.count, &mut rng, viewport)?),
        DemoKind::Wave => Box::new(Wave::new(config.count, viewport)?),
        DemoKind::Orbit => Box::new(Orbit::new(config.count, &mut rng, viewport)?),
        DemoKind::Monoliths => Box::new(Monoliths::new(config.count, &mut rng, viewport)?),
        DemoKind::Helix => Box::new(Helix::new(config.count, &mut rng, viewport)?),
    };
    log::info!(
        "demo `{}` ready: {} objects",
        demo.kind(),
        demo.scene().objects.len()
    );
    Ok(demo)
}
