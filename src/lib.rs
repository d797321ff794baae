//! Procedural 3D scene demos for the browser.
//!
//! The platform-independent parts (geometry, scene graph, camera, motion,
//! demos) build and test on any target. The WebGL2 front-end is compiled
//! only for wasm32 and mounts the demo selected by the page URL, e.g.
//! `index.html?demo=wave&seed=7`.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod camera;
pub mod clock;
pub mod config;
pub mod demos;
pub mod error;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod scene;

pub use config::{DemoConfig, DemoKind};
pub use demos::{build, Demo};
pub use error::{DemoError, DemoResult};

#[cfg(target_arch = "wasm32")]
pub use wasm::mount;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::clock::FrameClock;
    use crate::config::DemoConfig;
    use crate::demos::{self, Demo};
    use crate::input::InputEvent;

    mod events;
    mod render;

    use render::Renderer;

    /// Element the canvas is appended to
    pub const CONTAINER_ID: &str = "canvas-container";

    /// Everything the frame loop and the event listeners share
    pub(crate) struct App {
        pub demo: Box<dyn Demo>,
        pub renderer: Renderer,
        pub clock: FrameClock,
    }

    impl App {
        pub fn input(&mut self, event: InputEvent) {
            if let InputEvent::Resize(viewport) = event {
                if let Err(e) = self.renderer.resize(viewport) {
                    log::warn!("resize failed: {:?}", e);
                }
            }
            self.demo.handle_input(&event);
        }

        pub fn frame(&mut self, now_ms: f64) {
            let frame = self.clock.tick(now_ms);
            self.demo.update(frame);
            self.renderer.render(self.demo.scene(), self.demo.camera());
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        if document.get_element_by_id(CONTAINER_ID).is_none() {
            log::warn!("#{} not found, nothing to mount", CONTAINER_ID);
            return Ok(());
        }

        let query = window.location().search()?;
        mount(CONTAINER_ID, &query)
    }

    /// Create a canvas inside `#container_id` and run the demo described by
    /// `query` in it until the page unloads.
    #[wasm_bindgen]
    pub fn mount(container_id: &str, query: &str) -> Result<(), JsValue> {
        let config = DemoConfig::from_query(query)?;
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or("container not found")?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        container.append_child(&canvas)?;

        let viewport = events::current_viewport(&window)?;
        let seed = config
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
        let demo = demos::build(&config, seed, viewport)?;

        let renderer = Renderer::new(canvas, demo.scene())?;
        renderer.resize(viewport)?;

        let app = Rc::new(RefCell::new(App {
            demo,
            renderer,
            clock: FrameClock::new(),
        }));

        events::listen(&window, &app)?;
        events::run_frames(app)?;
        Ok(())
    }
}
