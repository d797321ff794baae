use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, PointerEvent, WheelEvent, Window};

use super::App;
use crate::input::{InputEvent, Viewport, POINTER_EVENTS};

pub fn current_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().ok_or("innerWidth is not a number")?;
    let height = window.inner_height()?.as_f64().ok_or("innerHeight is not a number")?;
    Ok(Viewport::new(
        width as f32,
        height as f32,
        window.device_pixel_ratio() as f32,
    ))
}

/// Forward window resize, pointer and wheel events to the demo.
pub fn listen(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    // Resize canvas to fit window
    let resize = {
        let app = app.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move || match current_viewport(&window) {
            Ok(viewport) => app.borrow_mut().input(InputEvent::Resize(viewport)),
            Err(e) => log::warn!("could not read window size: {:?}", e),
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
    resize.forget();

    for name in POINTER_EVENTS {
        let app = app.clone();
        let handler = Closure::wrap(Box::new(move |event: PointerEvent| {
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            if let Some(input) = InputEvent::from_pointer(name, x, y) {
                app.borrow_mut().input(input);
            }
        }) as Box<dyn FnMut(PointerEvent)>);
        window.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    // Losing focus mid-drag never delivers a pointerup
    let blur = {
        let app = app.clone();
        Closure::wrap(Box::new(move || app.borrow_mut().input(InputEvent::PointerUp))
            as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
    blur.forget();

    // Not passive so the page does not scroll while zooming
    let wheel = {
        let app = app.clone();
        Closure::wrap(Box::new(move |event: WheelEvent| {
            event.prevent_default();
            app.borrow_mut().input(InputEvent::Wheel {
                delta_y: event.delta_y() as f32,
            });
        }) as Box<dyn FnMut(WheelEvent)>)
    };
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        wheel.as_ref().unchecked_ref(),
        &options,
    )?;
    wheel.forget();

    Ok(())
}

/// Start the animation loop. It reschedules itself every frame and is never
/// cancelled.
pub fn run_frames(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        app.borrow_mut().frame(now_ms);

        // schedule next
        if let Err(e) = request_frame(&f) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)
}

fn request_frame(slot: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let slot = slot.borrow();
    let callback = slot.as_ref().ok_or("frame callback missing")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
