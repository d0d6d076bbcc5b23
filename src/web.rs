//! Browser host: draws into a 2D `<canvas>` from a `requestAnimationFrame` loop.

use std::{
    cell::{Cell, RefCell},
    f64::consts::TAU,
    rc::Rc,
};

use log::{error, info, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::{
    animator::{Animator, Frame},
    error::{Error, Result},
    field::FieldConfig,
    particle::Rgba,
    surface::{DrawSurface, Point},
};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| Error::NoSurface("2d context lookup failed".to_string()))?
            .ok_or_else(|| Error::NoSurface("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::NoSurface("2d context has an unexpected type".to_string()))?;
        Ok(Self { canvas, context })
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        if let Err(err) = self.context.arc(center[0] as f64, center[1] as f64, radius as f64, 0.0, TAU) {
            warn!("arc failed: {:?}", err);
            return;
        }
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(width as f64);
        self.context.begin_path();
        self.context.move_to(from[0] as f64, from[1] as f64);
        self.context.line_to(to[0] as f64, to[1] as f64);
        self.context.stroke();
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn viewport(window: &Window) -> (f32, f32) {
    let read = |value: std::result::Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (read(window.inner_width()), read(window.inner_height()))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running canvas animation, returned to JavaScript.
#[wasm_bindgen]
pub struct WebAnimation {
    window: Window,
    animator: Rc<RefCell<Animator<CanvasSurface>>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
    torn_down: bool,
}

impl WebAnimation {
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.animator.borrow_mut().stop();
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
        {
            warn!("failed to detach resize listener: {:?}", err);
        }
        // Breaks the tick -> closure -> tick cycle.
        self.tick.borrow_mut().take();
    }
}

impl Drop for WebAnimation {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[wasm_bindgen]
impl WebAnimation {
    /// Cancels the pending frame, detaches the resize listener and stops the animator.
    ///
    /// Freeing the handle from JavaScript does the same.
    pub fn stop(&mut self) {
        self.teardown();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.animator.borrow().is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.animator.borrow().frames() as f64
    }
}

/// Starts the particle background on the canvas with id `canvas_id`.
#[wasm_bindgen(js_name = startParticleField)]
pub fn start_particle_field(canvas_id: &str) -> Result<WebAnimation, JsValue> {
    // Fails only when a logger is already installed by an earlier call.
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| Error::Host("no window".to_string()))?;
    let document = window.document().ok_or_else(|| Error::Host("no document".to_string()))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| Error::NoSurface(format!("no element with id {:?}", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::NoSurface(format!("element {:?} is not a canvas", canvas_id)))?;

    let mut surface = CanvasSurface::from_canvas(canvas)?;
    let (width, height) = viewport(&window);
    surface.resize(width, height);

    let mut animator = Animator::new(surface, FieldConfig::default(), &mut rand::thread_rng())?;
    animator.start();
    let animator = Rc::new(RefCell::new(animator));

    let on_resize = {
        let window = window.clone();
        let animator = animator.clone();
        Closure::<dyn FnMut()>::new(move || {
            let (width, height) = viewport(&window);
            animator.borrow_mut().resize(width, height);
        })
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    let pending = Rc::new(Cell::new(None));
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    {
        let window = window.clone();
        let animator = animator.clone();
        let pending = pending.clone();
        let next = tick.clone();
        *tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            pending.set(None);
            if let Frame::Stopped = animator.borrow_mut().frame() {
                return;
            }
            if let Some(callback) = next.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }));
    }

    let handle = WebAnimation {
        window,
        animator,
        pending,
        tick,
        on_resize,
        torn_down: false,
    };
    // On error the handle drops here and detaches everything registered above.
    let first = {
        let tick = handle.tick.borrow();
        let callback = tick
            .as_ref()
            .ok_or_else(|| Error::Host("frame callback missing".to_string()))?;
        handle.window.request_animation_frame(callback.as_ref().unchecked_ref())?
    };
    handle.pending.set(Some(first));
    info!("particle field running on #{}", canvas_id);

    Ok(handle)
}
