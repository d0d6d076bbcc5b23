#![cfg(target_arch = "wasm32")]

use particle_field::web::start_particle_field;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
}

fn fire_resize() {
    let event = web_sys::Event::new("resize").unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn stop_halts_the_animation() {
    mount_canvas("field-stop");
    let mut handle = start_particle_field("field-stop").unwrap();
    assert!(handle.running());
    handle.stop();
    assert!(!handle.running());
    fire_resize();
}

#[wasm_bindgen_test]
fn stop_then_drop_tears_down_once() {
    mount_canvas("field-twice");
    let mut handle = start_particle_field("field-twice").unwrap();
    handle.stop();
    handle.stop();
    drop(handle);
    fire_resize();
}

#[wasm_bindgen_test]
fn dropping_a_running_handle_detaches_listeners() {
    mount_canvas("field-drop");
    let handle = start_particle_field("field-drop").unwrap();
    drop(handle);
    fire_resize();

    mount_canvas("field-after-drop");
    let handle = start_particle_field("field-after-drop").unwrap();
    assert!(handle.running());
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(start_particle_field("no-such-canvas").is_err());
}
