pub mod runner;

pub use runner::LabRunner;

use catalyst_engine::{InputEvent, WorldId};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<LabRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls before `lab_init` are dropped
/// with a warning and yield `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut LabRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("lab not initialized; call lab_init() first");
            R::default()
        }
    })
}

/// Create the lab. `config_json` may override any subset of the defaults;
/// an empty string keeps them all. Returns false if the config is rejected.
#[wasm_bindgen]
pub fn lab_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = js_sys::Date::now() as u64;
    match LabRunner::from_config_json(config_json, seed) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("catalyst lab: initialized");
            true
        }
        Err(err) => {
            log::error!("catalyst lab: init failed: {}", err);
            false
        }
    }
}

#[wasm_bindgen]
pub fn lab_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn lab_pointer_down(world: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { world, x, y }));
}

#[wasm_bindgen]
pub fn lab_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

#[wasm_bindgen]
pub fn lab_purchase(id: &str) -> bool {
    with_runner(|r| r.purchase(id))
}

#[wasm_bindgen]
pub fn lab_spawn_from_storage(world: u32, symbol: &str, count: u32) -> u32 {
    with_runner(|r| r.spawn_from_storage(world, symbol, count))
}

#[wasm_bindgen]
pub fn lab_spawn_batch(world: u32, symbol: &str) -> u32 {
    with_runner(|r| r.spawn_batch(world, symbol))
}

#[wasm_bindgen]
pub fn lab_snapshot() -> String {
    with_runner(|r| r.snapshot_json())
}

#[wasm_bindgen]
pub fn lab_events_json() -> String {
    with_runner(|r| r.events_json())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_circles_ptr(world: u32) -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.circles_ptr(world))
    })
}

#[wasm_bindgen]
pub fn get_circle_count(world: u32) -> u32 {
    with_runner(|r| r.circle_count(world))
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_world_count() -> u32 {
    with_runner(|r| r.world_count())
}

#[wasm_bindgen]
pub fn get_world_width(world: u32) -> f32 {
    with_runner(|r| r.world_width(world))
}

#[wasm_bindgen]
pub fn get_world_height(world: u32) -> f32 {
    with_runner(|r| r.world_height(world))
}

#[wasm_bindgen]
pub fn get_symbol(index: u32) -> String {
    with_runner(|r| r.symbol(index))
}

/// Whether `world` is a valid chamber index.
#[wasm_bindgen]
pub fn has_world(world: u32) -> bool {
    with_runner(|r| r.lab().world(WorldId(world as usize)).is_some())
}
