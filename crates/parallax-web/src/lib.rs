pub mod listener;
pub mod runner;
pub mod surface;

pub use listener::ScrollListener;
pub use runner::{js_error, SceneRunner};
pub use surface::DomSurface;

/// Generate all `#[wasm_bindgen]` exports for a scroll scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` / `try_with_runner()` helpers
/// - the wasm-bindgen exports (scene_init, scene_mount, scene_tick, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod view;
/// use view::MyScene;
///
/// parallax_web::export_scene!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$view_type`: a type implementing `parallax_engine::View` with a `new()` constructor
/// - `$scene_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_scene {
    ($view_type:ty, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$view_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$view_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call scene_init() first", $scene_name);
                        None
                    }
                }
            })
        }

        fn try_with_runner(
            f: impl FnOnce(&mut $crate::SceneRunner<$view_type>) -> Result<(), JsValue>,
        ) -> Result<(), JsValue> {
            with_runner(f).unwrap_or_else(|| Err(JsValue::from_str("scene not initialized")))
        }

        #[wasm_bindgen]
        pub fn scene_init() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let view = <$view_type>::new();
            let runner = $crate::SceneRunner::new(view).map_err($crate::js_error)?;

            // Replacing a previous runner drops its listener and DOM nodes.
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $scene_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn scene_load_catalog(json: &str) -> Result<(), JsValue> {
            try_with_runner(|r| r.load_catalog(json))
        }

        #[wasm_bindgen]
        pub fn scene_configure(json: &str) -> Result<(), JsValue> {
            try_with_runner(|r| r.configure(json))
        }

        #[wasm_bindgen]
        pub fn scene_mount(root_id: &str) -> Result<(), JsValue> {
            try_with_runner(|r| r.mount(root_id))
        }

        #[wasm_bindgen]
        pub fn scene_unmount() -> Result<(), JsValue> {
            try_with_runner(|r| r.unmount())
        }

        #[wasm_bindgen]
        pub fn scene_tick(dt: f64) -> Result<(), JsValue> {
            try_with_runner(|r| r.tick(dt))
        }

        #[wasm_bindgen]
        pub fn scene_scroll(offset_x: f64, viewport_width: f64) {
            with_runner(|r| r.push_scroll(offset_x, viewport_width));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_scene_width() -> f64 {
            with_runner(|r| r.scene_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_parallax_offset() -> f64 {
            with_runner(|r| r.parallax_offset()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_distance_readout() -> String {
            with_runner(|r| r.distance_readout()).unwrap_or_else(|| "0".to_string())
        }

        #[wasm_bindgen]
        pub fn get_active_bodies() -> Vec<u32> {
            with_runner(|r| r.active_bodies()).unwrap_or_default()
        }
    };
}
