// src/pages/mod.rs
//
// One module per route. `mount` builds the static page skeleton once on
// load; each page's `refresh` fills it from the store afterwards.

pub mod agent;
pub mod home;
pub mod project;

use wasm_bindgen::JsValue;

use crate::constants::ID_APP_ROOT;
use crate::dom_utils;
use crate::router::Route;

pub fn mount(route: &Route) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    let root = match document.get_element_by_id(ID_APP_ROOT) {
        Some(root) => root,
        None => {
            let root = document.create_element("div")?;
            root.set_id(ID_APP_ROOT);
            document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?
                .append_child(&root)?;
            root
        }
    };
    dom_utils::clear(&root);

    match route {
        Route::Home => home::mount(&document, &root),
        Route::Project(_) => project::mount(&document, &root),
        Route::Agent(_) => agent::mount(&document, &root),
        Route::NotFound(path) => {
            let msg = dom_utils::create(&document, "p", "", Some(&format!("Nothing lives at {}", path)))?;
            root.append_child(&msg)?;
            let home = dom_utils::create(&document, "a", "", Some("Home"))?;
            home.set_attribute("href", &Route::Home.path())?;
            root.append_child(&home)?;
            Ok(())
        }
    }
}
