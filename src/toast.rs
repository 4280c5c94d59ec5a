//! Tiny toast / notification helper.
//! Creates a `#toast-root` container once per page and appends one div per
//! notification. Each toast dismisses itself through the store after a few
//! seconds so `AppState::notifications` matches what is on screen.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ID_TOAST_ROOT, TOAST_DURATION_MS};
use crate::error_log;
use crate::messages::{Message, NotificationKind};
use crate::state::dispatch_global_message;

fn toast_dom_id(id: u32) -> String {
    format!("toast-{}", id)
}

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast-success",
        NotificationKind::Error => "toast-error",
        NotificationKind::Info => "toast-info",
    }
}

pub fn show(id: u32, message: &str, kind: NotificationKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Err(e) = render(&document, id, message, kind) {
        error_log!("Failed to show toast: {:?}", e);
        return;
    }

    Timeout::new(TOAST_DURATION_MS, move || {
        dispatch_global_message(Message::DismissNotification(id));
    })
    .forget();
}

pub fn hide(id: u32) {
    let toast = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&toast_dom_id(id)));
    if let Some(toast) = toast {
        toast.remove();
    }
}

fn render(document: &Document, id: u32, message: &str, kind: NotificationKind) -> Result<(), JsValue> {
    ensure_styles(document)?;
    let root = ensure_root(document)?;

    let toast = document.create_element("div")?;
    toast.set_id(&toast_dom_id(id));
    toast.set_class_name("toast");
    toast.class_list().add_1(kind_class(kind))?;
    toast.set_text_content(Some(message));

    // Prepend so newest appears on top.
    root.prepend_with_node_1(&toast)?;
    Ok(())
}

fn ensure_root(document: &Document) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id(ID_TOAST_ROOT) {
        return Ok(el);
    }
    let root = document.create_element("div")?;
    root.set_id(ID_TOAST_ROOT);
    root.set_class_name("toast-root");
    let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&root)?;
    Ok(root)
}

fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("toast-styles").is_some() {
        return Ok(());
    }

    let css = "
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999;font-family:Arial,Helvetica,sans-serif}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards;max-width:360px}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.toast-info{background:#2563eb}
@keyframes toast-in{to{opacity:1}}
";

    let style = document.create_element("style")?;
    style.set_id("toast-styles");
    style.set_text_content(Some(css));
    match document.query_selector("head")? {
        Some(head) => head.append_child(&style)?,
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&style)?,
    };
    Ok(())
}
