//! DOM wiring for the standard drawing page.
//!
//! [`mount`] finds the canvas and its controls, builds one [`FreehandCanvas`]
//! and registers the listeners that drive it. The listeners share the canvas
//! through `Rc<RefCell<_>>` and live for the lifetime of the page.

use crate::console;
use crate::{CanvasSurface, FreehandCanvas};
use freehand_core::{Color, PngExport, SketchConfig, SurfaceLayout};
use freehand_editor::{InputEvent, Palette, PointerButton, StrokeRenderer, surface_point};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlAnchorElement,
    HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent, Window,
};

// ─── Config ───────────────────────────────────────────────────────────────

/// Where to find the page controls. Ids are looked up with
/// `getElementById`, the others with `querySelector(All)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomBindings {
    pub canvas_id: String,
    /// Element whose layout box sizes the canvas.
    pub wrapper_selector: String,
    pub brush_size_id: String,
    /// Label showing the current size. Optional on the page.
    pub brush_value_id: String,
    pub color_picker_id: String,
    pub color_buttons_selector: String,
    /// Attribute carrying each swatch's color.
    pub color_attribute: String,
    /// Class marking the active swatch.
    pub active_class: String,
    pub clear_button_id: String,
    pub save_button_id: String,
}

impl Default for DomBindings {
    fn default() -> Self {
        Self {
            canvas_id: "drawingCanvas".to_string(),
            wrapper_selector: ".canvas-wrapper".to_string(),
            brush_size_id: "brushSize".to_string(),
            brush_value_id: "brushValue".to_string(),
            color_picker_id: "colorPicker".to_string(),
            color_buttons_selector: ".color-btn".to_string(),
            color_attribute: "data-color".to_string(),
            active_class: "active".to_string(),
            clear_button_id: "clearBtn".to_string(),
            save_button_id: "saveBtn".to_string(),
        }
    }
}

/// Everything [`mount`] accepts: `{"sketch": {...}, "dom": {...}, "logLevel": "debug"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MountConfig {
    pub sketch: SketchConfig,
    pub dom: DomBindings,
    pub log_level: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            sketch: SketchConfig::default(),
            dom: DomBindings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl MountConfig {
    fn parse(json: Option<&str>) -> Result<Self, JsValue> {
        match json {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(json)
                .map_err(|e| JsValue::from_str(&format!("invalid mount config: {e}"))),
            _ => Ok(Self::default()),
        }
    }
}

// ─── Mount ────────────────────────────────────────────────────────────────

/// A preset swatch found in the page.
struct Swatch {
    element: Element,
    /// Raw attribute value, mirrored into the color picker on click.
    raw: String,
    /// `None` if `raw` is not a color; such a swatch never selects.
    color: Option<Color>,
}

/// Wire the drawing page. Fails if a required element is missing.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    console::console_error_panic_hook_setup();
    let config = MountConfig::parse(config_json.as_deref())?;
    console::init_logging(console::parse_level(&config.log_level));
    let dom = &config.dom;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, &dom.canvas_id)?;
    let wrapper = document
        .query_selector(&dom.wrapper_selector)?
        .ok_or_else(|| JsValue::from_str(&format!("Missing {}", dom.wrapper_selector)))?;
    let size_input: HtmlInputElement = get_element(&document, &dom.brush_size_id)?;
    let size_label = document.get_element_by_id(&dom.brush_value_id);
    let color_picker: HtmlInputElement = get_element(&document, &dom.color_picker_id)?;
    let clear_button: Element = get_element(&document, &dom.clear_button_id)?;
    let save_button: Element = get_element(&document, &dom.save_button_id)?;
    let swatches = collect_swatches(&document, dom)?;

    // Initial brush: page controls win over config.
    let mut renderer = StrokeRenderer::new(CanvasSurface::new(canvas.clone())?, &config.sketch);
    if !size_input.value().is_empty() {
        renderer.set_brush_size(&size_input.value());
    }
    if !color_picker.value().is_empty() {
        if let Err(err) = renderer.set_brush_color(&color_picker.value()) {
            log::warn!("initial picker color ignored: {err}");
        }
    }
    if !swatches.is_empty() {
        renderer.set_palette(swatch_palette(&swatches, &dom.active_class));
    }
    renderer.resize(read_layout(&window, &wrapper));
    log::info!(
        "mounted #{} with {} presets, brush {}",
        dom.canvas_id,
        renderer.palette().presets().len(),
        renderer.brush().to_json()
    );

    let state = Rc::new(RefCell::new(FreehandCanvas::from_renderer(renderer)));
    let swatches = Rc::new(swatches);

    // Mouse
    for kind in ["mousedown", "mousemove", "mouseup", "mouseleave"] {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, kind, move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let input = mouse_input(&canvas_cb, event);
            state.borrow_mut().handle(&input);
        })?;
    }

    // Touch
    let touch_options = AddEventListenerOptions::new();
    touch_options.set_passive(false);
    for kind in ["touchstart", "touchmove", "touchend"] {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        listen_with_options(&canvas, kind, &touch_options, move |event: Event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let input = touch_input(&canvas_cb, event);
            if input.suppresses_default() {
                event.prevent_default();
            }
            state.borrow_mut().handle(&input);
        })?;
    }

    // Brush size
    {
        let state = state.clone();
        let size_input_cb = size_input.clone();
        listen(&size_input, "input", move |_: Event| {
            let size = state
                .borrow_mut()
                .renderer_mut()
                .set_brush_size(&size_input_cb.value());
            if let Some(label) = &size_label {
                label.set_text_content(Some(&size.to_string()));
            }
        })?;
    }

    // Preset swatches
    for (index, swatch) in swatches.iter().enumerate() {
        let state = state.clone();
        let swatches_cb = swatches.clone();
        let picker = color_picker.clone();
        let active_class = dom.active_class.clone();
        listen(&swatch.element, "click", move |_: Event| {
            if swatches_cb[index].color.is_none() {
                log::warn!("swatch {index} has no valid color");
                return;
            }
            let mut canvas = state.borrow_mut();
            if canvas.renderer_mut().select_preset(index).is_none() {
                return;
            }
            picker.set_value(&swatches_cb[index].raw);
            sync_swatches(&swatches_cb, canvas.renderer().palette(), &active_class);
        })?;
    }

    // Custom color
    {
        let state = state.clone();
        let swatches_cb = swatches.clone();
        let picker = color_picker.clone();
        let active_class = dom.active_class.clone();
        listen(&color_picker, "input", move |_: Event| {
            let mut canvas = state.borrow_mut();
            match canvas.renderer_mut().set_brush_color(&picker.value()) {
                Ok(_) => sync_swatches(&swatches_cb, canvas.renderer().palette(), &active_class),
                Err(err) => log::warn!("{err}"),
            }
        })?;
    }

    // Clear
    {
        let state = state.clone();
        listen(&clear_button, "click", move |_: Event| {
            state.borrow_mut().clear();
        })?;
    }

    // Save
    {
        let state = state.clone();
        listen(&save_button, "click", move |_: Event| {
            state.borrow().save();
        })?;
    }

    // Viewport resize drops the drawing.
    {
        let state = state.clone();
        let window_cb = window.clone();
        listen(&window, "resize", move |_: Event| {
            let layout = read_layout(&window_cb, &wrapper);
            state.borrow_mut().renderer_mut().resize(layout);
        })?;
    }

    Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────

/// Look up an element by id and cast it.
fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
}

fn collect_swatches(document: &Document, dom: &DomBindings) -> Result<Vec<Swatch>, JsValue> {
    let nodes = document.query_selector_all(&dom.color_buttons_selector)?;
    let mut swatches = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let raw = element.get_attribute(&dom.color_attribute).unwrap_or_default();
        let color = match Color::parse(&raw) {
            Ok(color) => Some(color),
            Err(err) => {
                log::warn!("swatch {i}: {err}");
                None
            }
        };
        swatches.push(Swatch {
            element,
            raw,
            color,
        });
    }
    Ok(swatches)
}

/// Build the palette from the swatches, keeping indices aligned with the
/// page. Invalid swatches hold a transparent placeholder.
fn swatch_palette(swatches: &[Swatch], active_class: &str) -> Palette {
    let presets = swatches
        .iter()
        .map(|s| s.color.unwrap_or(Color::TRANSPARENT))
        .collect();
    let active = swatches
        .iter()
        .position(|s| s.color.is_some() && s.element.class_list().contains(active_class));
    Palette::new(presets, active)
}

/// Mirror the palette's active marker onto the swatch classes.
fn sync_swatches(swatches: &[Swatch], palette: &Palette, active_class: &str) {
    for (i, swatch) in swatches.iter().enumerate() {
        if let Err(err) = swatch
            .element
            .class_list()
            .toggle_with_force(active_class, palette.is_active(i))
        {
            log::warn!("swatch {i} class update failed: {err:?}");
        }
    }
}

fn read_layout(window: &Window, wrapper: &Element) -> SurfaceLayout {
    let rect = wrapper.get_bounding_client_rect();
    SurfaceLayout::new(rect.width(), rect.height(), window.device_pixel_ratio())
}

fn mouse_input(canvas: &HtmlCanvasElement, event: &MouseEvent) -> InputEvent {
    let rect = canvas.get_bounding_client_rect();
    let p = surface_point(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        rect.left(),
        rect.top(),
    );
    match event.type_().as_str() {
        "mousedown" => InputEvent::from_pointer_down(p.x, p.y, PointerButton::from_dom(event.button())),
        "mousemove" => InputEvent::from_pointer_move(p.x, p.y),
        "mouseleave" => InputEvent::PointerLeave,
        _ => InputEvent::PointerUp,
    }
}

fn touch_input(canvas: &HtmlCanvasElement, event: &TouchEvent) -> InputEvent {
    let touch = event.touches().item(0).map(|t| {
        let rect = canvas.get_bounding_client_rect();
        let p = surface_point(
            f64::from(t.client_x()),
            f64::from(t.client_y()),
            rect.left(),
            rect.top(),
        );
        (p.x, p.y)
    });
    match event.type_().as_str() {
        "touchstart" => InputEvent::TouchStart { touch },
        "touchmove" => InputEvent::TouchMove { touch },
        _ => InputEvent::TouchEnd,
    }
}

/// Create a temporary `<a download>` for the export and click it.
pub(crate) fn trigger_download(export: &PngExport) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_download(&export.filename);
    link.set_href(&export.data_url);
    link.click();
    log::info!("downloaded {}", export.filename);
    Ok(())
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_with_options(
    target: &EventTarget,
    kind: &str,
    options: &AddEventListenerOptions,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        options,
    )?;
    closure.forget();
    Ok(())
}
