// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Obtener input por ID
pub fn get_input_by_id(id: &str) -> Option<HtmlInputElement> {
    get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

/// Obtener select por ID
pub fn get_select_by_id(id: &str) -> Option<HtmlSelectElement> {
    get_element_by_id(id)?.dyn_into::<HtmlSelectElement>().ok()
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Verificar si tiene clase
pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer text content buscando por ID (silencioso si el elemento no existe)
pub fn set_text_by_id(id: &str, text: &str) {
    if let Some(el) = get_element_by_id(id) {
        set_text_content(&el, text);
    }
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Insertar hijo al inicio (filas nuevas arriba)
pub fn prepend_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent
        .insert_before(child, parent.first_child().as_ref())
        .map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Leer el value de un input (trimmed), vacío si el input no existe
pub fn input_value(id: &str) -> String {
    get_input_by_id(id)
        .map(|input| input.value().trim().to_string())
        .unwrap_or_default()
}

/// Establecer el value de un input (silencioso si no existe)
pub fn set_input_value(id: &str, value: &str) {
    if let Some(input) = get_input_by_id(id) {
        input.set_value(value);
    }
}

/// Leer el value de un select (trimmed), vacío si no existe
pub fn select_value(id: &str) -> String {
    get_select_by_id(id)
        .map(|select| select.value().trim().to_string())
        .unwrap_or_default()
}

/// Dar foco a un input por ID
pub fn focus_input(id: &str) {
    if let Some(input) = get_input_by_id(id) {
        let _ = input.focus();
    }
}

/// Mostrar/ocultar con el atributo `hidden`
pub fn set_hidden(element: &Element, hidden: bool) {
    if hidden {
        let _ = element.set_attribute("hidden", "");
    } else {
        let _ = element.remove_attribute("hidden");
    }
}

/// Habilitar/deshabilitar un botón por ID
pub fn set_button_disabled(id: &str, disabled: bool) {
    if let Some(el) = get_element_by_id(id) {
        if let Ok(button) = el.dyn_into::<web_sys::HtmlButtonElement>() {
            button.set_disabled(disabled);
        }
    }
}

/// Cambiar el label de un botón por ID
pub fn set_button_label(id: &str, label: &str) {
    if let Some(el) = get_element_by_id(id) {
        set_text_content(&el, label);
    }
}

/// Convertir un Element en HtmlElement (para .style(), .focus(), etc.)
pub fn as_html_element(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

/// alert() bloqueante
pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

/// confirm() bloqueante; false si no hay window
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}
