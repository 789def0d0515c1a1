//! `{ ok: true, value }` / `{ ok: false, error: { code, message, data? } }`
//! envelopes returned by the `_res` methods.

use crate::interop::{new_obj, set_kv};
use stepedge::EdgeError;
use wasm_bindgen::prelude::*;

fn detail(key: &str, value: JsValue) -> JsValue {
    let obj = new_obj();
    set_kv(&obj, key, &value);
    obj.into()
}

pub fn ok(value: JsValue) -> JsValue {
    let envelope = new_obj();
    set_kv(&envelope, "ok", &JsValue::TRUE);
    set_kv(&envelope, "value", &value);
    envelope.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let body = new_obj();
    set_kv(&body, "code", &JsValue::from_str(code));
    set_kv(&body, "message", &JsValue::from_str(&message.into()));
    if let Some(data) = data {
        set_kv(&body, "data", &data);
    }
    let envelope = new_obj();
    set_kv(&envelope, "ok", &JsValue::FALSE);
    set_kv(&envelope, "error", &body.into());
    envelope.into()
}

pub fn non_finite(param: &str) -> JsValue {
    let message = format!("{} must be a finite number", param);
    err("non_finite", message, Some(detail("param", JsValue::from_str(param))))
}

pub fn no_drag() -> JsValue {
    err("no_drag", "no drag session is active", None)
}

pub fn from_edge_error(e: &EdgeError) -> JsValue {
    let data = match e {
        EdgeError::NonFinite(param) => return non_finite(param),
        EdgeError::InvalidConfig { field, .. } => Some(detail("field", JsValue::from_str(field))),
        EdgeError::PathParse { pos, .. } => Some(detail("pos", JsValue::from_f64(*pos as f64))),
        EdgeError::Json(_) => None,
    };
    err(e.code(), e.to_string(), data)
}
