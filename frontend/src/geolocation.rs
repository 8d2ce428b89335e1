use std::{cell::RefCell, future::Future, rc::Rc};

use futures::channel::oneshot;
use gloo_utils::window;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use workout_tracker_lib::{Coordinates, LocationProvider, Result, WorkoutError};

type Responder = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates>>>>>;

/// The browser's `navigator.geolocation`, asked once for the current position.
pub struct BrowserGeolocation;

impl LocationProvider for BrowserGeolocation {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates>> {
        let (tx, rx) = oneshot::channel();
        let requested = request_position(Rc::new(RefCell::new(Some(tx))));

        async move {
            requested?;
            rx.await
                .unwrap_or_else(|_| Err(WorkoutError::LocationUnavailable("position request was dropped".into())))
        }
    }
}

fn request_position(responder: Responder) -> Result<()> {
    let geolocation = window()
        .navigator()
        .geolocation()
        .map_err(|_| WorkoutError::LocationUnavailable("geolocation is not supported".into()))?;

    // GeolocationPosition is not a stable web-sys binding, read the fields by name
    let on_success = {
        let responder = responder.clone();
        Closure::once_into_js(move |position: JsValue| {
            let coords = Reflect::get(&position, &"coords".into()).unwrap_or(JsValue::UNDEFINED);
            let field = |name: &str| Reflect::get(&coords, &name.into()).ok().and_then(|value| value.as_f64());
            respond(&responder, coordinates_from(field("latitude"), field("longitude")));
        })
    };

    let on_error = Closure::once_into_js(move |err: JsValue| {
        let message = Reflect::get(&err, &"message".into())
            .ok()
            .and_then(|message| message.as_string())
            .unwrap_or_else(|| "unknown geolocation error".into());
        respond(&responder, Err(WorkoutError::LocationUnavailable(message)));
    });

    geolocation
        .get_current_position_with_error_callback(on_success.unchecked_ref::<Function>(), Some(on_error.unchecked_ref::<Function>()))
        .map_err(|_| WorkoutError::LocationUnavailable("position request was rejected".into()))
}

fn coordinates_from(latitude: Option<f64>, longitude: Option<f64>) -> Result<Coordinates> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Ok(Coordinates::new(lat, lng)),
        _ => Err(WorkoutError::LocationUnavailable("position without coordinates".into())),
    }
}

// The host calls exactly one of the two callbacks, whichever comes first wins.
fn respond(responder: &Responder, result: Result<Coordinates>) {
    if let Some(tx) = responder.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_needs_both_coordinates() {
        assert_eq!(coordinates_from(Some(55.6), Some(12.5)), Ok(Coordinates::new(55.6, 12.5)));
        assert!(matches!(coordinates_from(Some(55.6), None), Err(WorkoutError::LocationUnavailable(_))));
        assert!(matches!(coordinates_from(Some(f64::NAN), Some(12.5)), Err(WorkoutError::LocationUnavailable(_))));
    }

    #[test]
    fn only_the_first_response_is_delivered() {
        let (tx, mut rx) = oneshot::channel();
        let responder: Responder = Rc::new(RefCell::new(Some(tx)));

        respond(&responder, Ok(Coordinates::new(1., 2.)));
        respond(&responder, Err(WorkoutError::LocationUnavailable("late".into())));

        assert_eq!(rx.try_recv(), Ok(Some(Ok(Coordinates::new(1., 2.)))));
    }
}
