//! "Sign in with Google" button backed by Google Identity Services.
//!
//! SYSTEM CONTEXT
//! ==============
//! The GIS script is loaded from `index.html`. Once the button container is
//! mounted it is handed to `google.accounts.id.renderButton`; the ID-token
//! credential GIS returns is passed to `on_credential`. Without a configured
//! client id, or when the script failed to load, nothing is rendered.

use leptos::html::Div;
use leptos::prelude::*;

use crate::util::config::AppConfig;

#[component]
pub fn GoogleButton(#[prop(into)] on_credential: Callback<String>) -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let container = NodeRef::<Div>::new();
    let enabled = config.google_enabled();

    Effect::new(move |_| {
        let Some(element) = container.get() else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            if let Err(err) = gis::render(&config.google_client_id, &element, on_credential) {
                log::warn!("google sign-in unavailable: {err}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (element, on_credential, &config);
        }
    });

    view! {
        <Show when=move || enabled>
            <div class="google-button" node_ref=container></div>
        </Show>
    }
}

#[cfg(feature = "csr")]
mod gis {
    use js_sys::{Function, Object, Reflect};
    use leptos::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    fn get(target: &JsValue, key: &str) -> Result<JsValue, String> {
        let value = Reflect::get(target, &JsValue::from_str(key)).map_err(|_| format!("cannot read {key}"))?;
        if value.is_undefined() || value.is_null() {
            return Err(format!("{key} is not defined"));
        }
        Ok(value)
    }

    fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), String> {
        Reflect::set(target, &JsValue::from_str(key), value)
            .map(|_| ())
            .map_err(|_| format!("cannot set {key}"))
    }

    fn call(api: &JsValue, name: &str, args: &[&JsValue]) -> Result<(), String> {
        let function: Function = get(api, name)?.dyn_into().map_err(|_| format!("{name} is not a function"))?;
        let result = match args {
            [a] => function.call1(api, a),
            [a, b] => function.call2(api, a, b),
            _ => function.call0(api),
        };
        result.map(|_| ()).map_err(|_| format!("{name} threw"))
    }

    /// Initialize GIS and render the button into `element`.
    pub(super) fn render(client_id: &str, element: &web_sys::HtmlDivElement, on_credential: Callback<String>) -> Result<(), String> {
        let window = web_sys::window().ok_or("no window")?;
        let id_api = get(&get(&get(&window, "google")?, "accounts")?, "id")?;

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
            let credential = Reflect::get(&response, &JsValue::from_str("credential"))
                .ok()
                .and_then(|value| value.as_string())
                .unwrap_or_default();
            on_credential.run(credential);
        });

        let init = Object::new();
        set(&init, "client_id", &JsValue::from_str(client_id))?;
        set(&init, "callback", callback.as_ref())?;
        let init: JsValue = init.into();
        call(&id_api, "initialize", &[&init])?;
        callback.forget();

        let options = Object::new();
        set(&options, "theme", &JsValue::from_str("outline"))?;
        set(&options, "size", &JsValue::from_str("large"))?;
        let options: JsValue = options.into();
        let element: &JsValue = element.as_ref();
        call(&id_api, "renderButton", &[element, &options])
    }
}
