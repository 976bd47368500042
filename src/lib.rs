// wasm terminal for a portfolio site
// a fake shell over a fake filesystem, with one real flag in it
pub mod command;
pub mod commands;
pub mod context;
pub mod editor;
pub mod mockfs;
pub mod profile;
pub mod session;

use commands::network::FetchKind;
use context::Effect;
use editor::Completion;
use serde::{Deserialize, Serialize};
use session::Session;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Response wrapper for js comms: the echoed prompt line, the immediate
/// output, and side-channel actions the frontend applies (clear the
/// scrollback, navigate, flip the theme, and so on).
#[derive(Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub echo: Option<String>,
    pub output: String,
    pub actions: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CompletionResponse {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

/// One terminal instance, state kept between calls. Delayed output goes
/// through the registered callback; every pending timer checks the epoch
/// counter before firing, so bumping the epoch cancels all of them at once.
#[wasm_bindgen]
pub struct Terminal {
    session: Session,
    output_callback: Rc<RefCell<Option<js_sys::Function>>>,
    epoch: Rc<Cell<u64>>,
}

#[wasm_bindgen]
impl Terminal {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Terminal {
        Terminal {
            session: Session::new(),
            output_callback: Rc::new(RefCell::new(None)),
            epoch: Rc::new(Cell::new(0)),
        }
    }

    /// js registers a function here to receive delayed output lines
    #[wasm_bindgen]
    pub fn set_output_callback(&mut self, callback: js_sys::Function) {
        *self.output_callback.borrow_mut() = Some(callback);
    }

    /// main entry point: run one submitted line and return the outcome
    #[wasm_bindgen]
    pub fn submit(&mut self, input: &str) -> JsValue {
        let outcome = self.session.submit(input);
        let mut actions = Vec::new();
        for effect in &outcome.effects {
            match effect {
                Effect::ClearScreen => actions.push("clear".to_string()),
                Effect::Navigate(path) => actions.push(format!("navigate:{}", path)),
                Effect::SetTheme(theme) => actions.push(format!("theme:{}", theme.as_str())),
                Effect::MatrixToggled(on) => {
                    actions.push(format!("matrix:{}", if *on { "on" } else { "off" }))
                }
                Effect::MusicToggled(on) => {
                    actions.push(format!("music:{}", if *on { "on" } else { "off" }))
                }
                Effect::ResetSession { delay_ms } => actions.push(format!("reset:{}", delay_ms)),
                Effect::DelayedLines { delay_ms, lines } => {
                    self.schedule_lines(*delay_ms, lines.clone())
                }
                Effect::OpenUrl { delay_ms, url } => self.schedule_open_url(*delay_ms, url.clone()),
                Effect::HttpFetch { url, kind } => self.schedule_fetch(url.clone(), kind.clone()),
            }
        }
        let response = CommandResponse {
            success: outcome.ok,
            echo: outcome.echo,
            output: outcome.output,
            actions,
        };
        serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen]
    pub fn tab_complete(&self, input: &str) -> JsValue {
        let response = match self.session.tab_complete(input) {
            Completion::None => CompletionResponse {
                kind: "none".to_string(),
                line: None,
                candidates: None,
            },
            Completion::Replace(line) => CompletionResponse {
                kind: "replace".to_string(),
                line: Some(line),
                candidates: None,
            },
            Completion::Candidates(candidates) => CompletionResponse {
                kind: "candidates".to_string(),
                line: None,
                candidates: Some(candidates),
            },
        };
        serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen]
    pub fn history_up(&mut self) -> Option<String> {
        self.session.history_up()
    }

    #[wasm_bindgen]
    pub fn history_down(&mut self) -> Option<String> {
        self.session.history_down()
    }

    /// true while the breach-protocol gate is armed; the frontend masks input
    #[wasm_bindgen]
    pub fn is_password_mode(&self) -> bool {
        self.session.ctx.password_mode
    }

    #[wasm_bindgen]
    pub fn current_theme(&self) -> String {
        self.session.ctx.theme.as_str().to_string()
    }

    /// wipe the session back to a fresh boot, used by the `reset:` action
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.session.reset();
    }

    /// drop every scheduled delayed line and url-open
    #[wasm_bindgen]
    pub fn cancel_pending(&mut self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_lines(&self, delay_ms: u32, lines: Vec<String>) {
        let callback = self.output_callback.clone();
        let epoch = self.epoch.clone();
        let issued = epoch.get();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if epoch.get() != issued {
                return;
            }
            if let Some(ref cb) = *callback.borrow() {
                let text = lines.join("\n");
                let _ = cb.call1(&JsValue::NULL, &JsValue::from_str(&text));
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_open_url(&self, delay_ms: u32, url: String) {
        let epoch = self.epoch.clone();
        let issued = epoch.get();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if epoch.get() != issued {
                return;
            }
            if let Some(window) = web_sys::window() {
                if window.open_with_url_and_target(&url, "_blank").is_err() {
                    web_sys::console::warn_1(&"popup blocked".into());
                }
            }
        });
    }

    /// Run the request off the submit path; the rendered result (or the
    /// kind's fallback on any failure) arrives as a later output line.
    /// Pending fetches obey the same epoch cancellation as the timers.
    #[cfg(target_arch = "wasm32")]
    fn schedule_fetch(&self, url: String, kind: FetchKind) {
        let callback = self.output_callback.clone();
        let epoch = self.epoch.clone();
        let issued = epoch.get();
        wasm_bindgen_futures::spawn_local(async move {
            let text = match fetch_text(&url).await {
                Ok(body) => kind.render(&body).unwrap_or_else(|| kind.fallback()),
                Err(_) => kind.fallback(),
            };
            if epoch.get() != issued {
                return;
            }
            if let Some(ref cb) = *callback.borrow() {
                let _ = cb.call1(&JsValue::NULL, &JsValue::from_str(&text));
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_lines(&self, _delay_ms: u32, _lines: Vec<String>) {}

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_open_url(&self, _delay_ms: u32, _url: String) {}

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_fetch(&self, _url: String, _kind: FetchKind) {}
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    #[allow(unused_mut)]
    let mut opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|_| "invalid url".to_string())?;
    let window = web_sys::window().ok_or("no window object")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "network error".to_string())?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "bad response object".to_string())?;
    if !resp.ok() {
        return Err(format!("http {}", resp.status()));
    }
    let text_promise = resp.text().map_err(|_| "unreadable body".to_string())?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| "unreadable body".to_string())?;
    text.as_string().ok_or_else(|| "non-text body".to_string())
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
