use dioxus::prelude::*;
use shared_ui::focus::FocusTarget;
use shared_ui::layout::Rect;
use shared_ui::{Command, Hook, KeyInput, SearchField, Session, SessionConfig, UiEvent, ViewTree};
use serde::Deserialize;
use std::collections::HashMap;
use std::rc::Rc;

mod api;
use api::ProxyClient;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Wake interval of the timer pump. Debounce, hover grace and announcer
/// timers fire at most this late.
const TICK_MS: u64 = 50;

/// Mounted elements that can receive focus or be measured.
type Mounted = HashMap<FocusTarget, Rc<MountedData>>;

fn main() {
    dioxus::launch(App);
}

/// Wall clock in milliseconds, the session's time base.
fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Key press forwarded from the window-level listener.
#[derive(Debug, Deserialize)]
struct KeyPress {
    key: String,
    #[serde(default)]
    shift: bool,
}

impl KeyPress {
    fn input(&self) -> Option<KeyInput> {
        match self.key.as_str() {
            "Escape" => Some(KeyInput::Escape),
            "Tab" => Some(KeyInput::Tab { shift: self.shift }),
            _ => None,
        }
    }
}

fn focus_target(hook: &Hook) -> Option<FocusTarget> {
    match hook {
        Hook::Card(id) => Some(FocusTarget::Card(id.clone())),
        Hook::ModalClose => Some(FocusTarget::ModalClose),
        _ => None,
    }
}

#[component]
fn App() -> Element {
    let session = use_signal(|| Session::new(SessionConfig::default()));
    let mut query = use_signal(String::new);
    let mut mounted = use_signal(Mounted::new);
    let client = use_hook(ProxyClient::from_build_env);

    let perform = use_callback(move |commands: Vec<Command>| {
        for command in commands {
            run_command(command, session, mounted, client.clone());
        }
    });

    // Returns whether the browser default should be suppressed.
    let dispatch = use_callback(move |event: UiEvent| {
        let measure = match &event {
            UiEvent::CardPointerEnter(id) | UiEvent::CardActivated { id, .. } => Some(id.clone()),
            _ => None,
        };
        let mut session = session;
        let outcome = session.write().dispatch(event, now_ms());
        perform.call(outcome.commands);
        if let Some(id) = measure {
            measure_card(id, session, mounted);
        }
        outcome.prevent_default
    });

    use_future(move || async move {
        let mut session = session;
        let mut ticker = document::eval(&format!(
            "setInterval(() => dioxus.send(true), {TICK_MS}); await new Promise(() => {{}});"
        ));
        while ticker.recv::<bool>().await.is_ok() {
            let now = now_ms();
            if session.peek().next_due().is_some_and(|due| due <= now) {
                let commands = session.write().advance(now);
                perform.call(commands);
            }
        }
        tracing::warn!("timer pump stopped");
    });

    use_future(move || async move {
        let mut viewport = document::eval(
            r#"
            dioxus.send(window.innerWidth);
            window.addEventListener('resize', () => dioxus.send(window.innerWidth));
            await new Promise(() => {});
            "#,
        );
        while let Ok(width) = viewport.recv::<f64>().await {
            dispatch.call(UiEvent::ViewportResized(width));
        }
    });

    // Keys are read at window level; Tab's default is suppressed page-side
    // while the sheet is open.
    use_future(move || async move {
        let mut keys = document::eval(
            r#"
            window.addEventListener('keydown', (event) => {
                if (event.key === 'Escape') {
                    dioxus.send({ key: 'Escape' });
                } else if (event.key === 'Tab') {
                    const sheet = document.getElementById('bottomSheet');
                    if (sheet && sheet.classList.contains('open')) {
                        event.preventDefault();
                    }
                    dioxus.send({ key: 'Tab', shift: event.shiftKey });
                }
            });
            await new Promise(() => {});
            "#,
        );
        while let Ok(press) = keys.recv::<KeyPress>().await {
            if let Some(input) = press.input() {
                dispatch.call(UiEvent::Key(input));
            }
        }
        tracing::warn!("key listener stopped");
    });

    let view = session.read().view();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "page",
            h1 { "Movie Search" }
            SearchField {
                value: query(),
                on_event: move |event: UiEvent| {
                    if let UiEvent::QueryInput(text) = &event {
                        query.set(text.clone());
                    }
                    dispatch.call(event);
                },
                on_mounted: move |node: Rc<MountedData>| {
                    mounted.write().insert(FocusTarget::SearchInput, node);
                },
            }
            ViewTree {
                node: view,
                on_event: move |event: UiEvent| {
                    dispatch.call(event);
                },
                on_mounted: move |(hook, node): (Hook, Rc<MountedData>)| {
                    if let Some(target) = focus_target(&hook) {
                        mounted.write().insert(target, node);
                    }
                },
            }
        }
    }
}

fn run_command(
    command: Command,
    mut session: Signal<Session>,
    mounted: Signal<Mounted>,
    client: ProxyClient,
) {
    match command {
        Command::FetchSearch { ticket, query } => {
            spawn(async move {
                let outcome = client.search(&query).await;
                session.write().search_completed(ticket, outcome, now_ms());
            });
        }
        Command::FetchDetails { id } => {
            spawn(async move {
                let outcome = client.details(&id).await;
                session.write().details_completed(&id, outcome, now_ms());
            });
        }
        Command::Focus(target) => {
            let Some(node) = mounted.peek().get(&target).cloned() else {
                tracing::debug!(?target, "focus target not mounted");
                return;
            };
            spawn(async move {
                if let Err(err) = node.set_focus(true).await {
                    tracing::debug!(?err, ?target, "focus failed");
                }
            });
        }
        Command::SetScrollLock(locked) => {
            let overflow = if locked { "hidden" } else { "" };
            document::eval(&format!("document.body.style.overflow = '{overflow}';"));
        }
    }
}

/// Measure a card so an open tooltip can pick its side.
fn measure_card(id: String, mut session: Signal<Session>, mounted: Signal<Mounted>) {
    let Some(node) = mounted.peek().get(&FocusTarget::Card(id.clone())).cloned() else {
        return;
    };
    spawn(async move {
        match node.get_client_rect().await {
            Ok(rect) => {
                let rect = Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height);
                session
                    .write()
                    .dispatch(UiEvent::CardMeasured { id, rect }, now_ms());
            }
            Err(err) => tracing::debug!(?err, "card measurement unavailable"),
        }
    });
}
