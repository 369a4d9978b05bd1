use dioxus::prelude::*;
use study_core::model::{TabId, TabSet};

use crate::context::AppContext;
use crate::views::{TabContent, ViewError, ViewState, view_state_from_resource};
use crate::vm::map_tab_chips;

#[component]
pub fn StudyHelperView() -> Element {
    let ctx = use_context::<AppContext>();
    let tab_service = ctx.tab_service();

    let resource = use_resource(move || {
        let tab_service = tab_service.clone();
        async move { tab_service.open().await.map_err(ViewError::from) }
    });

    match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "page", p { "Loading..." } }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page",
                p { "{err.message()}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let mut resource = resource;
                        resource.restart();
                    },
                    "Retry"
                }
            }
        },
        ViewState::Ready(initial) => rsx! {
            TabWorkspace { initial }
        },
    }
}

#[component]
fn TabWorkspace(initial: TabSet) -> Element {
    let ctx = use_context::<AppContext>();
    let service = use_hook(move || CopyValue::new(ctx.tab_service()));
    let mut tabs = use_signal(|| initial);
    let mut error = use_signal(|| None::<ViewError>);

    // The service orders tab bar writes; the signal mirrors its latest snapshot.
    let run = move |action: TabAction| {
        let service = service.cloned();
        spawn(async move {
            let result = match action {
                TabAction::Add => service.add_tab().await,
                TabAction::Select(id) => service.select_tab(id).await,
                TabAction::Remove(id) => service.remove_tab(id).await,
                TabAction::ResetAll => service.reset_all().await,
            };
            match result {
                Ok(next) => {
                    tabs.set(next);
                    error.set(None);
                }
                Err(err) => error.set(Some(ViewError::from(err))),
            }
        });
    };

    let chips = map_tab_chips(&tabs.read());
    let active = tabs.read().active();

    rsx! {
        div { class: "page study-page",
            nav { class: "tab-bar",
                for chip in chips {
                    div { key: "{chip.id}", class: chip.class(),
                        span {
                            class: "tab-chip-title",
                            onclick: move |_| run(TabAction::Select(chip.id)),
                            "{chip.title}"
                        }
                        if chip.closable {
                            button {
                                class: "tab-chip-close",
                                r#type: "button",
                                title: "Close topic",
                                onclick: move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    run(TabAction::Remove(chip.id));
                                },
                                "×"
                            }
                        }
                    }
                }
                button {
                    class: "tab-add",
                    r#type: "button",
                    title: "Add new topic",
                    onclick: move |_| run(TabAction::Add),
                    "+"
                }
                button {
                    class: "btn btn-danger tab-reset-all",
                    r#type: "button",
                    onclick: move |_| run(TabAction::ResetAll),
                    "Reset All Tabs"
                }
            }
            if let Some(err) = error() {
                p { class: "error-banner", "{err.message()}" }
            }
            TabContent { key: "{active}", tab_id: active, tabs }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TabAction {
    Add,
    Select(TabId),
    Remove(TabId),
    ResetAll,
}
