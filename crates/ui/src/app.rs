use dioxus::prelude::*;

use crate::views::{LoginView, StudyHelperView};

#[component]
pub fn App() -> Element {
    let mut authorized = use_signal(|| false);

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Study Helper" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                if authorized() {
                    StudyHelperView {}
                } else {
                    LoginView { on_login: move |_| authorized.set(true) }
                }
            }
        }
    }
}
