use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{LoginOutcome, login_outcome};

#[component]
pub fn LoginView(on_login: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<&'static str>);
    let mut submitting = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let gateway = ctx.gateway();
        let attempt = password();
        submitting.set(true);
        spawn(async move {
            let outcome = login_outcome(&gateway.login(&attempt).await);
            submitting.set(false);
            if outcome.clears_password() {
                password.set(String::new());
            }
            error.set(outcome.message());
            if outcome == LoginOutcome::Authorized {
                on_login.call(());
            }
        });
    };

    rsx! {
        div { class: "page login-page",
            div { class: "login-card",
                h2 { class: "view-title", "Study Helper Login" }
                form { class: "login-form", onsubmit: submit,
                    input {
                        class: "field-input",
                        r#type: "password",
                        placeholder: "Enter password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    if let Some(message) = error() {
                        p { class: "login-error", "{message}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting(),
                        "Login"
                    }
                }
            }
        }
    }
}
