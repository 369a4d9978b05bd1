//! Speech recognition through the desktop web view.

use dioxus::document::eval;
use dioxus::prelude::spawn;
use serde::Deserialize;
use services::{SpeechCapability, SpeechError, SpeechListener};
use study_core::model::Language;

const STOP_SCRIPT: &str = "window.__studySpeech?.stop();";

#[derive(Debug, Deserialize)]
struct RecognizerMessage {
    kind: String,
    #[serde(default)]
    value: String,
}

/// Continuous recognition with interim results via the web speech API.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSpeech;

impl SpeechCapability for WebSpeech {
    fn start(
        &self,
        language: Language,
        listener: Box<dyn SpeechListener>,
    ) -> Result<(), SpeechError> {
        let script = start_script(language.speech_locale());
        spawn(async move {
            let mut recognizer = eval(&script);
            while let Ok(message) = recognizer.recv::<RecognizerMessage>().await {
                match message.kind.as_str() {
                    "result" => listener.on_result(message.value),
                    "error" => {
                        listener.on_error(message.value);
                        break;
                    }
                    _ => break,
                }
            }
        });
        Ok(())
    }

    fn stop(&self) {
        let _ = eval(STOP_SCRIPT);
    }
}

fn start_script(locale: &str) -> String {
    format!(
        r#"
        const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
        if (!Recognition) {{
            dioxus.send({{ kind: "error", value: "not-supported" }});
            return;
        }}
        if (window.__studySpeech) {{
            window.__studySpeech.onend = null;
            window.__studySpeech.stop();
        }}
        const recognition = new Recognition();
        recognition.continuous = true;
        recognition.interimResults = true;
        recognition.lang = {locale:?};
        recognition.onresult = (event) => {{
            const transcript = Array.from(event.results)
                .map((result) => result[0].transcript)
                .join("");
            dioxus.send({{ kind: "result", value: transcript }});
        }};
        recognition.onerror = (event) => {{
            dioxus.send({{ kind: "error", value: event.error || "unknown" }});
        }};
        recognition.onend = () => {{
            dioxus.send({{ kind: "end", value: "" }});
        }};
        window.__studySpeech = recognition;
        recognition.start();
        "#
    )
}
