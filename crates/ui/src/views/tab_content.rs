use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use services::{CallbackListener, Dictation, SpeechEvent, SpeechListener};
use study_core::analysis::AnalysisRequest;
use study_core::model::{Accuracy, Language, TabFields, TabId, TabSet};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    FeedbackVm, can_analyze, format_last_saved, grade_options, language_options, level_options,
    recording_label,
};

/// Loads a tab's saved fields, then hands them to the form.
#[component]
pub fn TabContent(tab_id: TabId, tabs: Signal<TabSet>) -> Element {
    let ctx = use_context::<AppContext>();
    let tab_service = ctx.tab_service();

    let resource = use_resource(move || {
        let tab_service = tab_service.clone();
        async move {
            tab_service
                .load_fields(tab_id)
                .await
                .map_err(ViewError::from)
        }
    });

    match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "tab-content", p { "Loading..." } }
        },
        ViewState::Error(err) => rsx! {
            div { class: "tab-content", p { "{err.message()}" } }
        },
        ViewState::Ready(initial) => rsx! {
            TabForm { tab_id, tabs, initial }
        },
    }
}

/// Signals of one open form; copied into every handler.
#[derive(Clone, Copy)]
struct FormHandle {
    ctx: CopyValue<AppContext>,
    tab_id: TabId,
    tabs: Signal<TabSet>,
    fields: Signal<TabFields>,
    last_saved: Signal<Option<DateTime<Utc>>>,
    save_error: Signal<Option<ViewError>>,
    feedback: Signal<Option<FeedbackVm>>,
    analyzing: Signal<bool>,
    dictation: Signal<Dictation>,
    speech_error: Signal<Option<String>>,
}

impl FormHandle {
    /// Apply an edit and persist the full record.
    fn edit(mut self, change: impl FnOnce(&mut TabFields)) {
        change(&mut self.fields.write());
        let snapshot = self.fields.peek().clone();
        let service = self.ctx.read().tab_service();
        spawn(async move {
            match service.save_fields(self.tab_id, &snapshot).await {
                Ok(saved) => {
                    self.tabs.set(saved.tabs);
                    self.last_saved.set(Some(saved.saved_at));
                    self.save_error.set(None);
                }
                Err(err) => self.save_error.set(Some(ViewError::from(err))),
            }
        });
    }

    fn analyze(mut self) {
        if !can_analyze(&self.fields.peek(), *self.analyzing.peek()) {
            return;
        }
        let request = AnalysisRequest::from(&*self.fields.peek());
        let gateway = self.ctx.read().gateway();
        self.analyzing.set(true);
        spawn(async move {
            let result = gateway.analyze(&request).await;
            self.feedback.set(Some(FeedbackVm::from_result(&result)));
            self.analyzing.set(false);
        });
    }

    fn toggle_recording(mut self) {
        let speech = self.ctx.read().speech();
        let language = self.fields.peek().language;
        let mut transcript = self.fields.peek().spoken_text.clone();
        let mut dictation = self.dictation;
        let started = dictation.write().toggle(
            &*speech,
            language,
            move || -> Box<dyn SpeechListener> {
                Box::new(CallbackListener(move |event: SpeechEvent| {
                    self.on_speech(event);
                }))
            },
            &mut transcript,
        );
        match started {
            Ok(()) => {
                self.speech_error.set(None);
                if transcript != self.fields.peek().spoken_text {
                    self.edit(|fields| fields.spoken_text = transcript);
                }
            }
            Err(err) => self.speech_error.set(Some(err.code().to_string())),
        }
    }

    fn on_speech(mut self, event: SpeechEvent) {
        if let SpeechEvent::Error(code) = &event {
            self.speech_error.set(Some(code.clone()));
        }
        let mut transcript = self.fields.peek().spoken_text.clone();
        self.dictation.write().apply(event, &mut transcript);
        if transcript != self.fields.peek().spoken_text {
            self.edit(|fields| fields.spoken_text = transcript);
        }
    }

    fn reset(mut self) {
        if self.dictation.peek().is_recording() {
            self.ctx.read().speech().stop();
            self.dictation.set(Dictation::default());
        }
        let service = self.ctx.read().tab_service();
        spawn(async move {
            match service.reset_tab(self.tab_id).await {
                Ok(next) => {
                    self.tabs.set(next);
                    self.fields.set(TabFields::default());
                    self.feedback.set(None);
                    self.last_saved.set(None);
                    self.save_error.set(None);
                }
                Err(err) => self.save_error.set(Some(ViewError::from(err))),
            }
        });
    }
}

/// Stop a running recognizer when the form unmounts, e.g. on a tab switch.
pub(crate) fn use_release_speech(dictation: Signal<Dictation>) {
    let speech = use_context::<AppContext>().speech();
    use_drop(move || {
        if dictation.try_peek().is_ok_and(|state| state.is_recording()) {
            speech.stop();
        }
    });
}

#[component]
fn TabForm(tab_id: TabId, tabs: Signal<TabSet>, initial: TabFields) -> Element {
    let ctx = use_context::<AppContext>();
    let form = FormHandle {
        ctx: use_hook(move || CopyValue::new(ctx)),
        tab_id,
        tabs,
        fields: use_signal(|| initial),
        last_saved: use_signal(|| None),
        save_error: use_signal(|| None),
        feedback: use_signal(|| None),
        analyzing: use_signal(|| false),
        dictation: use_signal(Dictation::default),
        speech_error: use_signal(|| None),
    };
    use_release_speech(form.dictation);

    let fields = form.fields.read().clone();
    let recording = form.dictation.read().is_recording();
    let analyze_enabled = can_analyze(&fields, (form.analyzing)());
    let grades = grade_options(&fields.school_grade);
    let languages = language_options(fields.language);
    let levels = level_options(fields.accuracy);
    let record_class = if recording {
        "btn btn-record btn-record--active"
    } else {
        "btn btn-record"
    };

    rsx! {
        div { class: "tab-content",
            section { class: "panel",
                header { class: "panel-header",
                    h3 { class: "panel-title", "Test Setup" }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| form.reset(),
                        "Reset Tab"
                    }
                }
                div { class: "field-grid",
                    label { class: "field field--wide",
                        span { class: "field-label", "Test Topic:" }
                        input {
                            class: "field-input",
                            r#type: "text",
                            placeholder: "Enter the topic of the test...",
                            value: "{fields.topic}",
                            oninput: move |evt: FormEvent| form.edit(|f| f.topic = evt.value()),
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Student Name:" }
                        input {
                            class: "field-input",
                            r#type: "text",
                            placeholder: "Enter student name...",
                            value: "{fields.student_name}",
                            oninput: move |evt: FormEvent| form.edit(|f| f.student_name = evt.value()),
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "School Grade:" }
                        select {
                            class: "field-input",
                            value: "{fields.school_grade}",
                            onchange: move |evt: FormEvent| form.edit(|f| f.school_grade = evt.value()),
                            for choice in grades {
                                option {
                                    key: "{choice.value}",
                                    value: "{choice.value}",
                                    selected: choice.selected,
                                    "{choice.label}"
                                }
                            }
                        }
                    }
                }
            }

            section { class: "panel",
                h3 { class: "panel-title", "Required Content" }
                label { class: "field",
                    span { class: "field-label", "Key Facts to Cover:" }
                    span { class: "field-hint",
                        "List the facts that must be included in the answer (one per line)"
                    }
                    textarea {
                        class: "field-input field-textarea",
                        placeholder: "Enter key facts as bullet points...",
                        value: "{fields.bullet_points}",
                        oninput: move |evt: FormEvent| form.edit(|f| f.bullet_points = evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Preparation Draft (Optional):" }
                    span { class: "field-hint",
                        "Draft text for practice - not required for speech practice"
                    }
                    textarea {
                        class: "field-input field-textarea",
                        placeholder: "Enter your prepared text...",
                        value: "{fields.prepared_text}",
                        oninput: move |evt: FormEvent| form.edit(|f| f.prepared_text = evt.value()),
                    }
                }
            }

            section { class: "panel",
                h3 { class: "panel-title", "Analysis Settings" }
                div { class: "field-grid",
                    label { class: "field",
                        span { class: "field-label", "Language:" }
                        select {
                            class: "field-input",
                            value: "{fields.language.as_str()}",
                            onchange: move |evt: FormEvent| {
                                form.edit(|f| f.language = Language::from_label(&evt.value()));
                            },
                            for choice in languages {
                                option {
                                    key: "{choice.value}",
                                    value: "{choice.value}",
                                    selected: choice.selected,
                                    "{choice.label}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Analysis Level:" }
                        select {
                            class: "field-input",
                            value: "{fields.accuracy.as_str()}",
                            onchange: move |evt: FormEvent| {
                                form.edit(|f| f.accuracy = Accuracy::from_label(&evt.value()));
                            },
                            for choice in levels {
                                option {
                                    key: "{choice.value}",
                                    value: "{choice.value}",
                                    selected: choice.selected,
                                    "{choice.label}"
                                }
                            }
                        }
                    }
                }
            }

            section { class: "panel",
                h3 { class: "panel-title", "Speech Practice" }
                div { class: "speech-header",
                    div {
                        h4 { class: "speech-title", "Your Speech" }
                        p { class: "field-hint", "Practice speaking your answer" }
                    }
                    button {
                        class: record_class,
                        r#type: "button",
                        onclick: move |_| form.toggle_recording(),
                        "{recording_label(recording)}"
                    }
                }
                if let Some(code) = (form.speech_error)() {
                    p { class: "field-hint speech-error", "Speech recognition error: {code}" }
                }
                textarea {
                    class: "field-input field-textarea field-textarea--tall",
                    placeholder: "Your speech will appear here...",
                    value: "{fields.spoken_text}",
                    oninput: move |evt: FormEvent| form.edit(|f| f.spoken_text = evt.value()),
                }
                button {
                    id: "analyze-button",
                    class: "btn btn-primary btn-block",
                    r#type: "button",
                    disabled: !analyze_enabled,
                    onclick: move |_| form.analyze(),
                    if (form.analyzing)() { "Analyzing..." } else { "Analyze Response" }
                }
            }

            if let Some(feedback) = (form.feedback)() {
                section { class: "panel",
                    h3 { class: "panel-title", "Analysis Results" }
                    div { class: feedback.tone.class(),
                        h4 { "Overview" }
                        p { "{feedback.overview}" }
                    }
                    if let Some(details) = feedback.details {
                        div { class: "feedback-details",
                            h4 { "Detailed Feedback" }
                            pre { "{details}" }
                        }
                    }
                }
            }

            if let Some(err) = (form.save_error)() {
                p { class: "error-banner", "{err.message()}" }
            }
            if let Some(saved_at) = (form.last_saved)() {
                div { class: "save-indicator", "{format_last_saved(saved_at)}" }
            }
        }
    }
}
