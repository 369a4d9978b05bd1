use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{
    AppServices, CallbackListener, Dictation, GatewayError, SpeechCapability, SpeechError,
    SpeechEvent, SpeechListener, StudyGateway, TabService, UnavailableSpeech,
};
use study_core::analysis::AnalysisRequest;
use study_core::model::{AnalysisResult, Language};
use study_core::time::fixed_clock;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{LoginView, StudyHelperView, use_release_speech};

pub const TEST_PASSWORD: &str = "pw";

struct StubGateway;

#[async_trait]
impl StudyGateway for StubGateway {
    async fn login(&self, password: &str) -> Result<bool, GatewayError> {
        Ok(password == TEST_PASSWORD)
    }

    async fn analyze(&self, _request: &AnalysisRequest) -> AnalysisResult {
        AnalysisResult::new(true, "All facts covered.", None)
    }
}

/// Recognizer that only counts how often it was started and stopped.
#[derive(Default)]
pub struct CountingSpeech {
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl CountingSpeech {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl SpeechCapability for CountingSpeech {
    fn start(
        &self,
        _language: Language,
        _listener: Box<dyn SpeechListener>,
    ) -> Result<(), SpeechError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    speech: Arc<dyn SpeechCapability + Send + Sync>,
}

impl UiApp for TestApp {
    fn gateway(&self) -> Arc<dyn StudyGateway> {
        self.services.gateway()
    }

    fn tab_service(&self) -> Arc<TabService> {
        self.services.tabs()
    }

    fn speech(&self) -> Arc<dyn SpeechCapability + Send + Sync> {
        Arc::clone(&self.speech)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    StudyHelper,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Login => rsx! { LoginView { on_login: move |_| {} } },
        ViewKind::StudyHelper => rsx! { StudyHelperView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until nested resources (tab bar, then tab fields) have loaded.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over an in-memory store with a stub gateway.
pub fn test_services() -> AppServices {
    AppServices::in_memory(fixed_clock(), Arc::new(StubGateway))
}

pub fn mount_view(view: ViewKind, services: AppServices) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app: Arc::new(TestApp {
                services,
                speech: Arc::new(UnavailableSpeech),
            }),
            view,
        },
    );
    ViewHarness { dom }
}

#[derive(Props, Clone)]
struct TabSwitchProps {
    app: Arc<TestApp>,
    recording: bool,
}

impl PartialEq for TabSwitchProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Shows a dictating form for tab 1, then switches to tab 2 once tasks run.
#[component]
fn TabSwitchRoot(props: TabSwitchProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let mut active = use_signal(|| 1_u32);
    use_future(move || async move {
        active.set(2);
    });
    let tab = active();
    rsx! {
        DictatingForm { key: "{tab}", recording: props.recording && tab == 1 }
    }
}

#[component]
fn DictatingForm(recording: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let dictation = use_signal(move || {
        let mut dictation = Dictation::default();
        if recording {
            let mut transcript = String::new();
            let _ = dictation.toggle(
                &*ctx.speech(),
                Language::English,
                || Box::new(CallbackListener(|_event: SpeechEvent| {})),
                &mut transcript,
            );
        }
        dictation
    });
    use_release_speech(dictation);
    let recording_now = dictation.read().is_recording();
    rsx! {
        p { "recording: {recording_now}" }
    }
}

/// Mount a form that switches tabs, dictating first when `recording` is set.
pub fn mount_tab_switch(speech: Arc<CountingSpeech>, recording: bool) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        TabSwitchRoot,
        TabSwitchProps {
            app: Arc::new(TestApp {
                services: test_services(),
                speech,
            }),
            recording,
        },
    );
    ViewHarness { dom }
}
