use std::sync::Arc;

use study_core::model::{TabFields, TabId};

use super::test_harness::{CountingSpeech, ViewKind, mount_tab_switch, mount_view, test_services};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_password_form() {
    let mut harness = mount_view(ViewKind::Login, test_services());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Study Helper Login"), "missing title in {html}");
    assert!(html.contains("Enter password"), "missing placeholder in {html}");
    assert!(html.contains("Login"), "missing button in {html}");
    assert!(!html.contains("Incorrect password"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_helper_smoke_renders_single_default_tab() {
    let mut harness = mount_view(ViewKind::StudyHelper, test_services());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Topic 1"), "missing default title in {html}");
    assert!(html.contains("Reset All Tabs"), "missing reset all in {html}");
    assert!(!html.contains("Close topic"), "sole tab must not be closable: {html}");
    assert!(html.contains("Test Setup"), "missing form in {html}");
    assert!(html.contains("Analyze Response"), "missing analyze button in {html}");
    assert!(html.contains("Start Recording"), "missing record toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_helper_smoke_restores_saved_tabs_and_fields() {
    let services = test_services();
    let tabs = services.tabs();
    tabs.open().await.expect("open tabs");
    let fields = TabFields {
        topic: "Roman Empire".into(),
        bullet_points: "- Augustus".into(),
        school_grade: "9".into(),
        ..TabFields::default()
    };
    tabs.save_fields(TabId::FIRST, &fields)
        .await
        .expect("save fields");
    tabs.add_tab().await.expect("add tab");
    tabs.select_tab(TabId::FIRST).await.expect("select tab");

    let mut harness = mount_view(ViewKind::StudyHelper, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Roman Empire"), "missing retitled tab in {html}");
    assert!(html.contains("Topic 2"), "missing second tab in {html}");
    assert!(html.contains("Close topic"), "missing close button in {html}");
    assert!(html.contains("- Augustus"), "missing saved facts in {html}");
    assert!(html.contains("9. Klasse"), "missing grade option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn switching_tabs_stops_a_running_recording() {
    let speech = Arc::new(CountingSpeech::default());
    let mut harness = mount_tab_switch(Arc::clone(&speech), true);
    harness.rebuild();
    assert_eq!(speech.starts(), 1);
    assert_eq!(speech.stops(), 0);

    harness.settle().await;
    assert_eq!(speech.stops(), 1);
    assert!(harness.render().contains("recording: false"));
}

#[tokio::test(flavor = "current_thread")]
async fn switching_tabs_leaves_an_idle_recognizer_alone() {
    let speech = Arc::new(CountingSpeech::default());
    let mut harness = mount_tab_switch(Arc::clone(&speech), false);
    harness.rebuild();
    harness.settle().await;
    assert_eq!(speech.starts(), 0);
    assert_eq!(speech.stops(), 0);
}
