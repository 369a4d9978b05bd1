use std::sync::Arc;

use services::{
    AnalysisService, AppServices, Clock, CredentialCheck, LocalGateway, StudyGateway,
    TabServiceError,
};
use study_core::model::{Language, TabError, TabFields, TabId};
use study_core::time::fixed_clock;

fn offline_gateway() -> Arc<dyn StudyGateway> {
    Arc::new(LocalGateway::new(
        CredentialCheck::new(Some("pw".into())),
        Arc::new(AnalysisService::new(None)),
    ))
}

async fn sqlite_services(name: &str) -> AppServices {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    AppServices::new_sqlite(&url, fixed_clock(), offline_gateway())
        .await
        .unwrap()
}

#[tokio::test]
async fn fields_and_titles_survive_a_restart() {
    let first = sqlite_services("memdb_tab_flow_restart").await;
    let tabs = first.tabs();
    let set = tabs.open().await.unwrap();
    assert_eq!(set.len(), 1);

    let fields = TabFields {
        topic: "Roman Empire".into(),
        language: Language::Latin,
        bullet_points: "- Augustus".into(),
        ..TabFields::default()
    };
    let saved = tabs.save_fields(TabId::FIRST, &fields).await.unwrap();
    assert_eq!(saved.saved_at, fixed_clock().now());
    assert_eq!(saved.tabs.get(TabId::FIRST).unwrap().title, "Roman Empire");
    let set = tabs.add_tab().await.unwrap();
    let second_id = set.active();
    assert_eq!(second_id, TabId::new(2));

    let again = sqlite_services("memdb_tab_flow_restart").await;
    let restored = again.tabs().open().await.unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.active(), second_id);
    assert_eq!(restored.get(TabId::FIRST).unwrap().title, "Roman Empire");

    let loaded = again.tabs().load_fields(TabId::FIRST).await.unwrap();
    assert_eq!(loaded, fields);
    let blank = again.tabs().load_fields(second_id).await.unwrap();
    assert_eq!(blank, TabFields::default());
}

#[tokio::test]
async fn removing_tabs_deletes_records_and_keeps_one() {
    let services = AppServices::in_memory(Clock::default(), offline_gateway());
    let tabs = services.tabs();
    tabs.open().await.unwrap();

    let second = tabs.add_tab().await.unwrap().active();
    let fields = TabFields {
        topic: "Volcanoes".into(),
        ..TabFields::default()
    };
    tabs.save_fields(second, &fields).await.unwrap();

    let set = tabs.remove_tab(second).await.unwrap();
    assert!(!set.contains(second));
    assert_eq!(set.active(), TabId::FIRST);
    assert_eq!(tabs.load_fields(second).await.unwrap(), TabFields::default());

    let err = tabs.remove_tab(TabId::FIRST).await.unwrap_err();
    assert!(matches!(err, TabServiceError::Tab(TabError::LastTab)));
    assert_eq!(tabs.snapshot().await.unwrap().len(), 1);
}

#[tokio::test]
async fn reset_all_leaves_a_single_default_tab() {
    let services = AppServices::in_memory(fixed_clock(), offline_gateway());
    let tabs = services.tabs();
    tabs.open().await.unwrap();
    let fields = TabFields {
        topic: "Rivers".into(),
        ..TabFields::default()
    };
    tabs.save_fields(TabId::FIRST, &fields).await.unwrap();
    tabs.add_tab().await.unwrap();
    tabs.add_tab().await.unwrap();

    let set = tabs.reset_all().await.unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.active(), TabId::FIRST);
    assert_eq!(set.get(TabId::FIRST).unwrap().title, "Topic 1");
    assert_eq!(tabs.load_fields(TabId::FIRST).await.unwrap(), TabFields::default());

    let reopened = tabs.open().await.unwrap();
    assert_eq!(reopened, set);
}

#[tokio::test]
async fn overlapping_edit_and_add_keep_both_changes() {
    let services = sqlite_services("memdb_tab_flow_overlap").await;
    let tabs = services.tabs();
    tabs.open().await.unwrap();

    let fields = TabFields {
        topic: "Photosynthesis".into(),
        ..TabFields::default()
    };
    let edit = {
        let tabs = Arc::clone(&tabs);
        let fields = fields.clone();
        tokio::spawn(async move { tabs.save_fields(TabId::FIRST, &fields).await })
    };
    let add = {
        let tabs = Arc::clone(&tabs);
        tokio::spawn(async move { tabs.add_tab().await })
    };
    edit.await.unwrap().unwrap();
    add.await.unwrap().unwrap();

    let current = tabs.snapshot().await.unwrap();
    assert_eq!(current.len(), 2);
    assert_eq!(current.get(TabId::FIRST).unwrap().title, "Photosynthesis");
    assert!(current.contains(TabId::new(2)));

    let restored = tabs.open().await.unwrap();
    assert_eq!(restored, current);
    assert_eq!(tabs.load_fields(TabId::FIRST).await.unwrap(), fields);
}

#[tokio::test]
async fn saving_a_closed_tab_writes_nothing() {
    let services = AppServices::in_memory(fixed_clock(), offline_gateway());
    let tabs = services.tabs();
    tabs.open().await.unwrap();
    let second = tabs.add_tab().await.unwrap().active();
    tabs.remove_tab(second).await.unwrap();

    let late = TabFields {
        topic: "Glaciers".into(),
        ..TabFields::default()
    };
    let err = tabs.save_fields(second, &late).await.unwrap_err();
    assert!(matches!(err, TabServiceError::Tab(TabError::UnknownTab(id)) if id == second));
    assert_eq!(tabs.load_fields(second).await.unwrap(), TabFields::default());
    assert_eq!(tabs.open().await.unwrap().len(), 1);
}

#[tokio::test]
async fn keystroke_saves_persist_the_last_edit() {
    let services = AppServices::in_memory(fixed_clock(), offline_gateway());
    let tabs = services.tabs();
    tabs.open().await.unwrap();

    let mut last = TabFields::default();
    for topic in ["R", "Ro", "Rom", "Rome"] {
        last.topic = topic.into();
        tabs.save_fields(TabId::FIRST, &last).await.unwrap();
    }
    let set = tabs.open().await.unwrap();
    assert_eq!(set.get(TabId::FIRST).unwrap().title, "Rome");
    assert_eq!(tabs.load_fields(TabId::FIRST).await.unwrap(), last);
}

#[tokio::test]
async fn gateway_is_shared_through_app_services() {
    let services = AppServices::in_memory(fixed_clock(), offline_gateway());
    assert!(services.gateway().login("pw").await.unwrap());
    assert!(!services.gateway().login("PW").await.unwrap());
}
