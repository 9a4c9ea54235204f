use crate::descriptor::api::{
    Context, DescriptorError, DescriptorKind, FactoryDescriptor, GenericDescriptor, HideGeneric,
    VisibilityFilter, ORGANIZATION_FOLDER_ID,
};
use crate::descriptor::tests::fixtures::{StaticItem, TestProvider};
use crate::host::api::*;
use crate::notifications::api::{Event, EventFilter, SystemEventType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static RUNS: AtomicUsize = AtomicUsize::new(0);

async fn count_run(_host: Host) -> HostResult<()> {
    RUNS.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

async fn always_fails(_host: Host) -> HostResult<()> {
    Err(DescriptorError::Synchronisation {
        message: "boom".to_string(),
    }
    .into())
}

fn counting() -> InitializerInfo {
    InitializerInfo {
        name: "test::count_run",
        after: InitMilestone::Started,
        before: InitMilestone::Completed,
        run: |host| Box::pin(count_run(host)),
    }
}

#[tokio::test]
async fn test_start_runs_initializers_and_reaches_completed() {
    let host = Host::new();
    assert_eq!(host.milestone().unwrap(), None);
    let info = counting();
    let before = RUNS.load(Ordering::SeqCst);

    host.start_with(&[&info]).await.unwrap();

    assert_eq!(RUNS.load(Ordering::SeqCst), before + 1);
    assert_eq!(host.milestone().unwrap(), Some(InitMilestone::Completed));
}

#[tokio::test]
async fn test_second_start_is_rejected() {
    let host = Host::new();
    host.start_with(&[]).await.unwrap();

    match host.start_with(&[]).await {
        Err(HostError::AlreadyStarted { milestone }) => {
            assert_eq!(milestone, InitMilestone::Completed)
        }
        other => panic!("expected AlreadyStarted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failing_initializer_is_named() {
    let host = Host::new();
    let info = InitializerInfo {
        name: "test::always_fails",
        after: InitMilestone::PluginsStarted,
        before: InitMilestone::ExtensionsAugmented,
        run: |host| Box::pin(always_fails(host)),
    };

    match host.start_with(&[&info]).await {
        Err(HostError::InitializerFailed { name, .. }) => assert_eq!(name, "test::always_fails"),
        other => panic!("expected InitializerFailed, got {:?}", other),
    }
    assert_eq!(host.milestone().unwrap(), Some(InitMilestone::PluginsStarted));
}

#[tokio::test]
async fn test_milestones_are_announced() {
    let host = Host::new();
    let mut receiver = host.notifications().lock().await.subscribe(
        "milestones".to_string(),
        EventFilter::SystemOnly,
        "test".to_string(),
    );

    host.start_with(&[]).await.unwrap();
    host.shutdown().await;

    let mut seen = Vec::new();
    let mut shutdown_message = None;
    while let Ok(Event::System(event)) = receiver.try_recv() {
        if event.event_type == SystemEventType::Shutdown {
            shutdown_message = event.message.clone();
        }
        seen.push(event.event_type);
    }
    assert_eq!(
        shutdown_message.as_deref(),
        Some("0 background task(s) aborted")
    );
    assert_eq!(
        seen.first(),
        Some(&SystemEventType::Milestone(InitMilestone::Started))
    );
    assert!(seen.contains(&SystemEventType::Milestone(InitMilestone::Completed)));
    assert_eq!(seen.last(), Some(&SystemEventType::Shutdown));
}

#[tokio::test]
async fn test_duplicate_provider_is_rejected() {
    let host = Host::new();
    host.install_provider(Arc::new(TestProvider::inferring("github")))
        .await
        .unwrap();

    let result = host
        .install_provider(Arc::new(TestProvider::configured("github")))
        .await;

    assert!(matches!(
        result,
        Err(HostError::Descriptor(DescriptorError::DuplicateExtension { .. }))
    ));
}

#[tokio::test]
async fn test_create_item_through_delegating_descriptor() {
    let host = Host::new();
    host.install_factory(FactoryDescriptor::new("multibranch", "Multibranch"))
        .await
        .unwrap();
    host.install_provider(Arc::new(TestProvider::inferring("github")))
        .await
        .unwrap();
    host.start().await.unwrap();

    let folder = host
        .create_item("organization-folder.github", "acme")
        .unwrap();

    assert_eq!(folder.name, "acme");
    assert_eq!(folder.navigators.len(), 1);
    assert_eq!(folder.navigators[0].provider_id, "github");
    assert_eq!(folder.navigators[0].name.as_deref(), Some("acme"));
    host.shutdown().await;
}

#[tokio::test]
async fn test_create_item_unknown_descriptor() {
    let host = Host::new();

    assert!(matches!(
        host.create_item("organization-folder.nope", "acme"),
        Err(DescriptorError::DescriptorNotFound { .. })
    ));
}

#[tokio::test]
async fn test_new_item_entries_hide_generic_in_views() {
    let host = Host::with_static_descriptors(vec![
        Arc::new(GenericDescriptor),
        Arc::new(StaticItem::new("freestyle")),
    ]);
    let filter: Arc<dyn VisibilityFilter> = Arc::new(
        HideGeneric::new(host.providers().clone(), host.factories().clone())
            .with_show_generic(true),
    );
    let host = host.with_filters(vec![filter]);
    host.install_factory(FactoryDescriptor::new("multibranch", "Multibranch"))
        .await
        .unwrap();
    host.install_provider(Arc::new(TestProvider::inferring("github")))
        .await
        .unwrap();
    host.start().await.unwrap();

    let view = Context::View {
        name: "All".to_string(),
    };
    let in_view: Vec<String> = host
        .new_item_entries(&view)
        .unwrap()
        .iter()
        .map(|d| d.id())
        .collect();
    let in_folder = host
        .new_item_entries(&Context::ItemGroup {
            name: "team".to_string(),
        })
        .unwrap();

    assert_eq!(
        in_view,
        vec![
            "freestyle".to_string(),
            "organization-folder.github".to_string()
        ]
    );
    assert!(in_folder
        .iter()
        .any(|d| d.id() == ORGANIZATION_FOLDER_ID && d.kind() == DescriptorKind::Generic));
    host.shutdown().await;
}

#[tokio::test]
async fn test_host_debug_lists_its_parts() {
    let host = Host::new();
    host.install_provider(Arc::new(TestProvider::inferring("github")))
        .await
        .unwrap();

    let rendered = format!("{:?}", host);

    assert!(rendered.contains("AsyncNotificationManager"));
    assert!(rendered.contains("github"));
    assert!(rendered.contains("HideGeneric"));
}
