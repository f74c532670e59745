use mgmt::InitError;
use mgmt::domain::config::{LogRotation, ManagementConfig};
use mgmt::events::NotificationReceiverExt;
use mgmt::prelude::*;
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct Service {
    broadcaster: Broadcaster,
    paused: AtomicBool,
}

impl Manageable for Service {
    fn description(&self) -> Cow<'static, str> {
        "Service configuration".into()
    }

    fn attributes(&self) -> Vec<AttributeDescriptor> {
        vec![AttributeDescriptor::read_only("Paused", ValueType::Boolean, "").boolean_accessor()]
    }

    fn operations(&self) -> Vec<OperationDescriptor> {
        vec![OperationDescriptor::action("pause", "Pause the service")]
    }

    fn bind(registry: &mut Registry<Self>) {
        registry.getter("Paused", |s: &Self| Ok(s.paused.load(Ordering::SeqCst))).operation(
            "pause",
            &[],
            |s: &Self, _| {
                s.paused.store(true, Ordering::SeqCst);
                s.notify(types::SERVICE_PAUSE, None, NotificationPayload::None);
                Ok(None)
            },
        );
    }

    fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }
}

// One test per binary: the logger is process-global.
#[tokio::test(flavor = "current_thread")]
async fn init_wires_logger_server_and_channels() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ManagementConfig::default();
    config.logging.console = false;
    config.logging.path = Some(dir.path().to_path_buf());
    config.logging.rotation = LogRotation::Never;
    config.naming.domain = "test.broker".to_owned();
    config.notifications.channel_capacity = 4;

    let runtime = mgmt::init(&config).unwrap();
    assert!(runtime.logger().is_file_backed());
    assert_eq!(runtime.server().domain(), "test.broker");
    assert_eq!(runtime.config().notifications.channel_capacity, 4);

    let service = Arc::new(Service {
        broadcaster: Broadcaster::new("Service:jms"),
        paused: AtomicBool::new(false),
    });
    let dispatcher = ReadOnlyDispatcher::from_arc(Arc::clone(&service)).unwrap();
    let name = runtime.server().qualify(&ObjectName::service_config("jms"));
    runtime.server().register(name.clone(), Arc::new(dispatcher)).unwrap();

    let (_, mut rx) = runtime.channel(&service.broadcaster).unwrap();
    runtime.server().invoke(&name, "pause", vec![], &[]).unwrap();
    assert_eq!(
        runtime.server().invoke(&name, "isPaused", vec![], &[]).unwrap(),
        Some(Value::Boolean(true))
    );

    let notification = rx.next().await.unwrap();
    assert_eq!(notification.kind, types::SERVICE_PAUSE);
    assert_eq!(notification.sequence, 0);

    let again = mgmt::init(&config).unwrap_err();
    assert!(matches!(again, InitError::Logger { .. }), "{again}");
}
