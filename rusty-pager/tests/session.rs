use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusty_pager::{
    Activation, CloseReason, ContentPayload, ControlKind, ControlSet, Dispatch, EndPolicy,
    EventKind, InteractionFeed, OriginKind, Pagination, PaginationError, PaginationEvent, Phase,
    SendMode, Transport, TransportError, UserId,
};
use tokio::sync::mpsc;

const OWNER: UserId = UserId(100);
const STRANGER: UserId = UserId(200);

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Send(&'static str),
    Edit {
        text: String,
        content: String,
        controls: Vec<(ControlKind, bool)>,
    },
    Delete(u64),
    Ack(u64),
}

struct TestParent {
    kind: OriginKind,
    author: UserId,
    responded: bool,
}

impl TestParent {
    fn message() -> Self {
        Self {
            kind: OriginKind::Message,
            author: OWNER,
            responded: false,
        }
    }
}

struct Press {
    id: u64,
    user: UserId,
    control_id: String,
}

impl Activation for Press {
    fn user_id(&self) -> UserId {
        self.user
    }

    fn control_id(&self) -> &str {
        &self.control_id
    }
}

#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    feed: Mutex<Option<mpsc::UnboundedSender<Press>>>,
    fail_edits: AtomicBool,
    fail_deletes: AtomicBool,
    fail_listener: AtomicBool,
    next_press: AtomicU64,
}

impl RecordingTransport {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn edits(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Edit { .. }))
            .collect()
    }

    fn acks(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Ack(_)))
            .count()
    }

    fn press(&self, user: UserId, control: ControlKind) -> u64 {
        let press = self.make_press(user, &format!("pg:{}", control.action()));
        let id = press.id;
        self.feed
            .lock()
            .unwrap()
            .as_ref()
            .expect("listener open")
            .send(press)
            .unwrap();
        id
    }

    fn make_press(&self, user: UserId, control_id: &str) -> Press {
        Press {
            id: self.next_press.fetch_add(1, Ordering::SeqCst),
            user,
            control_id: control_id.to_owned(),
        }
    }

    fn edit_result(&self, payload: &ContentPayload<String>) -> Result<u64, TransportError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(TransportError::new("edit_message", "unknown message"));
        }
        self.record(Call::Edit {
            text: payload.text.clone(),
            content: payload.content.clone(),
            controls: payload
                .controls
                .iter()
                .map(|control| (control.kind, control.disabled))
                .collect(),
        });
        Ok(1)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    type Content = String;
    type Parent = TestParent;
    type Message = u64;
    type Interaction = Press;

    fn origin_kind(&self, parent: &TestParent) -> OriginKind {
        parent.kind
    }

    fn has_responded(&self, parent: &TestParent) -> bool {
        parent.responded
    }

    fn resolve_user_id(&self, parent: &TestParent) -> Option<UserId> {
        Some(parent.author)
    }

    async fn send_message(
        &self,
        _parent: &TestParent,
        _payload: &ContentPayload<String>,
    ) -> Result<u64, TransportError> {
        self.record(Call::Send("new"));
        Ok(1)
    }

    async fn reply_to(
        &self,
        _parent: &TestParent,
        _payload: &ContentPayload<String>,
    ) -> Result<u64, TransportError> {
        self.record(Call::Send("reply"));
        Ok(1)
    }

    async fn follow_up(
        &self,
        _parent: &TestParent,
        _payload: &ContentPayload<String>,
    ) -> Result<u64, TransportError> {
        self.record(Call::Send("follow_up"));
        Ok(1)
    }

    async fn edit_parent(
        &self,
        _parent: &TestParent,
        _payload: &ContentPayload<String>,
    ) -> Result<u64, TransportError> {
        self.record(Call::Send("edit_parent"));
        Ok(1)
    }

    async fn edit_message(
        &self,
        _message: &u64,
        payload: &ContentPayload<String>,
    ) -> Result<u64, TransportError> {
        self.edit_result(payload)
    }

    async fn delete_message(&self, message: &u64) -> Result<(), TransportError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(TransportError::new("delete_message", "unknown message"));
        }
        self.record(Call::Delete(*message));
        Ok(())
    }

    async fn open_listener(
        &self,
        _message: &u64,
    ) -> Result<InteractionFeed<Press>, TransportError> {
        if self.fail_listener.load(Ordering::SeqCst) {
            return Err(TransportError::new("open_listener", "gateway unavailable"));
        }
        let (tx, feed) = InteractionFeed::channel();
        *self.feed.lock().unwrap() = Some(tx);
        Ok(feed)
    }

    async fn acknowledge(&self, interaction: &Press) -> Result<(), TransportError> {
        self.record(Call::Ack(interaction.id));
        Ok(())
    }
}

fn paginated(page_count: usize) -> (Arc<RecordingTransport>, Pagination<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let mut pagination = Pagination::new(Arc::clone(&transport));
    for page in 0..page_count {
        pagination
            .add_page(format!("page {page}"), Some(&format!("caption {page}")))
            .unwrap();
    }
    (transport, pagination)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<PaginationEvent>) -> Vec<PaginationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn page_changes(events: &[PaginationEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            PaginationEvent::PageChange { index } => Some(*index),
            _ => None,
        })
        .collect()
}

fn end_events(events: &[PaginationEvent]) -> Vec<(CloseReason, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            PaginationEvent::End { reason, error } => Some((*reason, error.is_some())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn default_scenario_next_previous_stop() {
    let (transport, mut pagination) = paginated(3);
    let mut events = pagination.events().subscribe();

    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();
    assert_eq!(pagination.owner(), Some(OWNER));
    assert_eq!(transport.calls(), vec![Call::Send("reply")]);

    transport.press(OWNER, ControlKind::Next);
    transport.press(OWNER, ControlKind::Previous);
    transport.press(OWNER, ControlKind::Stop);

    let reason = pagination.run().await.unwrap();
    assert_eq!(reason, CloseReason::Stop);
    assert_eq!(reason.as_str(), "stop");
    assert_eq!(pagination.phase(), Phase::Closed(CloseReason::Stop));
    assert_eq!(pagination.current_index(), 0);

    let events = drain(&mut events);
    assert_eq!(page_changes(&events), vec![1, 0]);
    assert_eq!(end_events(&events), vec![(CloseReason::Stop, false)]);

    let Some(Call::Edit { text, content, controls }) = transport.edits().last().cloned() else {
        panic!("expected a final edit");
    };
    assert_eq!(text, "caption 0");
    assert_eq!(content, "page 0");
    assert_eq!(controls.len(), 5);
    assert!(controls.iter().all(|(_, disabled)| *disabled));
    assert_eq!(transport.acks(), 3);
}

#[tokio::test]
async fn event_order_for_one_activation() {
    let (transport, mut pagination) = paginated(2);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::NewMessage)
        .await
        .unwrap();

    transport.press(OWNER, ControlKind::Next);
    transport.press(OWNER, ControlKind::Stop);
    pagination.run().await.unwrap();

    let kinds: Vec<EventKind> = drain(&mut events).iter().map(PaginationEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::PageChange,
            EventKind::Control(ControlKind::Next),
            EventKind::Collect,
            EventKind::Control(ControlKind::Stop),
            EventKind::Collect,
            EventKind::End,
        ]
    );
}

#[tokio::test]
async fn next_wraps_around_for_every_page_count() {
    for page_count in 1..=5 {
        let (transport, mut pagination) = paginated(page_count);
        let mut events = pagination.events().subscribe();
        pagination
            .start(TestParent::message(), SendMode::ReplyToParent)
            .await
            .unwrap();

        for _ in 0..page_count * 2 {
            transport.press(OWNER, ControlKind::Next);
        }
        transport.press(OWNER, ControlKind::Stop);
        pagination.run().await.unwrap();

        let expected: Vec<usize> = (1..=page_count * 2).map(|step| step % page_count).collect();
        assert_eq!(page_changes(&drain(&mut events)), expected, "{page_count} pages");
    }
}

#[tokio::test]
async fn previous_first_and_last_jump_to_bounds() {
    let (transport, mut pagination) = paginated(4);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.press(OWNER, ControlKind::Previous);
    transport.press(OWNER, ControlKind::First);
    transport.press(OWNER, ControlKind::Last);
    transport.press(OWNER, ControlKind::Last);
    transport.press(OWNER, ControlKind::Stop);
    pagination.run().await.unwrap();

    assert_eq!(page_changes(&drain(&mut events)), vec![3, 0, 3, 3]);
}

#[tokio::test]
async fn stranger_is_ignored_unless_owner_independent() {
    let (transport, mut pagination) = paginated(3);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let stranger_press = transport.press(STRANGER, ControlKind::Next);
    transport.press(OWNER, ControlKind::Stop);
    pagination.run().await.unwrap();

    let events = drain(&mut events);
    assert!(page_changes(&events).is_empty());
    assert_eq!(pagination.current_index(), 0);
    // Filtered presses are still acknowledged at the platform level.
    assert!(transport.calls().contains(&Call::Ack(stranger_press)));

    let (transport, mut pagination) = paginated(3);
    pagination.set_owner_independent(true);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.press(STRANGER, ControlKind::Next);
    transport.press(STRANGER, ControlKind::Stop);
    pagination.run().await.unwrap();

    assert_eq!(page_changes(&drain(&mut events)), vec![1]);
}

#[tokio::test]
async fn dispatch_reports_unauthorized_and_unrecognized() {
    let (transport, mut pagination) = paginated(2);
    pagination.set_owner(UserId(5));
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();
    assert_eq!(pagination.owner(), Some(UserId(5)));

    let outcome = pagination
        .dispatch(transport.make_press(OWNER, "pg:next"))
        .await
        .unwrap();
    assert_eq!(outcome, Dispatch::Unauthorized);

    let outcome = pagination
        .dispatch(transport.make_press(UserId(5), "pg:shuffle"))
        .await
        .unwrap();
    assert_eq!(outcome, Dispatch::Unrecognized);
    assert_eq!(transport.acks(), 0);
    assert_eq!(pagination.current_index(), 0);

    let outcome = pagination
        .dispatch(transport.make_press(UserId(5), "pg:next"))
        .await
        .unwrap();
    assert_eq!(outcome, Dispatch::Handled(ControlKind::Next));
    assert_eq!(pagination.current_index(), 1);
    assert_eq!(transport.acks(), 1);
}

#[tokio::test]
async fn dispatch_after_stop_is_invalid_state() {
    let (transport, mut pagination) = paginated(2);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let outcome = pagination
        .dispatch(transport.make_press(OWNER, "pg:stop"))
        .await
        .unwrap();
    assert_eq!(outcome, Dispatch::Handled(ControlKind::Stop));
    let edits_after_stop = transport.edits().len();

    let err = pagination
        .dispatch(transport.make_press(OWNER, "pg:stop"))
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidState(_)));
    assert_eq!(transport.edits().len(), edits_after_stop);
    assert_eq!(end_events(&drain(&mut events)).len(), 1);
    assert_eq!(pagination.run().await.unwrap(), CloseReason::Stop);
}

#[tokio::test(start_paused = true)]
async fn idle_timeout_closes_once_with_time() {
    let (transport, mut pagination) = paginated(2);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let started = tokio::time::Instant::now();
    let reason = pagination.run().await.unwrap();
    assert_eq!(reason, CloseReason::Time);
    assert!(started.elapsed() >= Duration::from_secs(60));

    assert_eq!(end_events(&drain(&mut events)), vec![(CloseReason::Time, false)]);
    assert_eq!(transport.edits().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn activation_limit_closes_after_first() {
    let (transport, mut pagination) = paginated(3);
    pagination.set_max_activations(1);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.press(OWNER, ControlKind::Next);
    transport.press(OWNER, ControlKind::Next);

    assert_eq!(pagination.run().await.unwrap(), CloseReason::Limit);
    assert_eq!(pagination.current_index(), 1);
    assert_eq!(transport.acks(), 1);

    let events = drain(&mut events);
    assert_eq!(page_changes(&events), vec![1]);
    assert_eq!(end_events(&events), vec![(CloseReason::Limit, false)]);

    let err = pagination
        .dispatch(transport.make_press(OWNER, "pg:next"))
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidState(_)));
}

#[tokio::test]
async fn delete_buttons_failure_is_reported_on_end_event() {
    let (transport, mut pagination) = paginated(2);
    pagination.set_end_policy(EndPolicy::DeleteButtons);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.fail_edits.store(true, Ordering::SeqCst);
    transport.press(OWNER, ControlKind::Stop);

    assert_eq!(pagination.run().await.unwrap(), CloseReason::Stop);
    assert_eq!(end_events(&drain(&mut events)), vec![(CloseReason::Stop, true)]);
}

#[tokio::test]
async fn delete_buttons_removes_controls() {
    let (transport, mut pagination) = paginated(2);
    pagination.set_end_policy(EndPolicy::DeleteButtons);
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.press(OWNER, ControlKind::Stop);
    pagination.run().await.unwrap();

    let Some(Call::Edit { controls, .. }) = transport.edits().last().cloned() else {
        panic!("expected a final edit");
    };
    assert!(controls.is_empty());
}

#[tokio::test]
async fn delete_message_failures_are_swallowed() {
    let (transport, mut pagination) = paginated(2);
    pagination.set_end_policy(EndPolicy::DeleteMessage);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.fail_deletes.store(true, Ordering::SeqCst);
    transport.press(OWNER, ControlKind::Stop);

    assert_eq!(pagination.run().await.unwrap(), CloseReason::Stop);
    assert_eq!(end_events(&drain(&mut events)), vec![(CloseReason::Stop, false)]);
    assert!(pagination.message().is_none());
}

#[tokio::test]
async fn delete_message_deletes_once() {
    let (transport, mut pagination) = paginated(2);
    pagination.set_end_policy(EndPolicy::DeleteMessage);
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    pagination.stop().await.unwrap();
    assert!(pagination.stop().await.is_err());
    assert_eq!(
        transport
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Delete(_)))
            .count(),
        1
    );
}

#[tokio::test]
async fn dispatch_update_errors_propagate() {
    let (transport, mut pagination) = paginated(2);
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.fail_edits.store(true, Ordering::SeqCst);
    transport.press(OWNER, ControlKind::Next);

    let err = pagination.run().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(pagination.phase(), Phase::Started);
    assert_eq!(pagination.current_index(), 0);
    assert_eq!(transport.acks(), 1);
}

#[tokio::test]
async fn failed_update_keeps_displayed_page() {
    let (transport, mut pagination) = paginated(3);
    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    transport.fail_edits.store(true, Ordering::SeqCst);
    let err = pagination
        .dispatch(transport.make_press(OWNER, "pg:next"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(pagination.current_index(), 0);
    assert_eq!(transport.acks(), 1);

    transport.fail_edits.store(false, Ordering::SeqCst);
    let outcome = pagination
        .dispatch(transport.make_press(OWNER, "pg:next"))
        .await
        .unwrap();
    assert_eq!(outcome, Dispatch::Handled(ControlKind::Next));
    assert_eq!(pagination.current_index(), 1);

    let Some(Call::Edit { content, .. }) = transport.edits().last().cloned() else {
        panic!("expected an edit");
    };
    assert_eq!(content, "page 1");
    assert_eq!(page_changes(&drain(&mut events)), vec![1]);
}

#[tokio::test]
async fn listener_failure_closes_the_session() {
    let (transport, mut pagination) = paginated(2);
    let mut events = pagination.events().subscribe();
    transport.fail_listener.store(true, Ordering::SeqCst);

    let err = pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(pagination.phase(), Phase::Closed(CloseReason::Disconnected));
    assert_eq!(
        end_events(&drain(&mut events)),
        vec![(CloseReason::Disconnected, false)]
    );

    let Some(Call::Edit { controls, .. }) = transport.edits().last().cloned() else {
        panic!("expected the end policy edit");
    };
    assert!(controls.iter().all(|(_, disabled)| *disabled));
    assert_eq!(pagination.run().await.unwrap(), CloseReason::Disconnected);
}

#[tokio::test(start_paused = true)]
async fn accepted_press_resets_idle_timer() {
    let (transport, mut pagination) = paginated(3);
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let started = tokio::time::Instant::now();
    let task = tokio::spawn(async move { pagination.run().await });

    tokio::time::sleep(Duration::from_secs(50)).await;
    transport.press(OWNER, ControlKind::Next);

    assert_eq!(task.await.unwrap().unwrap(), CloseReason::Time);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(110), "closed after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(111), "closed after {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn filtered_press_neither_resets_timer_nor_counts() {
    let (transport, mut pagination) = paginated(3);
    pagination.set_max_activations(1);
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let started = tokio::time::Instant::now();
    let task = tokio::spawn(async move {
        let reason = pagination.run().await;
        (reason, pagination.current_index())
    });

    tokio::time::sleep(Duration::from_secs(50)).await;
    let stranger_press = transport.press(STRANGER, ControlKind::Next);

    let (reason, index) = task.await.unwrap();
    assert_eq!(reason.unwrap(), CloseReason::Time);
    assert_eq!(index, 0);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(60), "closed after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(61), "closed after {elapsed:?}");
    assert!(transport.calls().contains(&Call::Ack(stranger_press)));
}

#[tokio::test]
async fn jump_to_validates_range_and_state() {
    let (_transport, mut pagination) = paginated(3);
    let err = pagination.jump_to(1).await.unwrap_err();
    assert!(matches!(err, PaginationError::InvalidState(_)));

    let mut events = pagination.events().subscribe();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let err = pagination.jump_to(3).await.unwrap_err();
    assert!(matches!(err, PaginationError::OutOfRange { index: 3, .. }));
    assert_eq!(pagination.current_index(), 0);

    pagination.jump_to(2).await.unwrap();
    assert_eq!(pagination.current_index(), 2);
    assert_eq!(page_changes(&drain(&mut events)), vec![2]);
}

#[tokio::test]
async fn handle_drives_a_running_session() {
    let (_transport, mut pagination) = paginated(3);
    let handle = pagination.handle();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let task = tokio::spawn(async move {
        let reason = pagination.run().await;
        (reason, pagination.current_index())
    });

    handle.jump_to(2).await.unwrap();
    assert!(matches!(
        handle.jump_to(9).await,
        Err(PaginationError::OutOfRange { .. })
    ));
    handle.stop().unwrap();

    let (reason, index) = task.await.unwrap();
    assert_eq!(reason.unwrap(), CloseReason::Stop);
    assert_eq!(index, 2);
}

#[tokio::test]
async fn handle_fails_once_the_session_closes() {
    let (_transport, mut pagination) = paginated(3);
    let handle = pagination.handle();
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();

    let queued = tokio::spawn({
        let handle = handle.clone();
        async move { handle.jump_to(1).await }
    });
    tokio::task::yield_now().await;

    pagination.stop().await.unwrap();

    let queued = tokio::time::timeout(Duration::from_secs(1), queued)
        .await
        .expect("queued jump answered")
        .unwrap();
    assert!(matches!(queued, Err(PaginationError::InvalidState(_))));

    let jump = tokio::time::timeout(Duration::from_secs(1), handle.jump_to(1))
        .await
        .expect("jump answered");
    assert!(matches!(jump, Err(PaginationError::InvalidState(_))));
    assert!(matches!(handle.stop(), Err(PaginationError::InvalidState(_))));
    assert_eq!(pagination.current_index(), 0);
}

#[tokio::test]
async fn start_rejects_double_start_and_empty_sessions() {
    let (_transport, mut empty) = paginated(0);
    let err = empty
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidState(_)));

    let (_transport, mut pagination) = paginated(1);
    pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap();
    let err = pagination
        .start(TestParent::message(), SendMode::ReplyToParent)
        .await
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidState(_)));
}

#[tokio::test]
async fn responded_interaction_parent_gets_follow_up() {
    let (transport, mut pagination) = paginated(1);
    pagination
        .start(
            TestParent {
                kind: OriginKind::ComponentInteraction,
                author: OWNER,
                responded: true,
            },
            SendMode::ReplyToParent,
        )
        .await
        .unwrap();

    assert_eq!(transport.calls(), vec![Call::Send("follow_up")]);
}

#[test]
fn configuration_fails_fast() {
    let (_transport, mut pagination) = paginated(1);

    let err = pagination.add_page("x".to_owned(), Some("")).unwrap_err();
    assert!(matches!(err, PaginationError::InvalidArgument(_)));
    assert_eq!(pagination.page_count(), 1);

    let err = pagination
        .set_idle_timeout(Duration::from_millis(2_500))
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidArgument(_)));
    assert_eq!(pagination.config().idle_timeout, Duration::from_secs(60));

    pagination
        .set_idle_timeout(Duration::from_millis(3_000))
        .unwrap()
        .set_max_activations(0)
        .set_controls(ControlSet::builder().previous().next().build());
    assert_eq!(pagination.config().max_activations, None);
    assert_eq!(pagination.controls().len(), 2);
}
