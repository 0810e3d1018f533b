use immutabledata::{Action, Reducer, State, Store, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, PartialEq, Default, Debug)]
struct Session {
    user: Option<String>,
    admin: bool,
    error: Option<String>,
}

impl State for Session {}

enum SessionAction {
    /// A login request completed on some other task and succeeded.
    LoginSucceeded { user: String },
    /// The same request failed; the failure arrives as data, not as an
    /// exception, and reduces into state like any other event.
    LoginFailed { message: String },
    PromoteToAdmin,
}

impl Action for SessionAction {}

#[derive(Debug, Error, PartialEq)]
#[error("cannot promote: no user is logged in")]
struct NotLoggedIn;

struct SessionReducer;

impl Reducer for SessionReducer {
    type State = Session;
    type Action = SessionAction;
    type Error = NotLoggedIn;

    fn reduce(state: Session, action: SessionAction) -> Result<Session, NotLoggedIn> {
        match action {
            SessionAction::LoginSucceeded { user } => Ok(Session {
                user: Some(user),
                admin: false,
                error: None,
            }),
            SessionAction::LoginFailed { message } => Ok(Session {
                error: Some(message),
                ..state
            }),
            SessionAction::PromoteToAdmin => {
                if state.user.is_none() {
                    return Err(NotLoggedIn);
                }
                Ok(Session {
                    admin: true,
                    ..state
                })
            }
        }
    }
}

#[test]
fn rejected_action_surfaces_error_and_keeps_state() {
    let store = Store::<SessionReducer>::default();

    let err = store.dispatch(SessionAction::PromoteToAdmin).unwrap_err();
    assert!(matches!(err, StoreError::Rejected(_)));
    assert_eq!(err.into_reducer_error(), NotLoggedIn);

    // Atomic transition: the failed dispatch left nothing behind.
    assert_eq!(store.state(), Session::default());
}

#[test]
fn rejected_action_notifies_no_subscribers() {
    let store = Store::<SessionReducer>::default();

    let fired = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&fired);
    let _sub = store.subscribe(
        |s: &Session| s.clone(),
        move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        },
    );

    store.dispatch(SessionAction::PromoteToAdmin).unwrap_err();
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn failure_flows_through_dispatch_as_data() {
    let store = Store::<SessionReducer>::default();

    store
        .dispatch(SessionAction::LoginFailed {
            message: "connection reset".to_string(),
        })
        .unwrap();

    let state = store.state();
    assert_eq!(state.error.as_deref(), Some("connection reset"));
    assert_eq!(state.user, None);
}

#[test]
fn success_after_failure_clears_the_error() {
    let store = Store::<SessionReducer>::default();

    store
        .dispatch(SessionAction::LoginFailed {
            message: "timeout".to_string(),
        })
        .unwrap();
    store
        .dispatch(SessionAction::LoginSucceeded {
            user: "ada".to_string(),
        })
        .unwrap();

    let state = store.state();
    assert_eq!(state.user.as_deref(), Some("ada"));
    assert_eq!(state.error, None);
}

#[test]
fn promotion_succeeds_once_logged_in() {
    let store = Store::<SessionReducer>::default();

    store
        .dispatch(SessionAction::LoginSucceeded {
            user: "ada".to_string(),
        })
        .unwrap();
    store.dispatch(SessionAction::PromoteToAdmin).unwrap();

    assert!(store.state().admin);
}
