use super::*;

// =============================================================
// ViewId
// =============================================================

#[test]
fn view_id_default_is_home() {
    assert_eq!(ViewId::default(), ViewId::Home);
}

#[test]
fn view_id_parses_every_name() {
    for view in ViewId::ALL {
        assert_eq!(view.as_str().parse::<ViewId>().unwrap(), view);
    }
}

#[test]
fn view_id_parse_ignores_case_and_whitespace() {
    assert_eq!(" Cart ".parse::<ViewId>().unwrap(), ViewId::Cart);
}

#[test]
fn view_id_parse_rejects_unknown() {
    let err = "checkout".parse::<ViewId>().unwrap_err();
    assert_eq!(err.to_string(), "unknown view: checkout");
}

// =============================================================
// UiState / Notification
// =============================================================

#[test]
fn ui_state_default_is_blank_home() {
    let state = UiState::default();
    assert_eq!(state.active_view, ViewId::Home);
    assert!(state.current_design.is_none());
    assert!(state.cart_badge.is_none());
}

#[test]
fn notification_constructors_set_level() {
    assert_eq!(Notification::success("ok").level, NotificationLevel::Success);
    assert_eq!(Notification::error("bad").level, NotificationLevel::Error);
    assert_eq!(Notification::info("fyi").message, "fyi");
}
