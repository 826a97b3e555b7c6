use super::*;
use crate::state::storage::MemoryStore;
use crate::state::storage::failing::FailingStore;

fn full_session() -> Session {
    Session {
        access_token: Some("T".to_owned()),
        refresh_token: Some("R".to_owned()),
        user: Some(SessionUser { username: "a".to_owned() }),
    }
}

// =============================================================
// load / save / clear
// =============================================================

#[test]
fn empty_store_loads_empty_session() {
    let store = MemoryStore::new();
    assert_eq!(load_session(&store), Session::default());
}

#[test]
fn save_then_load_uses_documented_keys() {
    let mut store = MemoryStore::new();
    save_session(&mut store, &full_session()).unwrap();
    assert_eq!(store.get("authToken").as_deref(), Some("T"));
    assert_eq!(store.get("refreshToken").as_deref(), Some("R"));
    assert_eq!(store.get("currentUser").as_deref(), Some(r#"{"username":"a"}"#));
    assert_eq!(load_session(&store), full_session());
}

#[test]
fn save_with_missing_refresh_token_removes_key() {
    let mut store = MemoryStore::new();
    save_session(&mut store, &full_session()).unwrap();
    let partial = Session { refresh_token: None, ..full_session() };
    save_session(&mut store, &partial).unwrap();
    assert_eq!(store.get("refreshToken"), None);
}

#[test]
fn corrupt_user_loads_as_none() {
    let mut store = MemoryStore::new();
    store.set("authToken", "T").unwrap();
    store.set("currentUser", "{not json").unwrap();
    let session = load_session(&store);
    assert_eq!(session.access_token.as_deref(), Some("T"));
    assert!(session.user.is_none());
}

#[test]
fn null_user_loads_as_none() {
    let mut store = MemoryStore::new();
    store.set("currentUser", "null").unwrap();
    assert!(load_session(&store).user.is_none());
}

#[test]
fn clear_session_removes_all_keys() {
    let mut store = MemoryStore::new();
    save_session(&mut store, &full_session()).unwrap();
    save_cart_cache(&mut store, &[CartItem { id: 1, ..CartItem::default() }]).unwrap();
    clear_session(&mut store).unwrap();
    for key in ["authToken", "refreshToken", "currentUser", "cartItems"] {
        assert_eq!(store.get(key), None, "{key} should be removed");
    }
}

#[test]
fn cart_cache_round_trips_and_tolerates_garbage() {
    let mut store = MemoryStore::new();
    assert!(load_cart_cache(&store).is_empty());
    save_cart_cache(&mut store, &[CartItem { id: 7, quantity: 2, ..CartItem::default() }]).unwrap();
    let cached = load_cart_cache(&store);
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, 7);

    store.set("cartItems", "oops").unwrap();
    assert!(load_cart_cache(&store).is_empty());
}

// =============================================================
// SessionContext
// =============================================================

#[test]
fn context_loads_existing_session() {
    let mut store = MemoryStore::new();
    save_session(&mut store, &full_session()).unwrap();
    let ctx = SessionContext::new(store);
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.access_token(), Some("T"));
    assert_eq!(ctx.user().map(|u| u.username.as_str()), Some("a"));
}

#[test]
fn token_without_user_is_not_authenticated() {
    let mut store = MemoryStore::new();
    store.set("authToken", "T").unwrap();
    let ctx = SessionContext::new(store);
    assert!(!ctx.is_authenticated());
}

#[test]
fn replace_tokens_updates_memory_and_store_and_keeps_user() {
    let mut ctx = SessionContext::new(MemoryStore::new());
    ctx.establish(full_session()).unwrap();
    ctx.replace_tokens("T2".to_owned(), "R2".to_owned()).unwrap();
    assert_eq!(ctx.access_token(), Some("T2"));
    assert_eq!(ctx.refresh_token(), Some("R2"));
    assert_eq!(ctx.user().map(|u| u.username.as_str()), Some("a"));
    assert_eq!(ctx.store().get("authToken").as_deref(), Some("T2"));
    assert_eq!(ctx.store().get("refreshToken").as_deref(), Some("R2"));
}

#[test]
fn failed_refresh_token_write_keeps_old_pair_everywhere() {
    let mut inner = MemoryStore::new();
    save_session(&mut inner, &full_session()).unwrap();
    let store = FailingStore { inner, fail_set_on: vec![REFRESH_TOKEN_KEY], ..FailingStore::default() };
    let mut ctx = SessionContext::new(store);

    assert!(ctx.replace_tokens("T2".to_owned(), "R2".to_owned()).is_err());

    assert_eq!(ctx.access_token(), Some("T"));
    assert_eq!(ctx.refresh_token(), Some("R"));
    assert_eq!(ctx.store().get("authToken").as_deref(), Some("T"));
    assert_eq!(ctx.store().get("refreshToken").as_deref(), Some("R"));
}

#[test]
fn failed_first_login_write_leaves_store_empty() {
    let store = FailingStore { fail_set_on: vec![CURRENT_USER_KEY], ..FailingStore::default() };
    let mut ctx = SessionContext::new(store);

    assert!(ctx.establish(full_session()).is_err());

    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.store().get("authToken"), None);
    assert_eq!(ctx.store().get("refreshToken"), None);
}

#[test]
fn clear_empties_memory_and_store() {
    let mut ctx = SessionContext::new(MemoryStore::new());
    ctx.establish(full_session()).unwrap();
    ctx.clear().unwrap();
    assert_eq!(ctx.session(), &Session::default());
    assert_eq!(ctx.store().get("authToken"), None);
}
