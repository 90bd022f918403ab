use pretty_assertions::assert_eq;

use super::*;

#[test]
fn get_searches_outward() {
    let outer = Environment::new();
    outer.set("x", Object::Integer(1));
    let inner = outer.enclosed().enclosed();
    assert_eq!(inner.get("x"), Some(Object::Integer(1)));
    assert_eq!(inner.get("y"), None);
}

#[test]
fn set_shadows_locally() {
    let outer = Environment::new();
    outer.set("x", Object::Integer(1));
    let inner = outer.enclosed();
    inner.set("x", Object::Integer(2));
    assert_eq!(inner.get("x"), Some(Object::Integer(2)));
    assert_eq!(outer.get("x"), Some(Object::Integer(1)));
}

#[test]
fn update_writes_to_defining_scope() {
    let outer = Environment::new();
    outer.set("x", Object::Integer(1));
    let inner = outer.enclosed();
    inner.update("x", Object::Integer(2));
    assert!(inner.local_names().is_empty());
    assert_eq!(outer.get("x"), Some(Object::Integer(2)));
}

#[test]
fn update_without_definition_binds_locally() {
    let outer = Environment::new();
    let inner = outer.enclosed();
    inner.update("y", Object::Integer(3));
    assert_eq!(inner.local_names(), vec!["y".to_string()]);
    assert_eq!(outer.get("y"), None);
}

#[test]
fn siblings_share_parent() {
    let parent = Environment::new();
    let a = parent.enclosed();
    let b = parent.enclosed();
    a.update("n", Object::Integer(1));
    parent.set("shared", Object::Null);
    a.update("shared", Object::Integer(5));
    assert_eq!(b.get("shared"), Some(Object::Integer(5)));
    assert_eq!(b.get("n"), None);
}

#[test]
fn local_names_sorted() {
    let env = Environment::new();
    env.set("b", Object::Null);
    env.set("a", Object::Null);
    assert_eq!(env.local_names(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn clear_drops_bindings_only() {
    let outer = Environment::new();
    outer.set("x", Object::Integer(1));
    let inner = outer.enclosed();
    inner.set("y", Object::Integer(2));
    inner.clear();
    assert_eq!(inner.get("y"), None);
    assert_eq!(inner.get("x"), Some(Object::Integer(1)));
}

#[test]
fn release_breaks_self_capturing_scopes() {
    let tracker = ScopeTracker::default();
    let root = Environment::new();
    tracker.adopt(&root);
    let child = tracker.child_of(&root);
    // A scope bound into itself and into its parent.
    root.set("child", Object::dict(crate::Dict::new(Default::default(), child.clone())));
    child.set("root", Object::dict(crate::Dict::new(Default::default(), root.clone())));
    let (weak_root, weak_child) = (Rc::downgrade(&root.0), Rc::downgrade(&child.0));
    drop((root, child));
    assert!(weak_root.upgrade().is_some());
    assert_eq!(tracker.live(), 2);

    tracker.release();
    assert!(weak_root.upgrade().is_none());
    assert!(weak_child.upgrade().is_none());
    assert_eq!(tracker.live(), 0);
}

#[test]
fn tracker_prunes_dead_scopes() {
    let tracker = ScopeTracker::default();
    let root = Environment::new();
    tracker.adopt(&root);
    for _ in 0..1000 {
        drop(tracker.child_of(&root));
    }
    assert_eq!(tracker.live(), 1);
    assert!(tracker.scopes.borrow().len() <= ScopeTracker::MIN_PRUNE);
}
