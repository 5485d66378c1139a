use super::*;

#[test]
fn splits_valid_path_into_segments() {
    assert_eq!(
        split_and_validate_path("page.test.path.one.two.three").expect("valid path"),
        vec!["page", "test", "path", "one", "two", "three"]
    );
}

#[test]
fn root_only_path_is_valid() {
    assert_eq!(
        split_and_validate_path("page").expect("valid path"),
        vec!["page"]
    );
}

#[test]
fn rejects_path_with_foreign_root() {
    let err = split_and_validate_path("component.child-component").expect_err("should fail");
    assert!(matches!(err, ViewStateError::InvalidPath { .. }));
}

#[test]
fn rejects_path_with_blank_segment() {
    for raw in ["page.component..child", "page.", ".page", "page..", ""] {
        let err = split_and_validate_path(raw).expect_err(raw);
        assert!(
            matches!(err, ViewStateError::InvalidPath { ref path, .. } if path == raw),
            "unexpected error for {raw:?}: {err}"
        );
    }
}

#[test]
fn root_marker_must_match_exactly() {
    for raw in ["Page.one", "pages.one", " page.one"] {
        assert!(split_and_validate_path(raw).is_err(), "{raw:?} accepted");
    }
}

#[test]
fn view_path_splits_parent_slots_from_last_slot() {
    let path: ViewPath = "page.one.two.three".parse().expect("path");
    let (parents, last) = path.split_last().expect("has slot");
    assert_eq!(parents, ["one", "two"]);
    assert_eq!(last, "three");
    assert!(!path.is_root());
    assert_eq!(path.to_string(), "page.one.two.three");
}

#[test]
fn root_view_path_has_no_enclosing_slot() {
    let path = ViewPath::parse("page").expect("path");
    assert!(path.is_root());
    assert!(path.slots().is_empty());
    assert!(path.split_last().is_none());
}
