//! 필드 슬롯 재사용/숨김 동작 테스트.
use filter_spec_panel::panel::{FieldSet, SpecLabel};

fn names(set: &FieldSet) -> Vec<&str> {
    set.visible().iter().map(|f| f.name()).collect()
}

#[test]
fn grows_and_binds_names_in_order() {
    let mut set = FieldSet::new();
    set.reconcile(&["A_SB", "A_PB", "A_SB2"]);
    assert_eq!(names(&set), ["A_SB", "A_PB", "A_SB2"]);
    assert_eq!(set.visible_count(), 3);
    assert_eq!(set.allocated_count(), 3);
    assert!(set.visible().iter().all(|f| f.is_visible()));
}

#[test]
fn shrinking_keeps_slots_for_reuse() {
    let mut set = FieldSet::new();
    set.reconcile(&["A_PB", "A_PB2", "A_SB", "A_SB2"]);
    set.reconcile(&["A_PB"]);
    assert_eq!(set.visible_count(), 1);
    assert_eq!(set.allocated_count(), 4);
    assert!(set.get(1).is_none());

    set.reconcile(&["A_SB", "A_PB"]);
    assert_eq!(names(&set), ["A_SB", "A_PB"]);
    assert_eq!(set.allocated_count(), 4);
}

#[test]
fn reconcile_is_idempotent() {
    let mut set = FieldSet::new();
    set.reconcile(&["A_PB", "A_SB"]);
    let first: Vec<String> = names(&set).iter().map(|s| s.to_string()).collect();
    set.reconcile(&["A_PB", "A_SB"]);
    assert_eq!(names(&set), first);
    assert_eq!(set.allocated_count(), 2);
    assert_eq!(set.requested_names(), ["A_PB", "A_SB"]);
}

#[test]
fn empty_request_hides_everything() {
    let mut set = FieldSet::new();
    set.reconcile(&["A_PB", "A_SB"]);
    set.reconcile::<&str>(&[]);
    assert!(set.visible().is_empty());
    assert_eq!(set.allocated_count(), 2);
    assert_eq!(set.focused_index(), None);
}

#[test]
fn duplicate_names_get_separate_slots() {
    let mut set = FieldSet::new();
    set.reconcile(&["A_SB", "A_SB"]);
    assert_eq!(names(&set), ["A_SB", "A_SB"]);
    assert_eq!(set.allocated_count(), 2);
}

#[test]
fn labels_follow_names() {
    let mut set = FieldSet::new();
    set.reconcile(&["A_PB"]);
    set.reconcile(&["A_SB2"]);
    let label = set.get(0).unwrap().label();
    assert_eq!(label, &SpecLabel::from_name("A_SB2"));
    assert_eq!(label.symbol(), "A");
    assert_eq!(label.subscript(), Some("SB2"));
}

#[test]
fn label_rich_text_and_plain_names() {
    let label = SpecLabel::from_name("A_PB");
    assert_eq!(label.rich_text(), "<b><i>A</i><sub>PB</sub></b>");
    assert_eq!(label.to_string(), "A_PB");

    let bare = SpecLabel::from_name(" Gain ");
    assert_eq!(bare.symbol(), "Gain");
    assert_eq!(bare.subscript(), None);
    assert_eq!(bare.rich_text(), "<b><i>Gain</i></b>");

    let multi = SpecLabel::from_name("A_SB_X");
    assert_eq!(multi.subscript(), Some("SB_X"));
}
