//! Property tests for page list and row group invariants.

use kyc_forms::{
    ChangeKind, FormKind, PageId, PageList, RowGroup, RowId, SequentialIdSource, API_RIGHTS,
    LYNX_RIGHTS,
};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum PageOp {
    Duplicate(usize),
    Remove(usize),
    Restore(usize),
}

fn page_op() -> impl Strategy<Value = PageOp> {
    prop_oneof![
        (0usize..8).prop_map(PageOp::Duplicate),
        (0usize..8).prop_map(PageOp::Remove),
        (0usize..8).prop_map(PageOp::Restore),
    ]
}

#[derive(Debug, Clone)]
enum RowOp {
    Add(ChangeKind),
    Remove(ChangeKind, usize),
    SetRight(ChangeKind, usize, usize, bool),
}

fn change_kind() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::Add),
        Just(ChangeKind::Update),
        Just(ChangeKind::Remove),
    ]
}

fn row_op() -> impl Strategy<Value = RowOp> {
    prop_oneof![
        change_kind().prop_map(RowOp::Add),
        (change_kind(), 0usize..6).prop_map(|(k, i)| RowOp::Remove(k, i)),
        (change_kind(), 0usize..6, 0usize..6, any::<bool>())
            .prop_map(|(k, i, f, c)| RowOp::SetRight(k, i, f, c)),
    ]
}

fn pick<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        items.get(index % items.len())
    }
}

proptest! {
    #[test]
    fn prop_page_list_never_empty(ops in prop::collection::vec(page_op(), 0..60)) {
        let mut pages = PageList::with_default_pages(SequentialIdSource::shared());

        for op in ops {
            match op {
                PageOp::Duplicate(i) => {
                    let id = pick(pages.pages(), i).map(|p| p.id.clone());
                    if let Some(id) = id {
                        let before = pages.len();
                        prop_assert!(pages.duplicate(&id).is_some());
                        prop_assert_eq!(pages.len(), before + 1);
                    }
                }
                PageOp::Remove(i) => {
                    let id = pick(pages.pages(), i).map(|p| p.id.clone());
                    if let Some(id) = id {
                        let before = pages.len();
                        let removed = pages.remove(&id).is_ok();
                        prop_assert_eq!(removed, before > 1);
                    }
                }
                PageOp::Restore(i) => {
                    let id = pick(pages.removed(), i).map(|p| p.id.clone());
                    if let Some(id) = id {
                        prop_assert_eq!(pages.restore(&id).map(|p| p.id.clone()), Some(id.clone()));
                        prop_assert_eq!(pages.pages().last().map(|p| &p.id), Some(&id));
                    }
                }
            }

            prop_assert!(!pages.is_empty());
            let ids: HashSet<&PageId> = pages
                .pages()
                .iter()
                .chain(pages.removed())
                .map(|p| &p.id)
                .collect();
            prop_assert_eq!(ids.len(), pages.len() + pages.removed().len());
        }
    }

    #[test]
    fn prop_duplicated_person_labels_follow_count(copies in 1usize..10) {
        let mut pages = PageList::with_default_pages(SequentialIdSource::shared());
        let source = PageId::from("auth-1");

        for _ in 0..copies {
            let expected = format!(
                "Authorized Person {}",
                pages.count_of(FormKind::AuthorizedPerson) + 1
            );
            let copy = pages.duplicate(&source).unwrap();
            prop_assert_eq!(&copy.label, &expected);
        }
        // Copies stack right behind the source, newest first
        prop_assert_eq!(pages.pages()[1].label.clone(), format!("Authorized Person {}", copies + 1));
    }

    #[test]
    fn prop_rows_unique_and_rights_exclusive(
        ops in prop::collection::vec(row_op(), 0..80),
        api in any::<bool>(),
    ) {
        let ids = SequentialIdSource::default();
        let schema = if api { API_RIGHTS } else { LYNX_RIGHTS };
        let mut group = RowGroup::with_rights(schema.name, schema);
        let mut expected = 0usize;

        for op in ops {
            match op {
                RowOp::Add(kind) => {
                    group.add_row(kind, &ids);
                    expected += 1;
                }
                RowOp::Remove(kind, i) => {
                    let id: Option<RowId> = pick(group.rows(kind), i).map(|r| r.id.clone());
                    if let Some(id) = id {
                        prop_assert!(group.remove_row(kind, &id).is_some());
                        expected -= 1;
                    }
                }
                RowOp::SetRight(kind, i, f, checked) => {
                    let id: Option<RowId> = pick(group.rows(kind), i).map(|r| r.id.clone());
                    let flag = schema.flags[f % schema.flags.len()].key;
                    if let Some(id) = id {
                        group.set_right(kind, &id, flag, checked).unwrap();
                    }
                }
            }

            prop_assert_eq!(group.total_rows(), expected);
            let mut seen = HashSet::new();
            for kind in ChangeKind::ALL {
                for row in group.rows(kind) {
                    prop_assert!(seen.insert(row.id.clone()));
                    let rights = row.rights.as_ref().unwrap();
                    prop_assert!(rights.is_consistent(&schema));
                }
            }
        }
    }
}
