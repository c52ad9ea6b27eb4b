//! Property tests for the document store's history.

use markedit::editor::DocumentStore;
use markedit::offset::TextOffset;
use proptest::prelude::*;

proptest! {
    #[test]
    fn n_pushes_then_n_undos_restore_the_start(
        earlier in prop::collection::vec("[a-c]{0,3}", 0..4),
        pushes in prop::collection::vec("[a-c]{0,3}", 1..10),
        position in 0usize..4,
    ) {
        let mut store = DocumentStore::new("");
        for text in &earlier {
            store.push_text(text);
        }
        store.set_position(position);
        let start_text = store.text();
        let start_position = store.position();

        for text in &pushes {
            store.push_text(text);
        }
        for _ in &pushes {
            prop_assert!(store.undo());
        }
        prop_assert_eq!(store.text(), start_text);
        prop_assert_eq!(store.position(), start_position);

        for _ in &pushes {
            prop_assert!(store.redo());
        }
        prop_assert!(!store.redo());
        prop_assert_eq!(&store.text(), pushes.last().expect("at least one push"));
    }

    #[test]
    fn insert_then_delete_restores_text(
        base in "[a-zé ]{0,12}",
        insert in "[A-Z日]{1,5}",
        at in 0usize..16,
    ) {
        let mut store = DocumentStore::new(&base);
        let at = at.min(base.chars().count());
        store.insert_text(&insert, Some(TextOffset::At(at)), None, (0, 0));
        prop_assert_eq!(store.position(), at + insert.chars().count());
        store.delete_text(at, at + insert.chars().count());
        prop_assert_eq!(store.text(), base);
    }

    #[test]
    fn position_never_exceeds_len_plus_one(
        base in "[a-z\n]{0,10}",
        start in 0usize..20,
        end in 0usize..20,
        text in "[a-z]{0,3}",
    ) {
        let mut store = DocumentStore::new(&base);
        store.insert_text(&text, Some(TextOffset::At(start)), Some(TextOffset::At(end)), (0, 0));
        prop_assert!(store.position() <= store.len_chars() + 1);
    }
}
