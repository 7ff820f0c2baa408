use crate::support::{Doc, Push, SetAt};
use pcbkit_undo::UndoStack;
use proptest::prelude::*;

proptest! {
    #[test]
    fn execute_undo_redo_restores_executed_state(
        initial in proptest::collection::vec(-100i32..100, 1..8),
        edits in proptest::collection::vec((0usize..8, -100i32..100), 1..8),
    ) {
        let mut doc = Doc { values: initial.clone(), log: Vec::new() };
        let mut stack = UndoStack::new();

        stack.begin_cmd_group("Edits").unwrap();
        for (index, value) in &edits {
            stack.append_to_cmd_group(SetAt::new(index % initial.len(), *value), &mut doc).unwrap();
        }
        stack.append_to_cmd_group(Push(1000), &mut doc).unwrap();
        prop_assert!(stack.commit_cmd_group().unwrap());
        let after_execute = doc.values.clone();

        stack.undo(&mut doc).unwrap();
        prop_assert_eq!(&doc.values, &initial);
        stack.redo(&mut doc).unwrap();
        prop_assert_eq!(&doc.values, &after_execute);
    }
}
