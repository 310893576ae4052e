//! Transaction atomicity: a failing sub-command leaves the document
//! bitwise-identical to the state before the attempt.

use easel::command::{
    AddShapeNotationCommand, Command, CommandError, CommandStack, CompoundCommand,
    CreateElementCommand, ElementHandle, UpdateAttributes, UpdateElementCommand,
};
use easel::metamodel::ElementKind;
use easel::model::Document;
use easel::Representation;

/// Fault injection: a command that always fails on execute.
#[derive(Debug)]
struct FailingCommand;

impl Command for FailingCommand {
    fn execute(&mut self, _document: &mut Document) -> Result<(), CommandError> {
        Err(CommandError::Failed("injected fault".into()))
    }

    fn undo(&mut self, _document: &mut Document) -> Result<(), CommandError> {
        Ok(())
    }
}

fn seeded_document() -> Document {
    let mut document = Document::new();
    let mut stack = CommandStack::new();
    let root = document.root().clone();

    let handle = ElementHandle::deferred();
    let mut compound = CompoundCommand::new("seed");
    compound.append(CreateElementCommand::new(
        root,
        ElementKind::Class,
        UpdateAttributes::named("Seed"),
        handle.clone(),
    ));
    compound.append(AddShapeNotationCommand::new(
        Representation::Class,
        handle,
        None,
        None,
    ));
    stack.execute(compound, &mut document).unwrap();
    document
}

fn failing_compound(document: &Document, fail_at: usize) -> CompoundCommand {
    let root = document.root().clone();
    let seed = document.iter_elements().nth(1).unwrap().id().clone();
    let mut compound = CompoundCommand::new("faulty");

    let steps: Vec<Box<dyn Command>> = vec![
        Box::new(CreateElementCommand::new(
            root,
            ElementKind::Class,
            UpdateAttributes::named("Doomed"),
            ElementHandle::deferred(),
        )),
        Box::new(UpdateElementCommand::new(
            seed,
            UpdateAttributes {
                name: Some("Mutated".into()),
                is_abstract: Some(true),
                properties: vec![("note".into(), Some("tainted".into()))],
            },
        )),
        Box::new(FailingCommand),
    ];
    for (index, step) in steps.into_iter().enumerate() {
        if index == fail_at {
            compound.append(FailingCommand);
        }
        compound.append_boxed(step);
    }
    compound
}

#[test]
fn test_failure_at_each_position_restores_the_document() {
    // Inject the fault before step 0, 1 and 2; in every case the
    // document after the failed attempt equals the document before it.
    for fail_at in 0..3 {
        let mut document = seeded_document();
        let snapshot = document.clone();
        let mut stack = CommandStack::new();

        let failure = stack
            .execute(failing_compound(&document, fail_at), &mut document)
            .expect_err("compound must fail");
        assert_eq!(failure.index, fail_at);

        assert_eq!(
            document, snapshot,
            "state diverged after failure at step {fail_at}"
        );
        assert!(!stack.can_undo(), "failed transactions never enter history");
    }
}

#[test]
fn test_rolled_back_ids_do_not_leak_into_the_graph() {
    // The create inside a failed transaction minted an ID; after the
    // rollback that ID must not resolve, now or ever.
    let mut document = seeded_document();
    let mut stack = CommandStack::new();

    let handle = ElementHandle::deferred();
    let mut compound = CompoundCommand::new("faulty create");
    compound.append(CreateElementCommand::new(
        document.root().clone(),
        ElementKind::Class,
        UpdateAttributes::named("Phantom"),
        handle.clone(),
    ));
    compound.append(FailingCommand);

    stack.execute(compound, &mut document).expect_err("must fail");
    let phantom = handle.get().unwrap();
    assert!(document.resolve(&phantom).is_none());

    // Later creations never resurrect it.
    let mut retry = CompoundCommand::new("retry");
    let fresh = ElementHandle::deferred();
    retry.append(CreateElementCommand::new(
        document.root().clone(),
        ElementKind::Class,
        UpdateAttributes::named("Real"),
        fresh.clone(),
    ));
    stack.execute(retry, &mut document).unwrap();
    assert_ne!(fresh.get().unwrap(), phantom);
}
