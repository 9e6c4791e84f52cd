use tempfile::TempDir;

use furnstock::{
    record::{FurnitureRecord, FurnitureUpdate},
    service::Inventory,
    shell::{self, Command, Outcome, ShellError},
    types::SortKey,
};

fn run(inventory: &mut Inventory, line: &str) -> Vec<String> {
    let cmd = Command::parse(line).expect("parse");
    match shell::execute(inventory, cmd).expect("execute") {
        Outcome::Lines(lines) => lines,
        Outcome::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn parses_commands_and_arguments() {
    assert_eq!(
        Command::parse("add 4|Bar Stool|Seating|45|6").expect("add"),
        Command::Add(FurnitureRecord::new(4, "Bar Stool", "Seating", 45, 6))
    );
    assert_eq!(
        Command::parse("  UPDATE 4|Stool|Seating|40|5 ").expect("update"),
        Command::Update(
            4,
            FurnitureUpdate {
                name: "Stool".to_string(),
                category: "Seating".to_string(),
                price: 40,
                quantity: 5,
            }
        )
    );
    assert_eq!(Command::parse("delete 4").expect("delete"), Command::Delete(4));
    assert_eq!(
        Command::parse("name Office Chair").expect("name"),
        Command::Name("Office Chair".to_string())
    );
    assert_eq!(Command::parse("sort Price").expect("sort"), Command::Sort(SortKey::Price));
    assert_eq!(Command::parse("quit").expect("quit"), Command::Quit);
}

#[test]
fn rejects_unknown_commands_and_bad_arguments() {
    assert!(matches!(
        Command::parse("paint 3"),
        Err(ShellError::UnknownCommand(word)) if word == "paint"
    ));
    assert!(matches!(Command::parse("delete x"), Err(ShellError::Usage(_))));
    assert!(matches!(Command::parse("sort colour"), Err(ShellError::Usage(_))));
    assert!(matches!(Command::parse("name"), Err(ShellError::Usage(_))));
    assert!(matches!(Command::parse("add 1|Chair"), Err(ShellError::Malformed(_))));
}

#[test]
fn executes_a_session() {
    let mut inventory = Inventory::new();

    assert_eq!(run(&mut inventory, "list"), vec!["inventory is empty"]);
    assert_eq!(run(&mut inventory, "add 1|Oak Table|Tables|300|2"), vec!["added record 1"]);
    run(&mut inventory, "add 2|Desk Lamp|Lighting|40|10");

    assert_eq!(
        run(&mut inventory, "find 1"),
        vec!["#1 Oak Table [Tables] price=300 qty=2"]
    );
    assert_eq!(
        run(&mut inventory, "list"),
        vec![
            "#2 Desk Lamp [Lighting] price=40 qty=10",
            "#1 Oak Table [Tables] price=300 qty=2",
        ]
    );

    run(&mut inventory, "delete 2");
    assert_eq!(run(&mut inventory, "undo"), vec!["restored record 2"]);
    assert_eq!(
        run(&mut inventory, "next"),
        vec!["arrival #1 Oak Table [Tables] price=300 qty=2"]
    );
    assert_eq!(run(&mut inventory, "next"), vec!["arrival #2 (deleted)"]);

    run(&mut inventory, "sort id");
    assert_eq!(inventory.records().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

    let err = shell::execute(&mut inventory, Command::Undo).unwrap_err();
    assert_eq!(err.to_string(), "nothing to undo");
}

#[test]
fn save_and_load_commands_use_seed_files() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("seed.txt");
    let path_str = path.to_str().expect("utf8 path");

    let mut inventory = Inventory::new();
    run(&mut inventory, "add 1|Oak Table|Tables|300|2");
    run(&mut inventory, "add 2|Desk Lamp|Lighting|40|10");
    assert_eq!(
        run(&mut inventory, &format!("save {path_str}")),
        vec![format!("saved 2 records to {path_str}")]
    );

    let mut fresh = Inventory::new();
    assert_eq!(
        run(&mut fresh, &format!("load {path_str}")),
        vec!["loaded 2 records, skipped 0"]
    );
    assert_eq!(run(&mut fresh, "category Lighting"), vec!["#2 Desk Lamp [Lighting] price=40 qty=10"]);
}

#[test]
fn quit_stops_the_shell() {
    let mut inventory = Inventory::new();
    let outcome = shell::execute(&mut inventory, Command::Quit).expect("quit");
    assert_eq!(outcome, Outcome::Quit);
}

#[test]
fn padded_records_cannot_be_added_from_the_shell() {
    let mut inventory = Inventory::new();
    let cmd = Command::parse("add 1| Oak Table |Tables|300|2").expect("parse");
    assert!(matches!(
        shell::execute(&mut inventory, cmd),
        Err(ShellError::Inventory(_))
    ));
    assert!(inventory.is_empty());

    run(&mut inventory, "add 1|Oak Table|Tables|300|2");
    assert_eq!(
        run(&mut inventory, "name   Oak Table  "),
        vec!["#1 Oak Table [Tables] price=300 qty=2"]
    );
}
