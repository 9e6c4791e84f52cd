use std::io::Cursor;

use tempfile::TempDir;

use furnstock::{
    persist::{
        SnapshotStore,
        text::{self, MalformedRecord, SeedFile},
    },
    record::FurnitureRecord,
    service::{Inventory, InventoryConfig},
};

fn seeded() -> Inventory {
    let mut inventory = Inventory::new();
    inventory
        .add_record(FurnitureRecord::new(1, "Oak Table", "Tables", 300, 2))
        .expect("add");
    inventory
        .add_record(FurnitureRecord::new(2, "Desk Lamp", "Lighting", 40, 10))
        .expect("add");
    inventory
        .add_record(FurnitureRecord::new(3, "Three Seat Sofa", "Seating", 900, 1))
        .expect("add");
    inventory
}

#[test]
fn parse_and_format_use_the_pipe_layout() {
    let rec = text::parse_line("12|Bar Stool|Seating| 45 |6").expect("parse");
    assert_eq!(rec, FurnitureRecord::new(12, "Bar Stool", "Seating", 45, 6));
    assert_eq!(text::format_line(&rec), "12|Bar Stool|Seating|45|6");
}

#[test]
fn parse_rejects_malformed_lines() {
    assert_eq!(
        text::parse_line("1|Chair|Seating|10").unwrap_err(),
        MalformedRecord::FieldCount(4)
    );
    assert_eq!(
        text::parse_line("1|Chair|Seat|ing|10|2").unwrap_err(),
        MalformedRecord::FieldCount(6)
    );
    assert_eq!(
        text::parse_line("one|Chair|Seating|10|2").unwrap_err(),
        MalformedRecord::BadNumber {
            field: "id",
            value: "one".to_string()
        }
    );
    assert!(matches!(
        text::parse_line("1|Chair|Seating|-10|2").unwrap_err(),
        MalformedRecord::BadNumber { field: "price", .. }
    ));
    assert!(matches!(
        text::parse_line("1|Chair|Seating|10|2.5").unwrap_err(),
        MalformedRecord::BadNumber { field: "quantity", .. }
    ));
}

#[test]
fn loading_skips_bad_lines_and_populates_every_structure() {
    let input = "\
1|Oak Table|Tables|300|2

garbage line
2|Desk Lamp|Lighting|40|10
0|Broken|Misc|1|1
2|Duplicate|Misc|1|1
3|Lamp|Lighting|x|1
";
    let mut inventory = Inventory::new();
    let report = text::load_from_reader(Cursor::new(input), &mut inventory).expect("load");

    assert_eq!(report.loaded, 2);
    assert_eq!(report.malformed, 2);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.skipped(), 4);

    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory.find_by_name("Desk Lamp").expect("name").id, 2);
    assert_eq!(inventory.find_by_category("Tables").expect("category").len(), 1);
    assert_eq!(inventory.arrival_queue().len(), 2);
}

#[test]
fn export_and_reload_preserves_records() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("furniture.txt");

    let original = seeded();
    let written = text::save_file(&path, &original).expect("save");
    assert_eq!(written, 3);

    let mut reloaded = Inventory::new();
    let report = text::load_file(&path, &mut reloaded).expect("load");
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped(), 0);

    let before: Vec<FurnitureRecord> = original.records().cloned().collect();
    let after: Vec<FurnitureRecord> = reloaded.records().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn seed_file_store_loads_missing_file_as_empty() {
    let tmp = TempDir::new().expect("tmp");
    let mut seed = SeedFile::new(tmp.path().join("absent.txt"));

    let (inventory, report) = seed.load(&InventoryConfig::default()).expect("load");
    assert!(inventory.is_empty());
    assert_eq!(report.loaded, 0);

    seed.save(&seeded()).expect("save");
    let (inventory, report) = seed.load(&InventoryConfig::default()).expect("reload");
    assert_eq!(report.loaded, 3);
    assert_eq!(inventory.find(3).expect("find").name, "Three Seat Sofa");
}
