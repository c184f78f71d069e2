use crate::{
    inventory::{InventoryItem, SaveError, Storage, LINE_ENDING},
    logger,
    product::{Product, ProductList},
    repl::run_menu,
    sort::{by_quantity, sort_items, SortKey},
};
use std::{error::Error, fs, io, path::PathBuf};

fn session_with_errors(storage: &mut Storage, script: &str) -> (String, String) {
    let mut input = script.as_bytes();
    let mut out = Vec::new();
    let mut err = Vec::new();
    match run_menu(storage, &mut input, &mut out, &mut err) {
        Ok(_) => (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap()),
        Err(e) => panic!("{}", e),
    }
}

fn session(storage: &mut Storage, script: &str) -> String {
    session_with_errors(storage, script).0
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("product_menu_{}_{}.txt", std::process::id(), name))
}

fn names(storage: &Storage) -> Vec<&str> {
    storage.list.products.iter().map(|p| p.name()).collect()
}

#[test]
fn restock_adds_exact_quantity() {
    let mut product = Product::new("Book", 20.0, 50);
    product.restock(0).unwrap();
    assert_eq!(product.stock(), 50);
    product.restock(7).unwrap();
    assert_eq!(product.stock(), 57);
}

#[test]
fn restock_past_max_count_is_rejected() {
    let mut product = Product::new("Book", 20.0, 50);
    product.restock(u32::MAX - 50).unwrap();
    assert_eq!(product.stock(), u32::MAX);

    match product.restock(1) {
        Ok(_) => panic!("restock beyond u32::MAX should fail"),
        Err(e) => assert_eq!(
            e.to_string(),
            "Product Error: Stock would exceed the maximum count: Book"
        ),
    }
    assert_eq!(product.stock(), u32::MAX);
}

#[test]
fn discount_depends_on_category() {
    let book = Product::new("Book", 20.0, 50);
    assert_eq!(book.calculate_discount(), 0.0);

    let mut laptop = Product::electronics("Laptop", 1200.0, 5, 12);
    assert_eq!(laptop.calculate_discount(), laptop.price() * 0.1);
    laptop.set_price(500.0);
    assert_eq!(laptop.calculate_discount(), 50.0);
}

#[test]
fn cheaper_than_compares_price() {
    let book = Product::new("Book", 20.0, 50);
    let phone = Product::electronics("Smartphone", 800.0, 10, 6);
    assert!(book.cheaper_than(&phone));
    assert!(!phone.cheaper_than(&book));
    assert!(!book.cheaper_than(&book));
}

#[test]
fn product_display_appends_warranty() {
    let laptop = Product::electronics("Laptop", 1200.0, 5, 12);
    assert_eq!(
        laptop.to_string(),
        "Name: Laptop, Price: 1200, Stock: 5\nWarranty Period: 12 months"
    );
    let book = Product::new("Book", 19.5, 3);
    assert_eq!(book.to_string(), "Name: Book, Price: 19.5, Stock: 3");
}

#[test]
fn sort_by_price_is_non_decreasing() {
    let mut storage = Storage::default();
    storage.list.add(Product::new("Pen", 2.5, 300));
    storage.list.add(Product::electronics("Cable", 20.0, 40, 3));
    storage.sort_products(SortKey::Price);
    let products = &storage.list.products;
    assert!(products.windows(2).all(|w| w[0].price() <= w[1].price()));
    assert_eq!(products[0].name(), "Pen");
}

#[test]
fn sort_by_stock_is_non_decreasing() {
    let mut storage = Storage::default();
    storage.sort_products(SortKey::Stock);
    let products = &storage.list.products;
    assert!(products.windows(2).all(|w| w[0].stock() <= w[1].stock()));
    assert_eq!(names(&storage), vec!["Laptop", "Smartphone", "Book"]);
}

#[test]
fn inventory_sorts_by_quantity() {
    let mut items = vec![
        InventoryItem::new("Book", 50),
        InventoryItem::new("Laptop", 5),
        InventoryItem::new("Smartphone", 10),
    ];
    sort_items(&mut items, by_quantity);
    let quantities: Vec<u32> = items.iter().map(|i| i.quantity()).collect();
    assert_eq!(quantities, vec![5, 10, 50]);

    items[0].update_quantity(99);
    assert_eq!(items[0].quantity(), 99);
}

#[test]
fn sort_by_price_then_display() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "4\n1\n1\n0\n");
    assert_eq!(names(&storage), vec!["Book", "Smartphone", "Laptop"]);
    assert!(output.contains(
        "Name: Book, Price: 20, Stock: 50\n\
         Name: Smartphone, Price: 800, Stock: 10\n\
         Warranty Period: 6 months\n\
         Name: Laptop, Price: 1200, Stock: 5\n\
         Warranty Period: 12 months\n"
    ));
    assert!(output.ends_with("Exiting program.\n"));
}

#[test]
fn invalid_sort_choice_keeps_order() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "4\n7\n4\nprice\n4\n-1\n0\n");
    assert_eq!(output.matches("Invalid choice. Returning to main menu.").count(), 3);
    assert_eq!(names(&storage), vec!["Laptop", "Book", "Smartphone"]);
}

#[test]
fn update_unknown_product_changes_nothing() {
    let mut storage = Storage::default();
    let before = storage.list.clone();
    let output = session(&mut storage, "2\nlaptop\n0\n");
    assert!(output.contains("Product not found."));
    assert_eq!(storage.list, before);
}

#[test]
fn update_electronics_sets_warranty() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "2\nLaptop\n24\n0\n");
    assert!(output.contains("Enter new warranty period for Laptop: "));
    assert_eq!(storage.list.products[0].warranty_months(), Some(24));
    assert_eq!(storage.list.products[2].warranty_months(), Some(6));
}

#[test]
fn update_general_product_is_noop() {
    let mut storage = Storage::default();
    let before = storage.list.clone();
    let output = session(&mut storage, "2\nBook\n0\n");
    assert!(!output.contains("Enter new warranty period"));
    assert!(!output.contains("Product not found."));
    assert_eq!(storage.list, before);
}

#[test]
fn invalid_warranty_keeps_previous_value() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "2\nSmartphone\nsoon\n0\n");
    assert!(output.contains("Product Error: Invalid warranty period: soon\n"));
    assert_eq!(storage.list.products[2].warranty_months(), Some(6));
}

#[test]
fn invalid_menu_input_reprompts() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "9\n-1\nabc\n0\n");
    assert_eq!(output.matches("Invalid choice. Try again.").count(), 2);
    assert!(output.contains("REPL Error: Invalid number"));
    assert_eq!(output.matches("\nMenu:\n").count(), 4);
}

#[test]
fn closed_input_ends_session() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "1\n");
    assert!(output.contains("Name: Book, Price: 20, Stock: 50\n"));
    assert!(!output.contains("Exiting program."));
}

#[test]
fn display_inventory_lists_items() {
    let mut storage = Storage::default();
    let output = session(&mut storage, "5\n0\n");
    assert!(output.contains(
        "Product: Laptop, Quantity: 5\n\
         Product: Book, Quantity: 50\n\
         Product: Smartphone, Quantity: 10\n"
    ));
}

#[test]
fn save_writes_products_then_inventory() {
    let path = temp_file("save");
    let mut storage = Storage::seeded(path.clone());
    let output = session(&mut storage, "4\n2\n3\n0\n");
    assert!(output.contains(&format!("Data saved to {}.", path.display())));

    let contents = fs::read_to_string(&path).unwrap().replace(LINE_ENDING, "\n");
    fs::remove_file(&path).unwrap();
    assert_eq!(
        contents,
        "Product: Laptop, Price: 1200, Stock: 5\n\
         Product: Smartphone, Price: 800, Stock: 10\n\
         Product: Book, Price: 20, Stock: 50\n\
         \n\
         Inventory:\n\
         Product: Laptop, Quantity: 5\n\
         Product: Book, Quantity: 50\n\
         Product: Smartphone, Quantity: 10\n"
    );
}

#[test]
fn save_truncates_previous_contents() {
    let path = temp_file("truncate");
    fs::write(&path, "stale line\n".repeat(100)).unwrap();
    let storage = Storage::new(
        ProductList::with(vec![Product::new("Book", 20.0, 50)]),
        Vec::new(),
        path.clone(),
    );
    storage.save().unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    let expected = format!("Product: Book, Price: 20, Stock: 50{0}{0}Inventory:{0}", LINE_ENDING);
    fs::remove_file(&path).unwrap();
    assert_eq!(contents, expected);
}

#[test]
fn save_to_missing_directory_reports_and_continues() {
    let path = std::env::temp_dir()
        .join(format!("product_menu_missing_{}", std::process::id()))
        .join("output.txt");
    let mut storage = Storage::seeded(path.clone());
    let (output, errors) = session_with_errors(&mut storage, "3\n5\n0\n");
    assert!(!output.contains("Data saved"));
    assert_eq!(errors, format!("Unable to open {} for writing.\n", path.display()));
    assert!(output.contains("Product: Laptop, Quantity: 5"));
    assert!(!path.exists());

    match storage.save() {
        Err(SaveError::Open(failed, _)) => assert_eq!(failed, path),
        other => panic!("expected an open failure, got {:?}", other),
    }
}

#[test]
fn write_failure_is_not_reported_as_open_failure() {
    let path = PathBuf::from("output.txt");
    let error = SaveError::Write(path, io::Error::new(io::ErrorKind::Other, "disk full"));
    assert_eq!(error.to_string(), "Unable to write output.txt: disk full");
}

#[test]
fn second_logger_init_fails_as_boxed_error() {
    let _ = logger::init(false);
    let second: Result<(), Box<dyn Error>> = logger::init(false).map_err(Into::into);
    assert!(second.is_err());
}
