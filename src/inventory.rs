use crate::{
    product::ProductList,
    sort::{sort_items, SortKey},
};
use log::info;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::{Path, PathBuf},
};
use ErrorMessage::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    name: String,
    quantity: u32,
}

#[derive(Debug)]
pub struct Storage {
    pub list: ProductList,
    pub inventory: Vec<InventoryItem>,
    pub file_path: PathBuf,
}

#[derive(Debug)]
pub enum ErrorMessage {
    ProductNotFound,
}

#[derive(Debug)]
pub enum SaveError {
    Open(PathBuf, io::Error),
    Write(PathBuf, io::Error),
}

#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ProductNotFound => "Product not found.",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl StorageError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(StorageError { message })
    }

    pub fn base(message: ErrorMessage) -> Box<dyn Error> {
        StorageError::boxed(message.to_string())
    }
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SaveError::Open(path, _) => write!(f, "Unable to open {} for writing.", path.display()),
            SaveError::Write(path, e) => write!(f, "Unable to write {}: {}", path.display(), e),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SaveError::Open(_, e) | SaveError::Write(_, e) => Some(e),
        }
    }
}

impl Display for InventoryItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Product: {}, Quantity: {}", self.name, self.quantity)
    }
}

#[allow(dead_code)]
impl InventoryItem {
    pub fn new(name: &str, quantity: u32) -> Self {
        InventoryItem {
            name: name.to_string(),
            quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn update_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

pub const DEFAULT_OUTPUT: &str = "output.txt";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

impl Storage {
    pub fn new(list: ProductList, inventory: Vec<InventoryItem>, file_path: PathBuf) -> Self {
        Storage {
            list,
            inventory,
            file_path,
        }
    }

    /// Seeded state every session starts from.
    pub fn seeded(file_path: PathBuf) -> Self {
        let inventory = vec![
            InventoryItem::new("Laptop", 5),
            InventoryItem::new("Book", 50),
            InventoryItem::new("Smartphone", 10),
        ];
        Storage::new(ProductList::default(), inventory, file_path)
    }

    pub fn list_products<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.list.list(out)
    }

    pub fn list_inventory<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for item in &self.inventory {
            writeln!(out, "{}", item)?;
        }
        Ok(())
    }

    /// Hands the first product named exactly `name` its interactive update.
    pub fn update_product<R: BufRead, W: Write>(
        &mut self,
        name: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), Box<dyn Error>> {
        match self.list.product_mut(name) {
            Some(product) => {
                info!("Updating product {}", name);
                product.update(input, out)
            }
            None => Err(StorageError::base(ProductNotFound)),
        }
    }

    pub fn sort_products(&mut self, key: SortKey) {
        sort_items(&mut self.list.products, key.comparator());
        info!("Products sorted by {}", key.as_str());
    }

    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for product in &self.list.products {
            write!(
                out,
                "Product: {}, Price: {}, Stock: {}{}",
                product.name(),
                product.price(),
                product.stock(),
                LINE_ENDING
            )?;
        }
        write!(out, "{}Inventory:{}", LINE_ENDING, LINE_ENDING)?;
        for item in &self.inventory {
            write!(out, "{}{}", item, LINE_ENDING)?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), SaveError> {
        self.save_as(&self.file_path)
    }

    /// Nothing is written when the file cannot be opened.
    pub fn save_as(&self, file_path: &Path) -> Result<(), SaveError> {
        let file = File::create(file_path).map_err(|e| SaveError::Open(file_path.to_path_buf(), e))?;
        let mut writer = BufWriter::new(file);
        self.write_report(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| SaveError::Write(file_path.to_path_buf(), e))?;
        info!("Storage saved to {}", file_path.display());
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Storage::seeded(PathBuf::from(DEFAULT_OUTPUT))
    }
}
