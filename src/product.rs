use log::info;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{BufRead, Write},
};
use ErrorMessage::*;

const ELECTRONICS_DISCOUNT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum Category {
    General,
    Electronics { warranty_months: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    price: f64,
    stock: u32,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductList {
    pub products: Vec<Product>,
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Name: {}, Price: {}, Stock: {}",
            self.name, self.price, self.stock
        )?;
        if let Category::Electronics { warranty_months } = self.category {
            write!(f, "\nWarranty Period: {} months", warranty_months)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ProductError {
    pub level: String,
    pub message: String,
}

impl Display for ProductError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} Error: {}", self.level, self.message)
    }
}

impl Error for ProductError {}

impl ProductError {
    pub fn boxed(level: &str, message: String) -> Box<dyn Error> {
        Box::new(ProductError {
            level: level.to_string(),
            message,
        })
    }

    pub fn product(message: String) -> Box<dyn Error> {
        ProductError::boxed("Product", message)
    }

    pub fn message(error: ErrorMessage, details: Option<String>) -> String {
        if let Some(details) = details {
            format!("{}: {}", error, details)
        } else {
            format!("{}", error)
        }
    }
}

#[derive(Debug)]
pub enum ErrorMessage {
    InvalidWarranty,
    StockOverflow,
}

impl ErrorMessage {
    pub fn as_str(&self) -> &str {
        match self {
            InvalidWarranty => "Invalid warranty period",
            StockOverflow => "Stock would exceed the maximum count",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[allow(dead_code)]
impl Product {
    pub fn new(name: &str, price: f64, stock: u32) -> Self {
        Product {
            name: name.to_string(),
            price,
            stock,
            category: Category::General,
        }
    }

    pub fn electronics(name: &str, price: f64, stock: u32, warranty_months: u32) -> Self {
        Product {
            category: Category::Electronics { warranty_months },
            ..Product::new(name, price, stock)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn warranty_months(&self) -> Option<u32> {
        match self.category {
            Category::Electronics { warranty_months } => Some(warranty_months),
            Category::General => None,
        }
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn restock(&mut self, quantity: u32) -> Result<(), Box<dyn Error>> {
        match self.stock.checked_add(quantity) {
            Some(stock) => {
                self.stock = stock;
                Ok(())
            }
            None => {
                let message = ProductError::message(StockOverflow, Some(self.name.clone()));
                Err(ProductError::product(message))
            }
        }
    }

    pub fn calculate_discount(&self) -> f64 {
        match self.category {
            Category::General => 0.0,
            Category::Electronics { .. } => self.price * ELECTRONICS_DISCOUNT,
        }
    }

    pub fn cheaper_than(&self, other: &Product) -> bool {
        self.price < other.price
    }

    /// Interactive update. General products have nothing to change; electronics
    /// ask for a new warranty period. End of input leaves the product untouched.
    pub fn update<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), Box<dyn Error>> {
        let Category::Electronics { warranty_months } = &mut self.category else {
            return Ok(());
        };

        write!(out, "Enter new warranty period for {}: ", self.name)?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim().parse::<u32>() {
            Ok(months) => {
                info!(
                    "Warranty for {} changed from {} to {} months",
                    self.name, warranty_months, months
                );
                *warranty_months = months;
                Ok(())
            }
            Err(_) => {
                let message = ProductError::message(InvalidWarranty, Some(line.trim().to_string()));
                Err(ProductError::product(message))
            }
        }
    }
}

#[allow(dead_code)]
impl ProductList {
    pub fn new() -> Self {
        ProductList {
            products: Vec::new(),
        }
    }

    pub fn with(products: Vec<Product>) -> Self {
        ProductList { products }
    }

    pub fn add(&mut self, product: Product) {
        info!("Product {} added", product.name);
        self.products.push(product);
    }

    pub fn product_mut(&mut self, name: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.name == name)
    }

    pub fn list<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for product in &self.products {
            writeln!(out, "{}", product)?;
        }
        Ok(())
    }
}

impl Default for ProductList {
    fn default() -> Self {
        let mut products = ProductList::new();
        products.add(Product::electronics("Laptop", 1200.0, 5, 12));
        products.add(Product::new("Book", 20.0, 50));
        products.add(Product::electronics("Smartphone", 800.0, 10, 6));
        products
    }
}
