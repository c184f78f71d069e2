use {
    crate::{
        inventory::{Storage, StorageError, DEFAULT_OUTPUT},
        logger,
        product::ProductError,
        sort::SortKey,
    },
    clap::Parser,
    log::{info, warn},
    std::{
        error::Error,
        fmt::{self, Display, Formatter},
        io::{self, stderr, stdin, stdout, BufRead, Write},
        path::PathBuf,
    },
    ErrorMessage::*,
};

#[derive(Parser, Debug)]
#[command(version, about = "Console menu over a product list and its inventory")]
pub struct Cli {
    /// File written by the "Save to File" entry
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Log informational events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    DisplayProducts,
    UpdateProduct,
    SaveToFile,
    SortProducts,
    DisplayInventory,
}

impl MenuChoice {
    pub fn from_choice(choice: i64) -> Option<Self> {
        use MenuChoice::*;
        match choice {
            0 => Some(Exit),
            1 => Some(DisplayProducts),
            2 => Some(UpdateProduct),
            3 => Some(SaveToFile),
            4 => Some(SortProducts),
            5 => Some(DisplayInventory),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ErrorMessage {
    InvalidNumber,
    InvalidChoice,
    InvalidSortChoice,
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match *self {
            InvalidNumber => "Invalid number",
            InvalidChoice => "Invalid choice. Try again.",
            InvalidSortChoice => "Invalid choice. Returning to main menu.",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
struct ReplError {
    message: String,
}

impl Display for ReplError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "REPL Error: {}", self.message)
    }
}

impl Error for ReplError {}

impl ReplError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(ReplError { message })
    }

    pub fn base(message: ErrorMessage) -> Box<dyn Error> {
        ReplError::boxed(format!("{}", message))
    }
}

fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

/// Next line without its line ending, or `None` once input is closed.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_number<R: BufRead>(input: &mut R) -> Result<Option<i64>, Box<dyn Error>> {
    match read_line(input)? {
        Some(line) => match line.trim().parse::<i64>() {
            Ok(number) => Ok(Some(number)),
            Err(_) => Err(ReplError::base(InvalidNumber)),
        },
        None => Ok(None),
    }
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nMenu:")?;
    writeln!(out, "1. Display Products")?;
    writeln!(out, "2. Update Product")?;
    writeln!(out, "3. Save to File")?;
    writeln!(out, "4. Sort Products")?;
    writeln!(out, "5. Display Inventory")?;
    writeln!(out, "0. Exit")?;
    prompt(out, "Enter your choice: ")
}

fn update_product<R: BufRead, W: Write>(
    storage: &mut Storage,
    input: &mut R,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    prompt(out, "Enter the name of the product to update: ")?;
    let Some(name) = read_line(input)? else {
        return Ok(false);
    };
    match storage.update_product(&name, input, out) {
        Ok(_) => Ok(true),
        Err(e) if e.is::<StorageError>() || e.is::<ProductError>() => {
            writeln!(out, "{}", e)?;
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

fn save_to_file<W: Write, E: Write>(storage: &Storage, out: &mut W, err: &mut E) -> io::Result<()> {
    match storage.save() {
        Ok(_) => writeln!(out, "Data saved to {}.", storage.file_path.display()),
        Err(e) => {
            warn!("Could not save storage: {:?}", e);
            writeln!(err, "{}", e)?;
            err.flush()
        }
    }
}

fn sort_products<R: BufRead, W: Write>(
    storage: &mut Storage,
    input: &mut R,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    writeln!(out, "Sort by:")?;
    writeln!(out, "1. Price")?;
    writeln!(out, "2. Stock")?;
    prompt(out, "Enter your choice: ")?;
    let key = match read_number(input) {
        Ok(Some(choice)) => SortKey::from_choice(choice),
        Ok(None) => return Ok(false),
        Err(e) if e.is::<ReplError>() => None,
        Err(e) => return Err(e),
    };
    match key {
        Some(key) => storage.sort_products(key),
        None => writeln!(out, "{}", InvalidSortChoice)?,
    }
    Ok(true)
}

/// Runs one menu entry. `Ok(false)` ends the session.
fn resolve_cmd<R: BufRead, W: Write, E: Write>(
    choice: MenuChoice,
    storage: &mut Storage,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> Result<bool, Box<dyn Error>> {
    use MenuChoice::*;
    match choice {
        DisplayProducts => {
            storage.list_products(out)?;
            Ok(true)
        }
        UpdateProduct => update_product(storage, input, out),
        SaveToFile => {
            save_to_file(storage, out, err)?;
            Ok(true)
        }
        SortProducts => sort_products(storage, input, out),
        DisplayInventory => {
            storage.list_inventory(out)?;
            Ok(true)
        }
        Exit => {
            writeln!(out, "Exiting program.")?;
            Ok(false)
        }
    }
}

/// Drives the menu until the user picks Exit or input runs out.
/// Failed saves are reported on `err`, everything else on `out`.
pub fn run_menu<R: BufRead, W: Write, E: Write>(
    storage: &mut Storage,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> Result<(), Box<dyn Error>> {
    loop {
        print_menu(out)?;
        match read_number(input) {
            Ok(Some(number)) => match MenuChoice::from_choice(number) {
                Some(choice) => {
                    if !resolve_cmd(choice, storage, input, out, err)? {
                        break;
                    }
                }
                None => writeln!(out, "{}", InvalidChoice)?,
            },
            Ok(None) => {
                info!("Input closed");
                break;
            }
            Err(e) if e.is::<ReplError>() => writeln!(out, "{}", e)?,
            Err(e) => return Err(e),
        }
    }
    out.flush()?;
    info!("Session ended");
    Ok(())
}

pub fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    logger::init(args.verbose)?;
    let mut storage = Storage::seeded(args.output);
    let mut input = stdin().lock();
    let mut out = stdout().lock();
    let mut err = stderr().lock();
    run_menu(&mut storage, &mut input, &mut out, &mut err)
}
