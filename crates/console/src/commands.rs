use models::{ProductForm, ProductId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Get(ProductId),
    Add(ProductForm),
    Update(ProductId, ProductForm),
    Delete(ProductId),
    Search(String),
    Summary,
    Save,
    Categories,
    Metrics,
    Help,
    Quit,
}

const ADD_USAGE: &str = "add <id> | <name> | <category> | <price> | <quantity>";
const UPDATE_USAGE: &str = "update <id> <new id> | <name> | <category> | <price> | <quantity>";

pub const HELP: &str = "\
commands:
  list                      show every product (also: reset)
  get <id>                  show one product
  add <id> | <name> | <category> | <price> | <quantity>
  update <id> <new id> | <name> | <category> | <price> | <quantity>
  delete <id>               remove a product (asks for confirmation)
  search <text>             match name or category
  summary                   item count, total quantity, inventory value
  save                      write the inventory to disk again
  categories                list suggested categories
  metrics                   dump store metrics
  help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "list" | "reset" | "ls" => Ok(Self::List),
            "get" => parse_id(rest, "get <id>").map(Self::Get),
            "add" => parse_form(rest).map(Self::Add),
            "update" => {
                let (id, fields) = rest.split_once(char::is_whitespace).ok_or(CommandError::Usage(UPDATE_USAGE))?;
                let id = parse_id(id, UPDATE_USAGE)?;
                Ok(Self::Update(id, parse_form(fields.trim()).map_err(|_| CommandError::Usage(UPDATE_USAGE))?))
            }
            "delete" | "rm" => parse_id(rest, "delete <id>").map(Self::Delete),
            "search" | "find" => {
                if rest.is_empty() {
                    return Err(CommandError::Invalid("Enter search text (name or category).".into()));
                }
                Ok(Self::Search(rest.to_string()))
            }
            "summary" => Ok(Self::Summary),
            "save" => Ok(Self::Save),
            "categories" => Ok(Self::Categories),
            "metrics" => Ok(Self::Metrics),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(raw: &str, usage: &'static str) -> Result<ProductId, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    raw.trim()
        .parse()
        .map_err(|_| CommandError::Invalid("Invalid ID. Enter a number.".into()))
}

/// Split `id | name | category | price | quantity` into raw form fields.
/// Field contents are checked later by `ProductForm::parse`.
fn parse_form(raw: &str) -> Result<ProductForm, CommandError> {
    let fields: Vec<&str> = raw.split('|').map(str::trim).collect();
    let [id, name, category, price, quantity] = fields.as_slice() else {
        return Err(CommandError::Usage(ADD_USAGE));
    };
    Ok(ProductForm {
        id: id.to_string(),
        name: name.to_string(),
        category: (!category.is_empty()).then(|| category.to_string()),
        price: price.to_string(),
        quantity: quantity.to_string(),
    })
}
