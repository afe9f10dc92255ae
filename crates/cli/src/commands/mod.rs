//! Shell command parsing and dispatch.

pub mod shell;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use novashop_core::ProductId;

/// One line of shell input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current catalog page (fetching the catalog if needed).
    Products,
    Search(String),
    Price { min: Decimal, max: Decimal },
    Rating(Decimal),
    ClearFilters,
    Page(usize),
    Next,
    Prev,
    Show(ProductId),
    Add { id: ProductId, quantity: u32 },
    Cart,
    Update { id: ProductId, quantity: u32 },
    Remove(ProductId),
    ClearCart,
    OpenCart,
    CloseCart,
    Register,
    Login { email: String },
    Logout,
    Whoami,
    Checkout,
    Paid(Url),
    Orders,
    Sell,
    Delist(ProductId),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one line of input. A blank line parses to `None`.
///
/// # Errors
///
/// Returns [`ParseError::Unknown`] for an unrecognized command word and
/// [`ParseError::Usage`] for bad arguments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match word {
        "products" | "catalog" => Command::Products,
        "search" => Command::Search(rest.join(" ")),
        "price" => match rest.as_slice() {
            [min, max] => Command::Price {
                min: min
                    .parse()
                    .map_err(|_| ParseError::Usage("price <min> <max>"))?,
                max: max
                    .parse()
                    .map_err(|_| ParseError::Usage("price <min> <max>"))?,
            },
            _ => return Err(ParseError::Usage("price <min> <max>")),
        },
        "rating" => match rest.as_slice() {
            [min] => Command::Rating(
                min.parse()
                    .map_err(|_| ParseError::Usage("rating <min>"))?,
            ),
            _ => return Err(ParseError::Usage("rating <min>")),
        },
        "clearfilters" => Command::ClearFilters,
        "page" => match rest.as_slice() {
            [n] => Command::Page(n.parse().map_err(|_| ParseError::Usage("page <n>"))?),
            _ => return Err(ParseError::Usage("page <n>")),
        },
        "next" => Command::Next,
        "prev" => Command::Prev,
        "show" => Command::Show(parse_product_id(&rest, "show <product-id>")?),
        "add" => match rest.as_slice() {
            [id] => Command::Add {
                id: parse_one_id(id, "add <product-id> [quantity]")?,
                quantity: 1,
            },
            [id, quantity] => Command::Add {
                id: parse_one_id(id, "add <product-id> [quantity]")?,
                quantity: quantity
                    .parse()
                    .map_err(|_| ParseError::Usage("add <product-id> [quantity]"))?,
            },
            _ => return Err(ParseError::Usage("add <product-id> [quantity]")),
        },
        "cart" => Command::Cart,
        "update" => match rest.as_slice() {
            [id, quantity] => Command::Update {
                id: parse_one_id(id, "update <product-id> <quantity>")?,
                quantity: quantity
                    .parse()
                    .map_err(|_| ParseError::Usage("update <product-id> <quantity>"))?,
            },
            _ => return Err(ParseError::Usage("update <product-id> <quantity>")),
        },
        "remove" => Command::Remove(parse_product_id(&rest, "remove <product-id>")?),
        "clear" => Command::ClearCart,
        "open" => Command::OpenCart,
        "close" => Command::CloseCart,
        "register" => Command::Register,
        "login" => match rest.as_slice() {
            [email] => Command::Login {
                email: (*email).to_string(),
            },
            _ => return Err(ParseError::Usage("login <email>")),
        },
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "checkout" => Command::Checkout,
        "paid" => match rest.as_slice() {
            [raw] => Command::Paid(
                Url::parse(raw).map_err(|_| ParseError::Usage("paid <return-url>"))?,
            ),
            _ => return Err(ParseError::Usage("paid <return-url>")),
        },
        "orders" => Command::Orders,
        "sell" => Command::Sell,
        "delist" => Command::Delist(parse_product_id(&rest, "delist <product-id>")?),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_product_id(rest: &[&str], usage: &'static str) -> Result<ProductId, ParseError> {
    match rest {
        [id] => parse_one_id(id, usage),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn parse_one_id(raw: &str, usage: &'static str) -> Result<ProductId, ParseError> {
    raw.parse().map_err(|_| ParseError::Usage(usage))
}

pub const HELP: &str = "\
Catalog
  products                 show the current catalog page
  search <text>            filter by name (empty text clears the search)
  price <min> <max>        filter by inclusive price range
  rating <min>             filter by minimum rating
  clearfilters             reset all filters
  page <n> | next | prev   move between pages
  show <product-id>        show one product

Cart
  add <product-id> [qty]   add a product to the cart
  cart                     show the cart
  update <id> <qty>        change a line's quantity
  remove <product-id>      remove a line
  clear                    empty the cart
  open | close             show or hide the cart drawer

Account
  register                 create an account (prompts for details)
  login <email>            sign in (prompts for password)
  logout | whoami

Orders
  checkout                 create an order from the cart (prompts for shipping)
  paid <return-url>        record the payment gateway's return URL
  orders                   list your orders
  sell                     list a product for sale (prompts for details)
  delist <product-id>      remove one of your products

  help | quit";

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_none() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(parse_line("products").unwrap(), Some(Command::Products));
        assert_eq!(parse_line("next").unwrap(), Some(Command::Next));
        assert_eq!(parse_line("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_search_joins_words() {
        assert_eq!(
            parse_line("search desk lamp").unwrap(),
            Some(Command::Search("desk lamp".to_string()))
        );
        assert_eq!(
            parse_line("search").unwrap(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn test_price_range() {
        assert_eq!(
            parse_line("price 10 99.5").unwrap(),
            Some(Command::Price {
                min: Decimal::from(10),
                max: Decimal::new(995, 1),
            })
        );
        assert!(matches!(
            parse_line("price 10"),
            Err(ParseError::Usage("price <min> <max>"))
        ));
        assert!(matches!(parse_line("price a b"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_add_with_and_without_quantity() {
        assert_eq!(
            parse_line("add 3").unwrap(),
            Some(Command::Add {
                id: ProductId::new(3),
                quantity: 1,
            })
        );
        assert_eq!(
            parse_line("add 3 5").unwrap(),
            Some(Command::Add {
                id: ProductId::new(3),
                quantity: 5,
            })
        );
        assert!(parse_line("add three").is_err());
    }

    #[test]
    fn test_login_requires_email() {
        assert_eq!(
            parse_line("login user@example.com").unwrap(),
            Some(Command::Login {
                email: "user@example.com".to_string(),
            })
        );
        assert!(matches!(
            parse_line("login"),
            Err(ParseError::Usage("login <email>"))
        ));
    }

    #[test]
    fn test_paid_parses_url() {
        let parsed = parse_line("paid http://localhost:5173/payment?status=success&order_id=4")
            .unwrap()
            .unwrap();
        assert!(matches!(parsed, Command::Paid(_)));
        assert!(parse_line("paid not-a-url").is_err());
    }

    #[test]
    fn test_unknown_word() {
        assert!(matches!(
            parse_line("frobnicate"),
            Err(ParseError::Unknown(word)) if word == "frobnicate"
        ));
    }
}
