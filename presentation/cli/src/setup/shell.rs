use std::io::Write;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use tokio::io::{AsyncBufReadExt, BufReader};

use business::domain::cart::model::Cart;
use business::domain::cart::pricing::format_amount;
use business::domain::product::model::{NewProductProps, Product};
use business::domain::shared::value_objects::ProductId;

use crate::setup::dependency_injection::DependencyContainer;

const HELP: &str = "\
Commands:
  add <id> [qty]                 add a catalog product
  add-manual <id> <price> <name> add a product without the catalog
  remove <id>                    remove a product
  promo <code>                   apply a promo code
  unpromo                        remove the promo code
  clear                          empty the cart
  show                           print the cart and totals
  checkout <payment-id>          place the order
  help                           show this message
  quit                           save and exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { id: ProductId, quantity: u32 },
    AddManual { id: ProductId, price: BigDecimal, name: String },
    Remove(ProductId),
    Promo(String),
    Unpromo,
    Clear,
    Show,
    Checkout(String),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a valid quantity")]
    InvalidQuantity(String),
    #[error("'{0}' is not a valid price")]
    InvalidPrice(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Usage("help"));
        };

        match verb.to_ascii_lowercase().as_str() {
            "add" => {
                let id = words.next().ok_or(CommandError::Usage("add <id> [qty]"))?;
                let quantity = match words.next() {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| CommandError::InvalidQuantity(raw.to_string()))?,
                    None => 1,
                };
                Ok(Command::Add {
                    id: ProductId::new(id),
                    quantity,
                })
            }
            "add-manual" => {
                const USAGE: &str = "add-manual <id> <price> <name>";
                let id = words.next().ok_or(CommandError::Usage(USAGE))?;
                let raw_price = words.next().ok_or(CommandError::Usage(USAGE))?;
                let price = raw_price
                    .parse::<BigDecimal>()
                    .map_err(|_| CommandError::InvalidPrice(raw_price.to_string()))?;
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(CommandError::Usage(USAGE));
                }
                Ok(Command::AddManual {
                    id: ProductId::new(id),
                    price,
                    name,
                })
            }
            "remove" => words
                .next()
                .map(|id| Command::Remove(ProductId::new(id)))
                .ok_or(CommandError::Usage("remove <id>")),
            // An empty code is passed through; the session reports it.
            "promo" => Ok(Command::Promo(words.next().unwrap_or_default().to_string())),
            "unpromo" => Ok(Command::Unpromo),
            "clear" => Ok(Command::Clear),
            "show" | "cart" => Ok(Command::Show),
            "checkout" => words
                .next()
                .map(|payment| Command::Checkout(payment.to_string()))
                .ok_or(CommandError::Usage("checkout <payment-id>")),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Renders the cart the way `show` prints it.
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        out.push_str(&format!(
            "  {:<12} {:<30} x{:<3} ₹{}\n",
            item.product_id.as_str(),
            item.name,
            item.quantity,
            format_amount(&item.line_total())
        ));
    }

    let totals = cart.totals();
    out.push_str(&format!("Subtotal: ₹{}\n", format_amount(&totals.subtotal)));
    if let Some(promo) = cart.promo() {
        out.push_str(&format!(
            "Discount ({}): -₹{}\n",
            promo.code,
            format_amount(&totals.discount)
        ));
    }
    out.push_str(&format!("Total: ₹{}", format_amount(&totals.total)));
    out
}

pub struct Shell;

impl Shell {
    /// Reads commands from stdin until `quit`, end of input or Ctrl-C.
    pub async fn run(container: &DependencyContainer) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("Storefront cart. Type 'help' for commands.");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };
            let Some(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => Self::execute(container, command).await,
                Err(e) => println!("{}", e),
            }
        }

        Ok(())
    }

    async fn execute(container: &DependencyContainer, command: Command) {
        let session = &container.session;

        match command {
            Command::Add { id, quantity } => match container.catalog.get_by_id(&id).await {
                Ok(product) => {
                    session.add_item_with_quantity(&product, quantity);
                }
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "catalog lookup failed");
                    println!("Could not load product {}: {}", id, e);
                }
            },
            Command::AddManual { id, price, name } => {
                match Product::new(NewProductProps::basic(id, name, price)) {
                    Ok(product) => {
                        session.add_item(&product);
                    }
                    Err(e) => println!("Invalid product: {}", e),
                }
            }
            Command::Remove(id) => {
                if !session.remove_item(&id) {
                    println!("{} is not in your cart.", id);
                }
            }
            Command::Promo(code) => {
                // Outcome is reported through the notifier.
                let _ = session.apply_promo_code(&code).await;
            }
            Command::Unpromo => session.remove_promo_code(),
            Command::Clear => {
                session.clear_cart();
                println!("Cart cleared.");
            }
            Command::Show => println!("{}", render_cart(&session.cart())),
            Command::Checkout(payment_id) => {
                let _ = session
                    .checkout(container.identity.as_ref(), &payment_id)
                    .await;
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::cart::model::AppliedPromo;
    use business::domain::promo_code::model::DiscountRule;

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product::new(NewProductProps::basic(id, name, BigDecimal::from(price))).unwrap()
    }

    #[test]
    fn should_parse_add_with_default_quantity() {
        let command: Command = "add 65f0a1".parse().unwrap();

        assert_eq!(
            command,
            Command::Add {
                id: ProductId::new("65f0a1"),
                quantity: 1
            }
        );
    }

    #[test]
    fn should_parse_add_with_zero_quantity() {
        let command: Command = "ADD 1 0".parse().unwrap();

        assert_eq!(
            command,
            Command::Add {
                id: ProductId::new("1"),
                quantity: 0
            }
        );
    }

    #[test]
    fn should_reject_negative_quantity() {
        let result = "add 1 -2".parse::<Command>();

        assert_eq!(
            result.unwrap_err(),
            CommandError::InvalidQuantity("-2".to_string())
        );
    }

    #[test]
    fn should_parse_manual_add_with_multi_word_name() {
        let command: Command = "add-manual 2 199.99 Boho Wall Art".parse().unwrap();

        assert_eq!(
            command,
            Command::AddManual {
                id: ProductId::new("2"),
                price: "199.99".parse().unwrap(),
                name: "Boho Wall Art".to_string(),
            }
        );
    }

    #[test]
    fn should_require_name_for_manual_add() {
        let result = "add-manual 2 10".parse::<Command>();

        assert!(matches!(result.unwrap_err(), CommandError::Usage(_)));
    }

    #[test]
    fn should_pass_empty_promo_through() {
        let command: Command = "promo".parse().unwrap();

        assert_eq!(command, Command::Promo(String::new()));
    }

    #[test]
    fn should_require_payment_id_for_checkout() {
        assert!(matches!(
            "checkout".parse::<Command>().unwrap_err(),
            CommandError::Usage(_)
        ));
        assert_eq!(
            "checkout pay_123".parse::<Command>().unwrap(),
            Command::Checkout("pay_123".to_string())
        );
    }

    #[test]
    fn should_report_unknown_verb() {
        let result = "dance".parse::<Command>();

        assert_eq!(result.unwrap_err(), CommandError::Unknown("dance".to_string()));
    }

    #[test]
    fn should_render_empty_cart() {
        assert_eq!(render_cart(&Cart::new()), "Your cart is empty.");
    }

    #[test]
    fn should_render_totals_with_discount() {
        let mut cart = Cart::new();
        cart.add(&product("1", "Item 1", 100), 1);
        cart.add(&product("2", "Item 2", 200), 1);
        cart.apply_promo(AppliedPromo {
            code: "SAVE10".to_string(),
            rule: DiscountRule::Percentage(BigDecimal::from(10)),
            description: "10% off your order".to_string(),
        });

        let rendered = render_cart(&cart);

        assert!(rendered.contains("Subtotal: ₹300.00"));
        assert!(rendered.contains("Discount (SAVE10): -₹30.00"));
        assert!(rendered.ends_with("Total: ₹270.00"));
    }
}
