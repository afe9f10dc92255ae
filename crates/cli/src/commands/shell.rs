//! The interactive storefront shell.
//!
//! Owns the per-process state (API client, cart, signed-in session,
//! catalog view) and dispatches parsed commands against it. Failures are
//! printed once at the prompt and never abort the shell; only stdin
//! errors end the loop.

use std::io::{self, Write as _};
use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use novashop_client::api::types::NewProduct;
use novashop_client::api::{ApiClient, ApiError};
use novashop_client::cart::CartStore;
use novashop_client::catalog::CatalogView;
use novashop_client::checkout::{PaymentOutcome, begin_checkout};
use novashop_client::config::ClientConfig;
use novashop_client::error::{AuthError, ClientError};
use novashop_client::session::{FileSessionStorage, SessionStore};
use novashop_client::validate::{NewAccount, ShippingDetails};

use super::{Command, HELP, parse_line};
use crate::render;

#[derive(Debug, Error)]
enum ShellError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("input error: {0}")]
    Input(#[from] io::Error),
}

/// Per-process shell state.
pub struct Shell {
    config: ClientConfig,
    api: ApiClient,
    session: SessionStore,
    cart: CartStore,
    /// Fetched lazily on the first catalog command; dropped after seller
    /// mutations so the next command refetches.
    catalog: Option<CatalogView>,
}

impl Shell {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let api = ApiClient::new(config.backend_url.clone());
        let storage = FileSessionStorage::new(config.session_file.clone());
        let session = SessionStore::new(api.clone(), Box::new(storage));
        Self {
            config,
            api,
            session,
            cart: CartStore::new(),
            catalog: None,
        }
    }

    /// Run the read-eval-print loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only when stdin or stdout fails.
    pub async fn run(&mut self) -> io::Result<()> {
        println!("NovaShop shell - type 'help' for commands");
        if let Some(identity) = self.session.current() {
            println!("signed in as {}", identity.email);
        }

        loop {
            let Some(line) = read_prompt("novashop> ")? else {
                break;
            };
            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => match self.execute(command).await {
                    Ok(()) => {}
                    Err(ShellError::Input(e)) => return Err(e),
                    Err(e) => {
                        tracing::debug!(error = %e, "command failed");
                        println!("error: {e}");
                    }
                },
                Err(e) => println!("{e}"),
            }
        }
        println!("bye");
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<(), ShellError> {
        match command {
            Command::Products => {
                let view = self.catalog().await?;
                println!("{}", render::catalog_page(view));
            }
            Command::Search(text) => {
                let view = self.catalog().await?;
                view.set_search(text);
                println!("{}", render::catalog_page(view));
            }
            Command::Price { min, max } => {
                let view = self.catalog().await?;
                view.set_price_range(min, max);
                println!("{}", render::catalog_page(view));
            }
            Command::Rating(min) => {
                let view = self.catalog().await?;
                view.set_min_rating(min.to_f64().unwrap_or(0.0));
                println!("{}", render::catalog_page(view));
            }
            Command::ClearFilters => {
                let view = self.catalog().await?;
                view.clear_filters();
                println!("{}", render::catalog_page(view));
            }
            Command::Page(n) => {
                let view = self.catalog().await?;
                view.set_page(n);
                println!("{}", render::catalog_page(view));
            }
            Command::Next => {
                let view = self.catalog().await?;
                view.next_page();
                println!("{}", render::catalog_page(view));
            }
            Command::Prev => {
                let view = self.catalog().await?;
                view.prev_page();
                println!("{}", render::catalog_page(view));
            }
            Command::Show(id) => {
                let product = self.api.get_product(id).await?;
                let image = self.image_url(&product.picture_ref);
                println!("{}", render::product_detail(&product, image.as_deref()));
            }
            Command::Add { id, quantity } => {
                let product = self.api.get_product(id).await?;
                let image = self.image_url(&product.picture_ref).unwrap_or_default();
                self.cart.add_item(&product, image, quantity);
                println!("{}", render::cart(&self.cart));
            }
            Command::Cart => println!("{}", render::cart(&self.cart)),
            Command::Update { id, quantity } => {
                self.cart.update_quantity(id, quantity);
                println!("{}", render::cart(&self.cart));
            }
            Command::Remove(id) => {
                self.cart.remove_item(id);
                println!("{}", render::cart(&self.cart));
            }
            Command::ClearCart => {
                self.cart.clear();
                println!("cart cleared");
            }
            Command::OpenCart => {
                self.cart.open();
                println!("{}", render::cart(&self.cart));
            }
            Command::CloseCart => self.cart.close(),
            Command::Register => {
                let account = NewAccount {
                    full_name: prompt("full name")?,
                    email: prompt("email")?,
                    username: prompt("username")?,
                    phone_number: prompt("phone number")?,
                    password: prompt("password")?,
                };
                let identity = self.session.register(&account).await?;
                println!("welcome, {}", identity.full_name);
            }
            Command::Login { email } => {
                let password = prompt("password")?;
                let identity = self.session.login(&email, &password).await?;
                println!("signed in as {}", identity.email);
            }
            Command::Logout => {
                self.session.logout().map_err(AuthError::from)?;
                println!("signed out");
            }
            Command::Whoami => match self.session.current() {
                Some(identity) => println!(
                    "{} <{}> ({})",
                    identity.username, identity.email, identity.role
                ),
                None => println!("not signed in"),
            },
            Command::Checkout => self.checkout().await?,
            Command::Paid(url) => match PaymentOutcome::from_return_url(&url) {
                PaymentOutcome::Success { order_id } => {
                    self.cart.clear();
                    self.cart.close();
                    match order_id {
                        Some(id) => println!("payment confirmed for order #{id}; cart cleared"),
                        None => println!("payment confirmed; cart cleared"),
                    }
                }
                PaymentOutcome::Cancelled => println!("payment cancelled; your cart is unchanged"),
                PaymentOutcome::Failed => println!("payment failed; your cart is unchanged"),
            },
            Command::Orders => {
                // Mirrors the account dashboard: nothing to show signed out.
                if !self.session.is_authenticated() {
                    println!("sign in to continue");
                    return Ok(());
                }
                let orders = self.api.list_orders().await?;
                println!("{}", render::orders(&orders));
            }
            Command::Sell => self.sell().await?,
            Command::Delist(id) => {
                self.api.delete_product(id).await?;
                self.catalog = None;
                println!("product #{id} delisted");
            }
            Command::Help => println!("{HELP}"),
            // Quit is handled by the loop.
            Command::Quit => {}
        }
        Ok(())
    }

    async fn checkout(&mut self) -> Result<(), ShellError> {
        let Some(identity) = self.session.current() else {
            println!("sign in to continue");
            return Ok(());
        };
        if self.cart.is_empty() {
            println!("the cart is empty");
            return Ok(());
        }

        let mut shipping = ShippingDetails::prefill(identity);
        shipping.full_name = prompt_default("full name", &shipping.full_name)?;
        shipping.email = prompt_default("email", &shipping.email)?;
        shipping.phone = prompt_default("phone", &shipping.phone)?;
        shipping.address = prompt("address")?;
        shipping.city = prompt("city")?;
        shipping.postal_code = prompt("postal code (optional)")?;

        let checkout = begin_checkout(&self.api, &self.session, &self.cart, &shipping).await?;
        println!("order created; complete payment at:");
        println!("  {}", checkout.payment_link);
        println!("then record the result with: paid <return-url>");
        Ok(())
    }

    async fn sell(&mut self) -> Result<(), ShellError> {
        let Some(identity) = self.session.current() else {
            println!("sign in to continue");
            return Ok(());
        };
        let added_by = identity.id;

        let name = prompt("name")?;
        let description = prompt("description")?;
        let raw_price = prompt("price")?;
        let Ok(price) = raw_price.parse::<Decimal>() else {
            println!("not a price: {raw_price}");
            return Ok(());
        };
        let image = prompt("image file (optional)")?;
        let image_path = (!image.is_empty()).then(|| PathBuf::from(image));

        let listing = NewProduct {
            name,
            description,
            price,
            added_by,
        };
        let created = self
            .api
            .create_product(&listing, image_path.as_deref())
            .await?;
        self.catalog = None;
        println!("listed product #{} ({})", created.id, created.name);
        Ok(())
    }

    /// The catalog view, fetching the product list on first use.
    async fn catalog(&mut self) -> Result<&mut CatalogView, ShellError> {
        if self.catalog.is_none() {
            let products = self.api.list_products().await?;
            self.catalog = Some(CatalogView::new(products));
        }
        Ok(self
            .catalog
            .get_or_insert_with(|| CatalogView::new(Vec::new())))
    }

    fn image_url(&self, picture_ref: &str) -> Option<String> {
        (!picture_ref.is_empty()).then(|| self.config.product_image_url(picture_ref))
    }
}

fn read_prompt(prompt_text: &str) -> io::Result<Option<String>> {
    print!("{prompt_text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt(label: &str) -> io::Result<String> {
    read_prompt(&format!("{label}: ")).map(|line| line.unwrap_or_default().trim().to_string())
}

fn prompt_default(label: &str, default: &str) -> io::Result<String> {
    let value = prompt(&format!("{label} [{default}]"))?;
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value
    })
}
